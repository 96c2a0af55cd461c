//! Matrix scan snapshots, matrix-code normalisation and ghost detection.

use core::future::Future;

use crate::REPORT_KEYS;

/// Number of rows of the key matrix
pub const ROWS: usize = 8;
/// Number of columns of the key matrix
pub const COLS: usize = 12;

/// Matrix code of a position without a switch, or an unused key slot
pub const VOID_CODE: u8 = 0xFF;

/// Position of a switch in the electrical matrix
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeyPos {
    pub row: u8,
    pub col: u8,
}

/// Matrix codes of revision 2 and later boards, indexed by electrical position.
const CODE_REV2: [[u8; COLS]; ROWS] = {
    const V: u8 = VOID_CODE;
    [
        [13, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 22],
        [36, 0, V, V, V, V, V, V, V, V, 11, 47],
        [84, 24, V, V, V, 65, 66, V, V, V, 35, 95],
        [85, 12, V, V, V, 77, 78, V, V, V, 23, 94],
        [86, 25, 37, 38, 39, 40, 43, 44, 45, 46, 34, 93],
        [87, 48, 49, 50, 51, 52, 55, 56, 57, 58, 59, 92],
        [88, 60, 61, 62, 63, 64, 67, 68, 69, 70, 71, 91],
        [89, 72, 73, 74, 75, 76, 79, 80, 81, 82, 83, 90],
    ]
};

impl KeyPos {
    pub const fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    /// Normalised matrix code of this position.
    ///
    /// Revision 1 boards are wired in layout order, later revisions go through
    /// a fixed remapping table. Positions without a switch give `VOID_CODE`.
    pub fn code(self, board_rev: u8) -> u8 {
        if self.row as usize >= ROWS || self.col as usize >= COLS {
            return VOID_CODE;
        }
        if board_rev >= 2 {
            CODE_REV2[self.row as usize][self.col as usize]
        } else {
            self.row * COLS as u8 + self.col
        }
    }
}

/// Row and column of a normalised matrix code, `None` for void codes
pub fn split_code(code: u8) -> Option<(usize, usize)> {
    let (row, col) = (code as usize / COLS, code as usize % COLS);
    if row < ROWS { Some((row, col)) } else { None }
}

/// Raw activation snapshot of one scan tick, one bit per column
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MatrixScan {
    rows: [u16; ROWS],
}

impl MatrixScan {
    pub const fn new() -> Self {
        Self { rows: [0; ROWS] }
    }

    /// Builder style press, handy for scanners and tests
    pub fn with(mut self, row: u8, col: u8) -> Self {
        self.set(row, col, true);
        self
    }

    pub fn set(&mut self, row: u8, col: u8, pressed: bool) {
        if row as usize >= ROWS || col as usize >= COLS {
            return;
        }
        if pressed {
            self.rows[row as usize] |= 1 << col;
        } else {
            self.rows[row as usize] &= !(1 << col);
        }
    }

    /// Asserted positions, row by row
    pub fn iter(&self) -> impl Iterator<Item = KeyPos> + '_ {
        self.rows.iter().enumerate().flat_map(|(row, bits)| {
            (0..COLS)
                .filter(move |col| bits & (1 << col) != 0)
                .map(move |col| KeyPos::new(row as u8, col as u8))
        })
    }
}

/// Source of raw matrix snapshots, polled once per scan tick.
///
/// The electrical procedure behind it (strobing, settling, diode
/// direction) belongs to the board.
pub trait MatrixScanner {
    fn scan(&mut self) -> impl Future<Output = MatrixScan>;
}

/// Up to six matrix codes, unused slots hold `VOID_CODE`
#[derive(Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeySet([u8; REPORT_KEYS]);

impl Default for KeySet {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl core::fmt::Debug for KeySet {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl KeySet {
    pub const EMPTY: Self = Self([VOID_CODE; REPORT_KEYS]);

    pub fn from_codes(codes: &[u8]) -> Self {
        let mut set = Self::EMPTY;
        for &code in codes {
            set.push(code);
        }
        set
    }

    /// Append a code, returns `false` if every slot is taken
    pub fn push(&mut self, code: u8) -> bool {
        match self.0.iter_mut().find(|slot| **slot == VOID_CODE) {
            Some(slot) => {
                *slot = code;
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, code: u8) -> bool {
        code != VOID_CODE && self.0.contains(&code)
    }

    pub fn is_empty(&self) -> bool {
        self.0[0] == VOID_CODE
    }

    pub fn is_full(&self) -> bool {
        self.0[REPORT_KEYS - 1] != VOID_CODE
    }

    /// Codes in slot order, void slots skipped
    pub fn iter(&self) -> impl Iterator<Item = u8> + '_ {
        self.0.iter().copied().filter(|code| *code != VOID_CODE)
    }
}

/// Per-tick row/column activation counters.
///
/// Two rows with two or more active columns, together with two columns with
/// two or more active rows, can't be told apart from a phantom fourth key in
/// a diode-less matrix.
#[derive(Debug, Default)]
pub struct GhostDetector {
    rows: [u8; ROWS],
    cols: [u8; COLS],
}

impl GhostDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one asserted position
    pub fn count(&mut self, pos: KeyPos) {
        if let (Some(r), Some(c)) = (self.rows.get_mut(pos.row as usize), self.cols.get_mut(pos.col as usize)) {
            *r = r.saturating_add(1);
            *c = c.saturating_add(1);
        }
    }

    /// Returns `true` if this tick is ambiguous, then resets the counters
    pub fn detect(&mut self) -> bool {
        let rx = self.rows.iter().filter(|n| **n >= 2).count();
        let cx = self.cols.iter().filter(|n| **n >= 2).count();
        self.rows = [0; ROWS];
        self.cols = [0; COLS];
        rx >= 2 && cx >= 2
    }
}
