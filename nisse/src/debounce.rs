//! Debounce history ring.
//!
//! Each tick records the non-modifier codes asserted during that tick. A code
//! is considered pressed once it has been present in every one of the last
//! `delay + 1` records, so a bounce shorter than the window never reaches a
//! report.

use crate::matrix::KeySet;
use crate::{DELAY_MAX, HISTORY_DEPTH};

pub struct HistoryRing {
    slots: [KeySet; HISTORY_DEPTH],
    current: usize,
}

impl Default for HistoryRing {
    fn default() -> Self {
        Self::new()
    }
}

impl HistoryRing {
    pub fn new() -> Self {
        Self {
            slots: [KeySet::EMPTY; HISTORY_DEPTH],
            current: 0,
        }
    }

    /// Store the codes asserted during the current tick
    pub fn record(&mut self, codes: KeySet) {
        self.slots[self.current] = codes;
    }

    /// Repeat the previous tick's record, used when the current scan can't be trusted
    pub fn repeat_previous(&mut self) {
        self.slots[self.current] = self.slots[self.back(1)];
    }

    /// Codes present in every record from `delay` ticks ago up to the current one.
    ///
    /// `delay` is clamped to `DELAY_MAX`. Codes keep the order of the oldest record.
    pub fn stable(&self, delay: usize) -> KeySet {
        let delay = delay.min(DELAY_MAX);
        let oldest = self.slots[self.back(delay)];
        let mut stable = KeySet::EMPTY;
        for code in oldest.iter() {
            if (0..delay).all(|age| self.slots[self.back(age)].contains(code)) {
                stable.push(code);
            }
        }
        stable
    }

    /// Move to the next slot, once per tick
    pub fn advance(&mut self) {
        self.current = (self.current + 1) % HISTORY_DEPTH;
    }

    fn back(&self, age: usize) -> usize {
        (self.current + HISTORY_DEPTH - age) % HISTORY_DEPTH
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tick(ring: &mut HistoryRing, codes: &[u8], delay: usize) -> KeySet {
        ring.record(KeySet::from_codes(codes));
        let stable = ring.stable(delay);
        ring.advance();
        stable
    }

    #[test]
    fn test_no_delay_is_immediate() {
        let mut ring = HistoryRing::new();
        assert!(tick(&mut ring, &[5], 0).contains(5));
        assert!(tick(&mut ring, &[], 0).is_empty());
    }

    #[test]
    fn test_key_needs_delay_plus_one_ticks() {
        for delay in 1..=DELAY_MAX {
            let mut ring = HistoryRing::new();
            for _ in 0..delay {
                assert!(tick(&mut ring, &[7], delay).is_empty());
            }
            assert!(tick(&mut ring, &[7], delay).contains(7));
        }
    }

    #[test]
    fn test_short_bounce_rejected() {
        let mut ring = HistoryRing::new();
        let delay = 3;
        // Asserted for `delay` ticks only
        for _ in 0..delay {
            assert!(tick(&mut ring, &[9], delay).is_empty());
        }
        for _ in 0..HISTORY_DEPTH {
            assert!(tick(&mut ring, &[], delay).is_empty());
        }
    }

    #[test]
    fn test_release_is_immediate() {
        let mut ring = HistoryRing::new();
        for _ in 0..3 {
            tick(&mut ring, &[1, 2], 1);
        }
        // Key 2 released, 1 held
        let stable = tick(&mut ring, &[1], 1);
        assert!(stable.contains(1));
        assert!(!stable.contains(2));
    }

    #[test]
    fn test_repeat_previous() {
        let mut ring = HistoryRing::new();
        tick(&mut ring, &[4], 0);
        ring.repeat_previous();
        assert!(ring.stable(0).contains(4));
        assert!(ring.stable(1).contains(4));
    }

    #[test]
    fn test_delay_clamped() {
        let mut ring = HistoryRing::new();
        for _ in 0..=DELAY_MAX {
            tick(&mut ring, &[3], 0);
        }
        ring.record(KeySet::from_codes(&[3]));
        assert!(ring.stable(100).contains(3));
    }
}
