//! Bounded queue of synthesized keystrokes, delivered one report at a time.

use heapless::Vec;
use nisse_types::keycode::KeyCode;

use crate::MACRO_QUEUE_SIZE;

/// Ordered keystrokes waiting to be typed.
///
/// Producers append with [`MacroQueue::emit`], the report builder reads them
/// back with [`MacroQueue::begin`], [`MacroQueue::peek`] and
/// [`MacroQueue::get`]. A `KeyCode::No` entry ends the sequence when read by
/// `get`, and the queue empties itself once the sequence is exhausted.
pub struct MacroQueue<const N: usize = MACRO_QUEUE_SIZE> {
    keys: Vec<KeyCode, N>,
    cursor: usize,
    limit: usize,
}

impl<const N: usize> Default for MacroQueue<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> MacroQueue<N> {
    pub const fn new() -> Self {
        Self {
            keys: Vec::new(),
            cursor: 0,
            limit: N,
        }
    }

    /// Start reading, limited to the first `max` entries. Returns the first entry.
    pub fn begin(&mut self, max: usize) -> KeyCode {
        self.cursor = 1;
        self.limit = max.min(N);
        match self.keys.first() {
            Some(key) if self.limit > 0 => *key,
            _ => KeyCode::No,
        }
    }

    /// Next key without consuming it
    pub fn peek(&self) -> Option<KeyCode> {
        match self.keys.get(self.cursor) {
            Some(&key) if self.cursor < self.limit && key != KeyCode::No => Some(key),
            _ => None,
        }
    }

    /// Consume the next key. Once the sequence is exhausted the queue is reset and `None` returned.
    pub fn get(&mut self) -> Option<KeyCode> {
        if self.cursor < self.limit {
            if let Some(&key) = self.keys.get(self.cursor) {
                self.cursor += 1;
                if key != KeyCode::No {
                    return Some(key);
                }
            }
        }
        self.reset();
        None
    }

    /// Append one key. Keys beyond the capacity are dropped.
    pub fn emit(&mut self, key: KeyCode) {
        if self.keys.push(key).is_err() {
            warn!("Macro queue full, dropping {:?}", key);
        }
    }

    pub fn emit_string(&mut self, keys: &[KeyCode]) {
        for &key in keys {
            self.emit(key);
        }
    }

    /// Type a decimal number without leading zeros
    pub fn emit_number(&mut self, n: u16) {
        let mut divisor = 10_000;
        let mut leading = true;
        while divisor > 0 {
            let digit = (n / divisor % 10) as u8;
            if digit != 0 || !leading || divisor == 1 {
                leading = false;
                self.emit(KeyCode::from_digit(digit));
            }
            divisor /= 10;
        }
    }

    /// Every entry has been read, or nothing was emitted
    pub fn is_empty(&self) -> bool {
        self.cursor >= self.keys.len().min(self.limit)
    }

    /// Number of entries emitted since the last reset
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Entries emitted since the last reset
    pub fn as_slice(&self) -> &[KeyCode] {
        &self.keys
    }

    pub fn reset(&mut self) {
        self.keys.clear();
        self.cursor = 0;
        self.limit = N;
    }
}
