//! Report buffer, key snapshots and transmit directives.

use nisse_types::keycode::KeyCode;
use nisse_types::modifier::{ExtraModifiers, HidModifiers};

use crate::REPORT_KEYS;
use crate::descriptor::KeyboardReport;
use crate::matrix::KeySet;

/// What the transport has to do with the report built in a tick
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Transmit {
    /// Nothing changed, don't send
    #[default]
    None,
    /// Send the report once
    Normal,
    /// Send the report, then drain the macro queue one entry per tick, each
    /// entry pressed and released verbatim
    InOrder,
    /// Send the report, then drain the macro queue one key per tick,
    /// releasing only between repeated keys and at the end
    Macro,
    /// Board mode changed, discard the report
    Break,
}

impl Transmit {
    /// The report of this tick has to reach the host
    pub fn is_report(self) -> bool {
        matches!(self, Transmit::Normal | Transmit::InOrder | Transmit::Macro)
    }

    /// Following ticks drain the macro queue
    pub fn is_macro(self) -> bool {
        matches!(self, Transmit::InOrder | Transmit::Macro)
    }
}

/// Keyboard state seen by one tick: modifiers plus the debounced matrix codes.
///
/// Comparing two snapshots is how the pipeline decides whether anything changed.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeySnapshot {
    pub modifiers: HidModifiers,
    pub extra: ExtraModifiers,
    pub codes: KeySet,
}

/// Outgoing keyboard report, modifiers and up to six keys.
///
/// Keys are packed from the first slot, empty slots hold `KeyCode::No`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Report {
    pub modifiers: HidModifiers,
    pub keys: [KeyCode; REPORT_KEYS],
}

impl Report {
    pub fn new(modifiers: HidModifiers, keys: &[KeyCode]) -> Self {
        let mut report = Self {
            modifiers,
            ..Default::default()
        };
        for &key in keys {
            report.push(key);
        }
        report
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn len(&self) -> usize {
        self.keys.iter().take_while(|k| **k != KeyCode::No).count()
    }

    pub fn is_empty(&self) -> bool {
        self.keys[0] == KeyCode::No
    }

    pub fn is_full(&self) -> bool {
        self.len() == REPORT_KEYS
    }

    pub fn contains(&self, key: KeyCode) -> bool {
        key != KeyCode::No && self.keys.contains(&key)
    }

    /// Add a key to the next free slot.
    ///
    /// `No`, duplicates and codes outside the HID keyboard page are skipped.
    /// Returns `false` only when the report is already full.
    pub fn push(&mut self, key: KeyCode) -> bool {
        let len = self.len();
        if len == REPORT_KEYS {
            return false;
        }
        if key != KeyCode::No && key.is_hid() && !self.contains(key) {
            self.keys[len] = key;
        }
        true
    }

    /// Delete the key at `index`, shifting later keys left
    pub fn remove(&mut self, index: usize) {
        if index >= REPORT_KEYS {
            return;
        }
        self.keys.copy_within(index + 1.., index);
        self.keys[REPORT_KEYS - 1] = KeyCode::No;
    }

    pub fn to_keyboard_report(&self) -> KeyboardReport {
        let mut keycodes = [0u8; REPORT_KEYS];
        for (slot, key) in keycodes.iter_mut().zip(self.keys.iter()) {
            *slot = *key as u8;
        }
        KeyboardReport {
            modifier: self.modifiers.into_bits(),
            reserved: 0,
            leds: 0,
            keycodes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_caps_at_six() {
        let mut report = Report::default();
        for key in [KeyCode::A, KeyCode::B, KeyCode::C, KeyCode::D, KeyCode::E, KeyCode::F] {
            assert!(report.push(key));
        }
        assert!(report.is_full());
        assert!(!report.push(KeyCode::G));
        assert!(!report.contains(KeyCode::G));
    }

    #[test]
    fn test_push_skips_duplicates_and_private_codes() {
        let mut report = Report::default();
        report.push(KeyCode::A);
        report.push(KeyCode::A);
        report.push(KeyCode::ZqHomeDir);
        report.push(KeyCode::No);
        assert_eq!(report.len(), 1);
    }

    #[test]
    fn test_remove_shifts_left() {
        let mut report = Report::new(HidModifiers::new(), &[KeyCode::A, KeyCode::Application, KeyCode::B]);
        report.remove(1);
        assert_eq!(report.keys[..3], [KeyCode::A, KeyCode::B, KeyCode::No]);
    }

    #[test]
    fn test_to_keyboard_report() {
        let report = Report::new(HidModifiers::LSHIFT, &[KeyCode::A]);
        let hid = report.to_keyboard_report();
        assert_eq!(hid.modifier, 0x02);
        assert_eq!(hid.keycodes, [0x04, 0, 0, 0, 0, 0]);
    }
}
