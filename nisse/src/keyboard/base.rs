use nisse_types::keycode::KeyCode;
use nisse_types::modifier::HidModifiers;

use super::Keyboard;
use crate::hid::{KeySnapshot, Transmit};
use crate::kana::KanaProcessor;
use crate::layout;
use crate::pointer::PointerDevice;
use crate::profile::ProfileController;
use crate::storage::SettingsStore;

impl<S: SettingsStore, K: KanaProcessor, P: PointerDevice, R: ProfileController> Keyboard<S, K, P, R> {
    /// Resolve the snapshot through the base layout.
    ///
    /// Shift is taken from the previous resolution (`last_shift`), not from
    /// `current`. A new key arriving in the same tick as a Shift change is
    /// held back and the snapshot is resolved again on the next tick. Keys
    /// already held stay in the report.
    pub(super) fn process_keys_base(&mut self, current: &KeySnapshot, processed: &KeySnapshot) -> Transmit {
        let mut modifiers = current.modifiers & !HidModifiers::SHIFT;
        let shift_changed = self.last_shift.shift() != current.modifiers.shift();

        if !current.extra.pad() {
            let num_lock = self.host_leds.num_lock();
            for code in current.codes.iter() {
                let make = !processed.codes.contains(code);
                if make && shift_changed {
                    self.stale = true;
                    continue;
                }
                let key = layout::resolve(code, self.settings.base, self.settings.modifier_scheme, num_lock);
                let key = self.kana.toggle_kana_mode(key, modifiers, make);
                match key.shifted_base() {
                    Some(base) => {
                        modifiers |= HidModifiers::LSHIFT;
                        self.report.push(base);
                    }
                    None => {
                        if self.last_shift.shift() && key != KeyCode::No {
                            modifiers |= HidModifiers::LSHIFT;
                        }
                        self.report.push(key);
                    }
                }
            }
        }

        self.report.modifiers = modifiers;
        self.last_shift = current.modifiers;
        Transmit::Normal
    }
}
