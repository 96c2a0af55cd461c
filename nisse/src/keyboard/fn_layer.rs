//! FN and FN2 layers.

use nisse_types::keycode::KeyCode;
use nisse_types::modifier::HidModifiers;
use nisse_types::settings::SettingKey;

use super::Keyboard;
use crate::about;
use crate::hid::{KeySnapshot, Transmit};
use crate::kana::KanaProcessor;
use crate::layout::{self, FnBank};
use crate::pointer::PointerDevice;
use crate::profile::ProfileController;
use crate::storage::SettingsStore;

/// What a key of the FN layers does
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Action {
    /// Nothing, either an empty position or a command key being held
    None,
    /// Type the board information and every setting
    About,
    /// Switch to profile 0..=3
    SelectProfile(u8),
    SwitchOs,
    SwitchBase,
    SwitchKana,
    SwitchDelay,
    SwitchMod,
    SwitchIme,
    SwitchLed,
    SwitchPrefix,
    /// Forget the bonded hosts
    ClearBonding,
    /// Added to the modifier byte instead of a key slot
    Modifier(HidModifiers),
    /// Typed through the macro queue, consecutive keys roll over
    Macro(&'static [KeyCode]),
    /// Typed through the macro queue, every entry pressed and released
    InOrder(&'static [KeyCode]),
    Key(KeyCode),
}

impl Action {
    /// Meaning of a key of the FN layer.
    ///
    /// Commands fire on `make` only. `profiles` enables the profile and bonding
    /// commands, which are reached with Shift held. Bonding data can only be
    /// cleared over the radio, `usb` tells whether the board is on USB.
    pub fn from_fn_key(key: KeyCode, make: bool, shift: bool, profiles: bool, usb: bool) -> Action {
        if let Some(index) = key.function_index().filter(|i| *i <= 9) {
            if !make {
                return Action::None;
            }
            if profiles && shift && index <= 4 {
                return Action::SelectProfile(index % 4);
            }
            return match index {
                1 => Action::About,
                2 => Action::SwitchOs,
                3 => Action::SwitchBase,
                4 => Action::SwitchKana,
                5 => Action::SwitchDelay,
                6 => Action::SwitchMod,
                7 => Action::SwitchIme,
                8 => Action::SwitchLed,
                _ => Action::SwitchPrefix,
            };
        }
        match key {
            KeyCode::No => Action::None,
            KeyCode::Escape if profiles => match (make, !usb && shift) {
                (false, _) => Action::None,
                (true, true) => Action::ClearBonding,
                (true, false) => Action::Key(key),
            },
            KeyCode::Kp00 | KeyCode::Kp000 | KeyCode::ZqHomeDir | KeyCode::ZqSoftTab2 if !make => Action::None,
            KeyCode::Kp00 => Action::Macro(&[KeyCode::Kc0, KeyCode::Kc0]),
            KeyCode::Kp000 => Action::Macro(&[KeyCode::Kc0, KeyCode::Kc0, KeyCode::Kc0]),
            KeyCode::ZqHomeDir => Action::InOrder(&[KeyCode::No, KeyCode::ZqMacroTilde, KeyCode::Slash]),
            KeyCode::ZqSoftTab2 => Action::Macro(&[KeyCode::Space, KeyCode::Space]),
            _ => Action::from_fn2_key(key),
        }
    }

    /// Meaning of a key of the FN2 layer, which has no commands
    pub fn from_fn2_key(key: KeyCode) -> Action {
        match key {
            KeyCode::No => Action::None,
            KeyCode::LCtrl | KeyCode::RCtrl | KeyCode::LShift | KeyCode::RShift => {
                Action::Modifier(key.to_hid_modifiers())
            }
            _ => Action::Key(key),
        }
    }
}

impl<S: SettingsStore, K: KanaProcessor, P: PointerDevice, R: ProfileController> Keyboard<S, K, P, R> {
    pub(super) fn process_keys_fn(&mut self, current: &KeySnapshot, processed: &KeySnapshot) -> Transmit {
        let mut modifiers = current.modifiers;
        let mut xmit = Transmit::Normal;
        let shift = current.modifiers.shift();
        let usb = self.profile.is_usb_mode();

        for code in current.codes.iter() {
            if xmit == Transmit::Macro {
                break;
            }
            let make = !processed.codes.contains(code);
            for &key in layout::fn_keys(code, FnBank::Fn, self.settings.base) {
                if self.report.is_full() {
                    break;
                }
                match Action::from_fn_key(key, make, shift, self.config.profiles, usb) {
                    Action::None => {}
                    Action::Modifier(m) => modifiers |= m,
                    Action::Key(key) => {
                        let key = self.kana.toggle_kana_mode(key, current.modifiers, make);
                        self.report.push(key);
                    }
                    Action::SelectProfile(profile) => {
                        self.switch_profile(profile);
                        modifiers &= !(HidModifiers::CTRL | HidModifiers::SHIFT);
                        xmit = Transmit::Break;
                    }
                    Action::ClearBonding => {
                        info!("Clearing bonding data");
                        self.profile.clear_bonding();
                        modifiers &= !(HidModifiers::CTRL | HidModifiers::SHIFT);
                        xmit = Transmit::Break;
                    }
                    Action::Macro(keys) => {
                        self.macros.emit_string(keys);
                        xmit = Transmit::Macro;
                    }
                    Action::InOrder(keys) => {
                        self.macros.emit_string(keys);
                        xmit = Transmit::InOrder;
                    }
                    command => {
                        self.run_command(command);
                        xmit = Transmit::Macro;
                    }
                }
            }
        }
        self.report.modifiers = modifiers;
        xmit
    }

    pub(super) fn process_keys_fn2(&mut self, current: &KeySnapshot, processed: &KeySnapshot) -> Transmit {
        let mut modifiers = current.modifiers;
        for code in current.codes.iter() {
            let make = !processed.codes.contains(code);
            for &key in layout::fn_keys(code, FnBank::Fn2, self.settings.base) {
                if self.report.is_full() {
                    break;
                }
                match Action::from_fn2_key(key) {
                    Action::Modifier(m) => modifiers |= m,
                    Action::Key(key) => {
                        let key = self.kana.toggle_kana_mode(key, current.modifiers, make);
                        self.report.push(key);
                    }
                    _ => {}
                }
            }
        }
        if self.config.profiles && self.report.is_empty() {
            modifiers &= !HidModifiers::SHIFT;
        }
        self.report.modifiers = modifiers;
        Transmit::Normal
    }

    /// Run a configuration command, confirming the new value through the macro queue
    fn run_command(&mut self, command: Action) {
        match command {
            Action::About => {
                info!("Typing about banner");
                about::emit_about(
                    &mut self.macros,
                    &self.config,
                    &self.settings,
                    &self.kana,
                    &self.pointer,
                    &self.profile,
                );
            }
            Action::SwitchOs => {
                self.settings.os = self.settings.os.next();
                self.persist(SettingKey::OsProfile);
                self.macros.emit_string(about::os_name(self.settings.os));
            }
            Action::SwitchBase => {
                self.settings.base = self.settings.base.next();
                self.persist(SettingKey::BaseLayout);
                self.macros.emit_string(about::base_name(self.settings.base));
            }
            Action::SwitchKana => {
                self.settings.kana_layout = self.kana.switch_kana();
                self.persist(SettingKey::KanaLayout);
                self.kana.emit_kana_name(&mut self.macros);
            }
            Action::SwitchDelay => {
                self.settings.delay = self.settings.delay.next();
                self.persist(SettingKey::DebounceDelay);
                self.macros.emit_string(about::delay_name(self.settings.delay));
            }
            Action::SwitchMod => {
                self.settings.modifier_scheme = self.settings.modifier_scheme.next(self.config.dual_role_fn);
                self.persist(SettingKey::ModScheme);
                self.macros.emit_string(about::mod_name(self.settings.modifier_scheme));
            }
            Action::SwitchIme => {
                self.settings.ime = self.kana.switch_ime();
                self.persist(SettingKey::ImeMode);
                self.kana.emit_ime_name(&mut self.macros);
            }
            Action::SwitchLed => {
                self.settings.led = self.settings.led.next();
                self.persist(SettingKey::LedScheme);
                self.macros.emit_string(about::led_name(self.settings.led));
            }
            Action::SwitchPrefix => {
                self.settings.prefix_shift = self.settings.prefix_shift.next();
                self.persist(SettingKey::PrefixShift);
                self.macros.emit_string(about::prefix_name(self.settings.prefix_shift));
            }
            _ => {}
        }
    }

    fn persist(&mut self, key: SettingKey) {
        let value = self.settings.stored(key);
        info!("Setting {:?} switched to {}", key, value);
        self.store.write(key, value);
    }

    fn switch_profile(&mut self, profile: u8) {
        info!("Switching to profile {}", profile);
        self.profile.select_profile(profile);
        self.reload_settings();
        self.pointer.load();
    }
}
