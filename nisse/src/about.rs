//! On-keyboard confirmation text.
//!
//! The keyboard has no display, so settings are reported by typing them into
//! whatever has the host focus. Every name ends with Enter.

use nisse_types::keycode::KeyCode::{self, *};
use nisse_types::settings::{BaseLayout, DebounceDelay, LedScheme, ModScheme, OsProfile, PrefixShift, Settings};

use crate::config::KeyboardConfig;
use crate::kana::KanaProcessor;
use crate::macro_queue::MacroQueue;
use crate::pointer::PointerDevice;
use crate::profile::ProfileController;

const TITLE: &[KeyCode] = &[E, S, R, I, L, L, E, Space, N, I, S, S, E, Enter];
const REV: &[KeyCode] = &[R, E, V, Dot, Space];
const VER: &[KeyCode] = &[V, E, R, Dot, Space];
const COPYRIGHT: &[KeyCode] = &[
    C, O, P, Y, R, I, G, H, T, Space, Kc2, Kc0, Kc1, Kc3, Minus, Kc2, Kc0, Kc1, Kc6, Space, E, S, R, I, L, L, E,
    Space, I, N, C, Dot, Enter,
];
const BLE: &[KeyCode] = &[B, L, E, Space, M, O, D, U, L, E, Enter];
const KVM: &[KeyCode] = &[K, V, M, Space];
const LESC: &[KeyCode] = &[L, E, S, C, Space];

pub fn os_name(os: OsProfile) -> &'static [KeyCode] {
    match os {
        OsProfile::Pc => &[P, C, Enter],
        OsProfile::Mac => &[M, A, C, Enter],
        OsProfile::Us104A => &[Kc1, Kc0, Kc4, A, Enter],
        OsProfile::Us104B => &[Kc1, Kc0, Kc4, B, Enter],
        OsProfile::Jp109A => &[Kc1, Kc0, Kc9, A, Enter],
        OsProfile::Jp109B => &[Kc1, Kc0, Kc9, B, Enter],
        OsProfile::AltSpace => &[A, L, T, S, P, Enter],
        OsProfile::ShiftSpace => &[S, F, T, S, P, Enter],
    }
}

pub fn base_name(base: BaseLayout) -> &'static [KeyCode] {
    match base {
        BaseLayout::Qwerty => &[U, S, Enter],
        BaseLayout::Dvorak => &[U, S, Minus, D, Enter],
        BaseLayout::Colemak => &[U, S, Minus, C, Enter],
        BaseLayout::Jis => &[J, P, Enter],
        BaseLayout::NicolaF => &[J, P, Minus, N, Enter],
        BaseLayout::Zq => &[U, S, Minus, Z, Enter],
    }
}

pub fn delay_name(delay: DebounceDelay) -> &'static [KeyCode] {
    match delay {
        DebounceDelay::D0 => &[D, Kc0, Enter],
        DebounceDelay::D12 => &[D, Kc1, Kc2, Enter],
        DebounceDelay::D24 => &[D, Kc2, Kc4, Enter],
        DebounceDelay::D36 => &[D, Kc3, Kc6, Enter],
        DebounceDelay::D48 => &[D, Kc4, Kc8, Enter],
    }
}

pub fn mod_name(scheme: ModScheme) -> &'static [KeyCode] {
    match scheme {
        ModScheme::C => &[C, Enter],
        ModScheme::CJ => &[C, J, Enter],
        ModScheme::CJMac => &[C, J, M, A, C, Enter],
        ModScheme::S => &[S, Enter],
        ModScheme::SJ => &[S, J, Enter],
        ModScheme::SJMac => &[S, J, M, A, C, Enter],
        ModScheme::CX => &[C, X, Enter],
        ModScheme::SX => &[S, X, Enter],
    }
}

pub fn prefix_name(prefix: PrefixShift) -> &'static [KeyCode] {
    match prefix {
        PrefixShift::Off => &[O, F, F, Enter],
        PrefixShift::On => &[O, N, Enter],
        PrefixShift::Led => &[L, E, D, Enter],
    }
}

pub fn led_name(led: LedScheme) -> &'static [KeyCode] {
    match led {
        LedScheme::Default => &[D, E, F, Enter],
        LedScheme::Off => &[O, F, F, Enter],
    }
}

/// Type `x.yz` from a version with one digit per nibble
fn emit_version(macros: &mut MacroQueue, version: u16) {
    macros.emit(KeyCode::from_digit(((version >> 8) & 0xf) as u8));
    macros.emit(Dot);
    macros.emit(KeyCode::from_digit(((version >> 4) & 0xf) as u8));
    macros.emit(KeyCode::from_digit((version & 0xf) as u8));
}

/// Type the board identification and every current setting
pub fn emit_about(
    macros: &mut MacroQueue,
    config: &KeyboardConfig,
    settings: &Settings,
    kana: &impl KanaProcessor,
    pointer: &impl PointerDevice,
    profile: &impl ProfileController,
) {
    macros.emit_string(TITLE);

    macros.emit_string(REV);
    macros.emit(KeyCode::from_digit(config.board_rev));
    macros.emit(Enter);

    macros.emit_string(VER);
    emit_version(macros, config.version);
    macros.emit(Enter);

    if config.profiles {
        macros.emit_string(BLE);
        macros.emit_string(REV);
        macros.emit(KeyCode::from_digit(profile.radio_revision() & 0xf));
        macros.emit(Enter);

        macros.emit_string(VER);
        emit_version(macros, profile.radio_version());
        macros.emit(Enter);

        macros.emit_string(COPYRIGHT);

        macros.emit_string(KVM);
        macros.emit(KeyCode::from_digit(profile.current_profile()));
        macros.emit(Enter);

        if !profile.is_usb_mode() {
            macros.emit_string(LESC);
            macros.emit(KeyCode::from_digit(profile.lesc()));
            macros.emit(Enter);
        }
    } else {
        macros.emit_string(COPYRIGHT);
    }

    macros.emit_string(&[F, Kc2, Space]);
    macros.emit_string(os_name(settings.os));
    macros.emit_string(&[F, Kc3, Space]);
    macros.emit_string(base_name(settings.base));
    macros.emit_string(&[F, Kc4, Space]);
    kana.emit_kana_name(macros);
    macros.emit_string(&[F, Kc5, Space]);
    macros.emit_string(delay_name(settings.delay));
    macros.emit_string(&[F, Kc6, Space]);
    macros.emit_string(mod_name(settings.modifier_scheme));
    macros.emit_string(&[F, Kc7, Space]);
    kana.emit_ime_name(macros);
    macros.emit_string(&[F, Kc8, Space]);
    macros.emit_string(led_name(settings.led));
    macros.emit_string(&[F, Kc9, Space]);
    macros.emit_string(prefix_name(settings.prefix_shift));

    pointer.emit_settings(macros);

    if config.profiles && !profile.is_bus_powered() {
        let voltage = profile.battery_voltage();
        if voltage > 0 {
            macros.emit(KeyCode::from_digit((voltage / 100) as u8));
            macros.emit(Dot);
            let hundredths = voltage % 100;
            macros.emit(KeyCode::from_digit((hundredths / 10) as u8));
            macros.emit(KeyCode::from_digit((hundredths % 10) as u8));
            macros.emit(V);
            macros.emit(Space);
            macros.emit_number(profile.battery_level() as u16);
            macros.emit(KpPercent);
            macros.emit(Enter);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kana::NoKana;
    use crate::pointer::NoPointer;
    use crate::profile::NoProfile;

    struct Battery;

    impl ProfileController for Battery {
        fn select_profile(&mut self, _profile: u8) {}

        fn current_profile(&self) -> u8 {
            2
        }

        fn is_usb_mode(&self) -> bool {
            false
        }

        fn is_bus_powered(&self) -> bool {
            false
        }

        fn clear_bonding(&mut self) {}

        fn lesc(&self) -> u8 {
            1
        }

        fn battery_voltage(&self) -> u16 {
            295
        }

        fn battery_level(&self) -> u8 {
            80
        }
    }

    fn contains(haystack: &[KeyCode], needle: &[KeyCode]) -> bool {
        haystack.windows(needle.len()).any(|w| w == needle)
    }

    #[test]
    fn test_names_end_with_enter() {
        for os in 0..OsProfile::COUNT {
            assert_eq!(os_name(OsProfile::from_stored(os)).last(), Some(&Enter));
        }
        for base in 0..BaseLayout::COUNT {
            assert_eq!(base_name(BaseLayout::from_stored(base)).last(), Some(&Enter));
        }
        for scheme in 0..ModScheme::COUNT_DUAL_ROLE {
            assert_eq!(mod_name(ModScheme::from_stored(scheme, true)).last(), Some(&Enter));
        }
    }

    #[test]
    fn test_wired_banner() {
        let mut macros = MacroQueue::new();
        let config = KeyboardConfig {
            version: 0x123,
            ..KeyboardConfig::default()
        };
        emit_about(&mut macros, &config, &Settings::default(), &NoKana, &NoPointer, &NoProfile);
        let typed = macros.as_slice();
        assert!(typed.starts_with(TITLE));
        assert!(contains(typed, &[V, E, R, Dot, Space, Kc1, Dot, Kc2, Kc3, Enter]));
        assert!(contains(typed, COPYRIGHT));
        assert!(!contains(typed, BLE));
        assert!(contains(typed, &[F, Kc3, Space, U, S, Minus, Z, Enter]));
        assert!(typed.ends_with(&[F, Kc9, Space, O, F, F, Enter]));
    }

    #[test]
    fn test_battery_banner() {
        let mut macros = MacroQueue::new();
        let config = KeyboardConfig {
            profiles: true,
            ..KeyboardConfig::default()
        };
        emit_about(&mut macros, &config, &Settings::default(), &NoKana, &NoPointer, &Battery);
        let typed = macros.as_slice();
        assert!(contains(typed, &[K, V, M, Space, Kc2, Enter]));
        assert!(contains(typed, &[L, E, S, C, Space, Kc1, Enter]));
        assert!(typed.ends_with(&[Kc2, Dot, Kc9, Kc5, V, Space, Kc8, Kc0, KpPercent, Enter]));
    }
}
