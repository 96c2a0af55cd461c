//! Persisted keyboard settings.
//!
//! Every setting is stored as a single byte. A stored value that doesn't map
//! to a known variant is normalised to the first variant on load, never
//! rejected.

use serde::{Deserialize, Serialize};
use strum::FromRepr;

/// Identifies one persisted byte. The discriminant is the storage offset.
#[repr(u8)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, FromRepr)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SettingKey {
    BaseLayout = 0,
    KanaLayout = 1,
    OsProfile = 2,
    DebounceDelay = 3,
    ModScheme = 4,
    LedScheme = 5,
    ImeMode = 6,
    PrefixShift = 7,
}

impl SettingKey {
    pub const ALL: [SettingKey; 8] = [
        SettingKey::BaseLayout,
        SettingKey::KanaLayout,
        SettingKey::OsProfile,
        SettingKey::DebounceDelay,
        SettingKey::ModScheme,
        SettingKey::LedScheme,
        SettingKey::ImeMode,
        SettingKey::PrefixShift,
    ];
}

/// Base (non-FN) layouts
#[repr(u8)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize, FromRepr, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(postcard::experimental::max_size::MaxSize)]
pub enum BaseLayout {
    #[default]
    Qwerty = 0,
    Dvorak = 1,
    Colemak = 2,
    Jis = 3,
    NicolaF = 4,
    /// Compact layout with private shifted symbols and prefix shift
    Zq = 5,
}

impl BaseLayout {
    pub const COUNT: u8 = 6;

    pub fn from_stored(value: u8) -> Self {
        Self::from_repr(value).unwrap_or(Self::Qwerty)
    }

    pub fn next(self) -> Self {
        Self::from_stored((self as u8 + 1) % Self::COUNT)
    }

    /// Layouts sending JIS scan codes
    pub fn is_jp(self) -> bool {
        matches!(self, BaseLayout::Jis | BaseLayout::NicolaF)
    }
}

/// Host operating system quirk profiles
#[repr(u8)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize, FromRepr, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(postcard::experimental::max_size::MaxSize)]
pub enum OsProfile {
    #[default]
    Pc = 0,
    Mac = 1,
    /// US 104 keyboard, IME toggled by Ctrl+Shift+Space/Backspace
    Us104A = 2,
    /// US 104 keyboard, IME toggled by Alt+`
    Us104B = 3,
    /// JP 109 keyboard, IME toggled by Ctrl+Shift+convert keys
    Jp109A = 4,
    /// JP 109 keyboard, IME toggled by zenkaku
    Jp109B = 5,
    /// IME toggled by Alt+Space
    AltSpace = 6,
    /// IME toggled by Shift+Space
    ShiftSpace = 7,
}

impl OsProfile {
    pub const COUNT: u8 = 8;

    pub fn from_stored(value: u8) -> Self {
        Self::from_repr(value).unwrap_or(Self::Pc)
    }

    pub fn next(self) -> Self {
        Self::from_stored((self as u8 + 1) % Self::COUNT)
    }
}

/// Debounce window, in scan ticks
#[repr(u8)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize, FromRepr, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(postcard::experimental::max_size::MaxSize)]
pub enum DebounceDelay {
    D0 = 0,
    #[default]
    D12 = 1,
    D24 = 2,
    D36 = 3,
    D48 = 4,
}

impl DebounceDelay {
    pub const COUNT: u8 = 5;

    pub fn from_stored(value: u8) -> Self {
        Self::from_repr(value).unwrap_or(Self::D0)
    }

    pub fn next(self) -> Self {
        Self::from_stored((self as u8 + 1) % Self::COUNT)
    }

    /// Number of extra ticks a key must stay asserted
    pub fn ticks(self) -> usize {
        self as usize
    }
}

/// Modifier position schemes.
///
/// `C*` schemes keep Control on the outer position, `S*` schemes swap it
/// with Shift. `J` schemes put the IME keys next to the space bar.
#[repr(u8)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize, FromRepr, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(postcard::experimental::max_size::MaxSize)]
pub enum ModScheme {
    #[default]
    C = 0,
    CJ = 1,
    CJMac = 2,
    S = 3,
    SJ = 4,
    SJMac = 5,
    /// `C` with dual-role FN keys
    CX = 6,
    /// `S` with dual-role FN keys
    SX = 7,
}

impl ModScheme {
    /// Number of schemes available on boards without dual-role FN
    pub const COUNT: u8 = 6;
    /// Number of schemes available on boards with dual-role FN
    pub const COUNT_DUAL_ROLE: u8 = 8;

    pub fn from_stored(value: u8, dual_role_fn: bool) -> Self {
        let count = if dual_role_fn { Self::COUNT_DUAL_ROLE } else { Self::COUNT };
        if value < count {
            Self::from_repr(value).unwrap_or(Self::C)
        } else {
            Self::C
        }
    }

    pub fn next(self, dual_role_fn: bool) -> Self {
        let count = if dual_role_fn { Self::COUNT_DUAL_ROLE } else { Self::COUNT };
        Self::from_stored((self as u8 + 1) % count, dual_role_fn)
    }

    /// The scheme whose modifier table is used for remapping
    pub fn table(self) -> Self {
        match self {
            ModScheme::CX => ModScheme::C,
            ModScheme::SX => ModScheme::S,
            other => other,
        }
    }

    pub fn is_dual_role_fn(self) -> bool {
        matches!(self, ModScheme::CX | ModScheme::SX)
    }

    pub fn is_mac(self) -> bool {
        matches!(self, ModScheme::CJMac | ModScheme::SJMac)
    }
}

/// Prefix (sticky) shift behaviour in Kana mode
#[repr(u8)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize, FromRepr, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(postcard::experimental::max_size::MaxSize)]
pub enum PrefixShift {
    #[default]
    Off = 0,
    On = 1,
    /// Enabled, and in Kana mode an armed prefix lights Scroll Lock (Shift),
    /// Caps Lock (FN) or Num Lock (FN2)
    Led = 2,
}

impl PrefixShift {
    pub const COUNT: u8 = 3;

    pub fn from_stored(value: u8) -> Self {
        Self::from_repr(value).unwrap_or(Self::Off)
    }

    pub fn next(self) -> Self {
        Self::from_stored((self as u8 + 1) % Self::COUNT)
    }

    pub fn is_enabled(self) -> bool {
        self != PrefixShift::Off
    }
}

/// Which indicators the keyboard itself drives
#[repr(u8)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize, FromRepr, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(postcard::experimental::max_size::MaxSize)]
pub enum LedScheme {
    /// Host LEDs plus the keyboard's own mode indicators
    #[default]
    Default = 0,
    /// Host LEDs only
    Off = 1,
}

impl LedScheme {
    pub const COUNT: u8 = 2;

    pub fn from_stored(value: u8) -> Self {
        Self::from_repr(value).unwrap_or(Self::Default)
    }

    pub fn next(self) -> Self {
        Self::from_stored((self as u8 + 1) % Self::COUNT)
    }
}

/// Snapshot of every persisted setting.
///
/// The postcard encoding of this struct is one byte per field, in
/// `SettingKey` order, so a whole snapshot can be written in one go.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(postcard::experimental::max_size::MaxSize)]
pub struct Settings {
    pub base: BaseLayout,
    /// Owned by the Kana collaborator, stored verbatim
    pub kana_layout: u8,
    pub os: OsProfile,
    pub delay: DebounceDelay,
    pub modifier_scheme: ModScheme,
    pub led: LedScheme,
    /// Owned by the Kana collaborator, stored verbatim
    pub ime: u8,
    pub prefix_shift: PrefixShift,
}

impl Default for Settings {
    /// Factory defaults written to a blank store
    fn default() -> Self {
        Self {
            base: BaseLayout::Zq,
            kana_layout: 0,
            os: OsProfile::Pc,
            delay: DebounceDelay::D12,
            modifier_scheme: ModScheme::C,
            led: LedScheme::Default,
            ime: 0,
            prefix_shift: PrefixShift::Off,
        }
    }
}

impl Settings {
    /// Build a snapshot from raw stored bytes, normalising out-of-range values
    pub fn from_stored(read: impl Fn(SettingKey) -> u8, dual_role_fn: bool) -> Self {
        Self {
            base: BaseLayout::from_stored(read(SettingKey::BaseLayout)),
            kana_layout: read(SettingKey::KanaLayout),
            os: OsProfile::from_stored(read(SettingKey::OsProfile)),
            delay: DebounceDelay::from_stored(read(SettingKey::DebounceDelay)),
            modifier_scheme: ModScheme::from_stored(read(SettingKey::ModScheme), dual_role_fn),
            led: LedScheme::from_stored(read(SettingKey::LedScheme)),
            ime: read(SettingKey::ImeMode),
            prefix_shift: PrefixShift::from_stored(read(SettingKey::PrefixShift)),
        }
    }

    /// Raw byte of the given setting
    pub fn stored(&self, key: SettingKey) -> u8 {
        match key {
            SettingKey::BaseLayout => self.base as u8,
            SettingKey::KanaLayout => self.kana_layout,
            SettingKey::OsProfile => self.os as u8,
            SettingKey::DebounceDelay => self.delay as u8,
            SettingKey::ModScheme => self.modifier_scheme as u8,
            SettingKey::LedScheme => self.led as u8,
            SettingKey::ImeMode => self.ime,
            SettingKey::PrefixShift => self.prefix_shift as u8,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_range_normalised_to_zero() {
        assert_eq!(BaseLayout::from_stored(6), BaseLayout::Qwerty);
        assert_eq!(BaseLayout::from_stored(0xFF), BaseLayout::Qwerty);
        assert_eq!(OsProfile::from_stored(8), OsProfile::Pc);
        assert_eq!(DebounceDelay::from_stored(5), DebounceDelay::D0);
        assert_eq!(PrefixShift::from_stored(3), PrefixShift::Off);
        assert_eq!(ModScheme::from_stored(6, false), ModScheme::C);
        assert_eq!(ModScheme::from_stored(6, true), ModScheme::CX);
    }

    #[test]
    fn test_cycling_layouts_returns_to_start() {
        let start = BaseLayout::Dvorak;
        let mut layout = start;
        for _ in 0..BaseLayout::COUNT {
            layout = layout.next();
        }
        assert_eq!(layout, start);
    }

    #[test]
    fn test_mod_scheme_cycle_depends_on_dual_role() {
        assert_eq!(ModScheme::SJMac.next(false), ModScheme::C);
        assert_eq!(ModScheme::SJMac.next(true), ModScheme::CX);
        assert_eq!(ModScheme::SX.next(true), ModScheme::C);
        assert_eq!(ModScheme::SX.table(), ModScheme::S);
    }

    #[test]
    fn test_settings_round_trip_through_bytes() {
        let settings = Settings {
            base: BaseLayout::Colemak,
            kana_layout: 2,
            os: OsProfile::Mac,
            delay: DebounceDelay::D36,
            modifier_scheme: ModScheme::SJ,
            led: LedScheme::Off,
            ime: 1,
            prefix_shift: PrefixShift::Led,
        };
        let loaded = Settings::from_stored(|key| settings.stored(key), false);
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_postcard_layout_matches_keys() {
        let settings = Settings {
            os: OsProfile::ShiftSpace,
            ime: 3,
            ..Settings::default()
        };
        let mut buf = [0u8; 16];
        let used = postcard::to_slice(&settings, &mut buf).unwrap();
        assert_eq!(used.len(), SettingKey::ALL.len());
        for key in SettingKey::ALL {
            assert_eq!(used[key as usize], settings.stored(key));
        }
    }
}
