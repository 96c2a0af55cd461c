use serde::{Deserialize, Serialize};
use strum::FromRepr;

use crate::modifier::HidModifiers;

/// Key codes produced by the layout tables.
///
/// Values up to `RGui` are the usages of the HID keyboard page. Values above
/// `RGui` are private to the controller: the FN layer keys and the ZQ
/// symbols that must be decomposed before they reach the host.
#[repr(u8)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize, PartialOrd, Ord, FromRepr, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum KeyCode {
    /// Reserved, no-key.
    #[default]
    No = 0x00,
    /// Keyboard roll over error, too many keys are pressed simultaneously, not a physical key.
    ErrorRollover = 0x01,
    /// `a` and `A`
    A = 0x04,
    /// `b` and `B`
    B = 0x05,
    /// `c` and `C`
    C = 0x06,
    /// `d` and `D`
    D = 0x07,
    /// `e` and `E`
    E = 0x08,
    /// `f` and `F`
    F = 0x09,
    /// `g` and `G`
    G = 0x0A,
    /// `h` and `H`
    H = 0x0B,
    /// `i` and `I`
    I = 0x0C,
    /// `j` and `J`
    J = 0x0D,
    /// `k` and `K`
    K = 0x0E,
    /// `l` and `L`
    L = 0x0F,
    /// `m` and `M`
    M = 0x10,
    /// `n` and `N`
    N = 0x11,
    /// `o` and `O`
    O = 0x12,
    /// `p` and `P`
    P = 0x13,
    /// `q` and `Q`
    Q = 0x14,
    /// `r` and `R`
    R = 0x15,
    /// `s` and `S`
    S = 0x16,
    /// `t` and `T`
    T = 0x17,
    /// `u` and `U`
    U = 0x18,
    /// `v` and `V`
    V = 0x19,
    /// `w` and `W`
    W = 0x1A,
    /// `x` and `X`
    X = 0x1B,
    /// `y` and `Y`
    Y = 0x1C,
    /// `z` and `Z`
    Z = 0x1D,
    /// `1` and `!`
    Kc1 = 0x1E,
    /// `2` and `@`
    Kc2 = 0x1F,
    /// `3` and `#`
    Kc3 = 0x20,
    /// `4` and `$`
    Kc4 = 0x21,
    /// `5` and `%`
    Kc5 = 0x22,
    /// `6` and `^`
    Kc6 = 0x23,
    /// `7` and `&`
    Kc7 = 0x24,
    /// `8` and `*`
    Kc8 = 0x25,
    /// `9` and `(`
    Kc9 = 0x26,
    /// `0` and `)`
    Kc0 = 0x27,
    /// `Enter`
    Enter = 0x28,
    /// `Esc`
    Escape = 0x29,
    /// `Backspace`
    Backspace = 0x2A,
    /// `Tab`
    Tab = 0x2B,
    /// `Space`
    Space = 0x2C,
    /// `-` and `_`
    Minus = 0x2D,
    /// `=` and `+`
    Equal = 0x2E,
    /// `[` and `{`
    LeftBracket = 0x2F,
    /// `]` and `}`
    RightBracket = 0x30,
    /// `\` and `|`
    Backslash = 0x31,
    /// Non-US `#` and `~`
    NonusHash = 0x32,
    /// `;` and `:`
    Semicolon = 0x33,
    /// `'` and `"`
    Quote = 0x34,
    /// `` ` `` and `~`
    Grave = 0x35,
    /// `,` and `<`
    Comma = 0x36,
    /// `.` and `>`
    Dot = 0x37,
    /// `/` and `?`
    Slash = 0x38,
    CapsLock = 0x39,
    F1 = 0x3A,
    F2 = 0x3B,
    F3 = 0x3C,
    F4 = 0x3D,
    F5 = 0x3E,
    F6 = 0x3F,
    F7 = 0x40,
    F8 = 0x41,
    F9 = 0x42,
    F10 = 0x43,
    F11 = 0x44,
    F12 = 0x45,
    PrintScreen = 0x46,
    ScrollLock = 0x47,
    Pause = 0x48,
    Insert = 0x49,
    Home = 0x4A,
    PageUp = 0x4B,
    Delete = 0x4C,
    End = 0x4D,
    PageDown = 0x4E,
    Right = 0x4F,
    Left = 0x50,
    Down = 0x51,
    Up = 0x52,
    NumLock = 0x53,
    KpSlash = 0x54,
    KpAsterisk = 0x55,
    KpMinus = 0x56,
    KpPlus = 0x57,
    KpEnter = 0x58,
    Kp1 = 0x59,
    Kp2 = 0x5A,
    Kp3 = 0x5B,
    Kp4 = 0x5C,
    Kp5 = 0x5D,
    Kp6 = 0x5E,
    Kp7 = 0x5F,
    Kp8 = 0x60,
    Kp9 = 0x61,
    Kp0 = 0x62,
    KpDot = 0x63,
    /// Non-US `\` and `|`
    NonusBackslash = 0x64,
    /// Application (menu) key
    Application = 0x65,
    KpEqual = 0x67,
    F13 = 0x68,
    F14 = 0x69,
    KbMute = 0x7F,
    KbVolumeUp = 0x80,
    KbVolumeDown = 0x81,
    /// JIS `\` and `_`
    International1 = 0x87,
    /// Katakana/Hiragana
    International2 = 0x88,
    /// JIS Yen
    International3 = 0x89,
    /// Henkan (convert)
    International4 = 0x8A,
    /// Muhenkan (no-convert)
    International5 = 0x8B,
    /// Hangul/English, Kana on Mac
    Language1 = 0x90,
    /// Hanja, Eisu on Mac
    Language2 = 0x91,
    /// Keypad `00`
    Kp00 = 0xB0,
    /// Keypad `000`
    Kp000 = 0xB1,
    /// Keypad `%`
    KpPercent = 0xC4,
    /// Left Control
    LCtrl = 0xE0,
    /// Left Shift
    LShift = 0xE1,
    /// Left Alt
    LAlt = 0xE2,
    /// Left GUI
    LGui = 0xE3,
    /// Right Control
    RCtrl = 0xE4,
    /// Right Shift
    RShift = 0xE5,
    /// Right Alt
    RAlt = 0xE6,
    /// Right GUI
    RGui = 0xE7,

    /// Left FN layer key
    LeftFn = 0xE8,
    /// Right FN layer key
    RightFn = 0xE9,
    /// Second FN layer key, used by the ZQ layout
    Fn2 = 0xEA,

    /// ZQ `?`
    ZqQuestion = 0xF0,
    /// ZQ `_`
    ZqUnderscore = 0xF1,
    /// ZQ `*`
    ZqAsterisk = 0xF2,
    /// ZQ `"`
    ZqDoubleQuote = 0xF3,
    /// ZQ `~`
    ZqTilde = 0xF4,
    /// ZQ `$`
    ZqDollar = 0xF5,
    /// ZQ `&`
    ZqAmpersand = 0xF6,
    /// ZQ `!`
    ZqExclamation = 0xF7,
    /// ZQ `:`
    ZqColon = 0xF8,
    /// Types `~/`
    ZqHomeDir = 0xF9,
    /// Types two spaces
    ZqSoftTab2 = 0xFA,
    /// `~` inside a macro sequence
    ZqMacroTilde = 0xFB,
}

impl KeyCode {
    /// Returns `true` if the keycode is a usage of the HID keyboard page
    pub fn is_hid(self) -> bool {
        self <= KeyCode::RGui
    }

    /// Returns `true` if the keycode is a modifier keycode
    pub fn is_modifier(self) -> bool {
        KeyCode::LCtrl <= self && self <= KeyCode::RGui
    }

    /// Returns the modifier bit corresponding to this key, empty for non-modifiers
    pub fn to_hid_modifiers(self) -> HidModifiers {
        if self.is_modifier() {
            HidModifiers::from_bits(1 << (self as u8 - KeyCode::LCtrl as u8))
        } else {
            HidModifiers::new()
        }
    }

    /// The unshifted key to send together with Shift for a private ZQ symbol
    pub fn shifted_base(self) -> Option<KeyCode> {
        match self {
            KeyCode::ZqQuestion => Some(KeyCode::Slash),
            KeyCode::ZqUnderscore => Some(KeyCode::Minus),
            KeyCode::ZqAsterisk => Some(KeyCode::Kc8),
            KeyCode::ZqDoubleQuote => Some(KeyCode::Quote),
            KeyCode::ZqTilde | KeyCode::ZqMacroTilde => Some(KeyCode::Grave),
            KeyCode::ZqDollar => Some(KeyCode::Kc4),
            KeyCode::ZqAmpersand => Some(KeyCode::Kc7),
            KeyCode::ZqExclamation => Some(KeyCode::Kc1),
            KeyCode::ZqColon => Some(KeyCode::Semicolon),
            _ => None,
        }
    }

    /// Index of a function key, `F1` is 1
    pub fn function_index(self) -> Option<u8> {
        if KeyCode::F1 <= self && self <= KeyCode::F12 {
            Some(self as u8 - KeyCode::F1 as u8 + 1)
        } else {
            None
        }
    }

    /// Keycode typing a single decimal digit
    pub fn from_digit(n: u8) -> KeyCode {
        match n {
            0 => KeyCode::Kc0,
            1..=9 => KeyCode::from_repr(KeyCode::Kc1 as u8 - 1 + n).unwrap_or(KeyCode::Space),
            _ => KeyCode::Space,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modifier_bits() {
        assert_eq!(KeyCode::LCtrl.to_hid_modifiers().into_bits(), 0x01);
        assert_eq!(KeyCode::RShift.to_hid_modifiers().into_bits(), 0x20);
        assert_eq!(KeyCode::RGui.to_hid_modifiers().into_bits(), 0x80);
        assert_eq!(KeyCode::A.to_hid_modifiers().into_bits(), 0);
    }

    #[test]
    fn test_private_codes_are_not_hid() {
        assert!(KeyCode::RGui.is_hid());
        assert!(!KeyCode::RightFn.is_hid());
        assert!(!KeyCode::ZqHomeDir.is_hid());
    }

    #[test]
    fn test_digits() {
        assert_eq!(KeyCode::from_digit(0), KeyCode::Kc0);
        assert_eq!(KeyCode::from_digit(1), KeyCode::Kc1);
        assert_eq!(KeyCode::from_digit(9), KeyCode::Kc9);
        assert_eq!(KeyCode::from_digit(12), KeyCode::Space);
    }

    #[test]
    fn test_function_index() {
        assert_eq!(KeyCode::F1.function_index(), Some(1));
        assert_eq!(KeyCode::F9.function_index(), Some(9));
        assert_eq!(KeyCode::Escape.function_index(), None);
    }
}
