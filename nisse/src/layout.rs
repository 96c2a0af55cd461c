//! Layout tables.
//!
//! Every table is indexed by normalised matrix code (`row * 12 + col`). The
//! lookups are pure, the selected layout, modifier scheme and Num-Lock state
//! are passed in by the caller.

use nisse_types::keycode::KeyCode;
use nisse_types::settings::{BaseLayout, ModScheme};

use crate::matrix::{COLS, ROWS, split_code};

type Table = [[KeyCode; COLS]; ROWS];
type FnTable = [[&'static [KeyCode]; COLS]; ROWS];

const QWERTY: Table = {
    use KeyCode::*;
    [
        [LeftBracket, F2, F3, F4, F5, F6, F7, F8, F9, F10, F11, Equal],
        [Grave, F1, No, No, No, No, No, No, No, No, F12, Backslash],
        [RightBracket, Kc1, No, No, No, No, No, No, No, No, Kc0, Minus],
        [CapsLock, Kc2, Kc3, Kc4, Kc5, No, No, Kc6, Kc7, Kc8, Kc9, Quote],
        [Q, W, E, R, T, No, No, Y, U, I, O, P],
        [A, S, D, F, G, Escape, Application, H, J, K, L, Semicolon],
        [Z, X, C, V, B, Tab, Enter, N, M, Comma, Dot, Slash],
        [LCtrl, LGui, LeftFn, LShift, Backspace, LAlt, RAlt, Space, RShift, RightFn, RGui, RCtrl],
    ]
};

const DVORAK: Table = {
    use KeyCode::*;
    [
        [LeftBracket, F2, F3, F4, F5, F6, F7, F8, F9, F10, F11, Backslash],
        [Grave, F1, No, No, No, No, No, No, No, No, F12, Equal],
        [RightBracket, Kc1, No, No, No, No, No, No, No, No, Kc0, Slash],
        [CapsLock, Kc2, Kc3, Kc4, Kc5, No, No, Kc6, Kc7, Kc8, Kc9, Minus],
        [Quote, Comma, Dot, P, Y, No, No, F, G, C, R, L],
        [A, O, E, U, I, Escape, Application, D, H, T, N, S],
        [Semicolon, Q, J, K, X, Tab, Enter, B, M, W, V, Z],
        [LCtrl, LGui, LeftFn, LShift, Backspace, LAlt, RAlt, Space, RShift, RightFn, RGui, RCtrl],
    ]
};

const COLEMAK: Table = {
    use KeyCode::*;
    [
        [LeftBracket, F2, F3, F4, F5, F6, F7, F8, F9, F10, F11, Equal],
        [Grave, F1, No, No, No, No, No, No, No, No, F12, Backslash],
        [RightBracket, Kc1, No, No, No, No, No, No, No, No, Kc0, Minus],
        [Backspace, Kc2, Kc3, Kc4, Kc5, No, No, Kc6, Kc7, Kc8, Kc9, Quote],
        [Q, W, F, P, G, No, No, J, L, U, Y, Semicolon],
        [A, R, S, T, D, Escape, Application, H, N, E, I, O],
        [Z, X, C, V, B, Tab, Enter, K, M, Comma, Dot, Slash],
        [LCtrl, LGui, LeftFn, LShift, Space, LAlt, RAlt, Space, RShift, RightFn, RGui, RCtrl],
    ]
};

// JIS legends on US usages:
//   [{ RightBracket     ]} NonusHash     \| International3   @` LeftBracket
//   :* Quote            ^~ Equal         _ International1
//   no-convert International5, convert International4,
//   hiragana International2, zenkaku Grave
const JIS: Table = {
    use KeyCode::*;
    [
        [RightBracket, F2, F3, F4, F5, F6, F7, F8, F9, F10, F11, Equal],
        [International3, F1, No, No, No, No, No, No, No, No, F12, LeftBracket],
        [NonusHash, Kc1, No, No, No, No, No, No, No, No, Kc0, Minus],
        [CapsLock, Kc2, Kc3, Kc4, Kc5, No, No, Kc6, Kc7, Kc8, Kc9, Quote],
        [Q, W, E, R, T, No, No, Y, U, I, O, P],
        [A, S, D, F, G, Escape, Application, H, J, K, L, Semicolon],
        [Z, X, C, V, B, Tab, Enter, N, M, Comma, Dot, Slash],
        [LCtrl, LGui, LeftFn, LShift, Backspace, LAlt, RAlt, Space, RShift, RightFn, RGui, RCtrl],
    ]
};

const NICOLA_F: Table = {
    use KeyCode::*;
    [
        [RightBracket, F2, F3, F4, F5, F6, F7, F8, F9, F10, F11, Minus],
        [International3, F1, No, No, No, No, No, No, No, No, F12, LeftBracket],
        [NonusHash, Kc1, No, No, No, No, No, No, No, No, Kc0, Quote],
        [Equal, Kc2, Kc3, Kc4, Kc5, No, No, Kc6, Kc7, Kc8, Kc9, Backspace],
        [Q, W, E, R, T, No, No, Y, U, I, O, P],
        [A, S, D, F, G, Escape, Application, H, J, K, L, Semicolon],
        [Z, X, C, V, B, Tab, Enter, N, M, Comma, Dot, Slash],
        [LCtrl, LGui, LeftFn, LShift, KpEnter, LAlt, RAlt, Space, RShift, RightFn, RGui, RCtrl],
    ]
};

const ZQ: Table = {
    use KeyCode::*;
    [
        [Enter, F2, F3, F4, F5, F6, F7, F8, F9, F10, F11, No],
        [No, F1, No, No, No, No, No, No, No, No, F12, No],
        [No, Equal, No, No, No, No, No, No, No, No, ZqDollar, No],
        [LShift, ZqTilde, Slash, ZqQuestion, ZqAmpersand, No, No, Grave, ZqUnderscore, Minus, ZqExclamation, RShift],
        [Z, R, D, F, Dot, No, No, ZqDoubleQuote, Y, U, P, Q],
        [S, N, T, H, L, Home, End, X, A, E, I, O],
        [C, W, G, M, Semicolon, ZqColon, ZqAsterisk, Quote, J, K, B, V],
        [Escape, LGui, CapsLock, Space, Enter, LCtrl, Fn2, Comma, RightFn, LAlt, RAlt, Tab],
    ]
};

const FN_LAYER: FnTable = {
    use KeyCode::*;
    [
        [&[], &[F2], &[F3], &[F4], &[F5], &[F6], &[F7], &[F8], &[F9], &[F10], &[F11], &[]],
        [&[Enter], &[F1], &[], &[], &[], &[], &[], &[], &[], &[], &[F12], &[LShift, Semicolon]],
        [&[LCtrl, LShift, Z], &[ZqSoftTab2], &[], &[], &[], &[], &[], &[], &[], &[], &[Delete], &[PrintScreen]],
        [&[Slash], &[], &[ZqHomeDir], &[], &[], &[], &[], &[], &[], &[ZqSoftTab2], &[], &[Backspace]],
        [&[], &[Kc7], &[Kc8], &[Kc9], &[], &[], &[], &[], &[Backslash], &[LShift, Minus], &[Equal], &[]],
        [&[Kc0], &[Kc4], &[Kc5], &[Kc6], &[], &[], &[], &[Minus], &[LShift, LeftBracket], &[LShift, Kc9], &[LShift, Kc0], &[LShift, RightBracket]],
        [&[Dot], &[Kc1], &[Kc2], &[Kc3], &[Grave], &[End], &[Home], &[], &[LeftBracket], &[LShift, Comma], &[LShift, Dot], &[RightBracket]],
        [&[LShift], &[RAlt], &[LGui], &[Space], &[CapsLock], &[LCtrl], &[], &[], &[RightFn], &[LAlt], &[RAlt], &[RShift]],
    ]
};

const FN2_LAYER: FnTable = {
    use KeyCode::*;
    [
        [&[], &[], &[], &[], &[], &[], &[], &[], &[], &[], &[], &[]],
        [&[], &[], &[], &[], &[], &[], &[], &[], &[], &[], &[], &[]],
        [&[], &[], &[], &[], &[], &[], &[], &[], &[], &[], &[], &[]],
        [&[], &[], &[], &[], &[], &[], &[], &[], &[], &[], &[], &[]],
        [&[], &[], &[], &[], &[], &[], &[], &[], &[], &[], &[], &[]],
        [&[], &[], &[], &[], &[], &[PrintScreen], &[ScrollLock], &[Left], &[Down], &[Up], &[Right], &[]],
        [&[], &[], &[], &[], &[], &[Pause], &[Insert], &[], &[], &[], &[], &[LShift, Insert]],
        [&[], &[RAlt], &[LCtrl], &[Backspace], &[CapsLock], &[LGui], &[], &[], &[], &[LAlt], &[RAlt], &[]],
    ]
};

/// FN layer override of row 6, columns 8..11 for JIS layouts
const FN_LAYER_JIS: [&[KeyCode]; 4] = [
    &[KeyCode::International5],
    &[KeyCode::International4],
    &[KeyCode::International2],
    &[KeyCode::Grave],
];
const FN_LAYER_JIS_FIRST: u8 = 6 * COLS as u8 + 8;

/// Keypad overlay of columns 7..11, active while the host's Num Lock is on
const NUM_LOCK: [[KeyCode; 5]; ROWS] = {
    use KeyCode::*;
    [
        [No, No, No, No, No],
        [No, No, No, No, No],
        [No, No, No, KpAsterisk, No],
        [No, No, KpEqual, KpSlash, No],
        [No, Kp7, Kp8, Kp9, KpMinus],
        [No, Kp4, Kp5, Kp6, KpPlus],
        [No, Kp1, Kp2, Kp3, Enter],
        [No, Kp0, No, KpDot, No],
    ]
};
const NUM_LOCK_FIRST_COL: usize = 7;

/// Physical modifier positions, in the order of `MOD_SCHEMES` columns
const MOD_KEYS: [KeyCode; 7] = [
    KeyCode::LCtrl,
    KeyCode::LShift,
    KeyCode::LGui,
    KeyCode::LAlt,
    KeyCode::RAlt,
    KeyCode::RShift,
    KeyCode::RCtrl,
];

const MOD_SCHEMES: [[KeyCode; 7]; 6] = {
    use KeyCode::*;
    [
        // C
        [LCtrl, LShift, LGui, LAlt, RAlt, RShift, RCtrl],
        // CJ
        [LCtrl, LShift, LAlt, Language2, Language1, RShift, RCtrl],
        // CJMAC
        [LCtrl, LShift, LGui, Language2, Language1, RShift, RCtrl],
        // S
        [LShift, LCtrl, LGui, LAlt, RAlt, RCtrl, RShift],
        // SJ
        [LShift, LCtrl, LAlt, Language2, Language1, RCtrl, RShift],
        // SJMAC
        [LShift, LCtrl, LGui, Language2, Language1, RCtrl, RShift],
    ]
};

/// FN layer bank
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FnBank {
    Fn,
    Fn2,
}

fn table(layout: BaseLayout) -> &'static Table {
    match layout {
        BaseLayout::Qwerty => &QWERTY,
        BaseLayout::Dvorak => &DVORAK,
        BaseLayout::Colemak => &COLEMAK,
        BaseLayout::Jis => &JIS,
        BaseLayout::NicolaF => &NICOLA_F,
        BaseLayout::Zq => &ZQ,
    }
}

/// Raw table entry of `code` in `layout`, before any overlay or scheme
pub fn base_key(layout: BaseLayout, code: u8) -> KeyCode {
    match split_code(code) {
        Some((row, col)) => table(layout)[row][col],
        None => KeyCode::No,
    }
}

/// Keypad overlay entry of `code`, if the overlay covers it
pub fn num_lock_key(code: u8) -> Option<KeyCode> {
    let (row, col) = split_code(code)?;
    if col < NUM_LOCK_FIRST_COL {
        return None;
    }
    match NUM_LOCK[row][col - NUM_LOCK_FIRST_COL] {
        KeyCode::No => None,
        key => Some(key),
    }
}

/// Apply a modifier scheme to a layout key
pub fn remap_modifier(key: KeyCode, scheme: ModScheme) -> KeyCode {
    let map = &MOD_SCHEMES[scheme.table() as usize];
    match MOD_KEYS.iter().position(|k| *k == key) {
        Some(i) => map[i],
        None => key,
    }
}

/// Logical key of `code`: Num Lock overlay first, then the layout through the modifier scheme
pub fn resolve(code: u8, layout: BaseLayout, scheme: ModScheme, num_lock: bool) -> KeyCode {
    if num_lock {
        if let Some(key) = num_lock_key(code) {
            return key;
        }
    }
    remap_modifier(base_key(layout, code), scheme)
}

/// FN layer output of `code`, zero to three keys
pub fn fn_keys(code: u8, bank: FnBank, layout: BaseLayout) -> &'static [KeyCode] {
    if layout.is_jp() && bank == FnBank::Fn && (FN_LAYER_JIS_FIRST..FN_LAYER_JIS_FIRST + 4).contains(&code) {
        return FN_LAYER_JIS[(code - FN_LAYER_JIS_FIRST) as usize];
    }
    let Some((row, col)) = split_code(code) else {
        return &[];
    };
    match bank {
        FnBank::Fn => FN_LAYER[row][col],
        FnBank::Fn2 => FN2_LAYER[row][col],
    }
}
