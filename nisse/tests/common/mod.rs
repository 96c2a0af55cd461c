#![allow(dead_code)]

use heapless::Vec;
use nisse::config::KeyboardConfig;
use nisse::hid::{Report, Transmit};
use nisse::keyboard::Keyboard;
use nisse::matrix::MatrixScan;
use nisse::settings::{BaseLayout, DebounceDelay, Settings};
use nisse::storage::MemoryStore;

// Init logger for tests
#[ctor::ctor]
pub fn init_log() {
    let _ = env_logger::builder()
        .filter_level(log::LevelFilter::Debug)
        .is_test(true)
        .try_init();
}

// Positions on revision 1 boards, where the matrix code is `row * 12 + col`
pub const QWERTY_A: (u8, u8) = (5, 0);
pub const QWERTY_S: (u8, u8) = (5, 1);
pub const QWERTY_LSHIFT: (u8, u8) = (7, 3);
pub const QWERTY_LFN: (u8, u8) = (7, 2);
pub const QWERTY_RFN: (u8, u8) = (7, 9);
pub const ZQ_A: (u8, u8) = (5, 8);
pub const ZQ_LSHIFT: (u8, u8) = (3, 0);
pub const ZQ_FN2: (u8, u8) = (7, 6);
pub const F1: (u8, u8) = (1, 1);
pub const F3: (u8, u8) = (0, 2);

pub fn config() -> KeyboardConfig {
    KeyboardConfig {
        board_rev: 1,
        ..KeyboardConfig::default()
    }
}

/// Settings with the given base layout and no debounce delay
pub fn settings(base: BaseLayout) -> Settings {
    Settings {
        base,
        delay: DebounceDelay::D0,
        ..Settings::default()
    }
}

pub fn create_test_keyboard(settings: Settings) -> Keyboard<MemoryStore> {
    Keyboard::new(config(), MemoryStore::new(&settings))
}

pub fn scan(keys: &[(u8, u8)]) -> MatrixScan {
    keys.iter().fold(MatrixScan::new(), |scan, (row, col)| scan.with(*row, *col))
}

/// Tick with the same scan `n` times, returns the last directive
pub fn tick_n(keyboard: &mut Keyboard<MemoryStore>, keys: &[(u8, u8)], n: usize) -> Transmit {
    let scan = scan(keys);
    let mut xmit = Transmit::None;
    for _ in 0..n {
        xmit = keyboard.tick(&scan);
    }
    xmit
}

/// Tick with `keys` and collect every report sent, until a tick sends nothing
pub fn collect_reports<const N: usize>(keyboard: &mut Keyboard<MemoryStore>, keys: &[(u8, u8)]) -> Vec<Report, N> {
    let scan = scan(keys);
    let mut reports = Vec::new();
    loop {
        let xmit = keyboard.tick(&scan);
        if !xmit.is_report() {
            break;
        }
        reports.push(*keyboard.report()).expect("too many reports");
    }
    reports
}
