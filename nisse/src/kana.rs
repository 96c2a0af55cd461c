//! Kana/IME collaborator.
//!
//! Kana input, romaji conversion and IME switching live outside the scan
//! pipeline. The pipeline only asks whether Kana mode is active, lets the
//! collaborator rewrite keys that toggle it, and delegates whole reports to
//! it while Kana mode is on.

use nisse_types::keycode::KeyCode;
use nisse_types::led_indicator::LedIndicator;
use nisse_types::modifier::HidModifiers;
use nisse_types::settings::Settings;

use crate::hid::{KeySnapshot, Report, Transmit};
use crate::macro_queue::MacroQueue;

pub trait KanaProcessor {
    /// Kana input is active for this snapshot
    fn is_kana_mode(&self, current: &KeySnapshot) -> bool;

    /// Observe a key on its way to the report, possibly replacing it.
    ///
    /// `make` is `true` when the key wasn't held in the previous report.
    fn toggle_kana_mode(&mut self, key: KeyCode, modifiers: HidModifiers, make: bool) -> KeyCode;

    /// Build the report while Kana mode is active
    fn process_keys_kana(
        &mut self,
        current: &KeySnapshot,
        processed: &KeySnapshot,
        report: &mut Report,
        macros: &mut MacroQueue,
    ) -> Transmit;

    /// Pick up the stored Kana layout and IME mode
    fn load(&mut self, settings: &Settings);

    /// Cycle the Kana layout, returns the value to persist
    fn switch_kana(&mut self) -> u8;

    /// Cycle the IME mode, returns the value to persist
    fn switch_ime(&mut self) -> u8;

    fn emit_kana_name(&self, macros: &mut MacroQueue);

    fn emit_ime_name(&self, macros: &mut MacroQueue);

    /// Add the Kana indicator to the host LEDs
    fn control_led(&self, leds: LedIndicator) -> LedIndicator {
        leds
    }
}

/// Boards without Kana support. Never in Kana mode, passes keys through.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoKana;

impl KanaProcessor for NoKana {
    fn is_kana_mode(&self, _current: &KeySnapshot) -> bool {
        false
    }

    fn toggle_kana_mode(&mut self, key: KeyCode, _modifiers: HidModifiers, _make: bool) -> KeyCode {
        key
    }

    fn process_keys_kana(
        &mut self,
        _current: &KeySnapshot,
        _processed: &KeySnapshot,
        _report: &mut Report,
        _macros: &mut MacroQueue,
    ) -> Transmit {
        Transmit::None
    }

    fn load(&mut self, _settings: &Settings) {}

    fn switch_kana(&mut self) -> u8 {
        0
    }

    fn switch_ime(&mut self) -> u8 {
        0
    }

    fn emit_kana_name(&self, _macros: &mut MacroQueue) {}

    fn emit_ime_name(&self, _macros: &mut MacroQueue) {}
}
