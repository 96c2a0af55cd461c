pub mod common;

use std::cell::Cell;
use std::rc::Rc;

use nisse::hid::{KeySnapshot, Report, Transmit};
use nisse::kana::{KanaProcessor, NoKana};
use nisse::keyboard::Keyboard;
use nisse::keycode::KeyCode;
use nisse::led_indicator::LedIndicator;
use nisse::macro_queue::MacroQueue;
use nisse::matrix::KeyPos;
use nisse::modifier::HidModifiers;
use nisse::pointer::{NoPointer, PointerDevice};
use nisse::profile::NoProfile;
use nisse::settings::{BaseLayout, PrefixShift, Settings};
use nisse::storage::MemoryStore;

use crate::common::*;

/// Types `X` for every key held while active, and records every key passed to the toggle
#[derive(Default)]
struct StubKana {
    active: bool,
    reports: usize,
    toggles: Vec<(KeyCode, bool)>,
}

impl KanaProcessor for StubKana {
    fn is_kana_mode(&self, _current: &KeySnapshot) -> bool {
        self.active
    }

    fn toggle_kana_mode(&mut self, key: KeyCode, _modifiers: HidModifiers, make: bool) -> KeyCode {
        self.toggles.push((key, make));
        key
    }

    fn process_keys_kana(
        &mut self,
        current: &KeySnapshot,
        _processed: &KeySnapshot,
        report: &mut Report,
        _macros: &mut MacroQueue,
    ) -> Transmit {
        self.reports += 1;
        report.modifiers = current.modifiers;
        for _ in current.codes.iter() {
            report.push(KeyCode::X);
        }
        Transmit::Normal
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

/// Touch pad with a finger sensor the test controls
#[derive(Default)]
struct Pad {
    touched: Rc<Cell<bool>>,
    calls: usize,
    seen: Option<KeySnapshot>,
}

impl PointerDevice for Pad {
    fn is_touched(&self) -> bool {
        self.touched.get()
    }

    fn process_mouse_keys(&mut self, current: &KeySnapshot, _processed: &KeySnapshot) {
        self.calls += 1;
        self.seen = Some(*current);
    }
}

fn kana_keyboard(prefix_shift: PrefixShift) -> Keyboard<MemoryStore, StubKana, NoPointer, NoProfile> {
    let store = MemoryStore::new(&Settings {
        prefix_shift,
        ..settings(BaseLayout::Qwerty)
    });
    let kana = StubKana {
        active: true,
        ..Default::default()
    };
    Keyboard::with_collaborators(config(), store, kana, NoPointer, NoProfile)
}

fn tick<K: KanaProcessor, P: PointerDevice>(
    keyboard: &mut Keyboard<MemoryStore, K, P, NoProfile>,
    keys: &[(u8, u8)],
) -> Transmit {
    keyboard.tick(&scan(keys))
}

#[test]
fn test_prefix_shift_in_kana_mode() {
    let mut keyboard = kana_keyboard(PrefixShift::On);
    // Lone Shift tap arms the prefix
    assert_eq!(tick(&mut keyboard, &[QWERTY_LSHIFT]), Transmit::Normal);
    assert_eq!(tick(&mut keyboard, &[]), Transmit::None);

    assert_eq!(tick(&mut keyboard, &[QWERTY_A]), Transmit::Normal);
    assert_eq!(keyboard.report(), &Report::new(HidModifiers::LSHIFT, &[KeyCode::X]));
    assert_eq!(keyboard.kana().reports, 2);

    // Used up by the key
    assert_eq!(tick(&mut keyboard, &[]), Transmit::Normal);
    assert_eq!(tick(&mut keyboard, &[QWERTY_A]), Transmit::Normal);
    assert_eq!(keyboard.report(), &Report::new(HidModifiers::new(), &[KeyCode::X]));
}

#[test]
fn test_prefix_shift_off_in_kana_mode() {
    let mut keyboard = kana_keyboard(PrefixShift::Off);
    assert_eq!(tick(&mut keyboard, &[QWERTY_LSHIFT]), Transmit::Normal);
    assert_eq!(keyboard.report().modifiers, HidModifiers::LSHIFT);

    assert_eq!(tick(&mut keyboard, &[]), Transmit::Normal);
    assert_eq!(tick(&mut keyboard, &[QWERTY_A]), Transmit::Normal);
    assert_eq!(keyboard.report(), &Report::new(HidModifiers::new(), &[KeyCode::X]));
}

#[test]
fn test_prefix_shift_leds_in_kana_mode() {
    let mut keyboard = kana_keyboard(PrefixShift::Led);
    tick(&mut keyboard, &[QWERTY_LSHIFT]);
    tick(&mut keyboard, &[]);
    assert!(keyboard.control_led(LedIndicator::new()).scroll_lock());

    tick(&mut keyboard, &[QWERTY_A]);
    assert!(!keyboard.control_led(LedIndicator::new()).scroll_lock());

    // Armed but not shown
    let mut keyboard = kana_keyboard(PrefixShift::On);
    tick(&mut keyboard, &[QWERTY_LSHIFT]);
    tick(&mut keyboard, &[]);
    assert!(!keyboard.control_led(LedIndicator::new()).scroll_lock());
}

#[test]
fn test_touched_pad_takes_the_keys() {
    let touched = Rc::new(Cell::new(true));
    let pad = Pad {
        touched: touched.clone(),
        ..Default::default()
    };
    let store = MemoryStore::new(&settings(BaseLayout::Qwerty));
    let mut keyboard = Keyboard::with_collaborators(config(), store, NoKana, pad, NoProfile);

    // The key is a mouse button, the keyboard report stays empty
    assert_eq!(tick(&mut keyboard, &[QWERTY_A]), Transmit::Normal);
    assert!(keyboard.report().is_empty());
    let seen = keyboard.pointer().seen.expect("no mouse keys");
    assert!(seen.extra.pad());
    assert!(seen.codes.contains(KeyPos::new(QWERTY_A.0, QWERTY_A.1).code(1)));
    assert!(keyboard.control_led(LedIndicator::new()).scroll_lock());

    touched.set(false);
    tick(&mut keyboard, &[]);
    let calls = keyboard.pointer().calls;
    assert_eq!(tick(&mut keyboard, &[QWERTY_A]), Transmit::Normal);
    assert_eq!(keyboard.report(), &Report::new(HidModifiers::new(), &[KeyCode::A]));
    assert_eq!(keyboard.pointer().calls, calls);
    assert!(!keyboard.control_led(LedIndicator::new()).scroll_lock());
}

#[test]
fn test_kana_toggle_sees_new_positions() {
    let store = MemoryStore::new(&settings(BaseLayout::Qwerty));
    let mut keyboard = Keyboard::with_collaborators(config(), store, StubKana::default(), NoPointer, NoProfile);

    tick(&mut keyboard, &[QWERTY_A]);
    tick(&mut keyboard, &[QWERTY_A, QWERTY_S]);
    assert_eq!(
        keyboard.kana().toggles,
        [(KeyCode::A, true), (KeyCode::A, false), (KeyCode::S, true)]
    );
    assert_eq!(keyboard.kana().reports, 0);
}
