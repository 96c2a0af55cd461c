use nisse_types::keycode::KeyCode;
use nisse_types::modifier::HidModifiers;

use crate::MACRO_QUEUE_SIZE;
use crate::hid::{Report, Transmit};
use crate::macro_queue::MacroQueue;

/// Types the macro queue out, one report per tick.
///
/// With `Transmit::Macro` consecutive keys roll over: every key is pressed in
/// its own report and a release report is only inserted before a repeated
/// key and after the last one. With `Transmit::InOrder` every entry is
/// pressed then released, and a `No` entry is sent as an empty report.
#[derive(Debug)]
pub(crate) struct Drain {
    mode: Transmit,
    /// First entry, returned by `MacroQueue::begin` but not yet typed
    first: Option<KeyCode>,
    started: bool,
    /// Key pressed by the last report
    held: KeyCode,
}

/// Modifiers and HID key typing `key`
fn decompose(key: KeyCode) -> (HidModifiers, KeyCode) {
    match key.shifted_base() {
        Some(base) => (HidModifiers::LSHIFT, base),
        None => (HidModifiers::new(), key),
    }
}

impl Drain {
    pub(crate) fn new(mode: Transmit) -> Self {
        Self {
            mode,
            first: None,
            started: false,
            held: KeyCode::No,
        }
    }

    fn next(&mut self, macros: &mut MacroQueue) -> Option<KeyCode> {
        match self.first.take() {
            Some(key) => Some(key),
            None => macros.get(),
        }
    }

    fn peek(&self, macros: &MacroQueue) -> Option<KeyCode> {
        match self.first {
            Some(KeyCode::No) => None,
            Some(key) => Some(key),
            None => macros.peek(),
        }
    }

    /// Write the next report. Returns `None` once the queue is exhausted.
    pub(crate) fn step(&mut self, macros: &mut MacroQueue, report: &mut Report) -> Option<Transmit> {
        if !self.started {
            self.started = true;
            if macros.len() == 0 {
                return None;
            }
            self.first = Some(macros.begin(MACRO_QUEUE_SIZE));
        }

        if self.held != KeyCode::No {
            let release = match self.peek(macros) {
                Some(next) => self.mode == Transmit::InOrder || decompose(next).1 == decompose(self.held).1,
                None => true,
            };
            if release {
                report.clear();
                self.held = KeyCode::No;
                return Some(self.mode);
            }
        }

        let Some(key) = self.next(macros) else {
            macros.reset();
            return None;
        };
        report.clear();
        if key != KeyCode::No {
            let (modifiers, base) = decompose(key);
            report.modifiers = modifiers;
            report.push(base);
        }
        self.held = key;
        Some(self.mode)
    }
}
