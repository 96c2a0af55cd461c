//! Pointing device collaborator.

use crate::hid::KeySnapshot;
use crate::macro_queue::MacroQueue;

pub trait PointerDevice {
    /// The pad is being touched. While it is, keys act as mouse buttons.
    fn is_touched(&self) -> bool;

    /// Turn the keys of a pad-only snapshot into mouse actions
    fn process_mouse_keys(&mut self, current: &KeySnapshot, processed: &KeySnapshot);

    /// Reload pointer settings after a profile switch
    fn load(&mut self) {}

    /// Type the pointer settings as part of the about banner
    fn emit_settings(&self, _macros: &mut MacroQueue) {}
}

/// Boards without a pointing device
#[derive(Debug, Default, Clone, Copy)]
pub struct NoPointer;

impl PointerDevice for NoPointer {
    fn is_touched(&self) -> bool {
        false
    }

    fn process_mouse_keys(&mut self, _current: &KeySnapshot, _processed: &KeySnapshot) {}
}
