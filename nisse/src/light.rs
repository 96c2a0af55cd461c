//! Composition of the indicator LEDs.
//!
//! The host only knows about its own lock states. The keyboard overlays its
//! modes on the same three LEDs before driving them.

use nisse_types::led_indicator::LedIndicator;
use nisse_types::modifier::{ExtraModifiers, HidModifiers};

/// Show armed prefix shifts: Shift on Scroll Lock, FN on Caps Lock, FN2 on Num Lock
pub fn sticky_indicators(leds: LedIndicator, prefix: HidModifiers, prefix_extra: ExtraModifiers) -> LedIndicator {
    let mut leds = leds;
    if prefix.shift() {
        leds |= LedIndicator::SCROLL_LOCK;
    }
    if prefix_extra.is_fn() {
        leds |= LedIndicator::CAPS_LOCK;
    }
    if prefix_extra.fn2() {
        leds |= LedIndicator::NUM_LOCK;
    }
    leds
}

/// Dims the Caps Lock LED of early boards by lighting it one update in four
#[derive(Debug, Default, Clone, Copy)]
pub struct CapsBlink {
    tick: u8,
}

impl CapsBlink {
    pub const PERIOD: u8 = 4;

    pub fn apply(&mut self, leds: LedIndicator) -> LedIndicator {
        self.tick += 1;
        if self.tick >= Self::PERIOD {
            self.tick = 0;
            leds
        } else {
            leds & !LedIndicator::CAPS_LOCK
        }
    }
}
