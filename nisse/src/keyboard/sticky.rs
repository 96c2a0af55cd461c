use nisse_types::modifier::{ExtraModifiers, HidModifiers};

use crate::hid::KeySnapshot;

/// Prefix (sticky) Shift, FN and FN2.
///
/// Every press of one of these keys toggles its prefix bit. A prefix bit
/// stays armed after the key is released and is merged into every
/// following snapshot, until a snapshot with an ordinary key clears it. A
/// chord arms nothing: the key press that toggled the bit on is the one
/// that clears it.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct Sticky {
    prefix: HidModifiers,
    prefix_extra: ExtraModifiers,
    modifiers_prev: HidModifiers,
    extra_prev: ExtraModifiers,
}

impl Sticky {
    /// Merge the armed bits into `current` and toggle them on rising edges.
    ///
    /// `modifiers` and `extra` are the physical state of this tick. Edges
    /// are always tracked, the prefix is only applied when `enabled`.
    pub(crate) fn track(
        &mut self,
        current: &mut KeySnapshot,
        modifiers: HidModifiers,
        extra: ExtraModifiers,
        enabled: bool,
    ) {
        if enabled {
            current.modifiers |= self.prefix;
            current.extra |= self.prefix_extra;

            self.prefix ^= modifiers & !self.modifiers_prev & HidModifiers::SHIFT;
            if extra.is_fn() && !self.extra_prev.is_fn() {
                if self.prefix_extra.is_fn() {
                    self.prefix_extra &= !ExtraModifiers::FN;
                } else {
                    self.prefix_extra |= extra & ExtraModifiers::FN;
                }
            }
            if extra.fn2() && !self.extra_prev.fn2() {
                self.prefix_extra ^= ExtraModifiers::FN2;
            }
        }
        self.modifiers_prev = modifiers;
        self.extra_prev = extra;
    }

    /// An ordinary key consumed the prefix
    pub(crate) fn clear(&mut self) {
        self.prefix = HidModifiers::new();
        self.prefix_extra = ExtraModifiers::new();
    }

    pub(crate) fn prefix(&self) -> HidModifiers {
        self.prefix
    }

    pub(crate) fn prefix_extra(&self) -> ExtraModifiers {
        self.prefix_extra
    }
}
