use core::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXorAssign, Not};

use bitfield_struct::bitfield;

/// Byte 0 of a keyboard report: the eight standard HID modifiers.
#[bitfield(u8, order = Lsb, defmt = cfg(feature = "defmt"))]
#[derive(Eq, PartialEq)]
pub struct HidModifiers {
    #[bits(1)]
    pub left_ctrl: bool,
    #[bits(1)]
    pub left_shift: bool,
    #[bits(1)]
    pub left_alt: bool,
    #[bits(1)]
    pub left_gui: bool,
    #[bits(1)]
    pub right_ctrl: bool,
    #[bits(1)]
    pub right_shift: bool,
    #[bits(1)]
    pub right_alt: bool,
    #[bits(1)]
    pub right_gui: bool,
}

impl BitOr for HidModifiers {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self::from_bits(self.into_bits() | rhs.into_bits())
    }
}
impl BitAnd for HidModifiers {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self::Output {
        Self::from_bits(self.into_bits() & rhs.into_bits())
    }
}
impl Not for HidModifiers {
    type Output = Self;

    fn not(self) -> Self::Output {
        Self::from_bits(!self.into_bits())
    }
}
impl BitAndAssign for HidModifiers {
    fn bitand_assign(&mut self, rhs: Self) {
        *self = *self & rhs;
    }
}
impl BitOrAssign for HidModifiers {
    fn bitor_assign(&mut self, rhs: Self) {
        *self = *self | rhs;
    }
}
impl BitXorAssign for HidModifiers {
    fn bitxor_assign(&mut self, rhs: Self) {
        *self = Self::from_bits(self.into_bits() ^ rhs.into_bits());
    }
}

impl HidModifiers {
    pub const LCTRL: Self = Self::new().with_left_ctrl(true);
    pub const LSHIFT: Self = Self::new().with_left_shift(true);
    pub const LALT: Self = Self::new().with_left_alt(true);
    pub const LGUI: Self = Self::new().with_left_gui(true);
    pub const RCTRL: Self = Self::new().with_right_ctrl(true);
    pub const RSHIFT: Self = Self::new().with_right_shift(true);
    pub const RALT: Self = Self::new().with_right_alt(true);
    pub const RGUI: Self = Self::new().with_right_gui(true);

    /// Both Control bits
    pub const CTRL: Self = Self::from_bits(0x11);
    /// Both Shift bits
    pub const SHIFT: Self = Self::from_bits(0x22);
    /// Both Alt bits
    pub const ALT: Self = Self::from_bits(0x44);
    /// Both GUI bits
    pub const GUI: Self = Self::from_bits(0x88);

    /// Returns `true` if any bit of `other` is set in `self`
    pub const fn intersects(self, other: Self) -> bool {
        self.into_bits() & other.into_bits() != 0
    }

    /// Either Shift is held
    pub const fn shift(self) -> bool {
        self.intersects(Self::SHIFT)
    }

    pub const fn is_empty(self) -> bool {
        self.into_bits() == 0
    }
}

/// Byte 1 of the internal report snapshot: layer and pointer modifiers.
///
/// This byte never reaches the host, it only steers the pipeline.
#[bitfield(u8, order = Lsb, defmt = cfg(feature = "defmt"))]
#[derive(Eq, PartialEq)]
pub struct ExtraModifiers {
    /// Left FN key held
    #[bits(1)]
    pub left_fn: bool,
    /// Right FN key held
    #[bits(1)]
    pub right_fn: bool,
    /// FN2 key held
    #[bits(1)]
    pub fn2: bool,
    /// The pointing device is being touched
    #[bits(1)]
    pub pad: bool,
    #[bits(4)]
    _reserved: u8,
}

impl BitOr for ExtraModifiers {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self::from_bits(self.into_bits() | rhs.into_bits())
    }
}
impl BitAnd for ExtraModifiers {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self::Output {
        Self::from_bits(self.into_bits() & rhs.into_bits())
    }
}
impl Not for ExtraModifiers {
    type Output = Self;

    fn not(self) -> Self::Output {
        Self::from_bits(!self.into_bits())
    }
}
impl BitAndAssign for ExtraModifiers {
    fn bitand_assign(&mut self, rhs: Self) {
        *self = *self & rhs;
    }
}
impl BitOrAssign for ExtraModifiers {
    fn bitor_assign(&mut self, rhs: Self) {
        *self = *self | rhs;
    }
}
impl BitXorAssign for ExtraModifiers {
    fn bitxor_assign(&mut self, rhs: Self) {
        *self = Self::from_bits(self.into_bits() ^ rhs.into_bits());
    }
}

impl ExtraModifiers {
    /// Both FN keys
    pub const FN: Self = Self::new().with_left_fn(true).with_right_fn(true);
    pub const FN2: Self = Self::new().with_fn2(true);
    pub const PAD: Self = Self::new().with_pad(true);

    /// Either FN key is held
    pub const fn is_fn(self) -> bool {
        self.left_fn() || self.right_fn()
    }

    pub const fn intersects(self, other: Self) -> bool {
        self.into_bits() & other.into_bits() != 0
    }

    pub const fn is_empty(self) -> bool {
        self.into_bits() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shift_mask() {
        assert!(HidModifiers::LSHIFT.shift());
        assert!(HidModifiers::RSHIFT.shift());
        assert!(!HidModifiers::LCTRL.shift());
        assert_eq!(HidModifiers::LSHIFT.into_bits(), 0x02);
        assert_eq!(HidModifiers::RSHIFT.into_bits(), 0x20);
    }

    #[test]
    fn test_toggle() {
        let mut m = HidModifiers::new();
        m ^= HidModifiers::LSHIFT;
        assert_eq!(m, HidModifiers::LSHIFT);
        m ^= HidModifiers::LSHIFT;
        assert!(m.is_empty());
    }

    #[test]
    fn test_extra_fn() {
        assert!(ExtraModifiers::new().with_right_fn(true).is_fn());
        assert!(!ExtraModifiers::FN2.is_fn());
        assert!(ExtraModifiers::PAD.intersects(ExtraModifiers::PAD | ExtraModifiers::FN2));
    }
}
