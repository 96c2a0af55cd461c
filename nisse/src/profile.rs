//! Radio/profile collaborator of the wireless boards.
//!
//! Only consulted when `KeyboardConfig::profiles` is set.

pub trait ProfileController {
    /// Switch to another settings profile (and host connection)
    fn select_profile(&mut self, profile: u8);

    fn current_profile(&self) -> u8;

    /// Connected over USB rather than the radio
    fn is_usb_mode(&self) -> bool;

    /// Powered from the bus rather than the battery
    fn is_bus_powered(&self) -> bool;

    /// Forget every bonded host
    fn clear_bonding(&mut self);

    fn radio_revision(&self) -> u8 {
        0
    }

    /// Radio module firmware version, one nibble per digit (`0x123` is 1.23)
    fn radio_version(&self) -> u16 {
        0
    }

    /// LE secure connections level of the current link
    fn lesc(&self) -> u8 {
        0
    }

    /// Battery voltage in hundredths of a volt
    fn battery_voltage(&self) -> u16 {
        0
    }

    /// Battery level in percent
    fn battery_level(&self) -> u8 {
        0
    }
}

/// Wired boards with a single profile
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProfile;

impl ProfileController for NoProfile {
    fn select_profile(&mut self, _profile: u8) {}

    fn current_profile(&self) -> u8 {
        0
    }

    fn is_usb_mode(&self) -> bool {
        true
    }

    fn is_bus_powered(&self) -> bool {
        true
    }

    fn clear_bonding(&mut self) {}
}
