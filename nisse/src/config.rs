use embassy_time::Duration;

/// Board level configuration of the keyboard, fixed at startup.
#[derive(Debug, Clone, Copy)]
pub struct KeyboardConfig {
    /// Board revision. Revision 2 and later boards use a remapped matrix,
    /// revisions before 3 blink the Caps Lock LED.
    pub board_rev: u8,
    /// FN keys can be tapped alone to send Lang1/Lang2. Adds the `CX`/`SX` modifier schemes.
    pub dual_role_fn: bool,
    /// Board with a radio module and switchable profiles
    pub profiles: bool,
    /// Interval between two matrix scans
    pub scan_interval: Duration,
    /// Firmware version, one nibble per digit (`0x012` is 0.12)
    pub version: u16,
}

impl Default for KeyboardConfig {
    fn default() -> Self {
        Self {
            board_rev: 2,
            dual_role_fn: false,
            profiles: false,
            scan_interval: Duration::from_millis(1),
            version: 0x010,
        }
    }
}
