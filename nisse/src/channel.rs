//! Exposed channels which can be used to share data between the scan task and the transport

use embassy_sync::channel::Channel;
use embassy_sync::signal::Signal;
pub use embassy_sync::{blocking_mutex, channel, signal};

use crate::descriptor::KeyboardReport;
use crate::led_indicator::LedIndicator;
use crate::{REPORT_CHANNEL_SIZE, RawMutex};

/// Channel for keyboard reports from the scan task to the hid writer
pub static KEYBOARD_REPORT_CHANNEL: Channel<RawMutex, KeyboardReport, REPORT_CHANNEL_SIZE> = Channel::new();
/// Signal for the LED state reported by the host
pub static HOST_LED_SIGNAL: Signal<RawMutex, LedIndicator> = Signal::new();
/// Signal for the indicator LEDs composed by the keyboard, to be shown by the board
pub static LED_INDICATOR_SIGNAL: Signal<RawMutex, LedIndicator> = Signal::new();
