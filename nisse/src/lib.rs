//! # NISSE
//!
//! Scan-to-report pipeline of a programmable keyboard controller.
//!
//! Every scan tick the [`keyboard::Keyboard`] takes one raw matrix snapshot,
//! rejects ghosted ticks, debounces the asserted keys against a short history,
//! tracks modifiers and prefix (sticky) shifts, resolves keys through the
//! selected layout or the FN command layer, remaps them for the host OS and
//! hands back an 8 byte report together with a [`hid::Transmit`] directive.
//!
//! ## Feature flags
#![doc = document_features::document_features!()]
#![no_std]

// This mod MUST go first, so that the others see its macros.
pub(crate) mod fmt;

pub mod about;
pub mod channel;
pub mod config;
pub mod debounce;
pub mod descriptor;
pub mod hid;
pub mod kana;
pub mod keyboard;
pub mod layout;
pub mod light;
pub mod macro_queue;
pub mod matrix;
pub mod os;
pub mod pointer;
pub mod profile;
pub mod storage;

pub use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex as RawMutex;
pub use nisse_types::{keycode, led_indicator, modifier, settings};

/// Largest selectable debounce delay, in ticks
pub const DELAY_MAX: usize = 4;
/// Number of ticks kept by the debounce history ring
pub const HISTORY_DEPTH: usize = DELAY_MAX + 2;
/// Capacity of the macro emission queue
pub const MACRO_QUEUE_SIZE: usize = 256;
/// Number of reports buffered between the scan task and the transport
pub const REPORT_CHANNEL_SIZE: usize = 16;
/// Simultaneous non-modifier keys in a report
pub const REPORT_KEYS: usize = 6;
