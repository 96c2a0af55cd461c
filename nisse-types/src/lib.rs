//! # NISSE Types
//!
//! Plain data shared by the NISSE keyboard controller crates.
//!
//! ## Modules
//!
//! - [`keycode`] - HID keycodes plus the private codes used by the layouts and the FN layer
//! - [`modifier`] - Standard HID modifier byte and the extra (FN/FN2/pointer) modifier byte
//! - [`led_indicator`] - Host LED indicator states
//! - [`settings`] - Persisted keyboard settings and their normalisation

#![no_std]

pub mod keycode;
pub mod led_indicator;
pub mod modifier;
pub mod settings;
