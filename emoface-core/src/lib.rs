//! Board-agnostic core logic for the Emoface status display
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Touch gesture recognition (debounce, single/double tap)
//! - Display mode state machine
//! - Periodic telemetry pump
//! - Timing configuration and its TOML loader
//! - Collaborator traits (touch, sensor, link, renderer)
//! - The per-iteration controller tying them together

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod config;
pub mod controller;
pub mod gesture;
pub mod mode;
pub mod sensor;
pub mod telemetry;
pub mod traits;

pub use emoface_hal::{elapsed, Millis};
