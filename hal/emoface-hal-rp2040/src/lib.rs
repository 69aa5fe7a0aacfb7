//! RP2040-specific HAL for the Emoface firmware
//!
//! This crate provides RP2040 implementations of the shared `emoface-hal`
//! traits, plus the pin adapters the drivers need:
//!
//! - [`gpio::TouchPin`] - touch pad input (`emoface_hal::InputPin`)
//! - [`gpio::OpenDrainPin`] - single-wire sensor bus (`embedded_hal` digital)
//! - [`clock::EmbassyClock`] - millisecond clock on the embassy time driver

#![no_std]

pub mod clock;
pub mod gpio;

pub use clock::EmbassyClock;
pub use gpio::{OpenDrainPin, TouchPin};
