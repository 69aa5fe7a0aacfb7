//! Emoface Hardware Abstraction Layer
//!
//! This crate defines the leaf hardware traits the rest of the workspace is
//! written against. Chip-specific HALs (currently RP2040) implement them so
//! the same application logic runs on the target and in host tests.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application (emoface-firmware, etc.)   │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  emoface-hal (this crate - traits)      │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//!            ┌─────────────────┐
//!            │ emoface-hal-    │
//!            │    rp2040       │
//!            └─────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::InputPin`] - Digital input (touch pad)
//! - [`time::MonotonicClock`] - Wrapping millisecond clock

#![no_std]
#![deny(unsafe_code)]

pub mod gpio;
pub mod time;

// Re-export key items at crate root for convenience
pub use gpio::InputPin;
pub use time::{elapsed, Millis, MonotonicClock};
