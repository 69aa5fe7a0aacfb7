//! Emoface UART link protocol
//!
//! The controller talks to two peripherals over UART using one frame
//! format: the network bridge (which owns WiFi and the dashboard session)
//! and the text display module.
//!
//! ```text
//! ┌───────┬────────┬──────┬─────────────┬──────────┐
//! │ START │ LENGTH │ TYPE │ PAYLOAD     │ CHECKSUM │
//! │ 0xAA  │ 1B     │ 1B   │ 0–64B       │ 1B       │
//! └───────┴────────┴──────┴─────────────┴──────────┘
//! ```
//!
//! CHECKSUM is the XOR of LENGTH, TYPE and every PAYLOAD byte.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod frame;
pub mod link;
pub mod messages;

pub use frame::{Frame, FrameError, FrameParser, FRAME_START, MAX_FRAME_SIZE, MAX_PAYLOAD_SIZE};
pub use link::LinkMonitor;
pub use messages::{BridgeMessage, ControllerMessage};
