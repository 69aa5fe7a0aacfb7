//! Embassy async tasks
//!
//! The control loop itself runs in `main`; these tasks only move bytes
//! to and from the network bridge.

pub mod bridge_rx;
pub mod bridge_tx;

pub use bridge_rx::bridge_rx_task;
pub use bridge_tx::bridge_tx_task;
