//! Inter-task shared state
//!
//! The bridge UART is shared between the receive task (pong replies) and
//! the control loop (telemetry). Both queue frames into `BRIDGE_OUTBOX`
//! and a single transmit task owns the UART.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;

use emoface_protocol::link::BRIDGE_TIMEOUT_MS;
use emoface_protocol::{Frame, LinkMonitor};

/// Frames waiting for the bridge UART
const OUTBOX_SIZE: usize = 8;

/// Dashboard link state, updated by the bridge RX task
pub static LINK: LinkMonitor = LinkMonitor::new(BRIDGE_TIMEOUT_MS);

/// Frames to send to the network bridge
pub static BRIDGE_OUTBOX: Channel<CriticalSectionRawMutex, Frame, OUTBOX_SIZE> = Channel::new();
