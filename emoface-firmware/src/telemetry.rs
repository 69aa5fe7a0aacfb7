//! Telemetry sink on the bridge link

use defmt::*;

use emoface_core::traits::TelemetrySink;
use emoface_protocol::ControllerMessage;

use crate::channels::BRIDGE_OUTBOX;

/// Queues dashboard channel updates for the bridge
///
/// Publishing never blocks the control loop. When the outbox is full the
/// value is dropped.
pub struct BridgeSink;

impl TelemetrySink for BridgeSink {
    fn publish(&mut self, channel: u8, value: f32) {
        let frame = match (ControllerMessage::Telemetry { channel, value }).to_frame() {
            Ok(frame) => frame,
            Err(e) => {
                warn!("Failed to encode telemetry: {:?}", e);
                return;
            }
        };
        if BRIDGE_OUTBOX.try_send(frame).is_err() {
            warn!("Bridge outbox full, dropping channel {}", channel);
        }
    }
}
