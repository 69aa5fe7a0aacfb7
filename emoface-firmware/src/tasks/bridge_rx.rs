//! Bridge UART receive task
//!
//! Receives frames from the network bridge and keeps the link monitor up
//! to date.

use defmt::*;
use embassy_rp::uart::BufferedUartRx;
use embedded_io_async::Read;

use emoface_hal::MonotonicClock;
use emoface_hal_rp2040::EmbassyClock;
use emoface_protocol::{BridgeMessage, Frame, FrameParser};

use crate::channels::{BRIDGE_OUTBOX, LINK};

/// Buffer size for UART receive
const RX_BUF_SIZE: usize = 64;

/// Bridge RX task - parses frames and answers pings
#[embassy_executor::task]
pub async fn bridge_rx_task(mut rx: BufferedUartRx) {
    info!("Bridge RX task started");

    let clock = EmbassyClock::new();
    let mut parser = FrameParser::new();
    let mut buf = [0u8; RX_BUF_SIZE];

    loop {
        match rx.read(&mut buf).await {
            Ok(n) if n > 0 => {
                trace!("RX: {} bytes", n);

                for &byte in &buf[..n] {
                    match parser.push(byte) {
                        Ok(Some(frame)) => handle_frame(&frame, clock.now_ms()),
                        Ok(None) => {}
                        Err(e) => warn!("Frame parse error: {:?}", e),
                    }
                }
            }
            Ok(_) => {}
            Err(e) => {
                warn!("UART read error: {:?}", e);
            }
        }
    }
}

fn handle_frame(frame: &Frame, now: u32) {
    let msg = match BridgeMessage::from_frame(frame) {
        Ok(msg) => msg,
        Err(e) => {
            warn!("Unexpected bridge frame 0x{:02x}: {:?}", frame.kind, e);
            return;
        }
    };

    trace!("Bridge: {:?}", msg);

    let Some(reply) = LINK.handle(&msg, now) else {
        return;
    };
    match reply.to_frame() {
        Ok(frame) => {
            if BRIDGE_OUTBOX.try_send(frame).is_err() {
                warn!("Bridge outbox full, dropping reply");
            }
        }
        Err(e) => warn!("Failed to encode reply: {:?}", e),
    }
}
