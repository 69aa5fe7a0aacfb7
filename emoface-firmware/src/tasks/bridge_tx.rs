//! Bridge UART transmit task

use defmt::*;
use embassy_rp::uart::BufferedUartTx;
use embedded_io_async::Write;

use emoface_protocol::MAX_FRAME_SIZE;

use crate::channels::BRIDGE_OUTBOX;

/// Bridge TX task - drains the outbox onto the UART
#[embassy_executor::task]
pub async fn bridge_tx_task(mut tx: BufferedUartTx) {
    info!("Bridge TX task started");

    let mut buf = [0u8; MAX_FRAME_SIZE];

    loop {
        let frame = BRIDGE_OUTBOX.receive().await;
        let len = match frame.encode(&mut buf) {
            Ok(len) => len,
            Err(e) => {
                warn!("Failed to encode frame: {:?}", e);
                continue;
            }
        };
        if let Err(e) = tx.write_all(&buf[..len]).await {
            warn!("Bridge write failed: {:?}", e);
        }
    }
}
