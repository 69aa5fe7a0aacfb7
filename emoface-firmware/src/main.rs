//! Emoface - Touch-driven Status Face Firmware
//!
//! Main firmware binary for RP2040 boards. A text display shows a blinking
//! face; a tap on the touch pad makes it smile, a double-tap shows the room
//! temperature and humidity. The same readings are pushed to a cloud
//! dashboard through a network bridge module on UART0.
//!
//! Pin assignments:
//!
//! | Function      | Pin                |
//! |---------------|--------------------|
//! | Bridge UART0  | GPIO0 TX, GPIO1 RX |
//! | Display UART1 | GPIO4 TX           |
//! | Touch pad     | GPIO15             |
//! | DHT11 data    | GPIO16             |

#![no_std]
#![no_main]

use core::fmt::Write as _;

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::peripherals::UART0;
use embassy_rp::uart::{BufferedInterruptHandler, Config as UartConfig, Uart, UartTx};
use embassy_time::{Delay, Duration, Ticker, Timer};
use heapless::String;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use emoface_core::config::{parse_config, DeviceConfig};
use emoface_core::controller::FaceController;
use emoface_core::gesture::GestureEvent;
use emoface_core::traits::Connectivity;
use emoface_display::{DisplayBackend, FrameBackend, ScreenRenderer};
use emoface_drivers::sensor::Dht11;
use emoface_drivers::touch::TouchPad;
use emoface_hal::{elapsed, Millis, MonotonicClock};
use emoface_hal_rp2040::{EmbassyClock, OpenDrainPin, TouchPin};

use crate::channels::LINK;
use crate::telemetry::BridgeSink;

mod channels;
mod tasks;
mod telemetry;

/// Embedded configuration (compiled into firmware)
/// Edit device.toml and rebuild to customize
const EMBEDDED_CONFIG: &str = include_str!("../device.toml");

/// Control loop period
const LOOP_PERIOD_MS: u64 = 10;

/// How long boot waits for the dashboard before going offline
const LINK_WAIT_MS: Millis = 10_000;

/// Link check interval while waiting
const LINK_POLL_MS: u64 = 250;

/// How long the link result stays on screen
const SPLASH_MS: u64 = 1_500;

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
});

// Static cells for UART buffers (must live forever)
static TX_BUF: StaticCell<[u8; 256]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; 256]> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Emoface firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let config = load_config();

    // Bridge UART (115200 baud default)
    let tx_buf = TX_BUF.init([0u8; 256]);
    let rx_buf = RX_BUF.init([0u8; 256]);

    let uart = Uart::new_blocking(p.UART0, p.PIN_0, p.PIN_1, UartConfig::default());
    let uart = uart.into_buffered(Irqs, tx_buf, rx_buf);
    let (tx, rx) = uart.split();

    spawner.spawn(tasks::bridge_rx_task(rx)).unwrap();
    spawner.spawn(tasks::bridge_tx_task(tx)).unwrap();
    info!("Bridge UART initialized");

    // Display module only listens, so TX is enough
    let display_tx = UartTx::new_blocking(p.UART1, p.PIN_4, UartConfig::default());
    let clock = EmbassyClock::new();
    let mut renderer = ScreenRenderer::new(
        FrameBackend::new(display_tx),
        clock,
        config.timing.blink_interval_ms,
    );
    info!("Display UART initialized");

    let online = wait_for_link(&mut renderer, &clock).await;
    if online {
        info!("Dashboard connected");
        renderer.show_status(&["", "", "", "     CONNECTED!"]);
    } else {
        warn!("No dashboard after {}ms, running offline", LINK_WAIT_MS);
        renderer.show_status(&["", "", "", "    Offline Mode", "", "  Touch still works"]);
    }
    Timer::after_millis(SPLASH_MS).await;

    let touch = TouchPad::from_config(TouchPin::new(p.PIN_15), &config.touch);
    let sensor = Dht11::new(OpenDrainPin::new(p.PIN_16), Delay);

    let mut controller = FaceController::new(
        &config,
        clock.now_ms(),
        touch,
        sensor,
        &LINK,
        BridgeSink,
        renderer,
    );

    info!("Entering control loop");

    let mut ticker = Ticker::every(Duration::from_millis(LOOP_PERIOD_MS));
    loop {
        ticker.next().await;

        let now = clock.now_ms();
        LINK.refresh(now);
        let report = controller.step(now);

        if report.event != GestureEvent::None {
            debug!("Gesture {} in {}", report.event, report.mode);
        }
        if report.telemetry.fired() {
            trace!("Telemetry: {}", report.telemetry);
        }
    }
}

/// Parse the embedded device.toml, falling back to defaults
///
/// build.rs already rejects a bad file, so the fallback only guards
/// against the two parsers disagreeing.
fn load_config() -> DeviceConfig {
    match parse_config(EMBEDDED_CONFIG) {
        Ok(config) => {
            info!("Configuration loaded: {}", config);
            config
        }
        Err(e) => {
            error!("Failed to parse device.toml: {:?}, using defaults", e);
            DeviceConfig::default()
        }
    }
}

/// Show a connecting screen until the dashboard link is up or time runs out
///
/// Returns whether the link came up.
async fn wait_for_link<B, C>(renderer: &mut ScreenRenderer<B, C>, clock: &C) -> bool
where
    B: DisplayBackend,
    C: MonotonicClock,
{
    let start = clock.now_ms();

    loop {
        let now = clock.now_ms();
        LINK.refresh(now);
        if LINK.is_connected() {
            return true;
        }

        let waited = elapsed(now, start);
        if waited >= LINK_WAIT_MS {
            return false;
        }

        let mut countdown: String<21> = String::new();
        let _ = write!(countdown, "  {}s left", (LINK_WAIT_MS - waited).div_ceil(1000));
        let bridge = if LINK.is_bridge_alive() {
            "  Bridge: up"
        } else {
            "  Bridge: waiting"
        };
        renderer.show_status(&[
            "",
            "      EMOFACE",
            "",
            "  Connecting to",
            "  dashboard...",
            bridge,
            countdown.as_str(),
        ]);

        Timer::after_millis(LINK_POLL_MS).await;
    }
}
