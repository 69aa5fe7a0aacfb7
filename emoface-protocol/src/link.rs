//! Dashboard link state as reported by the network bridge
//!
//! The bridge restates its dashboard session state with `LinkStatus` and
//! pings the controller periodically. The link counts as connected only
//! while the last status said so and the bridge itself is still talking.
//!
//! All methods take `&self` so one monitor can live in a `static` shared
//! between the UART receive task and the control loop. Only atomic loads
//! and stores are used, which Cortex-M0 supports natively.

use core::sync::atomic::{AtomicBool, AtomicU32, Ordering};

use emoface_core::traits::Connectivity;
use emoface_hal::{elapsed, Millis};

use crate::messages::{BridgeMessage, ControllerMessage};

/// Bridge silence after which the link is considered down
pub const BRIDGE_TIMEOUT_MS: Millis = 3000;

/// Tracks whether telemetry can reach the dashboard
#[derive(Debug)]
pub struct LinkMonitor {
    /// Last `LinkStatus` received
    reported: AtomicBool,
    /// Bridge heard from within the timeout
    alive: AtomicBool,
    last_heard: AtomicU32,
    timeout_ms: Millis,
}

impl Default for LinkMonitor {
    fn default() -> Self {
        Self::new(BRIDGE_TIMEOUT_MS)
    }
}

impl LinkMonitor {
    /// Create a monitor that starts disconnected
    pub const fn new(timeout_ms: Millis) -> Self {
        Self {
            reported: AtomicBool::new(false),
            alive: AtomicBool::new(false),
            last_heard: AtomicU32::new(0),
            timeout_ms,
        }
    }

    /// Record a message from the bridge, returning the reply to send
    pub fn handle(&self, msg: &BridgeMessage, now: Millis) -> Option<ControllerMessage<'static>> {
        self.last_heard.store(now, Ordering::Relaxed);
        self.alive.store(true, Ordering::Release);

        match msg {
            BridgeMessage::Ping => Some(ControllerMessage::Pong),
            BridgeMessage::LinkStatus { connected } => {
                #[cfg(feature = "defmt")]
                if *connected != self.reported.load(Ordering::Relaxed) {
                    defmt::info!("Dashboard link {}", if *connected { "up" } else { "down" });
                }
                self.reported.store(*connected, Ordering::Release);
                None
            }
        }
    }

    /// Expire the bridge if it has been silent too long
    ///
    /// Call once per loop iteration before reading `is_connected`.
    pub fn refresh(&self, now: Millis) {
        if !self.alive.load(Ordering::Acquire) {
            return;
        }
        let last = self.last_heard.load(Ordering::Relaxed);
        if elapsed(now, last) > self.timeout_ms {
            #[cfg(feature = "defmt")]
            defmt::warn!("Bridge silent for {}ms, link down", elapsed(now, last));
            self.alive.store(false, Ordering::Release);
        }
    }

    /// Check if the bridge is still talking, regardless of dashboard state
    pub fn is_bridge_alive(&self) -> bool {
        self.alive.load(Ordering::Acquire)
    }
}

impl Connectivity for LinkMonitor {
    fn is_connected(&self) -> bool {
        self.alive.load(Ordering::Acquire) && self.reported.load(Ordering::Acquire)
    }
}
