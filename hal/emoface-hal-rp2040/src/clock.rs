//! Monotonic clock backed by the embassy time driver

use embassy_time::Instant;
use emoface_hal::{Millis, MonotonicClock};

/// Milliseconds since boot, truncated to `u32`
///
/// The truncation gives the wrapping counter the core logic expects.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbassyClock;

impl EmbassyClock {
    pub const fn new() -> Self {
        Self
    }
}

impl MonotonicClock for EmbassyClock {
    fn now_ms(&self) -> Millis {
        Instant::now().as_millis() as Millis
    }
}
