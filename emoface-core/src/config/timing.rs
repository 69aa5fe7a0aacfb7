//! Timing constants for gestures, modes and telemetry

use crate::Millis;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default debounce interval between accepted touch samples
pub const DEBOUNCE_MS: Millis = 200;

/// Default maximum gap between the two taps of a double-tap
pub const DOUBLE_TAP_WINDOW_MS: Millis = 400;

/// Default time the happy face stays up
pub const HAPPY_DURATION_MS: Millis = 1600;

/// Default time the weather screen stays up
pub const WEATHER_DURATION_MS: Millis = 6000;

/// Default telemetry push period
pub const TELEMETRY_PERIOD_MS: Millis = 2000;

/// Default interval between eye blinks
pub const BLINK_INTERVAL_MS: Millis = 4000;

/// All time-based behavior of the device
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TimingConfig {
    /// Touch samples closer than this to the last accepted one are ignored
    pub debounce_ms: Millis,
    /// Inclusive upper bound on the gap between the taps of a double-tap
    pub double_tap_window_ms: Millis,
    /// Happy mode returns to Eyes strictly after this long
    pub happy_duration_ms: Millis,
    /// Weather mode returns to Eyes strictly after this long
    pub weather_duration_ms: Millis,
    /// Sensor sample and cloud push period
    pub telemetry_period_ms: Millis,
    /// Interval between idle eye blinks
    pub blink_interval_ms: Millis,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            debounce_ms: DEBOUNCE_MS,
            double_tap_window_ms: DOUBLE_TAP_WINDOW_MS,
            happy_duration_ms: HAPPY_DURATION_MS,
            weather_duration_ms: WEATHER_DURATION_MS,
            telemetry_period_ms: TELEMETRY_PERIOD_MS,
            blink_interval_ms: BLINK_INTERVAL_MS,
        }
    }
}

impl TimingConfig {
    /// Scale every duration down by `factor`, for fast-forward simulations
    ///
    /// Durations never drop below 1 ms.
    pub fn accelerated(&self, factor: Millis) -> Self {
        let factor = factor.max(1);
        let scale = |ms: Millis| (ms / factor).max(1);
        Self {
            debounce_ms: scale(self.debounce_ms),
            double_tap_window_ms: scale(self.double_tap_window_ms),
            happy_duration_ms: scale(self.happy_duration_ms),
            weather_duration_ms: scale(self.weather_duration_ms),
            telemetry_period_ms: scale(self.telemetry_period_ms),
            blink_interval_ms: scale(self.blink_interval_ms),
        }
    }
}
