//! Whole-device configuration

use super::timing::TimingConfig;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Dashboard channel ids the readings are pushed to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TelemetryChannels {
    /// Channel carrying temperature in °C
    pub temperature: u8,
    /// Channel carrying relative humidity in %
    pub humidity: u8,
}

impl Default for TelemetryChannels {
    fn default() -> Self {
        Self {
            temperature: 0,
            humidity: 1,
        }
    }
}

/// Touch pad electrical configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TouchConfig {
    /// Pad output reads high while touched
    pub active_high: bool,
}

impl Default for TouchConfig {
    fn default() -> Self {
        Self { active_high: true }
    }
}

/// Complete device configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DeviceConfig {
    pub timing: TimingConfig,
    pub telemetry: TelemetryChannels,
    pub touch: TouchConfig,
}

impl DeviceConfig {
    /// Create a configuration with all defaults
    pub fn new() -> Self {
        Self::default()
    }
}
