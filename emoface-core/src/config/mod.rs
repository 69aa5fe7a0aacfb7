//! Configuration types
//!
//! Every duration the device uses lives here instead of being hardwired, so
//! tests can drive the logic with an accelerated virtual clock and boards can
//! tune the feel of the touch pad from `device.toml`.

pub mod device;
pub mod parse;
pub mod timing;

pub use device::{DeviceConfig, TelemetryChannels, TouchConfig};
pub use parse::{parse_config, ParseError};
pub use timing::TimingConfig;
