//! Climate sensor reading

/// One temperature/humidity sample
///
/// Either value may be missing when the sensor read failed. Readings are
/// never cached, so an absent value always means the latest read failed.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SensorReading {
    /// Temperature in degrees Celsius
    pub temperature: Option<f32>,
    /// Relative humidity in percent
    pub humidity: Option<f32>,
}

impl SensorReading {
    /// Build a reading from raw driver values
    ///
    /// NaN is how most climate drivers report a failed read, so it maps to
    /// an absent value.
    pub fn new(temperature: f32, humidity: f32) -> Self {
        Self {
            temperature: valid(temperature),
            humidity: valid(humidity),
        }
    }

    /// A reading where both values are missing
    pub const fn absent() -> Self {
        Self {
            temperature: None,
            humidity: None,
        }
    }

    /// Check if both values are present
    pub fn is_complete(&self) -> bool {
        self.temperature.is_some() && self.humidity.is_some()
    }

    /// Both values, if both are present
    pub fn both(&self) -> Option<(f32, f32)> {
        Some((self.temperature?, self.humidity?))
    }
}

fn valid(value: f32) -> Option<f32> {
    if value.is_nan() {
        None
    } else {
        Some(value)
    }
}
