//! Periodic telemetry pump
//!
//! Every `telemetry_period_ms` the pump takes one sensor reading and, when
//! the reading is complete and the link is up, publishes temperature then
//! humidity on their dashboard channels. Nothing is queued or retried: a
//! missed period is simply skipped.

use crate::config::TelemetryChannels;
use crate::sensor::SensorReading;
use crate::traits::{ClimateSensor, Connectivity, TelemetrySink};
use crate::{elapsed, Millis};

/// What happened on a pump poll
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PumpOutcome {
    /// Period has not elapsed yet; nothing was read
    NotDue,
    /// At least one value was missing; nothing was published
    SensorFailure(SensorReading),
    /// Reading was complete but the link was down
    Offline(SensorReading),
    /// Both values were published
    Published(SensorReading),
}

impl PumpOutcome {
    /// The reading taken on this poll, if the pump fired
    pub fn reading(&self) -> Option<SensorReading> {
        match self {
            PumpOutcome::NotDue => None,
            PumpOutcome::SensorFailure(r) | PumpOutcome::Offline(r) | PumpOutcome::Published(r) => {
                Some(*r)
            }
        }
    }

    /// Check if the pump fired on this poll
    pub fn fired(&self) -> bool {
        !matches!(self, PumpOutcome::NotDue)
    }
}

/// Fixed-interval sensor to dashboard pump
#[derive(Debug, Clone)]
pub struct PeriodicTelemetryPump {
    period_ms: Millis,
    channels: TelemetryChannels,
    last_fire: Millis,
}

impl PeriodicTelemetryPump {
    /// Create a pump whose first fire is one period after `start`
    pub fn new(period_ms: Millis, channels: TelemetryChannels, start: Millis) -> Self {
        Self {
            period_ms,
            channels,
            last_fire: start,
        }
    }

    /// Time of the last fire (or construction)
    pub fn last_fire(&self) -> Millis {
        self.last_fire
    }

    /// Check if a poll at `now` would fire
    pub fn is_due(&self, now: Millis) -> bool {
        elapsed(now, self.last_fire) >= self.period_ms
    }

    /// Run one pump cycle
    pub fn poll<S, L, K>(&mut self, now: Millis, sensor: &mut S, link: &L, sink: &mut K) -> PumpOutcome
    where
        S: ClimateSensor + ?Sized,
        L: Connectivity + ?Sized,
        K: TelemetrySink + ?Sized,
    {
        if !self.is_due(now) {
            return PumpOutcome::NotDue;
        }
        self.last_fire = now;

        let reading = sensor.read();
        let Some((temperature, humidity)) = reading.both() else {
            #[cfg(feature = "defmt")]
            defmt::warn!("Failed to read from climate sensor");
            return PumpOutcome::SensorFailure(reading);
        };

        if !link.is_connected() {
            #[cfg(feature = "defmt")]
            defmt::debug!("Dashboard offline, dropping reading");
            return PumpOutcome::Offline(reading);
        }

        sink.publish(self.channels.temperature, temperature);
        sink.publish(self.channels.humidity, humidity);

        #[cfg(feature = "defmt")]
        defmt::debug!("Published T={} H={}", temperature, humidity);

        PumpOutcome::Published(reading)
    }
}
