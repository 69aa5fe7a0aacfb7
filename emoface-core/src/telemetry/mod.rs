//! Periodic telemetry to the dashboard

pub mod pump;

pub use pump::{PeriodicTelemetryPump, PumpOutcome};
