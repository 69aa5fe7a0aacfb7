//! Per-iteration control loop
//!
//! [`FaceController::step`] is one pass of the device's cooperative loop:
//!
//! 1. sample the touch pad and poll the gesture recognizer
//! 2. an accepted touch outside Eyes returns to Eyes immediately
//! 3. feed the gesture to the mode machine, then check mode timeouts
//! 4. poll the telemetry pump
//! 5. render, then acknowledge the entry flag
//!
//! The caller owns the clock and the pacing of the loop.

use crate::config::DeviceConfig;
use crate::gesture::{GestureEvent, TouchGestureRecognizer};
use crate::mode::{DisplayMode, ModeStateMachine};
use crate::sensor::SensorReading;
use crate::telemetry::{PeriodicTelemetryPump, PumpOutcome};
use crate::traits::{ClimateSensor, Connectivity, ModeRenderer, TelemetrySink, TouchInput};
use crate::Millis;

/// Summary of one loop iteration
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StepReport {
    /// Gesture recognized this iteration
    pub event: GestureEvent,
    /// A raw touch passed the debounce filter
    pub touch_accepted: bool,
    /// Mode after this iteration
    pub mode: DisplayMode,
    /// Mode was entered this iteration
    pub just_entered: bool,
    /// Telemetry pump result
    pub telemetry: PumpOutcome,
}

/// Owns the state machines and the collaborators they drive
pub struct FaceController<T, S, L, K, R> {
    recognizer: TouchGestureRecognizer,
    machine: ModeStateMachine,
    pump: PeriodicTelemetryPump,
    touch: T,
    sensor: S,
    link: L,
    sink: K,
    renderer: R,
}

impl<T, S, L, K, R> FaceController<T, S, L, K, R>
where
    T: TouchInput,
    S: ClimateSensor,
    L: Connectivity,
    K: TelemetrySink,
    R: ModeRenderer,
{
    /// Create a controller starting in Eyes at `now`
    pub fn new(
        config: &DeviceConfig,
        now: Millis,
        touch: T,
        sensor: S,
        link: L,
        sink: K,
        renderer: R,
    ) -> Self {
        let timing = config.timing;
        Self {
            recognizer: TouchGestureRecognizer::new(&timing),
            machine: ModeStateMachine::new(timing, now),
            pump: PeriodicTelemetryPump::new(timing.telemetry_period_ms, config.telemetry, now),
            touch,
            sensor,
            link,
            sink,
            renderer,
        }
    }

    /// Run one loop iteration at `now`
    pub fn step(&mut self, now: Millis) -> StepReport {
        let touched = self.touch.is_touched();
        let poll = self.recognizer.poll_touch(touched, now);

        if poll.accepted && self.machine.interrupt(now) {
            // The interrupting touch must not open a double-tap window
            self.recognizer.disarm();
        } else {
            self.machine.on_gesture(poll.event, now);
        }
        self.machine.tick(now);

        let telemetry = self
            .pump
            .poll(now, &mut self.sensor, &self.link, &mut self.sink);

        let mode = self.machine.mode();
        let just_entered = self.machine.just_entered();
        let reading = match telemetry.reading() {
            Some(reading) => reading,
            None if mode == DisplayMode::Weather && just_entered => self.sensor.read(),
            None => SensorReading::absent(),
        };

        self.renderer.render(mode, just_entered, &reading);
        self.machine.acknowledge_entry();

        #[cfg(feature = "defmt")]
        if just_entered {
            defmt::info!("Mode -> {} at {}ms", mode, now);
        }

        StepReport {
            event: poll.event,
            touch_accepted: poll.accepted,
            mode,
            just_entered,
            telemetry,
        }
    }

    /// Current display mode
    pub fn mode(&self) -> DisplayMode {
        self.machine.mode()
    }

    pub fn machine(&self) -> &ModeStateMachine {
        &self.machine
    }

    pub fn recognizer(&self) -> &TouchGestureRecognizer {
        &self.recognizer
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }
}
