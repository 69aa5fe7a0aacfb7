//! Mode state machine definition
//!
//! What the display shows is a function of the current mode, the time it
//! was entered, and a one-shot `just_entered` flag that lets the renderer
//! perform entry actions exactly once.

use crate::config::TimingConfig;
use crate::gesture::GestureEvent;
use crate::{elapsed, Millis};

/// Display modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayMode {
    /// Idle animated eyes
    #[default]
    Eyes,
    /// Happy face after a single tap
    Happy,
    /// Temperature/humidity screen after a double tap
    Weather,
}

impl DisplayMode {
    /// Check if this is the idle mode
    pub fn is_idle(&self) -> bool {
        matches!(self, DisplayMode::Eyes)
    }

    /// Check if the mode is redrawn every cycle
    ///
    /// Static screens (Weather) are drawn once on entry.
    pub fn is_animated(&self) -> bool {
        matches!(self, DisplayMode::Eyes | DisplayMode::Happy)
    }

    /// How long the mode lasts before falling back to Eyes, if it times out
    pub fn timeout_ms(&self, timing: &TimingConfig) -> Option<Millis> {
        match self {
            DisplayMode::Eyes => None,
            DisplayMode::Happy => Some(timing.happy_duration_ms),
            DisplayMode::Weather => Some(timing.weather_duration_ms),
        }
    }
}

/// Inputs to the mode machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ModeInput {
    /// Output of the gesture recognizer for this cycle
    Gesture(GestureEvent),
    /// A raw touch passed the debounce filter this cycle
    Touch,
    /// Time check, evaluated every cycle
    Tick,
}

/// Complete mode machine state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ModeMachineState {
    /// Mode currently shown
    pub current: DisplayMode,
    /// When `current` was entered
    pub mode_entered_at: Millis,
    /// Set on every transition, cleared only by the consumer
    pub just_entered: bool,
}

impl Default for ModeMachineState {
    fn default() -> Self {
        Self::initial(0)
    }
}

impl ModeMachineState {
    /// Power-on state: Eyes, no pending entry action
    pub const fn initial(now: Millis) -> Self {
        Self {
            current: DisplayMode::Eyes,
            mode_entered_at: now,
            just_entered: false,
        }
    }

    fn enter(mode: DisplayMode, now: Millis) -> Self {
        Self {
            current: mode,
            mode_entered_at: now,
            just_entered: true,
        }
    }

    /// Process an input and return the next state
    ///
    /// This is the core transition logic. Any touch or gesture outside Eyes
    /// returns to Eyes before tap count is considered, so a double tap can
    /// never jump directly from Happy to Weather.
    pub fn transition(self, input: ModeInput, now: Millis, timing: &TimingConfig) -> Self {
        use DisplayMode::*;
        use GestureEvent::{DoubleTap, SingleTap};

        match (self.current, input) {
            // Touch interrupt has priority outside Eyes
            (Happy | Weather, ModeInput::Touch) => Self::enter(Eyes, now),
            (Happy | Weather, ModeInput::Gesture(event)) if event.is_gesture() => {
                Self::enter(Eyes, now)
            }

            // Tap count selects the destination only from Eyes
            (Eyes, ModeInput::Gesture(SingleTap)) => Self::enter(Happy, now),
            (Eyes, ModeInput::Gesture(DoubleTap)) => Self::enter(Weather, now),

            // Timeouts back to Eyes
            (mode, ModeInput::Tick) => match mode.timeout_ms(timing) {
                Some(limit) if elapsed(now, self.mode_entered_at) > limit => {
                    Self::enter(Eyes, now)
                }
                _ => self,
            },

            // Default: stay in current state
            _ => self,
        }
    }
}

/// Owned mode machine with its timing
#[derive(Debug, Clone)]
pub struct ModeStateMachine {
    state: ModeMachineState,
    timing: TimingConfig,
}

impl Default for ModeStateMachine {
    fn default() -> Self {
        Self::new(TimingConfig::default(), 0)
    }
}

impl ModeStateMachine {
    /// Create a machine in Eyes mode, entered at `now`
    pub fn new(timing: TimingConfig, now: Millis) -> Self {
        Self {
            state: ModeMachineState::initial(now),
            timing,
        }
    }

    /// Get the full state
    pub fn state(&self) -> &ModeMachineState {
        &self.state
    }

    /// Get the current mode
    pub fn mode(&self) -> DisplayMode {
        self.state.current
    }

    /// Check if the entry action for the current mode is still pending
    pub fn just_entered(&self) -> bool {
        self.state.just_entered
    }

    /// Feed this cycle's gesture. Returns true if the mode changed.
    pub fn on_gesture(&mut self, event: GestureEvent, now: Millis) -> bool {
        self.apply(ModeInput::Gesture(event), now)
    }

    /// Feed an accepted raw touch. Returns true if it forced a return to Eyes.
    pub fn interrupt(&mut self, now: Millis) -> bool {
        self.apply(ModeInput::Touch, now)
    }

    /// Evaluate mode timeouts. Returns true if the mode changed.
    pub fn tick(&mut self, now: Millis) -> bool {
        self.apply(ModeInput::Tick, now)
    }

    /// Mark the entry action as done
    pub fn acknowledge_entry(&mut self) {
        self.state.just_entered = false;
    }

    fn apply(&mut self, input: ModeInput, now: Millis) -> bool {
        let next = self.state.transition(input, now, &self.timing);
        let changed = next != self.state;
        self.state = next;
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn in_mode(mode: DisplayMode, entered: Millis) -> ModeMachineState {
        ModeMachineState {
            current: mode,
            mode_entered_at: entered,
            just_entered: false,
        }
    }

    #[test]
    fn test_initial_state() {
        let machine = ModeStateMachine::default();
        assert_eq!(machine.mode(), DisplayMode::Eyes);
        assert!(!machine.just_entered());
    }

    #[test]
    fn test_eyes_single_tap_to_happy() {
        let timing = TimingConfig::default();
        let next = in_mode(DisplayMode::Eyes, 0).transition(
            ModeInput::Gesture(GestureEvent::SingleTap),
            520,
            &timing,
        );
        assert_eq!(next.current, DisplayMode::Happy);
        assert_eq!(next.mode_entered_at, 520);
        assert!(next.just_entered);
    }

    #[test]
    fn test_eyes_double_tap_to_weather() {
        let timing = TimingConfig::default();
        let next = in_mode(DisplayMode::Eyes, 0).transition(
            ModeInput::Gesture(GestureEvent::DoubleTap),
            300,
            &timing,
        );
        assert_eq!(next.current, DisplayMode::Weather);
        assert_eq!(next.mode_entered_at, 300);
        assert!(next.just_entered);
    }

    #[test]
    fn test_any_gesture_outside_eyes_returns_to_eyes() {
        let timing = TimingConfig::default();
        for mode in [DisplayMode::Happy, DisplayMode::Weather] {
            for event in [GestureEvent::SingleTap, GestureEvent::DoubleTap] {
                let next = in_mode(mode, 1000).transition(ModeInput::Gesture(event), 1100, &timing);
                assert_eq!(next.current, DisplayMode::Eyes);
                assert_eq!(next.mode_entered_at, 1100);
                assert!(next.just_entered);
            }
        }
    }

    #[test]
    fn test_touch_interrupt_only_outside_eyes() {
        let timing = TimingConfig::default();
        let eyes = in_mode(DisplayMode::Eyes, 0);
        assert_eq!(eyes.transition(ModeInput::Touch, 50, &timing), eyes);

        let happy = in_mode(DisplayMode::Happy, 0);
        let next = happy.transition(ModeInput::Touch, 50, &timing);
        assert_eq!(next.current, DisplayMode::Eyes);
    }

    #[test]
    fn test_no_gesture_is_no_change() {
        let timing = TimingConfig::default();
        for mode in [DisplayMode::Eyes, DisplayMode::Happy, DisplayMode::Weather] {
            let state = in_mode(mode, 0);
            let next = state.transition(ModeInput::Gesture(GestureEvent::None), 10, &timing);
            assert_eq!(next, state);
        }
    }

    #[test]
    fn test_happy_timeout_is_strict() {
        let mut machine = ModeStateMachine::default();
        machine.on_gesture(GestureEvent::SingleTap, 520);
        machine.acknowledge_entry();

        assert!(!machine.tick(2120)); // exactly 1600 ms
        assert_eq!(machine.mode(), DisplayMode::Happy);
        assert!(machine.tick(2121));
        assert_eq!(machine.mode(), DisplayMode::Eyes);
        assert!(machine.just_entered());
        assert_eq!(machine.state().mode_entered_at, 2121);
    }

    #[test]
    fn test_weather_timeout_is_strict() {
        let mut machine = ModeStateMachine::default();
        machine.on_gesture(GestureEvent::DoubleTap, 300);
        machine.acknowledge_entry();

        assert!(!machine.tick(6300));
        assert_eq!(machine.mode(), DisplayMode::Weather);
        assert!(machine.tick(6301));
        assert_eq!(machine.mode(), DisplayMode::Eyes);
    }

    #[test]
    fn test_scenario_double_tap_then_interrupt() {
        let mut machine = ModeStateMachine::default();
        assert!(machine.on_gesture(GestureEvent::DoubleTap, 300));
        assert_eq!(machine.state().mode_entered_at, 300);
        machine.acknowledge_entry();

        // Still well inside the weather duration
        assert!(!machine.tick(4000));
        assert!(machine.interrupt(4000));
        assert_eq!(machine.mode(), DisplayMode::Eyes);
        assert_eq!(machine.state().mode_entered_at, 4000);
        assert!(machine.just_entered());
    }

    #[test]
    fn test_just_entered_persists_until_acknowledged() {
        let mut machine = ModeStateMachine::default();
        machine.on_gesture(GestureEvent::SingleTap, 100);
        machine.tick(100);
        machine.tick(200);
        assert!(machine.just_entered());
        machine.acknowledge_entry();
        assert!(!machine.just_entered());
        machine.tick(300);
        assert!(!machine.just_entered());
    }

    #[test]
    fn test_timeout_across_wrap() {
        let mut machine = ModeStateMachine::default();
        let entered = u32::MAX - 1000;
        machine.on_gesture(GestureEvent::SingleTap, entered);
        assert!(!machine.tick(entered.wrapping_add(1600)));
        assert!(machine.tick(entered.wrapping_add(1601)));
        assert_eq!(machine.mode(), DisplayMode::Eyes);
    }

    #[test]
    fn test_mode_properties() {
        let timing = TimingConfig::default();
        assert!(DisplayMode::Eyes.is_idle());
        assert!(DisplayMode::Happy.is_animated());
        assert!(!DisplayMode::Weather.is_animated());
        assert_eq!(DisplayMode::Eyes.timeout_ms(&timing), None);
        assert_eq!(DisplayMode::Happy.timeout_ms(&timing), Some(1600));
        assert_eq!(DisplayMode::Weather.timeout_ms(&timing), Some(6000));
    }

    proptest! {
        #[test]
        fn prop_eyes_never_times_out(entered in any::<u32>(), later in any::<u32>()) {
            let timing = TimingConfig::default();
            let state = in_mode(DisplayMode::Eyes, entered);
            prop_assert_eq!(state.transition(ModeInput::Tick, later, &timing), state);
        }

        #[test]
        fn prop_happy_holds_until_duration(entered in any::<u32>(), dt in 0u32..=1600) {
            let timing = TimingConfig::default();
            let state = in_mode(DisplayMode::Happy, entered);
            let now = entered.wrapping_add(dt);
            prop_assert_eq!(state.transition(ModeInput::Tick, now, &timing).current, DisplayMode::Happy);
            let after = entered.wrapping_add(1601);
            prop_assert_eq!(state.transition(ModeInput::Tick, after, &timing).current, DisplayMode::Eyes);
        }

        #[test]
        fn prop_weather_holds_until_duration(entered in any::<u32>(), dt in 0u32..=6000) {
            let timing = TimingConfig::default();
            let state = in_mode(DisplayMode::Weather, entered);
            let now = entered.wrapping_add(dt);
            prop_assert_eq!(state.transition(ModeInput::Tick, now, &timing).current, DisplayMode::Weather);
            let after = entered.wrapping_add(6001);
            prop_assert_eq!(state.transition(ModeInput::Tick, after, &timing).current, DisplayMode::Eyes);
        }

        #[test]
        fn prop_gesture_outside_eyes_is_immediate(
            weather in any::<bool>(),
            double in any::<bool>(),
            entered in any::<u32>(),
            dt in 0u32..6000,
        ) {
            let timing = TimingConfig::default();
            let mode = if weather { DisplayMode::Weather } else { DisplayMode::Happy };
            let event = if double { GestureEvent::DoubleTap } else { GestureEvent::SingleTap };
            let now = entered.wrapping_add(dt);
            let next = in_mode(mode, entered).transition(ModeInput::Gesture(event), now, &timing);
            prop_assert_eq!(next.current, DisplayMode::Eyes);
            prop_assert_eq!(next.mode_entered_at, now);
        }
    }
}
