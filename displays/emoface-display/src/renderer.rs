//! Mode renderer
//!
//! Entry actions run only when the mode was just entered:
//!
//! | Mode    | On entry                   | Every cycle        |
//! |---------|----------------------------|--------------------|
//! | Eyes    | normal expression, clear   | draw face          |
//! | Happy   | happy expression, clear    | draw face          |
//! | Weather | draw weather screen        | nothing            |
//!
//! Pending changes are flushed to the backend at the end of every cycle.

use emoface_core::mode::DisplayMode;
use emoface_core::sensor::SensorReading;
use emoface_core::traits::ModeRenderer;
use emoface_hal::{Millis, MonotonicClock};

use crate::backend::{DisplayBackend, DisplayError};
use crate::face::{Expression, FaceAnimator};
use crate::screen::Screen;
use crate::weather;

/// Renders display modes into a `Screen` and pushes it to a backend
pub struct ScreenRenderer<B, C> {
    backend: B,
    clock: C,
    screen: Screen,
    face: FaceAnimator,
    /// Most recent flush failure, cleared by the next successful flush
    last_error: Option<DisplayError>,
}

impl<B: DisplayBackend, C: MonotonicClock> ScreenRenderer<B, C> {
    pub fn new(backend: B, clock: C, blink_interval_ms: Millis) -> Self {
        Self {
            backend,
            clock,
            screen: Screen::new(),
            face: FaceAnimator::new(blink_interval_ms),
            last_error: None,
        }
    }

    /// Show a few lines of status text (boot and link progress)
    ///
    /// The next mode entry replaces it.
    pub fn show_status(&mut self, lines: &[&str]) {
        self.screen.clear();
        for (row, line) in lines.iter().enumerate() {
            self.screen.set_line(row, line);
        }
        self.flush();
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn face(&self) -> &FaceAnimator {
        &self.face
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn last_error(&self) -> Option<DisplayError> {
        self.last_error
    }

    fn flush(&mut self) {
        match self.screen.flush(&mut self.backend) {
            Ok(()) => self.last_error = None,
            Err(e) => {
                if self.last_error.is_none() {
                    #[cfg(feature = "defmt")]
                    defmt::warn!("Display flush failed: {}", e);
                }
                self.last_error = Some(e);
            }
        }
    }
}

impl<B: DisplayBackend, C: MonotonicClock> ModeRenderer for ScreenRenderer<B, C> {
    fn render(&mut self, mode: DisplayMode, just_entered: bool, reading: &SensorReading) {
        let now = self.clock.now_ms();

        match mode {
            DisplayMode::Eyes | DisplayMode::Happy => {
                if just_entered {
                    let expression = if mode == DisplayMode::Happy {
                        Expression::Happy
                    } else {
                        Expression::Normal
                    };
                    self.face.set_expression(expression);
                    self.screen.clear();
                }
                self.face.draw(now, &mut self.screen);
            }
            DisplayMode::Weather => {
                if just_entered {
                    weather::draw(&mut self.screen, reading);
                }
            }
        }

        self.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::tests::RecordingBackend;
    use crate::weather::{ERROR_ROW, HUMIDITY_ROW, TEMPERATURE_ROW};
    use core::cell::Cell;

    struct FakeClock<'a>(&'a Cell<Millis>);

    impl MonotonicClock for FakeClock<'_> {
        fn now_ms(&self) -> Millis {
            self.0.get()
        }
    }

    fn renderer(time: &Cell<Millis>) -> ScreenRenderer<RecordingBackend, FakeClock<'_>> {
        ScreenRenderer::new(RecordingBackend::default(), FakeClock(time), 4000)
    }

    #[test]
    fn test_weather_drawn_once_on_entry() {
        let time = Cell::new(0);
        let mut r = renderer(&time);
        r.render(DisplayMode::Weather, true, &SensorReading::new(23.4, 56.0));
        assert_eq!(r.backend().row(TEMPERATURE_ROW as u8), Some("  Temp    23.4 C"));
        let sent = r.backend().rows.len();

        // Absent reading on later cycles does not touch the screen
        time.set(500);
        r.render(DisplayMode::Weather, false, &SensorReading::absent());
        assert_eq!(r.backend().rows.len(), sent);
        assert_eq!(r.screen().get_line(ERROR_ROW), Some(""));
    }

    #[test]
    fn test_weather_sensor_error() {
        let time = Cell::new(0);
        let mut r = renderer(&time);
        r.render(DisplayMode::Weather, true, &SensorReading::absent());
        assert_eq!(r.backend().row(ERROR_ROW as u8), Some("    Sensor Error"));
    }

    #[test]
    fn test_entry_sets_expression() {
        let time = Cell::new(0);
        let mut r = renderer(&time);
        r.render(DisplayMode::Happy, true, &SensorReading::absent());
        assert_eq!(r.face().expression(), Expression::Happy);
        r.render(DisplayMode::Happy, false, &SensorReading::absent());
        assert_eq!(r.face().expression(), Expression::Happy);
        r.render(DisplayMode::Eyes, true, &SensorReading::absent());
        assert_eq!(r.face().expression(), Expression::Normal);
    }

    #[test]
    fn test_eyes_animate_every_cycle() {
        let time = Cell::new(0);
        let mut r = renderer(&time);
        r.render(DisplayMode::Eyes, false, &SensorReading::absent());
        let open = r.screen().get_line(3).map(|s| s.to_owned());

        time.set(3900);
        r.render(DisplayMode::Eyes, false, &SensorReading::absent());
        assert_ne!(r.screen().get_line(3).map(|s| s.to_owned()), open);

        time.set(4100);
        r.render(DisplayMode::Eyes, false, &SensorReading::absent());
        assert_eq!(r.screen().get_line(3).map(|s| s.to_owned()), open);
    }

    #[test]
    fn test_leaving_weather_clears_it() {
        let time = Cell::new(0);
        let mut r = renderer(&time);
        r.render(DisplayMode::Weather, true, &SensorReading::new(20.0, 50.0));
        let clears = r.backend().clears;
        r.render(DisplayMode::Eyes, true, &SensorReading::absent());
        assert_eq!(r.backend().clears, clears + 1);
        assert_eq!(r.screen().get_line(HUMIDITY_ROW), Some(""));
    }

    #[test]
    fn test_status_screen() {
        let time = Cell::new(0);
        let mut r = renderer(&time);
        r.show_status(&["Booting...", "Link: waiting"]);
        assert_eq!(r.backend().row(0), Some("Booting..."));
        assert_eq!(r.backend().row(1), Some("Link: waiting"));
        assert_eq!(r.last_error(), None);
    }
}
