//! Weather screen layout
//!
//! ```text
//! row 0        WEATHER
//! row 1  ---------------------
//! row 3    Temp    23.4 C
//! row 5    Humid   56 %
//! ```
//!
//! When either value is missing, row 4 shows `Sensor Error` instead.

use core::fmt::Write;

use heapless::String;

use crate::screen::{Screen, SCREEN_COLS};
use emoface_core::sensor::SensorReading;

pub const TITLE_ROW: usize = 0;
pub const RULE_ROW: usize = 1;
pub const TEMPERATURE_ROW: usize = 3;
pub const HUMIDITY_ROW: usize = 5;
pub const ERROR_ROW: usize = 4;

/// Draw the weather screen from scratch
pub fn draw(screen: &mut Screen, reading: &SensorReading) {
    screen.clear();
    screen.set_centered(TITLE_ROW, "WEATHER");

    let mut rule = String::<SCREEN_COLS>::new();
    while rule.push('-').is_ok() {}
    screen.set_line(RULE_ROW, &rule);

    match reading.both() {
        Some((temperature, humidity)) => {
            screen.set_line(TEMPERATURE_ROW, &format_line("Temp", temperature, 1, "C"));
            screen.set_line(HUMIDITY_ROW, &format_line("Humid", humidity, 0, "%"));
        }
        None => screen.set_centered(ERROR_ROW, "Sensor Error"),
    }
}

/// `"  <label>  <value> <unit>"` with the value at a fixed column
fn format_line(label: &str, value: f32, decimals: usize, unit: &str) -> String<SCREEN_COLS> {
    let mut line = String::new();
    // Overlong values are truncated by the fixed capacity
    let _ = write!(line, "  {:<7} {:.*} {}", label, decimals, value, unit);
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout() {
        let mut screen = Screen::new();
        draw(&mut screen, &SensorReading::new(23.4, 56.0));
        assert_eq!(screen.get_line(TITLE_ROW), Some("       WEATHER"));
        assert_eq!(screen.get_line(RULE_ROW), Some("---------------------"));
        assert_eq!(screen.get_line(TEMPERATURE_ROW), Some("  Temp    23.4 C"));
        assert_eq!(screen.get_line(HUMIDITY_ROW), Some("  Humid   56 %"));
        assert_eq!(screen.get_line(ERROR_ROW), Some(""));
    }

    #[test]
    fn test_negative_temperature() {
        let mut screen = Screen::new();
        draw(&mut screen, &SensorReading::new(-3.5, 80.0));
        assert_eq!(screen.get_line(TEMPERATURE_ROW), Some("  Temp    -3.5 C"));
    }

    #[test]
    fn test_sensor_error() {
        let mut screen = Screen::new();
        draw(&mut screen, &SensorReading::new(f32::NAN, 56.0));
        assert_eq!(screen.get_line(ERROR_ROW), Some("    Sensor Error"));
        assert_eq!(screen.get_line(TEMPERATURE_ROW), Some(""));
        assert_eq!(screen.get_line(HUMIDITY_ROW), Some(""));
    }

    #[test]
    fn test_redraw_replaces_previous_screen() {
        let mut screen = Screen::new();
        draw(&mut screen, &SensorReading::new(23.4, 56.0));
        draw(&mut screen, &SensorReading::absent());
        assert_eq!(screen.get_line(TEMPERATURE_ROW), Some(""));
        assert_eq!(screen.get_line(ERROR_ROW), Some("    Sensor Error"));
    }
}
