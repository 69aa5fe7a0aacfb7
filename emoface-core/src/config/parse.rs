//! Minimal TOML reader for `device.toml`
//!
//! Handles only the subset the device configuration needs and allocates
//! nothing, so it runs on the target as well as on the host.
//!
//! Supported:
//! - `[section]` headers (`timing`, `telemetry`, `touch`)
//! - `key = value` pairs with integer or boolean values
//! - Comments (`# ...`), full-line and trailing
//!
//! Unknown keys inside a known section are ignored so older firmware can
//! read newer files. Unknown sections are rejected.

use super::device::DeviceConfig;

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Unknown or malformed section header
    InvalidSection,
    /// Value could not be parsed for its key
    InvalidValue,
    /// Line is neither a header, a comment nor `key = value`
    InvalidLine,
    /// Key appeared before any section header
    KeyOutsideSection,
}

/// Current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Timing,
    Telemetry,
    Touch,
}

/// Parse `device.toml` content, starting from defaults
pub fn parse_config(input: &str) -> Result<DeviceConfig, ParseError> {
    let mut config = DeviceConfig::new();
    let mut section = Section::Root;

    for line in input.lines() {
        let line = strip_comment(line).trim();

        if line.is_empty() {
            continue;
        }

        if line.starts_with('[') {
            if !line.ends_with(']') {
                return Err(ParseError::InvalidSection);
            }
            section = parse_section_header(&line[1..line.len() - 1])?;
            continue;
        }

        let (key, value) = parse_key_value(line).ok_or(ParseError::InvalidLine)?;
        apply_value(section, key, value, &mut config)?;
    }

    Ok(config)
}

fn parse_section_header(header: &str) -> Result<Section, ParseError> {
    match header.trim() {
        "timing" => Ok(Section::Timing),
        "telemetry" => Ok(Section::Telemetry),
        "touch" => Ok(Section::Touch),
        _ => Err(ParseError::InvalidSection),
    }
}

fn apply_value(
    section: Section,
    key: &str,
    value: &str,
    config: &mut DeviceConfig,
) -> Result<(), ParseError> {
    match section {
        Section::Root => return Err(ParseError::KeyOutsideSection),
        Section::Timing => {
            let t = &mut config.timing;
            match key {
                "debounce_ms" => t.debounce_ms = parse_int(value)?,
                "double_tap_window_ms" => t.double_tap_window_ms = parse_int(value)?,
                "happy_duration_ms" => t.happy_duration_ms = parse_int(value)?,
                "weather_duration_ms" => t.weather_duration_ms = parse_int(value)?,
                "telemetry_period_ms" => t.telemetry_period_ms = parse_int(value)?,
                "blink_interval_ms" => t.blink_interval_ms = parse_int(value)?,
                _ => {} // Ignore unknown keys
            }
        }
        Section::Telemetry => match key {
            "temperature_channel" => config.telemetry.temperature = parse_int(value)?,
            "humidity_channel" => config.telemetry.humidity = parse_int(value)?,
            _ => {}
        },
        Section::Touch => {
            if key == "active_high" {
                config.touch.active_high = parse_bool(value)?;
            }
        }
    }
    Ok(())
}

/// Drop a trailing `# comment`, honouring double-quoted strings
fn strip_comment(line: &str) -> &str {
    let mut in_string = false;
    for (i, ch) in line.char_indices() {
        match ch {
            '"' => in_string = !in_string,
            '#' if !in_string => return &line[..i],
            _ => {}
        }
    }
    line
}

/// Parse "key = value" line
fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let eq_pos = line.find('=')?;
    let key = line[..eq_pos].trim();
    let value = line[eq_pos + 1..].trim();

    if key.is_empty() || value.is_empty() {
        return None;
    }

    Some((key, value))
}

/// Parse an integer value, allowing `_` digit separators
fn parse_int<T: core::str::FromStr>(value: &str) -> Result<T, ParseError> {
    let mut digits = [0u8; 20];
    let mut len = 0;
    for byte in value.bytes().filter(|b| *b != b'_') {
        if len == digits.len() {
            return Err(ParseError::InvalidValue);
        }
        digits[len] = byte;
        len += 1;
    }
    core::str::from_utf8(&digits[..len])
        .map_err(|_| ParseError::InvalidValue)?
        .parse()
        .map_err(|_| ParseError::InvalidValue)
}

/// Parse a boolean value
fn parse_bool(value: &str) -> Result<bool, ParseError> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(ParseError::InvalidValue),
    }
}
