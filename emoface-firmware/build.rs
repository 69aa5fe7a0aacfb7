//! Build script for emoface-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates device.toml at compile time

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Upper bound for any configured duration (10 minutes)
const MAX_DURATION_MS: i64 = 600_000;

const TIMING_KEYS: [&str; 6] = [
    "debounce_ms",
    "double_tap_window_ms",
    "happy_duration_ms",
    "weather_duration_ms",
    "telemetry_period_ms",
    "blink_interval_ms",
];

fn main() {
    setup_linker();
    validate_config();
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tlink-rp.x");
    if env::var_os("CARGO_FEATURE_DEFMT").is_some() {
        println!("cargo:rustc-link-arg-bins=-Tdefmt.x");
    }

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate device.toml configuration at compile time
fn validate_config() {
    println!("cargo:rerun-if-changed=device.toml");

    let config_path = Path::new("device.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: device.toml not found!                                   ║\n\
            ║                                                                  ║\n\
            ║  The firmware embeds device.toml at build time.                  ║\n\
            ║  Please create one in the emoface-firmware directory.            ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read device.toml                               ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    let config: toml::Value = match toml::from_str(&config_content) {
        Ok(value) => value,
        Err(e) => {
            let error_msg = e.to_string();
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid TOML syntax in device.toml                       ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                ║                                                                  ║\n\
                {}\n\
                ║                                                                  ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&error_msg)
            );
        }
    };

    validate_sections(&config);
    validate_timing(&config);
    validate_telemetry(&config);
    validate_touch(&config);

    println!("cargo:warning=device.toml validated successfully");
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated = if line.len() > 64 {
                format!("{}...", &line[..61])
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Abort the build with a list of problems under `title`
fn fail(title: &str, errors: &[String]) -> ! {
    panic!(
        "\n\
        ╔══════════════════════════════════════════════════════════════════╗\n\
        ║  ERROR: {:<56} ║\n\
        ╠══════════════════════════════════════════════════════════════════╣\n\
        {}\n\
        ╚══════════════════════════════════════════════════════════════════╝\n",
        title,
        errors
            .iter()
            .map(|e| format!("║  • {:<62} ║", e))
            .collect::<Vec<_>>()
            .join("\n")
    );
}

/// The firmware parser rejects unknown sections and keys outside a section
fn validate_sections(config: &toml::Value) {
    let table = match config.as_table() {
        Some(t) => t,
        None => return,
    };

    let mut errors = Vec::new();
    for (name, value) in table {
        if !["timing", "telemetry", "touch"].contains(&name.as_str()) {
            errors.push(format!("Unknown section or top-level key '{}'", name));
        } else if !value.is_table() {
            errors.push(format!("[{}] must be a table", name));
        }
    }

    if !errors.is_empty() {
        fail("Invalid sections in device.toml", &errors);
    }
}

fn validate_timing(config: &toml::Value) {
    let timing = match config.get("timing").and_then(|t| t.as_table()) {
        Some(t) => t,
        None => return,
    };

    let mut errors = Vec::new();

    for (key, value) in timing {
        if !TIMING_KEYS.contains(&key.as_str()) {
            println!("cargo:warning=device.toml: [timing] {} is ignored", key);
            continue;
        }
        match value {
            toml::Value::Integer(ms) if *ms < 1 || *ms > MAX_DURATION_MS => {
                errors.push(format!("[timing] {} must be 1-{}", key, MAX_DURATION_MS));
            }
            toml::Value::Integer(_) => {}
            _ => errors.push(format!("[timing] {} must be an integer", key)),
        }
    }

    // A second tap can only register once the debounce has passed
    let debounce = timing.get("debounce_ms").and_then(|v| v.as_integer()).unwrap_or(200);
    let window = timing
        .get("double_tap_window_ms")
        .and_then(|v| v.as_integer())
        .unwrap_or(400);
    if window <= debounce {
        errors.push("double_tap_window_ms must exceed debounce_ms".to_string());
    }

    if !errors.is_empty() {
        fail("Invalid [timing] configuration", &errors);
    }
}

fn validate_telemetry(config: &toml::Value) {
    let telemetry = match config.get("telemetry").and_then(|t| t.as_table()) {
        Some(t) => t,
        None => return,
    };

    let mut errors = Vec::new();
    let mut channels = Vec::new();

    for (key, value) in telemetry {
        if key != "temperature_channel" && key != "humidity_channel" {
            println!("cargo:warning=device.toml: [telemetry] {} is ignored", key);
            continue;
        }
        match value {
            toml::Value::Integer(ch) if (0..=255).contains(ch) => channels.push(*ch),
            _ => errors.push(format!("[telemetry] {} must be 0-255", key)),
        }
    }

    if channels.len() == 2 && channels[0] == channels[1] {
        errors.push("temperature and humidity must use different channels".to_string());
    }

    if !errors.is_empty() {
        fail("Invalid [telemetry] configuration", &errors);
    }
}

fn validate_touch(config: &toml::Value) {
    let touch = match config.get("touch").and_then(|t| t.as_table()) {
        Some(t) => t,
        None => return,
    };

    let mut errors = Vec::new();

    for (key, value) in touch {
        if key != "active_high" {
            println!("cargo:warning=device.toml: [touch] {} is ignored", key);
            continue;
        }
        if !value.is_bool() {
            errors.push("[touch] active_high must be true or false".to_string());
        }
    }

    if !errors.is_empty() {
        fail("Invalid [touch] configuration", &errors);
    }
}
