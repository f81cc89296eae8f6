//! Build script for nusbridge-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates bridge.toml at compile time
//! - Generates `bridge_config.rs` with the validated settings

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use nusbridge_core::BridgeConfig;

fn main() {
    setup_linker();
    generate_config();
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

    // Linker scripts for cortex-m-rt and defmt
    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Serial settings parsed from `[serial]`
struct Serial {
    baudrate: u32,
    parity: &'static str,
}

/// Validate bridge.toml and write the generated constants
fn generate_config() {
    println!("cargo:rerun-if-changed=bridge.toml");

    let config_path = Path::new("bridge.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: bridge.toml not found!                                   ║\n\
            ║                                                                  ║\n\
            ║  The firmware requires a bridge.toml configuration file          ║\n\
            ║  in the nusbridge-firmware directory.                            ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read bridge.toml                               ║\n\
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
                ║  ERROR: Invalid TOML syntax in bridge.toml                       ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                {}\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&error_msg)
            );
        }
    };

    let mut errors = Vec::new();
    let bridge = parse_bridge(&config, &mut errors);
    let serial = parse_serial(&config, &mut errors);

    if let Err(e) = bridge.validate() {
        errors.push(format!("[bridge] {}", e));
    }

    if !errors.is_empty() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Invalid bridge configuration                             ║\n\
            ╠══════════════════════════════════════════════════════════════════╣\n\
            {}\n\
            ╚══════════════════════════════════════════════════════════════════╝\n",
            errors
                .iter()
                .map(|e| format!("║  • {:<62} ║", e))
                .collect::<Vec<_>>()
                .join("\n")
        );
    }

    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    fs::write(out_dir.join("bridge_config.rs"), render(&bridge, &serial)).unwrap();

    println!("cargo:warning=bridge.toml validated successfully");
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

/// Read an optional non-negative integer, falling back to `default`
fn integer(
    table: Option<&toml::Value>,
    section: &str,
    key: &str,
    default: u64,
    errors: &mut Vec<String>,
) -> u64 {
    match table.and_then(|t| t.get(key)) {
        None => default,
        Some(toml::Value::Integer(v)) if *v >= 0 => *v as u64,
        Some(_) => {
            errors.push(format!("[{}] '{}' must be a non-negative integer", section, key));
            default
        }
    }
}

/// Build the bridge settings from `[bridge]` and `[timing]`
fn parse_bridge(config: &toml::Value, errors: &mut Vec<String>) -> BridgeConfig {
    let defaults = BridgeConfig::default();
    let bridge = config.get("bridge");
    let timing = config.get("timing");

    if bridge.is_none() {
        errors.push("Missing [bridge] section".to_string());
    }

    let device_name = match bridge.and_then(|b| b.get("device_name")) {
        None => defaults.device_name,
        Some(toml::Value::String(name)) => {
            if !name.is_ascii() {
                errors.push("[bridge] 'device_name' must be ASCII".to_string());
            }
            // Lives for the rest of the build script
            let name: &'static str = Box::leak(name.clone().into_boxed_str());
            name
        }
        Some(_) => {
            errors.push("[bridge] 'device_name' must be a string".to_string());
            defaults.device_name
        }
    };

    BridgeConfig {
        device_name,
        max_frame_size: integer(
            bridge,
            "bridge",
            "max_frame_size",
            defaults.max_frame_size as u64,
            errors,
        ) as usize,
        startup_delay_ms: integer(
            bridge,
            "bridge",
            "startup_delay_ms",
            defaults.startup_delay_ms,
            errors,
        ),
        drain_interval_ms: integer(
            timing,
            "timing",
            "drain_interval_ms",
            defaults.drain_interval_ms,
            errors,
        ),
        telemetry_period_ms: integer(
            timing,
            "timing",
            "telemetry_period_ms",
            defaults.telemetry_period_ms,
            errors,
        ),
        debounce_interval_ms: integer(
            timing,
            "timing",
            "debounce_interval_ms",
            defaults.debounce_interval_ms,
            errors,
        ),
    }
}

/// Build the serial settings from `[serial]`
fn parse_serial(config: &toml::Value, errors: &mut Vec<String>) -> Serial {
    const BAUDRATES: [u64; 16] = [
        1200, 2400, 4800, 9600, 14400, 19200, 28800, 38400, 57600, 76800, 115200, 230400, 250000,
        460800, 921600, 1_000_000,
    ];

    let serial = config.get("serial");
    let baudrate = integer(serial, "serial", "baudrate", 115200, errors);
    if !BAUDRATES.contains(&baudrate) {
        errors.push(format!("[serial] unsupported baudrate {}", baudrate));
    }

    let parity = match serial.and_then(|s| s.get("parity")) {
        None => "None",
        Some(toml::Value::String(p)) => match p.as_str() {
            "none" => "None",
            "even" => "Even",
            _ => {
                errors.push("[serial] parity must be 'none' or 'even'".to_string());
                "None"
            }
        },
        Some(_) => {
            errors.push("[serial] parity must be a string".to_string());
            "None"
        }
    };

    Serial {
        baudrate: baudrate as u32,
        parity,
    }
}

fn render(bridge: &BridgeConfig, serial: &Serial) -> String {
    format!(
        "// Generated from bridge.toml by build.rs\n\
         \n\
         /// Validated bridge settings\n\
         pub const BRIDGE: nusbridge_core::BridgeConfig = nusbridge_core::BridgeConfig {{\n\
         \x20   device_name: {:?},\n\
         \x20   max_frame_size: {},\n\
         \x20   drain_interval_ms: {},\n\
         \x20   telemetry_period_ms: {},\n\
         \x20   debounce_interval_ms: {},\n\
         \x20   startup_delay_ms: {},\n\
         }};\n\
         \n\
         /// Local console line settings\n\
         pub const SERIAL: nusbridge_hal::SerialConfig = nusbridge_hal::SerialConfig {{\n\
         \x20   baudrate: {},\n\
         \x20   parity: nusbridge_hal::uart::Parity::{},\n\
         \x20   flow_control: false,\n\
         }};\n",
        bridge.device_name,
        bridge.max_frame_size,
        bridge.drain_interval_ms,
        bridge.telemetry_period_ms,
        bridge.debounce_interval_ms,
        bridge.startup_delay_ms,
        serial.baudrate,
        serial.parity,
    )
}
