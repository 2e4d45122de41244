//! Build script for pirtherm-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates device.toml and embeds it as a postcard blob

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use pirtherm_core::config::AppConfig;

fn main() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").expect("OUT_DIR is set by cargo"));
    setup_linker(&out_dir);
    embed_config(&out_dir);
}

/// Set up linker search paths and scripts
fn setup_linker(out_dir: &Path) {
    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).expect("create memory.x");
    f.write_all(memory_x).expect("write memory.x");

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tlink-rp.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Parse and validate device.toml, then write it out for `include_bytes!`
fn embed_config(out_dir: &Path) {
    println!("cargo:rerun-if-changed=device.toml");

    let config_path = Path::new("device.toml");

    let config = if config_path.exists() {
        let content = match fs::read_to_string(config_path) {
            Ok(content) => content,
            Err(e) => fail("Failed to read device.toml", &e.to_string()),
        };
        match toml::from_str::<AppConfig>(&content) {
            Ok(config) => config,
            Err(e) => fail("Invalid device.toml", &e.to_string()),
        }
    } else {
        println!("cargo:warning=device.toml not found, using built-in defaults");
        AppConfig::default()
    };

    if let Err(e) = config.validate() {
        fail(
            "Invalid configuration in device.toml",
            &format!("{:?}: {}", e, describe(&config, e)),
        );
    }

    let blob = match postcard::to_stdvec(&config) {
        Ok(blob) => blob,
        Err(e) => fail("Failed to encode configuration", &e.to_string()),
    };
    fs::write(out_dir.join("device.postcard"), blob).expect("write device.postcard");

    println!("cargo:warning=device.toml validated successfully");
}

/// Human-readable hint for a validation error
fn describe(config: &AppConfig, error: pirtherm_core::config::ConfigError) -> String {
    use pirtherm_core::config::ConfigError::*;

    match error {
        InvalidRange => format!(
            "sensor.range [{}, {}] must be non-empty and within [-999, 9999]",
            config.sensor.range.min_c, config.sensor.range.max_c
        ),
        ZeroTrials => "sensor.max_trials must be at least 1".to_string(),
        InvalidScale => format!(
            "display.small_scale ({}) must be 1..=large_scale ({})",
            config.display.small_scale, config.display.large_scale
        ),
        LayoutOverflow => format!(
            "8 * display.large_scale ({}) exceeds display.height ({})",
            config.display.large_scale, config.display.height
        ),
        InvalidWindow => "activation.window_ms must be non-zero".to_string(),
        InvalidPollInterval => {
            "power.idle_suspend_ms and power.active_delay_ms must be non-zero".to_string()
        }
        Decode => "configuration could not be decoded".to_string(),
    }
}

/// Abort the build with a boxed error message
fn fail(title: &str, detail: &str) -> ! {
    panic!(
        "\n\
        ╔══════════════════════════════════════════════════════════════════╗\n\
        ║  ERROR: {:<56} ║\n\
        ╠══════════════════════════════════════════════════════════════════╣\n\
        {}\n\
        ╚══════════════════════════════════════════════════════════════════╝\n",
        title,
        format_error_lines(detail)
    );
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
