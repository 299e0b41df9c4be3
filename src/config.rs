//! Configuration for the OI driver
//!
//! Loads configuration from a TOML file: serial port settings, drive-train
//! calibration for odometry, and telemetry filter/timing parameters.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Top-level driver configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub serial: SerialConfig,
    pub drive: DriveConfig,
    pub telemetry: TelemetryConfig,
}

/// Serial link configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SerialConfig {
    /// Serial port path (e.g. "/dev/ttyUSB0")
    pub port: String,
    /// Baud rate (the OI runs at 115200)
    pub baud_rate: u32,
}

/// Drive-train calibration constants used by odometry
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DriveConfig {
    /// Wheel diameter in meters
    pub wheel_diameter_m: f64,
    /// Encoder ticks per wheel revolution
    pub ticks_per_revolution: f64,
    /// Distance between wheel centers in meters
    pub wheelbase_m: f64,
}

/// Telemetry acquisition and filtering configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TelemetryConfig {
    /// Target telemetry period in milliseconds (the device streams at ~15ms;
    /// also used as the blocking-read timeout on the serial port)
    pub period_ms: u64,
    /// EMA smoothing strength in [0, 1]: 0 = no smoothing, 1 = frozen
    pub smoothing_alpha: f64,
}

impl DriveConfig {
    /// Meters of wheel travel per encoder tick
    pub fn meters_per_tick(&self) -> f64 {
        std::f64::consts::PI * self.wheel_diameter_m / self.ticks_per_revolution
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents)?;
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            serial: SerialConfig {
                port: "/dev/ttyUSB0".to_string(),
                baud_rate: 115200,
            },
            drive: DriveConfig {
                // 72mm wheels, 508.8 ticks/rev per the OI documentation
                wheel_diameter_m: 0.072,
                ticks_per_revolution: 508.8,
                wheelbase_m: 0.235,
            },
            telemetry: TelemetryConfig {
                period_ms: 20,
                smoothing_alpha: 0.5,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.serial.baud_rate, 115200);
        assert_eq!(config.drive.wheelbase_m, 0.235);
        assert_eq!(config.telemetry.period_ms, 20);
    }

    #[test]
    fn test_meters_per_tick() {
        let config = Config::default();
        // pi * 0.072 / 508.8 ~= 0.4446 mm per tick
        let mpt = config.drive.meters_per_tick();
        assert!((mpt - 4.4457e-4).abs() < 1e-7, "meters_per_tick = {}", mpt);
    }

    #[test]
    fn test_toml_roundtrip() {
        let config = Config::default();
        let toml_string = toml::to_string_pretty(&config).unwrap();

        assert!(toml_string.contains("[serial]"));
        assert!(toml_string.contains("[drive]"));
        assert!(toml_string.contains("[telemetry]"));

        let parsed: Config = toml::from_str(&toml_string).unwrap();
        assert_eq!(parsed.serial.port, config.serial.port);
        assert_eq!(parsed.drive.ticks_per_revolution, 508.8);
        assert_eq!(parsed.telemetry.smoothing_alpha, 0.5);
    }

    #[test]
    fn test_toml_deserialization() {
        let toml_content = r#"
[serial]
port = "/dev/ttyACM0"
baud_rate = 115200

[drive]
wheel_diameter_m = 0.072
ticks_per_revolution = 508.8
wheelbase_m = 0.235

[telemetry]
period_ms = 15
smoothing_alpha = 0.8
"#;
        let config: Config = toml::from_str(toml_content).unwrap();
        assert_eq!(config.serial.port, "/dev/ttyACM0");
        assert_eq!(config.telemetry.period_ms, 15);
        assert_eq!(config.telemetry.smoothing_alpha, 0.8);
    }
}
