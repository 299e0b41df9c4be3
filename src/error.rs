//! Error types for ChakraOI

use crate::mode::OiMode;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// ChakraOI error types
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Serial port error
    #[error("Serial port error: {0}")]
    Serial(#[from] serialport::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Actuator command issued while the device cannot accept it
    #[error("Command requires Safe or Full mode (current mode: {0:?})")]
    NotReady(OiMode),

    /// Out-of-range command argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Wrong input length (e.g. digit string not exactly 4 characters)
    #[error("Invalid length: expected {expected}, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    /// Character outside the displayable 7-segment glyph table
    #[error("Character {0:?} has no 7-segment glyph")]
    UnsupportedGlyph(char),

    /// Telemetry frame shorter than the fixed layout requires
    #[error("Telemetry frame truncated: needed {needed} bytes, got {got}")]
    ShortRead { needed: usize, got: usize },

    /// Telemetry stream lost byte alignment
    #[error("Telemetry stream lost synchronization")]
    DesyncedStream,

    /// Write or read attempted after the transport was released
    #[error("Transport closed")]
    TransportClosed,

    /// Background thread panicked
    #[error("Thread panic during shutdown")]
    ThreadPanic,

    /// Configuration file parse error
    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Configuration file write error
    #[error("Config write error: {0}")]
    ConfigWrite(#[from] toml::ser::Error),
}
