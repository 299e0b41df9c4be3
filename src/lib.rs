//! ChakraOI - Open Interface driver for differential-drive vacuum robots
//!
//! This library speaks the vendor's byte-oriented Open Interface (OI) protocol
//! over a serial link: it walks the device through its operating-mode state
//! machine, encodes motion/LED/display commands into exact binary frames, and
//! runs a background telemetry loop that decodes sensor packets, unwraps the
//! 16-bit wheel encoders, filters wheel velocities, and integrates a 2-D pose
//! by dead reckoning.
//!
//! ## Architecture
//!
//! - [`protocol`]: pure encode/decode of OI command and telemetry frames
//! - [`transport`]: serial I/O abstraction (plus a mock for tests)
//! - [`mode`]: operating-mode state machine gating actuator commands
//! - [`velocity`]: median-of-3 + EMA wheel velocity filter
//! - [`odometry`]: closed-form arc dead reckoning
//! - [`telemetry`]: background acquisition loop and published sensor state
//! - [`controller`]: the [`RobotController`] facade composing the above

pub mod config;
pub mod controller;
pub mod error;
pub mod mode;
pub mod odometry;
pub mod protocol;
pub mod telemetry;
pub mod transport;
pub mod velocity;

// Re-export commonly used types
pub use config::Config;
pub use controller::RobotController;
pub use error::{Error, Result};
pub use mode::OiMode;
pub use odometry::Pose;
pub use telemetry::{HistoryEntry, SensorSnapshot};
