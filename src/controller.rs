//! Robot controller facade
//!
//! [`RobotController`] composes the protocol codec, mode state machine, and
//! telemetry acquisition over a single transport. The caller issues commands
//! synchronously; at most one background telemetry thread reads the same
//! transport, interleaving with command writes behind a shared lock.
//!
//! # Shutdown
//!
//! [`RobotController::close`] is idempotent: it signals the telemetry thread,
//! joins it, sends the stream-pause and stop commands, and releases the
//! transport. A failed final write is reported but never blocks the release.
//! `Drop` calls `close` so an abandoned controller still stops the device.

use crate::config::Config;
use crate::error::{Error, Result};
use crate::mode::{ModeStateMachine, OiMode};
use crate::odometry::Pose;
use crate::protocol::encode::{
    encode_digits_ascii, encode_digits_raw, encode_drive_pwm, encode_drive_velocity, encode_leds,
    encode_stream_pause, encode_stream_start,
};
use crate::protocol::opcodes::STREAM_SENSORS;
use crate::telemetry::{telemetry_loop, HistoryEntry, SensorSnapshot, TelemetryShared};
use crate::transport::{SerialTransport, Transport};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Settle time after the OI start command
const START_SETTLE: Duration = Duration::from_millis(500);

/// Settle time after a mode-change command
const MODE_SETTLE: Duration = Duration::from_millis(20);

/// High-level OI driver: mode management, commands, telemetry, odometry
pub struct RobotController {
    /// Transport shared with the telemetry thread; `None` once closed
    transport: Option<Arc<Mutex<Box<dyn Transport>>>>,
    mode: ModeStateMachine,
    shared: Arc<TelemetryShared>,
    shutdown: Arc<AtomicBool>,
    telemetry_handle: Option<JoinHandle<()>>,
    config: Config,
}

impl RobotController {
    /// Open the configured serial port and perform the OI start handshake
    pub fn open(config: Config) -> Result<Self> {
        let timeout = Duration::from_millis(config.telemetry.period_ms);
        let transport =
            SerialTransport::open(&config.serial.port, config.serial.baud_rate, timeout)?;
        Self::with_transport(Box::new(transport), config)
    }

    /// Build a controller over an already-open transport and perform the
    /// start handshake (used by tests with the mock transport)
    pub fn with_transport(mut transport: Box<dyn Transport>, config: Config) -> Result<Self> {
        let mut mode = ModeStateMachine::new();

        // Start handshake: Off -> Passive, then give the device time to
        // bring the OI up before any further command
        if let Some(start) = mode.request_start() {
            transport.write_all(&start)?;
            transport.flush()?;
        }
        thread::sleep(START_SETTLE);
        log::info!("OI started (Passive mode)");

        Ok(Self {
            transport: Some(Arc::new(Mutex::new(transport))),
            mode,
            shared: Arc::new(TelemetryShared::default()),
            shutdown: Arc::new(AtomicBool::new(false)),
            telemetry_handle: None,
            config,
        })
    }

    fn transport(&self) -> Result<&Arc<Mutex<Box<dyn Transport>>>> {
        self.transport.as_ref().ok_or(Error::TransportClosed)
    }

    fn send(&self, frame: &[u8]) -> Result<()> {
        let transport = self.transport()?;
        let mut t = transport.lock();
        t.write_all(frame)?;
        t.flush()
    }

    /// Request an operating-mode change
    ///
    /// `Safe`/`Full` emit their mode byte (no-op when already there);
    /// `Off` sends stop; `Passive` is unreachable by command and is a no-op.
    pub fn set_mode(&mut self, target: OiMode) -> Result<()> {
        self.transport()?;
        let frame = match target {
            OiMode::Off => Some(self.mode.request_stop()),
            _ => self.mode.request_mode(target),
        };
        if let Some(frame) = frame {
            self.send(&frame)?;
            thread::sleep(MODE_SETTLE);
            log::info!("Mode changed to {:?}", self.mode.current());
        }
        Ok(())
    }

    /// Current commanded operating mode
    pub fn mode(&self) -> OiMode {
        self.mode.current()
    }

    /// Drive with independent wheel velocities in mm/s (-500..500)
    pub fn drive_velocity(&mut self, right_mm_s: i16, left_mm_s: i16) -> Result<()> {
        self.mode.gate()?;
        let frame = encode_drive_velocity(right_mm_s, left_mm_s)?;
        self.send(&frame)
    }

    /// Drive with raw wheel PWM (-255..255)
    pub fn drive_pwm(&mut self, right: i16, left: i16) -> Result<()> {
        self.mode.gate()?;
        let frame = encode_drive_pwm(right, left)?;
        self.send(&frame)
    }

    /// Set the indicator LEDs and power LED color/intensity
    pub fn set_leds(
        &mut self,
        check_robot: bool,
        debris: bool,
        spot: bool,
        power_color: u8,
        power_intensity: u8,
    ) -> Result<()> {
        self.mode.gate()?;
        let frame = encode_leds(check_robot, debris, spot, power_color, power_intensity);
        self.send(&frame)
    }

    /// Set raw 7-segment masks; digits are 3, 2, 1, 0 from left to right
    pub fn set_digits_raw(&mut self, d3: u8, d2: u8, d1: u8, d0: u8) -> Result<()> {
        self.mode.gate()?;
        let frame = encode_digits_raw(d3, d2, d1, d0);
        self.send(&frame)
    }

    /// Show a 4-character message on the 7-segment display
    pub fn set_digits_ascii(&mut self, text: &str) -> Result<()> {
        self.mode.gate()?;
        let frame = encode_digits_ascii(text)?;
        self.send(&frame)
    }

    /// Request the telemetry stream and start the background acquisition
    ///
    /// No-op if acquisition is already running. Works from Passive mode -
    /// sensor streaming is not an actuator command.
    pub fn begin_telemetry(&mut self) -> Result<()> {
        if self.telemetry_handle.is_some() {
            return Ok(());
        }
        let transport = Arc::clone(self.transport()?);

        self.send(&encode_stream_start(&STREAM_SENSORS))?;

        let shutdown = Arc::clone(&self.shutdown);
        let shared = Arc::clone(&self.shared);
        let config = self.config.clone();
        let handle = thread::Builder::new()
            .name("oi-telemetry".to_string())
            .spawn(move || telemetry_loop(transport, shutdown, shared, config))
            .map_err(Error::Io)?;
        self.telemetry_handle = Some(handle);

        log::info!("Telemetry stream requested");
        Ok(())
    }

    /// Latest accepted sensor snapshot, if any cycle has completed
    pub fn latest_snapshot(&self) -> Option<SensorSnapshot> {
        *self.shared.latest.read()
    }

    /// Latest published dead-reckoning pose
    pub fn pose(&self) -> Pose {
        *self.shared.pose.read()
    }

    /// Copy of the telemetry history in arrival order
    pub fn history(&self) -> Vec<HistoryEntry> {
        self.shared.history.read().clone()
    }

    /// Stop telemetry, send stop, and release the transport
    ///
    /// Idempotent: the second and later calls do nothing and return `Ok`.
    /// The background thread is guaranteed stopped before this returns.
    pub fn close(&mut self) -> Result<()> {
        let Some(transport) = self.transport.take() else {
            return Ok(());
        };

        self.shutdown.store(true, Ordering::Relaxed);
        let mut result = Ok(());
        if let Some(handle) = self.telemetry_handle.take() {
            if handle.join().is_err() {
                log::error!("Telemetry thread panicked during shutdown");
                result = Err(Error::ThreadPanic);
            }
        }

        // Final writes are best-effort: report the failure but release the
        // transport either way
        {
            let mut t = transport.lock();
            let pause = encode_stream_pause();
            let stop = self.mode.request_stop();
            for frame in [&pause[..], &stop[..]] {
                if let Err(e) = t.write_all(frame).and_then(|_| t.flush()) {
                    log::warn!("Close-time write failed: {}", e);
                    if result.is_ok() {
                        result = Err(e);
                    }
                    break;
                }
            }
        }
        drop(transport);

        log::info!("Controller closed");
        result
    }
}

impl Drop for RobotController {
    fn drop(&mut self) {
        let _ = self.close();
    }
}
