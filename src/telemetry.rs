//! Background telemetry acquisition
//!
//! This module owns the read side of the OI link: a dedicated thread blocks
//! on the transport, decodes fixed-length telemetry frames, unwraps the
//! 16-bit encoder counters into continuous signed counts, feeds the velocity
//! filters and the odometry integrator, and publishes an immutable
//! [`SensorSnapshot`] plus an append-only history.
//!
//! # Cycle
//!
//! 1. Check the shutdown flag, then block until a full frame is available
//! 2. Decode the frame (resynchronizing on the sentinel byte if needed)
//! 3. Unwrap each wheel's raw 16-bit counter against its previous raw value
//! 4. Feed deltas into the per-wheel velocity estimators and accumulate the
//!    unwrapped absolute counts
//! 5. Feed deltas and absolutes into the odometry integrator
//! 6. Commit a snapshot - unless this is the priming read (no elapsed-time
//!    baseline yet) or the battery capacity field is zero (the fraction
//!    would be meaningless, the reading is discarded rather than stored)
//!
//! # Wraparound
//!
//! A raw delta beyond +32768 is corrected by -65536 and below -32768 by
//! +65536, the symmetric two's-complement boundary of the signed 16-bit
//! wire format. Precondition: the acquisition rate is fast enough that the
//! counter cannot wrap more than once between samples; the correction does
//! not detect double wraps.

use crate::config::Config;
use crate::error::Error;
use crate::odometry::{OdometryIntegrator, Pose};
use crate::protocol::decode::{decode_telemetry, TelemetryFrame, TELEMETRY_FRAME_LEN};
use crate::transport::Transport;
use crate::velocity::VelocityEstimator;
use parking_lot::{Mutex, RwLock};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

/// How many single-byte shifts the frame reader tolerates while hunting for
/// a valid sentinel before it reports the stream as desynced
const RESYNC_BUDGET: usize = 64;

/// Immutable telemetry snapshot, replaced atomically each accepted cycle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SensorSnapshot {
    /// Wall-clock timestamp, microseconds since the Unix epoch
    pub timestamp_us: u64,
    /// Battery charge as a fraction of capacity (0..1)
    pub battery_charge: f64,
    /// Unwrapped cumulative left encoder ticks
    pub enc_left: i64,
    /// Unwrapped cumulative right encoder ticks
    pub enc_right: i64,
    /// Filtered left wheel velocity (mm/s)
    pub vel_left: f64,
    /// Filtered right wheel velocity (mm/s)
    pub vel_right: f64,
}

/// One accepted telemetry cycle: the snapshot and the pose it produced
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub snapshot: SensorSnapshot,
    pub pose: Pose,
}

/// State published by the acquisition thread, read by the controller
///
/// The acquisition thread is the sole writer. Snapshots are replaced whole
/// behind the lock, never mutated field-by-field, so readers always see a
/// consistent cycle.
#[derive(Debug, Default)]
pub(crate) struct TelemetryShared {
    pub latest: RwLock<Option<SensorSnapshot>>,
    pub pose: RwLock<Pose>,
    pub history: RwLock<Vec<HistoryEntry>>,
}

/// Per-wheel raw counter state for wraparound detection
///
/// Created per connection, never shared between driver instances.
struct EncoderState {
    last_raw_left: i16,
    last_raw_right: i16,
    abs_left: i64,
    abs_right: i64,
    last_cycle: Instant,
    primed: bool,
}

impl EncoderState {
    fn new() -> Self {
        Self {
            last_raw_left: 0,
            last_raw_right: 0,
            abs_left: 0,
            abs_right: 0,
            last_cycle: Instant::now(),
            primed: false,
        }
    }
}

/// Correct a raw 16-bit counter step for wraparound
///
/// Single-wrap-per-cycle assumption; deltas of exactly +/-32768 are left
/// uncorrected (they sit on the ambiguous boundary).
fn unwrap_delta(raw: i16, prev: i16) -> i64 {
    let mut delta = raw as i64 - prev as i64;
    if delta > 32768 {
        delta -= 65536;
    } else if delta < -32768 {
        delta += 65536;
    }
    delta
}

fn epoch_micros() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_micros() as u64)
        .unwrap_or(0)
}

/// Read one telemetry frame, blocking until it is complete
///
/// Returns `Ok(None)` when the shutdown flag is observed (checked before
/// each blocking read). Slides the window one byte at a time to regain
/// sentinel alignment, up to [`RESYNC_BUDGET`] shifts.
fn read_frame(
    transport: &Mutex<Box<dyn Transport>>,
    shutdown: &AtomicBool,
) -> crate::error::Result<Option<TelemetryFrame>> {
    let mut buf = [0u8; TELEMETRY_FRAME_LEN];
    let mut filled = 0usize;
    let mut resync_budget = RESYNC_BUDGET;

    loop {
        if filled == TELEMETRY_FRAME_LEN {
            match decode_telemetry(&buf) {
                Ok(frame) => return Ok(Some(frame)),
                Err(Error::DesyncedStream) => {
                    if resync_budget == 0 {
                        return Err(Error::DesyncedStream);
                    }
                    resync_budget -= 1;
                    buf.copy_within(1.., 0);
                    filled -= 1;
                }
                Err(e) => return Err(e),
            }
            continue;
        }

        if shutdown.load(Ordering::Relaxed) {
            return Ok(None);
        }

        // Hold the transport lock only for the read itself so command
        // writes can interleave
        let n = {
            let mut t = transport.lock();
            t.read(&mut buf[filled..])?
        };
        if n == 0 {
            // Read timed out with nothing buffered
            std::thread::sleep(Duration::from_millis(1));
            continue;
        }
        filled += n;
    }
}

/// Telemetry acquisition loop, run on a dedicated thread
///
/// Exits when the shutdown flag is observed or the transport reports an
/// error; after exit no further writes to the shared state occur. Decode
/// desyncs terminate only the current iteration - recovering the stream
/// itself (reissuing stream-start) is the caller's decision.
pub(crate) fn telemetry_loop(
    transport: Arc<Mutex<Box<dyn Transport>>>,
    shutdown: Arc<AtomicBool>,
    shared: Arc<TelemetryShared>,
    config: Config,
) {
    let mm_per_tick = config.drive.meters_per_tick() * 1000.0;
    let alpha = config.telemetry.smoothing_alpha;

    let mut enc = EncoderState::new();
    let mut vel_left = VelocityEstimator::new(alpha);
    let mut vel_right = VelocityEstimator::new(alpha);
    let mut odometry = OdometryIntegrator::new(
        config.drive.meters_per_tick(),
        config.drive.wheelbase_m,
    );

    log::info!("Telemetry acquisition started");

    while !shutdown.load(Ordering::Relaxed) {
        let frame = match read_frame(&transport, &shutdown) {
            Ok(Some(frame)) => frame,
            Ok(None) => break,
            Err(Error::DesyncedStream) => {
                log::warn!("Telemetry stream desynced; skipping cycle");
                continue;
            }
            Err(e) => {
                log::error!("Telemetry read failed, stopping acquisition: {}", e);
                break;
            }
        };

        let now = Instant::now();

        if !enc.primed {
            // Priming read: establishes the raw-counter and elapsed-time
            // baselines, produces no snapshot
            enc.last_raw_left = frame.enc_left;
            enc.last_raw_right = frame.enc_right;
            enc.last_cycle = now;
            enc.primed = true;
            log::debug!(
                "Telemetry primed: raw L={}, R={}",
                frame.enc_left,
                frame.enc_right
            );
            continue;
        }

        let delta_left = unwrap_delta(frame.enc_left, enc.last_raw_left);
        let delta_right = unwrap_delta(frame.enc_right, enc.last_raw_right);
        enc.last_raw_left = frame.enc_left;
        enc.last_raw_right = frame.enc_right;
        enc.abs_left += delta_left;
        enc.abs_right += delta_right;

        let elapsed = now.duration_since(enc.last_cycle).as_secs_f64();
        enc.last_cycle = now;

        let vl = vel_left.update(delta_left as f64 * mm_per_tick, elapsed);
        let vr = vel_right.update(delta_right as f64 * mm_per_tick, elapsed);

        let pose = odometry.integrate(delta_left, delta_right, enc.abs_left, enc.abs_right);

        if frame.capacity == 0 {
            // A zero denominator cannot form a charge fraction; the reading
            // is discarded, not stored
            log::warn!("Discarding telemetry frame with zero battery capacity");
            continue;
        }

        let snapshot = SensorSnapshot {
            timestamp_us: epoch_micros(),
            // A freshly charged pack can report charge above capacity;
            // the published fraction stays in 0..1
            battery_charge: (frame.charge as f64 / frame.capacity as f64).min(1.0),
            enc_left: enc.abs_left,
            enc_right: enc.abs_right,
            vel_left: vl,
            vel_right: vr,
        };

        *shared.latest.write() = Some(snapshot);
        *shared.pose.write() = pose;
        shared.history.write().push(HistoryEntry { snapshot, pose });

        log::trace!(
            "Telemetry cycle: enc L={} R={}, vel L={:.1} R={:.1} mm/s, pose ({:.3}, {:.3}, {:.3})",
            enc.abs_left,
            enc.abs_right,
            vl,
            vr,
            pose.x,
            pose.y,
            pose.heading
        );
    }

    log::info!("Telemetry acquisition stopped");
}
