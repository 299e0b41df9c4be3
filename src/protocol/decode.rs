//! Telemetry frame decoder
//!
//! The device streams a fixed-length binary record per telemetry cycle:
//!
//! ```text
//! offset  0: sentinel (one of the requested sensor packet IDs)
//! offset  1: battery charge numerator
//! offset  2: battery capacity denominator
//! offset 3-4: right encoder, signed 16-bit big-endian
//! offset  5: filler
//! offset 6-7: left encoder, signed 16-bit big-endian
//! offset  8: trailer
//! ```
//!
//! Frames are assumed byte-aligned once synchronization succeeds; the
//! sentinel check is what lets the acquisition loop regain alignment after a
//! desync.

use super::opcodes::STREAM_SENSORS;
use crate::error::{Error, Result};

/// Fixed length of one telemetry frame in bytes
pub const TELEMETRY_FRAME_LEN: usize = 9;

/// One decoded telemetry frame, fields still in raw wire units
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TelemetryFrame {
    /// Battery charge numerator
    pub charge: u8,
    /// Battery capacity denominator (zero means the reading is unusable)
    pub capacity: u8,
    /// Raw right encoder count (wraps at the 16-bit boundary)
    pub enc_right: i16,
    /// Raw left encoder count (wraps at the 16-bit boundary)
    pub enc_left: i16,
}

/// True if `byte` can begin a telemetry frame
pub fn is_frame_sentinel(byte: u8) -> bool {
    STREAM_SENSORS.contains(&byte)
}

/// Decode one telemetry frame from the start of `bytes`
///
/// Fails with [`Error::ShortRead`] if fewer than [`TELEMETRY_FRAME_LEN`]
/// bytes are available, and [`Error::DesyncedStream`] if the sentinel does
/// not match a requested sensor ID.
pub fn decode_telemetry(bytes: &[u8]) -> Result<TelemetryFrame> {
    if bytes.len() < TELEMETRY_FRAME_LEN {
        return Err(Error::ShortRead {
            needed: TELEMETRY_FRAME_LEN,
            got: bytes.len(),
        });
    }
    if !is_frame_sentinel(bytes[0]) {
        return Err(Error::DesyncedStream);
    }
    Ok(TelemetryFrame {
        charge: bytes[1],
        capacity: bytes[2],
        enc_right: i16::from_be_bytes([bytes[3], bytes[4]]),
        enc_left: i16::from_be_bytes([bytes[6], bytes[7]]),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::opcodes::SENSOR_BATTERY_CHARGE;

    fn frame(charge: u8, capacity: u8, right: i16, left: i16) -> [u8; TELEMETRY_FRAME_LEN] {
        let r = right.to_be_bytes();
        let l = left.to_be_bytes();
        [
            SENSOR_BATTERY_CHARGE,
            charge,
            capacity,
            r[0],
            r[1],
            0,
            l[0],
            l[1],
            0,
        ]
    }

    #[test]
    fn test_decode_telemetry() {
        let decoded = decode_telemetry(&frame(200, 250, -1, 1234)).unwrap();
        assert_eq!(decoded.charge, 200);
        assert_eq!(decoded.capacity, 250);
        assert_eq!(decoded.enc_right, -1);
        assert_eq!(decoded.enc_left, 1234);
    }

    #[test]
    fn test_decode_negative_encoders_twos_complement() {
        let decoded = decode_telemetry(&frame(0, 1, -32768, 32767)).unwrap();
        assert_eq!(decoded.enc_right, -32768);
        assert_eq!(decoded.enc_left, 32767);
    }

    #[test]
    fn test_decode_short_read() {
        let bytes = [SENSOR_BATTERY_CHARGE, 1, 2, 3];
        assert!(matches!(
            decode_telemetry(&bytes),
            Err(Error::ShortRead { needed: 9, got: 4 })
        ));
    }

    #[test]
    fn test_decode_bad_sentinel() {
        let mut bytes = frame(10, 20, 0, 0);
        bytes[0] = 0xFF;
        assert!(matches!(
            decode_telemetry(&bytes),
            Err(Error::DesyncedStream)
        ));
    }
}
