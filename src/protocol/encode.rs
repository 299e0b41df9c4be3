//! Command frame encoders
//!
//! Each function produces the exact byte frame for one OI command. Argument
//! ranges are checked here so that a rejected command never reaches the
//! transport.

use super::glyphs::glyph_code;
use super::opcodes::*;
use crate::error::{Error, Result};
use crate::mode::OiMode;

/// Encode the start command (enters Passive mode)
pub fn encode_start() -> [u8; 1] {
    [OP_START]
}

/// Encode the stop command (turns the OI off)
pub fn encode_stop() -> [u8; 1] {
    [OP_STOP]
}

/// Encode the mode command byte for a target operating mode
pub fn encode_mode(mode: OiMode) -> [u8; 1] {
    match mode {
        OiMode::Off => [OP_STOP],
        OiMode::Passive => [OP_START],
        OiMode::Safe => [OP_SAFE],
        OiMode::Full => [OP_FULL],
    }
}

/// Encode drive-direct: independent wheel velocities in mm/s (-500..500)
pub fn encode_drive_velocity(right_mm_s: i16, left_mm_s: i16) -> Result<[u8; 5]> {
    for (name, v) in [("right", right_mm_s), ("left", left_mm_s)] {
        if !(-DRIVE_VELOCITY_MAX..=DRIVE_VELOCITY_MAX).contains(&v) {
            return Err(Error::InvalidArgument(format!(
                "{} wheel velocity {} outside -{}..{} mm/s",
                name, v, DRIVE_VELOCITY_MAX, DRIVE_VELOCITY_MAX
            )));
        }
    }
    let r = right_mm_s.to_be_bytes();
    let l = left_mm_s.to_be_bytes();
    Ok([OP_DRIVE_DIRECT, r[0], r[1], l[0], l[1]])
}

/// Encode drive-pwm: independent raw wheel PWM (-255..255)
pub fn encode_drive_pwm(right: i16, left: i16) -> Result<[u8; 5]> {
    for (name, v) in [("right", right), ("left", left)] {
        if !(-DRIVE_PWM_MAX..=DRIVE_PWM_MAX).contains(&v) {
            return Err(Error::InvalidArgument(format!(
                "{} wheel PWM {} outside -{}..{}",
                name, v, DRIVE_PWM_MAX, DRIVE_PWM_MAX
            )));
        }
    }
    let r = right.to_be_bytes();
    let l = left.to_be_bytes();
    Ok([OP_DRIVE_PWM, r[0], r[1], l[0], l[1]])
}

/// Encode the LED command
///
/// Bitmask layout: bit 3 = check-robot, bit 2 = dock (unused here), bit 1 =
/// spot, bit 0 = debris. Power LED color runs green (0) to red (255),
/// intensity off (0) to full (255).
pub fn encode_leds(
    check_robot: bool,
    debris: bool,
    spot: bool,
    power_color: u8,
    power_intensity: u8,
) -> [u8; 4] {
    let mut mask = 0u8;
    if debris {
        mask |= 1 << 0;
    }
    if spot {
        mask |= 1 << 1;
    }
    if check_robot {
        mask |= 1 << 3;
    }
    [OP_LEDS, mask, power_color, power_intensity]
}

/// Encode raw 7-segment masks; digits are 3, 2, 1, 0 from left to right
pub fn encode_digits_raw(d3: u8, d2: u8, d1: u8, d0: u8) -> [u8; 5] {
    [OP_DIGITS_RAW, d3, d2, d1, d0]
}

/// Encode a 4-character message for the 7-segment display
///
/// Fails with [`Error::InvalidLength`] unless the string is exactly 4
/// characters, and with [`Error::UnsupportedGlyph`] if any character is
/// outside the displayable glyph table.
pub fn encode_digits_ascii(text: &str) -> Result<[u8; 5]> {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() != 4 {
        return Err(Error::InvalidLength {
            expected: 4,
            actual: chars.len(),
        });
    }
    let mut frame = [OP_DIGITS_ASCII, 0, 0, 0, 0];
    for (slot, &c) in frame[1..].iter_mut().zip(chars.iter()) {
        *slot = glyph_code(c).ok_or(Error::UnsupportedGlyph(c))?;
    }
    Ok(frame)
}

/// Encode the sensor-stream start command for a list of packet IDs
pub fn encode_stream_start(sensor_ids: &[u8]) -> Vec<u8> {
    let mut frame = Vec::with_capacity(2 + sensor_ids.len());
    frame.push(OP_SENSOR_STREAM);
    frame.push(sensor_ids.len() as u8);
    frame.extend_from_slice(sensor_ids);
    frame
}

/// Encode the sensor-stream pause command
pub fn encode_stream_pause() -> [u8; 2] {
    [OP_SENSOR_STREAM_PAUSE_RESUME, 0]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_drive_velocity_big_endian() {
        let frame = encode_drive_velocity(300, -300).unwrap();
        assert_eq!(frame, [145, 0x01, 0x2C, 0xFE, 0xD4]);
    }

    #[test]
    fn test_encode_drive_velocity_range() {
        assert!(matches!(
            encode_drive_velocity(501, 0),
            Err(Error::InvalidArgument(_))
        ));
        assert!(matches!(
            encode_drive_velocity(0, -501),
            Err(Error::InvalidArgument(_))
        ));
        assert!(encode_drive_velocity(500, -500).is_ok());
    }

    #[test]
    fn test_encode_drive_pwm_range() {
        assert!(matches!(
            encode_drive_pwm(256, 0),
            Err(Error::InvalidArgument(_))
        ));
        let frame = encode_drive_pwm(-255, 255).unwrap();
        assert_eq!(frame, [146, 0xFF, 0x01, 0x00, 0xFF]);
    }

    #[test]
    fn test_encode_leds_bitmask() {
        // debris = bit 0, spot = bit 1, check-robot = bit 3
        let frame = encode_leds(true, true, false, 0, 128);
        assert_eq!(frame, [139, 0b0000_1001, 0, 128]);

        let frame = encode_leds(false, false, true, 255, 255);
        assert_eq!(frame, [139, 0b0000_0010, 255, 255]);
    }

    #[test]
    fn test_encode_digits_ascii_help() {
        // All four characters are in the glyph table
        let frame = encode_digits_ascii("help").unwrap();
        assert_eq!(frame, [164, 72, 69, 76, 80]);
    }

    #[test]
    fn test_encode_digits_ascii_rejects_uppercase() {
        assert!(matches!(
            encode_digits_ascii("HELP"),
            Err(Error::UnsupportedGlyph('H'))
        ));
    }

    #[test]
    fn test_encode_digits_ascii_wrong_length() {
        assert!(matches!(
            encode_digits_ascii("hey"),
            Err(Error::InvalidLength {
                expected: 4,
                actual: 3
            })
        ));
        assert!(matches!(
            encode_digits_ascii("hello"),
            Err(Error::InvalidLength {
                expected: 4,
                actual: 5
            })
        ));
    }

    #[test]
    fn test_encode_stream_start() {
        let frame = encode_stream_start(&STREAM_SENSORS);
        assert_eq!(frame, vec![148, 4, 25, 26, 44, 43]);
    }

    #[test]
    fn test_encode_mode_bytes() {
        assert_eq!(encode_mode(OiMode::Safe), [131]);
        assert_eq!(encode_mode(OiMode::Full), [132]);
        assert_eq!(encode_mode(OiMode::Passive), [128]);
        assert_eq!(encode_mode(OiMode::Off), [173]);
    }
}
