//! Open Interface protocol codec
//!
//! Pure encode/decode of the OI binary layouts - no I/O, no state.
//!
//! # Outbound frames
//!
//! Every command starts with an opcode byte followed by its fixed operands:
//!
//! ```text
//! [145] [right i16 BE] [left i16 BE]      drive by wheel velocity (mm/s)
//! [146] [right i16 BE] [left i16 BE]      drive by raw PWM (-255..255)
//! [139] [led bitmask] [color] [intensity] LEDs
//! [163] [d3] [d2] [d1] [d0]               raw 7-segment masks
//! [164] [g3] [g2] [g1] [g0]               glyph codes from the ASCII table
//! [148] [count] [id...]                   start sensor stream
//! [150] [0]                               pause sensor stream
//! ```
//!
//! All multi-byte integers are big-endian; signed fields are two's-complement.
//!
//! # Inbound telemetry frame
//!
//! Fixed 9-byte record, aligned on a sentinel byte that matches one of the
//! requested sensor packet IDs (used to resynchronize the byte stream):
//!
//! ```text
//! [sentinel] [charge] [capacity] [enc right i16 BE] [filler] [enc left i16 BE] [trailer]
//! ```

pub mod decode;
pub mod encode;
pub mod glyphs;
pub mod opcodes;

pub use decode::{decode_telemetry, TelemetryFrame, TELEMETRY_FRAME_LEN};
pub use encode::{
    encode_digits_ascii, encode_digits_raw, encode_drive_pwm, encode_drive_velocity, encode_leds,
    encode_mode, encode_start, encode_stop, encode_stream_pause, encode_stream_start,
};
pub use glyphs::glyph_code;
