//! Transport layer for I/O abstraction

use crate::error::Result;

mod mock;
mod serial;

pub use mock::MockTransport;
pub use serial::SerialTransport;

/// Byte transport to the device
///
/// Implementations map read timeouts to `Ok(0)` so callers can poll a
/// cancellation flag between blocking attempts.
pub trait Transport: Send {
    /// Read available bytes into the buffer; `Ok(0)` means nothing arrived
    /// within the transport's read timeout
    fn read(&mut self, buffer: &mut [u8]) -> Result<usize>;

    /// Write the whole buffer
    fn write_all(&mut self, data: &[u8]) -> Result<()>;

    /// Flush pending writes (blocking until complete)
    fn flush(&mut self) -> Result<()>;
}
