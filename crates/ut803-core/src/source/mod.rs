mod serial;

pub use serial::SerialFrameSource;

use thiserror::Error;

/// Supplies raw line records, terminator included. `Ok(None)` means no
/// complete record was available yet (e.g. a read timeout); callers just
/// try again.
pub trait FrameSource {
    fn next_frame(&mut self) -> Result<Option<Vec<u8>>, SourceError>;
}

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serial port error: {0}")]
    Serial(#[from] serialport::Error),
}
