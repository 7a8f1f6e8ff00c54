use thiserror::Error;

/// Permanent per-frame decode failures. The caller drops the frame and
/// waits for the next one; no partial recovery is attempted.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("frame length must be {expected} bytes, got {actual}")]
    BadLength { expected: usize, actual: usize },
    #[error("invalid digit character at position {position}")]
    InvalidDigit { position: usize },
    #[error("unknown measurement kind code {code}")]
    UnknownMeasurementKind { code: u8 },
}
