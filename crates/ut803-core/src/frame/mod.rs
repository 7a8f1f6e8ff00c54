//! Frame decoding, layered like the other protocol modules:
//! - `layout`: byte offsets and bit masks (source of truth)
//! - `reader`: safe byte access and the nibble encoding convention
//! - `parser`: domain-level decoding (no direct byte indexing)
//! - `error`: explicit, actionable errors
//!
//! The parser is pure and contains no I/O; sources and the run logger
//! handle the serial port and the output stream.

pub(crate) mod layout;

mod error;
mod parser;
mod reader;

pub use error::DecodeError;
pub use layout::FRAME_LEN;
pub use parser::decode_frame;
