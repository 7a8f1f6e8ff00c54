//! Core library for reading out a UNI-T UT803 bench multimeter.
//!
//! This crate implements the pipeline used by the CLI: the serial frame
//! source feeds the frame decoder (layout/reader/parser), which resolves
//! units from the raw measurement code and produces [`Reading`] values;
//! the run logger groups readings into per-kind runs and writes the
//! tab-separated log. Decoding is byte-oriented and side-effect free; all
//! I/O is isolated in the `source` and `session` modules.
//!
//! Invariants:
//! - Decoding a well-formed 11-byte frame is a deterministic pure function.
//! - Malformed frames are permanent per-frame errors; no partial readings
//!   are ever produced.
//! - The raw measurement code is kept through unit resolution, so the
//!   three current codes (9, 13, 15) map to "A", "uA" and "mA" even though
//!   they collapse into one [`MeasurementKind`].
//!
//! # Examples
//! ```
//! use ut803_core::decode_frame;
//!
//! // 123.4 V, autoranging.
//! let reading = decode_frame(b"41234;002\r\n")?;
//! assert_eq!(reading.value, 123.4);
//! assert_eq!(reading.unit, "V");
//! # Ok::<(), ut803_core::DecodeError>(())
//! ```

use serde::{Deserialize, Serialize};

mod frame;
mod session;
mod source;
mod units;

pub mod format;

pub use frame::{DecodeError, FRAME_LEN, decode_frame};
pub use session::{DEBOUNCE_WINDOW, RunLogger};
pub use source::{FrameSource, SerialFrameSource, SourceError};
pub use units::KindCode;

/// What the meter was measuring when it emitted a frame.
///
/// The wire protocol uses sparse codes; three distinct codes all mean
/// `Current` (they differ only in unit), and `Unknown` marks codes the
/// decoder refuses to guess about.
///
/// # Examples
/// ```
/// use ut803_core::MeasurementKind;
///
/// assert_eq!(MeasurementKind::Voltage.to_string(), "voltage");
/// assert_eq!(MeasurementKind::HFe.to_string(), "hFE");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MeasurementKind {
    Diode,
    Frequency,
    Resistance,
    Temperature,
    Continuity,
    Capacitance,
    Current,
    Voltage,
    #[serde(rename = "hFE")]
    HFe,
    Unknown,
}

impl MeasurementKind {
    /// Name used in log headers and the monitor line.
    pub fn as_str(self) -> &'static str {
        match self {
            MeasurementKind::Diode => "diode",
            MeasurementKind::Frequency => "frequency",
            MeasurementKind::Resistance => "resistance",
            MeasurementKind::Temperature => "temperature",
            MeasurementKind::Continuity => "continuity",
            MeasurementKind::Capacitance => "capacitance",
            MeasurementKind::Current => "current",
            MeasurementKind::Voltage => "voltage",
            MeasurementKind::HFe => "hFE",
            MeasurementKind::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for MeasurementKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Device status bits carried in every frame.
///
/// Decoded from three 4-bit nibbles; reserved bits are ignored.
///
/// # Examples
/// ```
/// use ut803_core::StatusFlags;
///
/// let flags = StatusFlags::from_nibbles([0x1, 0x0, 0x8]);
/// assert!(flags.overload);
/// assert!(flags.dc);
/// assert_eq!(flags.active(), vec!["overload", "dc"]);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusFlags {
    /// Reading is out of range for the selected range.
    pub overload: bool,
    /// Reading is negative.
    pub negative: bool,
    /// Temperature frames report Celsius when set, Fahrenheit when clear.
    pub not_fahrenheit: bool,
    /// MIN hold is active.
    pub min_hold: bool,
    /// MAX hold is active.
    pub max_hold: bool,
    /// Display hold is active.
    pub hold: bool,
    /// Autoranging is active.
    pub autorange: bool,
    /// AC measurement.
    pub ac: bool,
    /// DC measurement.
    pub dc: bool,
}

impl StatusFlags {
    /// Decode the three status nibbles at frame positions 6, 7 and 8.
    pub fn from_nibbles(nibbles: [u8; 3]) -> Self {
        use crate::frame::layout;

        StatusFlags {
            overload: nibbles[0] & layout::OVERLOAD_BIT != 0,
            negative: nibbles[0] & layout::NEGATIVE_BIT != 0,
            not_fahrenheit: nibbles[0] & layout::NOT_FAHRENHEIT_BIT != 0,
            min_hold: nibbles[1] & layout::MIN_BIT != 0,
            max_hold: nibbles[1] & layout::MAX_BIT != 0,
            hold: nibbles[1] & layout::HOLD_BIT != 0,
            autorange: nibbles[2] & layout::AUTORANGE_BIT != 0,
            ac: nibbles[2] & layout::AC_BIT != 0,
            dc: nibbles[2] & layout::DC_BIT != 0,
        }
    }

    /// Labels of the active flags, in a fixed order.
    pub fn active(&self) -> Vec<&'static str> {
        let all = [
            (self.overload, "overload"),
            (self.negative, "negative"),
            (self.not_fahrenheit, "not_fahrenheit"),
            (self.min_hold, "min"),
            (self.max_hold, "max"),
            (self.hold, "hold"),
            (self.autorange, "autorange"),
            (self.ac, "ac"),
            (self.dc, "dc"),
        ];
        all.iter()
            .filter(|(set, _)| *set)
            .map(|(_, label)| *label)
            .collect()
    }
}

/// One decoded measurement.
///
/// Immutable once produced; owned by the caller.
///
/// # Examples
/// ```
/// use ut803_core::{MeasurementKind, decode_frame};
///
/// // 5000 counts on the capacitance range: 5 nF.
/// let reading = decode_frame(b"050006002\r\n")?;
/// assert_eq!(reading.kind, MeasurementKind::Capacitance);
/// assert_eq!(reading.value, 5e-9);
/// # Ok::<(), ut803_core::DecodeError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    /// Signed value in the base unit given by `unit`.
    pub value: f64,
    /// Display unit, e.g. "V", "uA", "°C"; empty for hFE.
    pub unit: String,
    /// Measurement kind, with the current codes collapsed.
    pub kind: MeasurementKind,
    /// Status bits from the frame.
    pub flags: StatusFlags,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_decode_documented_bits() {
        let flags = StatusFlags::from_nibbles([0x1 | 0x4 | 0x8, 0x2 | 0x4 | 0x8, 0x2 | 0x4 | 0x8]);
        assert!(flags.overload);
        assert!(flags.negative);
        assert!(flags.not_fahrenheit);
        assert!(flags.min_hold);
        assert!(flags.max_hold);
        assert!(flags.hold);
        assert!(flags.autorange);
        assert!(flags.ac);
        assert!(flags.dc);
    }

    #[test]
    fn flags_ignore_reserved_bits() {
        // Bit 1 of nibble 0 and bit 0 of nibbles 1 and 2 are reserved.
        let flags = StatusFlags::from_nibbles([0x2, 0x1, 0x1]);
        assert_eq!(flags, StatusFlags::default());
        assert!(flags.active().is_empty());
    }

    #[test]
    fn reading_serializes_with_lowercase_kind() {
        let reading = Reading {
            value: 123.4,
            unit: "V".to_string(),
            kind: MeasurementKind::Voltage,
            flags: StatusFlags::default(),
        };
        let value = serde_json::to_value(&reading).expect("reading json");
        assert_eq!(value["kind"], "voltage");
        assert_eq!(value["unit"], "V");
        assert_eq!(value["flags"]["overload"], false);
    }

    #[test]
    fn hfe_kind_keeps_casing_in_json() {
        let value = serde_json::to_value(MeasurementKind::HFe).expect("kind json");
        assert_eq!(value, "hFE");
    }
}
