//! Unit resolution for raw measurement codes.
//!
//! The wire protocol spreads "current" over three codes that differ only
//! in unit, so resolution runs on the raw [`KindCode`] before it collapses
//! into [`MeasurementKind`]. Unit lookup never fails: structurally valid
//! frames with an unanticipated code/flag combination fall back to `"???"`
//! with no exponent correction.

use crate::{MeasurementKind, StatusFlags};

/// Raw measurement-kind nibble from frame position 5.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KindCode(u8);

impl KindCode {
    pub fn new(raw: u8) -> Self {
        Self(raw)
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// Collapse the sparse code space into a [`MeasurementKind`]. Total:
    /// unmapped codes become `Unknown`, which the parser rejects.
    pub fn kind(self) -> MeasurementKind {
        match self.0 {
            1 => MeasurementKind::Diode,
            2 => MeasurementKind::Frequency,
            3 => MeasurementKind::Resistance,
            4 => MeasurementKind::Temperature,
            5 => MeasurementKind::Continuity,
            6 => MeasurementKind::Capacitance,
            9 | 13 | 15 => MeasurementKind::Current,
            11 => MeasurementKind::Voltage,
            14 => MeasurementKind::HFe,
            _ => MeasurementKind::Unknown,
        }
    }
}

/// Resolve the display unit and the exponent correction for a code.
pub fn resolve(code: KindCode, flags: &StatusFlags) -> (&'static str, i32) {
    let unit = match code.get() {
        1 | 11 => "V",
        2 => "Hz",
        3 | 5 => "Ohm",
        4 => {
            if flags.not_fahrenheit {
                "°C"
            } else {
                "°F"
            }
        }
        6 => "F",
        9 => "A",
        13 => "uA",
        // hFE is dimensionless.
        14 => "",
        15 => "mA",
        _ => "???",
    };
    (unit, exponent_offset(unit))
}

/// Correction subtracted from the frame's decimal exponent to align the
/// raw count magnitude to the physical unit. The capacitance base count
/// is picofarad-scaled, hence the large offset.
fn exponent_offset(unit: &str) -> i32 {
    match unit {
        "V" => -3,
        "Ohm" => -1,
        "A" => -2,
        "mA" => -2,
        "uA" => -1,
        "F" => -12,
        _ => 0,
    }
}
