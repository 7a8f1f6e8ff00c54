use super::error::DecodeError;
use super::layout;
use super::reader::FrameReader;

use crate::units::{self, KindCode};
use crate::{MeasurementKind, Reading, StatusFlags};

/// Decode one 11-byte record into a [`Reading`].
///
/// The two terminator bytes are ignored; everything else is validated.
/// Deterministic and side-effect free: the same frame always produces the
/// same reading.
pub fn decode_frame(frame: &[u8]) -> Result<Reading, DecodeError> {
    let reader = FrameReader::new(frame);
    reader.require_frame_len()?;

    let code = KindCode::new(reader.read_nibble(layout::KIND_OFFSET)?);
    let kind = code.kind();
    if kind == MeasurementKind::Unknown {
        return Err(DecodeError::UnknownMeasurementKind { code: code.get() });
    }

    let mut nibbles = [0u8; 3];
    for (slot, offset) in nibbles.iter_mut().zip(layout::FLAG_OFFSETS) {
        *slot = reader.read_nibble(offset)?;
    }
    let flags = StatusFlags::from_nibbles(nibbles);

    let (unit, offset) = units::resolve(code, &flags);

    let raw_exponent = reader.read_nibble(layout::EXPONENT_OFFSET)?;
    let mut exponent = i32::from(raw_exponent);
    // Voltage ranges fold a decimal-point shift into bit 2 of the exponent
    // nibble. Keyed on the resolved unit, so diode frames get it too.
    if unit == "V" && raw_exponent & layout::VOLTAGE_RANGE_BIT != 0 {
        exponent -= 2;
    }
    exponent += offset;

    let base = reader.read_base()?;
    let mut value = f64::from(base) * 10f64.powi(exponent);
    if flags.negative {
        value = -value;
    }

    Ok(Reading {
        value,
        unit: unit.to_string(),
        kind,
        flags,
    })
}
