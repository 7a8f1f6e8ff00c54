use super::error::DecodeError;
use super::layout;

pub struct FrameReader<'a> {
    frame: &'a [u8],
}

impl<'a> FrameReader<'a> {
    pub fn new(frame: &'a [u8]) -> Self {
        Self { frame }
    }

    pub fn require_frame_len(&self) -> Result<(), DecodeError> {
        if self.frame.len() != layout::FRAME_LEN {
            return Err(DecodeError::BadLength {
                expected: layout::FRAME_LEN,
                actual: self.frame.len(),
            });
        }
        Ok(())
    }

    /// Read a nibble character: `'0' + n` for n in 0..=15, i.e. `'0'..='?'`.
    pub fn read_nibble(&self, offset: usize) -> Result<u8, DecodeError> {
        let byte = self.read_byte(offset)?;
        let nibble = byte.wrapping_sub(b'0');
        if nibble > layout::NIBBLE_MAX {
            return Err(DecodeError::InvalidDigit { position: offset });
        }
        Ok(nibble)
    }

    /// Read the unsigned base magnitude from the four plain decimal digits.
    pub fn read_base(&self) -> Result<u32, DecodeError> {
        let mut base = 0u32;
        for position in layout::BASE_RANGE {
            let byte = self.read_byte(position)?;
            if !byte.is_ascii_digit() {
                return Err(DecodeError::InvalidDigit { position });
            }
            base = base * 10 + u32::from(byte - b'0');
        }
        Ok(base)
    }

    fn read_byte(&self, offset: usize) -> Result<u8, DecodeError> {
        self.frame
            .get(offset)
            .copied()
            .ok_or(DecodeError::BadLength {
                expected: layout::FRAME_LEN,
                actual: self.frame.len(),
            })
    }
}
