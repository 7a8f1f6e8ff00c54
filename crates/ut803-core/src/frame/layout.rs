//! Fixed layout of the 11-byte frame: one exponent nibble, four decimal
//! digits of base magnitude, the measurement-kind nibble, three status
//! nibbles and a two-byte terminator. Nibbles are encoded as `'0' + n`,
//! covering `'0'..='?'`.

/// Total record length, terminator included.
pub const FRAME_LEN: usize = 11;

pub const EXPONENT_OFFSET: usize = 0;
pub const BASE_RANGE: std::ops::Range<usize> = 1..5;
pub const KIND_OFFSET: usize = 5;
pub const FLAG_OFFSETS: [usize; 3] = [6, 7, 8];

/// Highest value a nibble character may encode (`'?'`).
pub const NIBBLE_MAX: u8 = 15;

// Status nibble 0.
pub const OVERLOAD_BIT: u8 = 0x1;
pub const NEGATIVE_BIT: u8 = 0x4;
pub const NOT_FAHRENHEIT_BIT: u8 = 0x8;

// Status nibble 1.
pub const MIN_BIT: u8 = 0x2;
pub const MAX_BIT: u8 = 0x4;
pub const HOLD_BIT: u8 = 0x8;

// Status nibble 2.
pub const AUTORANGE_BIT: u8 = 0x2;
pub const AC_BIT: u8 = 0x4;
pub const DC_BIT: u8 = 0x8;

/// Bit 2 of the exponent nibble. On voltage ranges it shifts the decimal
/// point two places down.
pub const VOLTAGE_RANGE_BIT: u8 = 0x4;
