//! The quantities which follow from a register's width and its
//! representation.  They are computed together so that a mode change
//! can be validated in full before any of them is replaced.
use super::error::NumeralError;
use super::representation::Representation;

/// The widest register we support.  Every code point of a register
/// this wide is exactly representable as an `f64`, and the bounds
/// arithmetic cannot overflow an `i64`.
pub const MAX_WIDTH: u32 = 32;

/// Derived properties of a register of a given width under a given
/// representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    width: u32,
    mode: Representation,
}

impl Layout {
    pub fn new(width: u32, mode: Representation) -> Result<Layout, NumeralError> {
        if width == 0 || width > MAX_WIDTH {
            Err(NumeralError::InvalidWidth(width))
        } else {
            Ok(Layout { width, mode })
        }
    }

    /// The same register width, interpreted under `mode`.
    #[must_use]
    pub const fn with_mode(&self, mode: Representation) -> Layout {
        Layout {
            width: self.width,
            mode,
        }
    }

    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub const fn mode(&self) -> Representation {
        self.mode
    }

    #[must_use]
    pub const fn sign_bit_present(&self) -> bool {
        self.mode.is_signed()
    }

    #[must_use]
    pub const fn magnitude_bits(&self) -> u32 {
        if self.sign_bit_present() {
            self.width - 1
        } else {
            self.width
        }
    }

    #[must_use]
    pub const fn signed_zero(&self) -> bool {
        self.mode.has_signed_zero()
    }

    /// The number of distinct values the register can hold.
    #[must_use]
    pub const fn range(&self) -> i64 {
        let code_points: i64 = 1 << self.width;
        if self.signed_zero() {
            code_points - 1
        } else {
            code_points
        }
    }

    /// Exclusive upper bound of the representable values.
    #[must_use]
    pub const fn upper_bound(&self) -> i64 {
        1 << self.magnitude_bits()
    }

    /// Inclusive lower bound of the representable values.
    #[must_use]
    pub const fn lower_bound(&self) -> i64 {
        self.upper_bound() - self.range()
    }

    /// The constant from which a negative magnitude is subtracted to
    /// form its complement.  Only complement representations have one.
    #[must_use]
    pub const fn complement_constant(&self) -> Option<i64> {
        match self.mode {
            Representation::OnesComplement => Some(self.upper_bound() - 1),
            Representation::TwosComplement => Some(self.upper_bound()),
            Representation::Unsigned | Representation::SignMagnitude => None,
        }
    }

    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        // `as` is exact here because the bounds fit in 33 bits.
        self.lower_bound() as f64 <= value && value < self.upper_bound() as f64
    }
}
