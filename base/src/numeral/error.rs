//! Basic error reporting.

use std::error::Error;
use std::fmt::{self, Display, Formatter};

/// Represents a failure to convert between a number and the bit
/// pattern of a display register.
#[derive(Clone, Debug, PartialEq)]
pub enum NumeralError {
    /// The value to be encoded is not a (finite) real number.
    NotNumeric(f64),
    /// The value to be encoded lies outside `[lower, upper)`.
    OutOfRange { value: f64, lower: i64, upper: i64 },
    /// The name does not identify a representation.
    InvalidMode(String),
    /// A register cannot have this many bits.
    InvalidWidth(u32),
    /// A bit pattern of the wrong length was offered for decoding.
    WidthMismatch { expected: u32, got: usize },
    /// A bit string contained something other than `0` and `1`.
    InvalidBitString(String),
}

impl Error for NumeralError {}

impl Display for NumeralError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        match self {
            NumeralError::NotNumeric(value) => {
                write!(f, "value {value} is not a real number")
            }
            NumeralError::OutOfRange {
                value,
                lower,
                upper,
            } => {
                if *value < *lower as f64 {
                    write!(f, "value {value} is lower than the lower bound {lower}")
                } else {
                    write!(
                        f,
                        "value {value} is greater than or equal to the upper bound {upper}"
                    )
                }
            }
            NumeralError::InvalidMode(name) => {
                write!(f, "'{name}' is not a known numeral representation")
            }
            NumeralError::InvalidWidth(width) => {
                write!(f, "a register of {width} bits is not supported")
            }
            NumeralError::WidthMismatch { expected, got } => {
                write!(f, "expected {expected} bits but got {got}")
            }
            NumeralError::InvalidBitString(s) => {
                write!(f, "'{s}' is not a string of binary digits")
            }
        }
    }
}
