//! Bit patterns as they appear on the indicator LEDs.
use std::fmt::{self, Display, Formatter, Write};
use std::str::FromStr;

use super::error::NumeralError;

/// An ordered sequence of bits, most-significant first.  Index 0 is
/// the sign bit when the representation has one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct BitPattern(Vec<bool>);

impl BitPattern {
    #[must_use]
    pub fn new(bits: Vec<bool>) -> BitPattern {
        BitPattern(bits)
    }

    /// Builds a pattern of `width` bits from the low-order bits of
    /// `sign_bit` (if any) followed by `magnitude`.
    pub(crate) fn from_fields(sign_bit: Option<bool>, magnitude: u64, magnitude_bits: u32) -> BitPattern {
        let mut bits = Vec::with_capacity(magnitude_bits as usize + 1);
        if let Some(negative) = sign_bit {
            bits.push(negative);
        }
        bits.extend((0..magnitude_bits).rev().map(|i| magnitude & (1 << i) != 0));
        BitPattern(bits)
    }

    /// Unsigned value of the last `count` bits.
    pub(crate) fn low_bits_value(&self, count: u32) -> u64 {
        let start = self.0.len().saturating_sub(count as usize);
        self.0[start..]
            .iter()
            .fold(0_u64, |acc, bit| (acc << 1) | u64::from(*bit))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn first(&self) -> Option<bool> {
        self.0.first().copied()
    }

    #[must_use]
    pub fn bits(&self) -> &[bool] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        self.0.iter().copied()
    }
}

impl From<Vec<bool>> for BitPattern {
    fn from(bits: Vec<bool>) -> BitPattern {
        BitPattern(bits)
    }
}

impl From<&[bool]> for BitPattern {
    fn from(bits: &[bool]) -> BitPattern {
        BitPattern(bits.to_vec())
    }
}

impl From<BitPattern> for Vec<bool> {
    fn from(pattern: BitPattern) -> Vec<bool> {
        pattern.0
    }
}

impl Display for BitPattern {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        for bit in self.iter() {
            f.write_char(if bit { '1' } else { '0' })?;
        }
        Ok(())
    }
}

impl FromStr for BitPattern {
    type Err = NumeralError;

    fn from_str(s: &str) -> Result<BitPattern, NumeralError> {
        s.chars()
            .map(|ch| match ch {
                '0' => Ok(false),
                '1' => Ok(true),
                _ => Err(NumeralError::InvalidBitString(s.to_string())),
            })
            .collect::<Result<Vec<bool>, NumeralError>>()
            .map(BitPattern)
    }
}
