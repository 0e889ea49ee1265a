//! Conversion between numbers and the bit patterns shown on a
//! binary-weighted LED register.
use conv::{ConvUtil, RoundToNegInf};

use super::bits::BitPattern;
use super::error::NumeralError;
use super::layout::Layout;
use super::representation::Representation;

#[cfg(test)]
mod tests;

fn out_of_range(layout: &Layout, value: f64) -> NumeralError {
    NumeralError::OutOfRange {
        value,
        lower: layout.lower_bound(),
        upper: layout.upper_bound(),
    }
}

/// Computes the bit pattern for `value` in a register described by
/// `layout`.  Fractional values are floored.
///
/// A negative value is tested with [`f64::is_sign_negative`] so that
/// `-0.0` is distinguished from `0.0`; in the representations which
/// have a negative zero it gets its own bit pattern.
pub fn encode_with(layout: &Layout, value: f64) -> Result<BitPattern, NumeralError> {
    if !value.is_finite() {
        return Err(NumeralError::NotNumeric(value));
    }
    if !layout.contains(value) {
        return Err(out_of_range(layout, value));
    }
    let negative_allowed = value != 0.0 || layout.signed_zero();
    let negative = value.is_sign_negative() && negative_allowed;

    let mut normalized: i64 = value
        .approx_as_by::<i64, RoundToNegInf>()
        .map_err(|_| out_of_range(layout, value))?;
    if negative {
        if let Some(complement) = layout.complement_constant() {
            normalized += complement;
        }
    }
    // After the complement adjustment only a sign-magnitude negative
    // is still below zero, and its field holds the absolute value.
    let sign_bit = if layout.sign_bit_present() {
        Some(negative)
    } else {
        None
    };
    Ok(BitPattern::from_fields(
        sign_bit,
        normalized.unsigned_abs(),
        layout.magnitude_bits(),
    ))
}

/// Computes the value shown by `bits` in a register described by
/// `layout`.  A negative zero pattern decodes to `-0.0`.
pub fn decode_with(layout: &Layout, bits: &BitPattern) -> Result<f64, NumeralError> {
    if bits.len() != layout.width() as usize {
        return Err(NumeralError::WidthMismatch {
            expected: layout.width(),
            got: bits.len(),
        });
    }
    let negative = layout.sign_bit_present() && bits.first() == Some(true);
    // At most 32 bits, so this cannot wrap.
    let raw_magnitude = bits.low_bits_value(layout.magnitude_bits()) as i64;
    let magnitude = match layout.complement_constant() {
        Some(complement) if negative => complement - raw_magnitude,
        _ => raw_magnitude,
    };
    let magnitude = magnitude as f64;
    Ok(if negative { -magnitude } else { magnitude })
}

/// A display register of fixed width whose representation can be
/// changed at run time.
///
/// The codec remembers the last value it successfully encoded, so
/// that when the representation changes the same value can be shown
/// in the new representation.
#[derive(Debug, Clone, PartialEq)]
pub struct NumeralCodec {
    layout: Layout,
    last_value: Option<f64>,
}

impl NumeralCodec {
    pub fn new(width: u32, mode: Representation) -> Result<NumeralCodec, NumeralError> {
        Ok(NumeralCodec {
            layout: Layout::new(width, mode)?,
            last_value: None,
        })
    }

    #[must_use]
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.layout.width()
    }

    #[must_use]
    pub fn mode(&self) -> Representation {
        self.layout.mode()
    }

    #[must_use]
    pub fn lower_bound(&self) -> i64 {
        self.layout.lower_bound()
    }

    #[must_use]
    pub fn upper_bound(&self) -> i64 {
        self.layout.upper_bound()
    }

    /// The value most recently passed to a successful
    /// [`encode`](Self::encode), before flooring.
    #[must_use]
    pub fn last_value(&self) -> Option<f64> {
        self.last_value
    }

    pub fn encode(&mut self, value: f64) -> Result<BitPattern, NumeralError> {
        let bits = encode_with(&self.layout, value)?;
        self.last_value = Some(value);
        Ok(bits)
    }

    pub fn decode(&self, bits: &BitPattern) -> Result<f64, NumeralError> {
        decode_with(&self.layout, bits)
    }

    /// The pattern currently being shown, if any value has been set.
    #[must_use]
    pub fn current_bits(&self) -> Option<BitPattern> {
        self.last_value
            .and_then(|value| encode_with(&self.layout, value).ok())
    }

    /// The value the current pattern represents, that is the floored
    /// last value.
    #[must_use]
    pub fn displayed_value(&self) -> Option<f64> {
        self.current_bits()
            .and_then(|bits| decode_with(&self.layout, &bits).ok())
    }

    /// Switches to a different representation.  If a value is being
    /// shown it is re-encoded in the new representation and the new
    /// pattern is returned.
    ///
    /// When the value cannot be shown in the new representation the
    /// codec is left exactly as it was and the encoding error is
    /// returned.
    pub fn set_mode(&mut self, mode: Representation) -> Result<Option<BitPattern>, NumeralError> {
        let layout = self.layout.with_mode(mode);
        let bits = match self.last_value {
            Some(value) => Some(encode_with(&layout, value)?),
            None => None,
        };
        self.layout = layout;
        Ok(bits)
    }
}
