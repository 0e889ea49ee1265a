//! Brightness steps for a PWM-dimmed level indicator.
//!
//! The eye's response to brightness is roughly logarithmic, so evenly
//! spaced duty cycles are hard to tell apart at the bright end.  The
//! default table therefore uses logarithmically spaced steps.
use std::error::Error;
use std::fmt::{self, Display, Formatter};

const MIN_BRIGHTNESS: f64 = 0.01;
const MAX_BRIGHTNESS: f64 = 1.0;

#[derive(Debug, Clone, PartialEq)]
pub enum BrightnessError {
    /// A logarithmic table needs an "off" level and at least one
    /// lit level.
    TooFewLevels(usize),
    /// Brightness must be in `[0, 1]`.
    InvalidBrightness { level: usize, brightness: f64 },
}

impl Display for BrightnessError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        match self {
            BrightnessError::TooFewLevels(count) => {
                write!(f, "at least 2 brightness levels are needed, not {count}")
            }
            BrightnessError::InvalidBrightness { level, brightness } => {
                write!(
                    f,
                    "brightness {brightness} of level {level} is outside the range 0 to 1"
                )
            }
        }
    }
}

impl Error for BrightnessError {}

/// A duty cycle for each level.
#[derive(Debug, Clone, PartialEq)]
pub struct BrightnessLevels(Vec<f64>);

impl BrightnessLevels {
    /// Level 0 is off; levels `1..count` rise logarithmically from 1%
    /// to 100%.  For four levels that is `[0, 0.01, 0.1, 1]`.
    pub fn logarithmic(count: usize) -> Result<BrightnessLevels, BrightnessError> {
        match count {
            0 | 1 => Err(BrightnessError::TooFewLevels(count)),
            2 => Ok(BrightnessLevels(vec![0.0, MAX_BRIGHTNESS])),
            _ => {
                let steps = (count - 2) as f64;
                let lit = (0..count - 1).map(|i| {
                    MIN_BRIGHTNESS * (MAX_BRIGHTNESS / MIN_BRIGHTNESS).powf(i as f64 / steps)
                });
                Ok(BrightnessLevels(std::iter::once(0.0).chain(lit).collect()))
            }
        }
    }

    pub fn explicit(levels: Vec<f64>) -> Result<BrightnessLevels, BrightnessError> {
        if levels.is_empty() {
            return Err(BrightnessError::TooFewLevels(0));
        }
        match levels
            .iter()
            .enumerate()
            .find(|(_, b)| !(0.0..=1.0).contains(*b))
        {
            Some((level, brightness)) => Err(BrightnessError::InvalidBrightness {
                level,
                brightness: *brightness,
            }),
            None => Ok(BrightnessLevels(levels)),
        }
    }

    #[must_use]
    pub fn brightness(&self, level: usize) -> Option<f64> {
        self.0.get(level).copied()
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
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }
}
