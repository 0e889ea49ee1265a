//! The four ways in which the display register can interpret its
//! bits.
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

#[cfg(test)]
use test_strategy::Arbitrary;

use super::error::NumeralError;

/// Selects how the bits of a display register are interpreted.
///
/// All signed representations reserve the most-significant bit as a
/// sign bit.  They differ in how the remaining (magnitude) bits of a
/// negative number are arranged:
///
/// | Representation  | -3 in 4 bits | has -0 | lower bound (4 bits) |
/// | --------------- | ------------ | ------ | -------------------- |
/// | Unsigned        | (none)       | no     | 0                    |
/// | SignMagnitude   | 1011         | yes    | -7                   |
/// | OnesComplement  | 1100         | yes    | -7                   |
/// | TwosComplement  | 1101         | no     | -8                   |
#[cfg_attr(test, derive(Arbitrary))]
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, PartialOrd, Ord, Default)]
pub enum Representation {
    #[default]
    Unsigned,
    SignMagnitude,
    OnesComplement,
    TwosComplement,
}

impl Representation {
    #[must_use]
    pub const fn all() -> [Representation; 4] {
        [
            Representation::Unsigned,
            Representation::SignMagnitude,
            Representation::OnesComplement,
            Representation::TwosComplement,
        ]
    }

    /// Signed representations reserve one bit for the sign.
    #[must_use]
    pub const fn is_signed(&self) -> bool {
        !matches!(self, Representation::Unsigned)
    }

    /// Complement representations store negative magnitudes as a
    /// complement of the magnitude.
    #[must_use]
    pub const fn is_complement(&self) -> bool {
        matches!(
            self,
            Representation::OnesComplement | Representation::TwosComplement
        )
    }

    /// Signed-zero representations can represent both +0 and -0,
    /// which costs them one code point.
    #[must_use]
    pub const fn has_signed_zero(&self) -> bool {
        matches!(
            self,
            Representation::SignMagnitude | Representation::OnesComplement
        )
    }

    /// The canonical name, as accepted on the command line.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Representation::Unsigned => "unsigned",
            Representation::SignMagnitude => "sign-magnitude",
            Representation::OnesComplement => "ones-complement",
            Representation::TwosComplement => "twos-complement",
        }
    }
}

impl Display for Representation {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        f.write_str(self.name())
    }
}

impl TryFrom<&str> for Representation {
    type Error = NumeralError;

    fn try_from(s: &str) -> Result<Representation, NumeralError> {
        // The board's original configuration files spelled the modes
        // as upper-case constants, so we accept those too.
        match s.to_ascii_lowercase().replace('_', "-").as_str() {
            "unsigned" | "unsigned-mode" => Ok(Representation::Unsigned),
            "sign-magnitude" | "signed-with-magnitude-mode" => Ok(Representation::SignMagnitude),
            "ones-complement" | "signed-ones-complement-mode" => {
                Ok(Representation::OnesComplement)
            }
            "twos-complement" | "signed-twos-complement-mode" => {
                Ok(Representation::TwosComplement)
            }
            _ => Err(NumeralError::InvalidMode(s.to_string())),
        }
    }
}

impl FromStr for Representation {
    type Err = NumeralError;

    fn from_str(s: &str) -> Result<Representation, NumeralError> {
        Representation::try_from(s)
    }
}
