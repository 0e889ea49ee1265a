//! The prelude exports the types needed to encode and decode register
//! values.  Providing this prelude is the main purpose of the base
//! crate.
pub use super::numeral::bits::BitPattern;
pub use super::numeral::codec::{decode_with, encode_with, NumeralCodec};
pub use super::numeral::error::*;
pub use super::numeral::layout::{Layout, MAX_WIDTH};
pub use super::numeral::representation::Representation;
