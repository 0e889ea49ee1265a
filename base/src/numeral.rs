//! This module implements the fixed-width numeral representations
//! used by a binary LED register: unsigned, sign-magnitude, one's
//! complement and two's complement.

pub mod error;

pub(crate) mod bits;
pub(crate) mod codec;
pub(crate) mod layout;
pub(crate) mod representation;
