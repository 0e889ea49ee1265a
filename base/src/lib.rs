//! The `base` crate defines the numeral codec of an LED display
//! board: how a number becomes the pattern of lit and unlit LEDs in a
//! fixed-width register, and back again.  It does no I/O; driving the
//! LEDs and choosing what to show is the business of the `board`
//! crate.

mod numeral;

pub mod prelude;
