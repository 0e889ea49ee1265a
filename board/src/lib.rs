//! This crate drives a multi-scale LED display board: a row of
//! binary-weighted LEDs showing a register value (see the `base`
//! crate) and a gain indicator showing which of several
//! offset-and-scale mappings turns that register value into the
//! displayed quantity.
#![crate_name = "board"]

mod brightness;
mod io;
mod level;
mod multiscale;

pub use brightness::{BrightnessError, BrightnessLevels};
pub use io::{BitSink, LevelIndicator, PwmLevelIndicator, PwmOutput};
pub use level::{Interval, LevelError, LevelSelector, RegisterBounds, Segment, Selection};
pub use multiscale::{BoardError, MultiScaleBoard};

/// The segments of the production CO2 display: a 6-bit unsigned
/// register showing 200 to 11400 ppm in four gain levels.
#[must_use]
pub fn production_segments() -> Vec<Segment> {
    vec![
        Segment::new(200.0, 10.0),
        Segment::new(800.0, 20.0),
        Segment::new(2000.0, 50.0),
        Segment::new(5000.0, 100.0),
    ]
}
