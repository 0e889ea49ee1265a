//! The outputs a board drives.  Real boards assert GPIO lines; the
//! command-line front end draws the LEDs on a terminal.
use std::io;

use tracing::{event, Level};

use base::prelude::BitPattern;

use super::brightness::BrightnessLevels;

/// Something which shows the bits of the value register, for example
/// a row of LEDs.
pub trait BitSink {
    /// Shows `bits`, most-significant first.
    fn show_bits(&mut self, bits: &BitPattern) -> Result<(), io::Error>;
}

/// Something which shows the current gain level.
pub trait LevelIndicator {
    /// Shows `level`, which is less than `level_count`.
    fn show_level(&mut self, level: usize, level_count: usize) -> Result<(), io::Error>;
}

/// A PWM-dimmed output such as a single LED.
pub trait PwmOutput {
    /// Sets the duty cycle, in the range `[0, 1]`.
    fn set_duty_cycle(&mut self, duty_cycle: f64) -> Result<(), io::Error>;
}

/// Shows the gain level as the brightness of a PWM-dimmed LED.
#[derive(Debug)]
pub struct PwmLevelIndicator<P: PwmOutput> {
    pwm: P,
    levels: BrightnessLevels,
}

impl<P: PwmOutput> PwmLevelIndicator<P> {
    pub fn new(pwm: P, levels: BrightnessLevels) -> PwmLevelIndicator<P> {
        PwmLevelIndicator { pwm, levels }
    }

    pub fn levels(&self) -> &BrightnessLevels {
        &self.levels
    }

    pub fn pwm(&self) -> &P {
        &self.pwm
    }
}

impl<P: PwmOutput> LevelIndicator for PwmLevelIndicator<P> {
    fn show_level(&mut self, level: usize, level_count: usize) -> Result<(), io::Error> {
        if level_count > self.levels.len() {
            event!(
                Level::WARN,
                "the brightness table has {} entries, too few to distinguish {} levels",
                self.levels.len(),
                level_count
            );
        }
        match self.levels.brightness(level) {
            Some(duty_cycle) => self.pwm.set_duty_cycle(duty_cycle),
            None => Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("there is no brightness for level {level}"),
            )),
        }
    }
}
