//! Draws the LED board on a terminal.
use std::io::{self, Write};

use termcolor::{self, ColorChoice, ColorSpec, StandardStream, WriteColor};

use base::prelude::BitPattern;
use board::{BitSink, PwmOutput};

const LIT: &str = "●";
const UNLIT: &str = "○";

fn get_colour_choice() -> termcolor::ColorChoice {
    if atty::is(atty::Stream::Stdout) {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    }
}

fn lit_colour() -> ColorSpec {
    let mut spec = ColorSpec::new();
    spec.set_fg(Some(termcolor::Color::Red)).set_bold(true);
    spec
}

/// Shows the value register as a row of LEDs, followed by the bits as
/// binary digits.
pub struct TerminalLeds<W: WriteColor> {
    stream: W,
}

impl TerminalLeds<StandardStream> {
    pub fn stdout() -> TerminalLeds<StandardStream> {
        TerminalLeds::new(StandardStream::stdout(get_colour_choice()))
    }
}

impl<W: WriteColor> TerminalLeds<W> {
    pub fn new(stream: W) -> TerminalLeds<W> {
        TerminalLeds { stream }
    }

    pub fn get_ref(&self) -> &W {
        &self.stream
    }
}

impl<W: WriteColor> BitSink for TerminalLeds<W> {
    fn show_bits(&mut self, bits: &BitPattern) -> Result<(), io::Error> {
        self.stream.write_all(b"value ")?;
        for bit in bits.iter() {
            if bit {
                self.stream.set_color(&lit_colour())?;
                self.stream.write_all(LIT.as_bytes())?;
            } else {
                self.stream.reset()?;
                self.stream.write_all(UNLIT.as_bytes())?;
            }
        }
        self.stream.reset()?;
        writeln!(self.stream, "  {bits}")?;
        self.stream.flush()
    }
}

/// Shows the brightness of the gain LED as a percentage.
pub struct TerminalPwm<W: WriteColor> {
    stream: W,
}

impl TerminalPwm<StandardStream> {
    pub fn stdout() -> TerminalPwm<StandardStream> {
        TerminalPwm::new(StandardStream::stdout(get_colour_choice()))
    }
}

impl<W: WriteColor> TerminalPwm<W> {
    pub fn new(stream: W) -> TerminalPwm<W> {
        TerminalPwm { stream }
    }

    pub fn get_ref(&self) -> &W {
        &self.stream
    }
}

impl<W: WriteColor> PwmOutput for TerminalPwm<W> {
    fn set_duty_cycle(&mut self, duty_cycle: f64) -> Result<(), io::Error> {
        self.stream.write_all(b"gain  ")?;
        if duty_cycle > 0.0 {
            self.stream.set_color(&lit_colour())?;
            self.stream.write_all(LIT.as_bytes())?;
        } else {
            self.stream.write_all(UNLIT.as_bytes())?;
        }
        self.stream.reset()?;
        writeln!(self.stream, "  {:.0}%", duty_cycle * 100.0)?;
        self.stream.flush()
    }
}
