//! The poll loop: read a value, show it, wait, repeat.
//!
//! Readings arrive one per line.  On the real board they come from a
//! CO2 sensor; here they come from any text stream, which makes it
//! easy to replay a log of sensor readings.
use std::io::{self, BufRead};
use std::thread::sleep;
use std::time::Duration;

use tracing::{event, Level};

use board::{BitSink, BoardError, LevelIndicator, MultiScaleBoard};

/// Counts of what happened to the readings.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct PollSummary {
    pub shown: usize,
    pub rejected: usize,
}

/// Shows each reading in `input` on `board`, pausing for `interval`
/// after each one.  Readings which cannot be shown are logged and
/// skipped.  Failures to read the input or to drive the outputs end
/// the loop.
pub fn run_poll_loop<R, S, L>(
    input: R,
    board: &mut MultiScaleBoard<S, L>,
    interval: Duration,
) -> Result<PollSummary, io::Error>
where
    R: BufRead,
    S: BitSink,
    L: LevelIndicator,
{
    let mut summary = PollSummary::default();
    for (index, line) in input.lines().enumerate() {
        let line = line?;
        let reading = line.trim();
        if reading.is_empty() || reading.starts_with('#') {
            continue;
        }
        let lineno = index + 1;
        let value: f64 = match reading.parse() {
            Ok(value) => value,
            Err(e) => {
                event!(
                    Level::WARN,
                    "line {lineno}: ignoring reading '{reading}': {e}"
                );
                summary.rejected += 1;
                continue;
            }
        };
        match board.show(value) {
            Ok(selection) => {
                event!(
                    Level::INFO,
                    "line {lineno}: showing {value} at level {} (register value {})",
                    selection.level,
                    selection.register_value
                );
                summary.shown += 1;
            }
            Err(BoardError::Output(e)) => {
                return Err(e);
            }
            Err(e) => {
                event!(Level::WARN, "line {lineno}: cannot show {value}: {e}");
                summary.rejected += 1;
            }
        }
        if !interval.is_zero() {
            sleep(interval);
        }
    }
    event!(
        Level::INFO,
        "input exhausted: {} readings shown, {} rejected",
        summary.shown,
        summary.rejected
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use base::prelude::*;
    use board::{production_segments, BrightnessLevels, PwmLevelIndicator};
    use termcolor::Buffer;

    use crate::leds::{TerminalLeds, TerminalPwm};

    #[test]
    fn test_poll_loop() {
        let codec = NumeralCodec::new(6, Representation::Unsigned).unwrap();
        let levels = BrightnessLevels::logarithmic(4).unwrap();
        let mut board = MultiScaleBoard::new(
            codec,
            production_segments(),
            TerminalLeds::new(Buffer::no_color()),
            PwmLevelIndicator::new(TerminalPwm::new(Buffer::no_color()), levels),
        )
        .unwrap();
        let input = "825\n\n# sensor warming up\nnot-a-number\n12000\n1234\n";
        let summary = run_poll_loop(input.as_bytes(), &mut board, Duration::ZERO).unwrap();
        assert_eq!(
            summary,
            PollSummary {
                shown: 2,
                rejected: 2
            }
        );
        assert_eq!(
            String::from_utf8_lossy(board.value_board().get_ref().as_slice()),
            "value ●●●●●○  111110\nvalue ○●○●○●  010101\n"
        );
        assert_eq!(
            String::from_utf8_lossy(board.level_board().pwm().get_ref().as_slice()),
            "gain  ○  0%\ngain  ●  1%\n"
        );
        assert_eq!(board.last_value(), Some(1234.0));
    }
}
