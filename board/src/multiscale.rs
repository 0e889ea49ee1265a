//! A board which shows a value on a binary register together with a
//! gain level indicator.
use std::error::Error;
use std::fmt::{self, Display, Formatter};
use std::io;

use tracing::{event, Level};

use base::prelude::*;

use super::io::{BitSink, LevelIndicator};
use super::level::{LevelError, LevelSelector, RegisterBounds, Segment, Selection};


#[derive(Debug)]
pub enum BoardError {
    Level(LevelError),
    Numeral(NumeralError),
    /// The level selector chose a register value which the register
    /// cannot hold.  This happens when the segments are inconsistent
    /// with the register (for example a negative scale maps the lowest
    /// value of a segment onto the register's exclusive upper bound).
    Inconsistent {
        level: usize,
        register_value: i64,
        source: NumeralError,
    },
    /// An output device failed.
    Output(io::Error),
}

impl Display for BoardError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        match self {
            BoardError::Level(e) => e.fmt(f),
            BoardError::Numeral(e) => e.fmt(f),
            BoardError::Inconsistent {
                level,
                register_value,
                source,
            } => write!(
                f,
                "configuration inconsistency: level {level} needs register value {register_value}: {source}"
            ),
            BoardError::Output(e) => write!(f, "failed to update the display: {e}"),
        }
    }
}

impl Error for BoardError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            BoardError::Level(e) => Some(e),
            BoardError::Numeral(e) => Some(e),
            BoardError::Inconsistent { source, .. } => Some(source),
            BoardError::Output(e) => Some(e),
        }
    }
}

impl From<LevelError> for BoardError {
    fn from(e: LevelError) -> BoardError {
        BoardError::Level(e)
    }
}

impl From<NumeralError> for BoardError {
    fn from(e: NumeralError) -> BoardError {
        BoardError::Numeral(e)
    }
}

impl From<io::Error> for BoardError {
    fn from(e: io::Error) -> BoardError {
        BoardError::Output(e)
    }
}

/// Encodes `selection.register_value` with `codec`, treating a value
/// the codec rejects as a configuration inconsistency.
fn encode_selection(
    codec: &mut NumeralCodec,
    selection: &Selection,
) -> Result<BitPattern, BoardError> {
    // Register values which are not exactly representable as f64 are
    // far outside any register's bounds, so the codec rejects them.
    codec
        .encode(selection.register_value as f64)
        .map_err(|e| match e {
            NumeralError::OutOfRange { .. } => BoardError::Inconsistent {
                level: selection.level,
                register_value: selection.register_value,
                source: e,
            },
            other => BoardError::Numeral(other),
        })
}

/// Shows values over a wide range using a binary value register `S`
/// and a gain indicator `L`.
#[derive(Debug)]
pub struct MultiScaleBoard<S: BitSink, L: LevelIndicator> {
    codec: NumeralCodec,
    selector: LevelSelector,
    value_board: S,
    level_board: L,
    last_value: Option<f64>,
}

impl<S: BitSink, L: LevelIndicator> MultiScaleBoard<S, L> {
    /// Creates a board whose register is driven through `codec`.  The
    /// segments are checked against the register's current bounds.
    pub fn new(
        codec: NumeralCodec,
        segments: Vec<Segment>,
        value_board: S,
        level_board: L,
    ) -> Result<MultiScaleBoard<S, L>, BoardError> {
        let selector = LevelSelector::new(segments, RegisterBounds::from(codec.layout()))?;
        Ok(MultiScaleBoard {
            codec,
            selector,
            value_board,
            level_board,
            last_value: None,
        })
    }

    pub fn codec(&self) -> &NumeralCodec {
        &self.codec
    }

    pub fn selector(&self) -> &LevelSelector {
        &self.selector
    }

    pub fn value_board(&self) -> &S {
        &self.value_board
    }

    pub fn level_board(&self) -> &L {
        &self.level_board
    }

    #[must_use]
    pub fn level(&self) -> Option<usize> {
        self.selector.current_level()
    }

    /// The value most recently passed to a successful
    /// [`show`](Self::show).
    #[must_use]
    pub fn last_value(&self) -> Option<f64> {
        self.last_value
    }

    /// The value the board currently represents, which is
    /// [`last_value`](Self::last_value) rounded down to a multiple of
    /// the current level's scale.
    #[must_use]
    pub fn value(&self) -> Option<f64> {
        let segment = self.selector.segments().get(self.level()?)?;
        Some(segment.value_of(self.codec.displayed_value()?))
    }

    fn update_outputs(&mut self, bits: &BitPattern, level: usize) -> Result<(), BoardError> {
        self.value_board.show_bits(bits)?;
        self.level_board
            .show_level(level, self.selector.level_count())?;
        Ok(())
    }

    /// Shows `value`.  If the value cannot be shown, the board's state
    /// and its outputs are left unchanged.
    pub fn show(&mut self, value: f64) -> Result<Selection, BoardError> {
        let selection = self
            .selector
            .choose(self.selector.current_level(), value)?;
        let mut codec = self.codec.clone();
        let bits = encode_selection(&mut codec, &selection)?;
        event!(
            Level::TRACE,
            "showing {value} at level {} as {bits}",
            selection.level
        );
        self.codec = codec;
        self.selector.commit(&selection);
        self.last_value = Some(value);
        self.update_outputs(&bits, selection.level)?;
        Ok(selection)
    }

    /// Changes the representation used by the value register.  The
    /// segments are re-checked against the register's new bounds and
    /// the current value (if any) is shown again.  On failure nothing
    /// changes.
    pub fn set_mode(&mut self, mode: Representation) -> Result<(), BoardError> {
        let mut codec = NumeralCodec::new(self.codec.width(), mode)?;
        let mut selector = self
            .selector
            .with_register_bounds(RegisterBounds::from(codec.layout()))?;
        let shown = match self.last_value {
            Some(value) => {
                let selection = selector.choose(selector.current_level(), value)?;
                let bits = encode_selection(&mut codec, &selection)?;
                selector.commit(&selection);
                Some((bits, selection.level))
            }
            None => None,
        };
        event!(
            Level::INFO,
            "value register representation changes from {} to {}",
            self.codec.mode(),
            mode
        );
        self.codec = codec;
        self.selector = selector;
        match shown {
            Some((bits, level)) => self.update_outputs(&bits, level),
            None => Ok(()),
        }
    }
}
