//! Selection of the gain level at which a value is displayed.
//!
//! A multi-scale board shows `value = offset + scale × register`,
//! where `register` is the number shown on the binary LEDs and the
//! pair `(offset, scale)` is chosen from a small table by the level
//! indicator.  For example, with a 6-bit unsigned register (which
//! shows 0..=63) the production board uses
//!
//! | level | offset | scale | values shown |
//! | ----- | ------ | ----- | ------------ |
//! | 0     |  200   |  10   | 200..840     |
//! | 1     |  800   |  20   | 800..2080    |
//! | 2     | 2000   |  50   | 2000..5200   |
//! | 3     | 5000   | 100   | 5000..11400  |
//!
//! Where the ranges of two levels overlap, the finer one is chosen,
//! except that the level already in use is kept while the value stays
//! inside its range.  Without that hysteresis a reading hovering around
//! 830 would make the level indicator flicker.
use std::error::Error;
use std::fmt::{self, Display, Formatter};

use conv::{ConvUtil, RoundToNegInf};
use tracing::{event, Level};

use base::prelude::Layout;


/// One affine mapping from register value to displayed value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub offset: f64,
    pub scale: f64,
}

impl Segment {
    #[must_use]
    pub const fn new(offset: f64, scale: f64) -> Segment {
        Segment { offset, scale }
    }

    /// The displayed value corresponding to a register value.
    #[must_use]
    pub fn value_of(&self, register: f64) -> f64 {
        self.offset + self.scale * register
    }

    fn bounds(&self, register: &RegisterBounds) -> Interval {
        Interval::spanning(
            self.value_of(register.lower as f64),
            self.value_of(register.upper as f64),
        )
    }
}

impl Display for Segment {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "{}:{}", self.offset, self.scale)
    }
}

/// The values `[lower, upper)` a display register can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegisterBounds {
    pub lower: i64,
    pub upper: i64,
}

impl From<&Layout> for RegisterBounds {
    fn from(layout: &Layout) -> RegisterBounds {
        RegisterBounds {
            lower: layout.lower_bound(),
            upper: layout.upper_bound(),
        }
    }
}

/// A half-open interval `[lower, upper)` of displayed values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    pub lower: f64,
    pub upper: f64,
}

impl Interval {
    fn spanning(a: f64, b: f64) -> Interval {
        if a <= b {
            Interval { lower: a, upper: b }
        } else {
            Interval { lower: b, upper: a }
        }
    }

    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        self.lower <= value && value < self.upper
    }
}

impl Display for Interval {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "[{}, {})", self.lower, self.upper)
    }
}

/// The outcome of choosing a level for a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub level: usize,
    pub register_value: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LevelError {
    /// A selector needs at least one segment.
    EmptySegments,
    /// The segment's offset or scale is not finite, or its scale is
    /// zero.
    DegenerateSegment { level: usize, segment: Segment },
    /// No segment covers the values in `gap`, although there are
    /// segments covering values on either side of it.
    NonContiguousRange { gap: Interval },
    NotNumeric(f64),
    ValueTooLow { value: f64, lower: f64 },
    ValueTooHigh { value: f64, upper: f64 },
    /// The register value for `value` does not fit in an `i64`.
    RegisterOverflow { level: usize, value: f64 },
}

impl Display for LevelError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        match self {
            LevelError::EmptySegments => f.write_str("at least one segment is needed"),
            LevelError::DegenerateSegment { level, segment } => {
                write!(f, "segment {segment} of level {level} is degenerate")
            }
            LevelError::NonContiguousRange { gap } => {
                write!(
                    f,
                    "the union of the ranges of all levels must be one interval, but no level covers {gap}"
                )
            }
            LevelError::NotNumeric(value) => {
                write!(f, "value {value} is not a real number")
            }
            LevelError::ValueTooLow { value, lower } => {
                write!(
                    f,
                    "value {value} is lower than the lowest value that can be displayed ({lower})"
                )
            }
            LevelError::ValueTooHigh { value, upper } => {
                write!(
                    f,
                    "value {value} is not lower than the upper bound of the values that can be displayed ({upper})"
                )
            }
            LevelError::RegisterOverflow { level, value } => {
                write!(f, "value {value} has no register value at level {level}")
            }
        }
    }
}

impl Error for LevelError {}

fn check_segments(segments: &[Segment]) -> Result<(), LevelError> {
    if segments.is_empty() {
        return Err(LevelError::EmptySegments);
    }
    match segments.iter().enumerate().find(|(_, segment)| {
        !segment.offset.is_finite() || !segment.scale.is_finite() || segment.scale == 0.0
    }) {
        Some((level, segment)) => Err(LevelError::DegenerateSegment {
            level,
            segment: *segment,
        }),
        None => Ok(()),
    }
}

/// Computes the single interval covered by `bounds`, or reports the
/// first gap.  `bounds` must not be empty.
fn union_of(bounds: &[Interval]) -> Result<Interval, LevelError> {
    let mut sorted: Vec<Interval> = bounds.to_vec();
    sorted.sort_by(|a, b| a.lower.total_cmp(&b.lower));
    let (first, rest) = match sorted.split_first() {
        Some(split) => split,
        None => {
            return Err(LevelError::EmptySegments);
        }
    };
    let mut union = *first;
    for interval in rest {
        if interval.lower <= union.upper {
            union.upper = union.upper.max(interval.upper);
        } else {
            return Err(LevelError::NonContiguousRange {
                gap: Interval {
                    lower: union.upper,
                    upper: interval.lower,
                },
            });
        }
    }
    Ok(union)
}

/// Chooses the level at which to display a value.
#[derive(Debug, Clone)]
pub struct LevelSelector {
    segments: Vec<Segment>,
    register: RegisterBounds,
    /// `bounds[i]` is the range of values level `i` can show.
    bounds: Vec<Interval>,
    union: Interval,
    current_level: Option<usize>,
}

impl LevelSelector {
    pub fn new(
        segments: Vec<Segment>,
        register: RegisterBounds,
    ) -> Result<LevelSelector, LevelError> {
        check_segments(&segments)?;
        let bounds: Vec<Interval> = segments
            .iter()
            .map(|segment| segment.bounds(&register))
            .collect();
        let union = union_of(&bounds)?;
        event!(
            Level::DEBUG,
            "level selector covers {union} with {} levels",
            segments.len()
        );
        Ok(LevelSelector {
            segments,
            register,
            bounds,
            union,
            current_level: None,
        })
    }

    /// The same segments applied to a register with different bounds.
    /// The current level is retained.
    pub fn with_register_bounds(
        &self,
        register: RegisterBounds,
    ) -> Result<LevelSelector, LevelError> {
        let mut selector = LevelSelector::new(self.segments.clone(), register)?;
        selector.current_level = self.current_level;
        Ok(selector)
    }

    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    #[must_use]
    pub fn level_count(&self) -> usize {
        self.segments.len()
    }

    #[must_use]
    pub fn register_bounds(&self) -> RegisterBounds {
        self.register
    }

    /// The range of values shown at `level`.
    #[must_use]
    pub fn segment_bounds(&self, level: usize) -> Option<Interval> {
        self.bounds.get(level).copied()
    }

    /// The range of values which can be shown at any level.
    #[must_use]
    pub fn bounds(&self) -> Interval {
        self.union
    }

    #[must_use]
    pub fn current_level(&self) -> Option<usize> {
        self.current_level
    }

    fn finest_level_containing(&self, value: f64) -> Option<usize> {
        let mut best: Option<usize> = None;
        for (level, bounds) in self.bounds.iter().enumerate() {
            if bounds.contains(value) {
                match best {
                    Some(b) if self.segments[b].scale <= self.segments[level].scale => (),
                    _ => {
                        best = Some(level);
                    }
                }
            }
        }
        best
    }

    /// Chooses the level for `value` given that `previous` is the
    /// level currently displayed.  This doesn't change the selector's
    /// own idea of the current level; see [`select`](Self::select).
    pub fn choose(&self, previous: Option<usize>, value: f64) -> Result<Selection, LevelError> {
        if value.is_nan() {
            return Err(LevelError::NotNumeric(value));
        }
        let retained = previous.filter(|level| {
            self.bounds
                .get(*level)
                .is_some_and(|bounds| bounds.contains(value))
        });
        let level = match retained.or_else(|| self.finest_level_containing(value)) {
            Some(level) => level,
            None if value < self.union.lower => {
                return Err(LevelError::ValueTooLow {
                    value,
                    lower: self.union.lower,
                });
            }
            None => {
                return Err(LevelError::ValueTooHigh {
                    value,
                    upper: self.union.upper,
                });
            }
        };
        let segment = &self.segments[level];
        let register_value: i64 = ((value - segment.offset) / segment.scale)
            .approx_as_by::<i64, RoundToNegInf>()
            .map_err(|_| LevelError::RegisterOverflow { level, value })?;
        Ok(Selection {
            level,
            register_value,
        })
    }

    /// Chooses the level for `value`, taking the current level into
    /// account, and makes the chosen level current.
    pub fn select(&mut self, value: f64) -> Result<Selection, LevelError> {
        let selection = self.choose(self.current_level, value)?;
        self.commit(&selection);
        Ok(selection)
    }

    pub(crate) fn commit(&mut self, selection: &Selection) {
        if self.current_level != Some(selection.level) {
            event!(
                Level::DEBUG,
                "level changes from {:?} to {}",
                self.current_level,
                selection.level
            );
        }
        self.current_level = Some(selection.level);
    }
}
