use crate::{AxisSpec, Extent, Region, RoiError, RoiSpec};
use core::{fmt::Display, num::NonZeroUsize};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
/// A resolved half open range `[start, stop)` along one axis
///
/// A span whose stop is at or before its start is empty. Reversed spans are a valid, compact way
/// of writing an empty span and are never rejected. The step is carried along untouched by the
/// algebra
pub struct Span {
    start: usize,
    stop: usize,
    step: NonZeroUsize,
}

impl Span {
    pub const fn new(start: usize, stop: usize) -> Self {
        Self {
            start,
            stop,
            step: NonZeroUsize::MIN,
        }
    }

    pub const fn with_step(self, step: NonZeroUsize) -> Self {
        Self { step, ..self }
    }

    pub const fn start(&self) -> usize {
        self.start
    }

    pub const fn stop(&self) -> usize {
        self.stop
    }

    pub const fn step(&self) -> NonZeroUsize {
        self.step
    }

    /// Number of indices covered, reversed spans count as zero
    pub const fn len(&self) -> usize {
        self.stop.saturating_sub(self.start)
    }

    pub const fn is_empty(&self) -> bool {
        self.stop <= self.start
    }

    /// Same step, new bounds
    pub(crate) const fn rebound(self, start: usize, stop: usize) -> Self {
        Self {
            start,
            stop,
            step: self.step,
        }
    }

    pub(crate) fn check_length(self, axis: usize, length: Option<usize>) -> Result<Self, RoiError> {
        match length {
            Some(length) if self.stop > length => Err(RoiError::StopOutOfBounds {
                axis,
                stop: self.stop,
                length,
            }),
            _ => Ok(self),
        }
    }
}

impl Display for Span {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        if self.step == NonZeroUsize::MIN {
            write!(f, "{}:{}", self.start, self.stop)
        } else {
            write!(f, "{}:{}:{}", self.start, self.stop, self.step)
        }
    }
}

impl Region for Span {
    type Shape = usize;
    type Center = f64;

    fn spans(&self) -> &[Span] {
        core::slice::from_ref(self)
    }

    fn map_spans(&self, mut f: impl FnMut(usize, Span) -> Span) -> Self {
        f(0, *self)
    }

    fn shape(&self) -> usize {
        self.len()
    }

    fn center(&self) -> f64 {
        (self.start as f64 + self.stop as f64) / 2.0
    }
}

impl AxisSpec {
    /// Resolve into a [Span], `length` being the size of the axis if it is known
    pub fn to_span(&self, length: Option<usize>) -> Result<Span, RoiError> {
        self.resolve_axis(0, length)
    }

    pub(crate) fn resolve_axis(&self, axis: usize, length: Option<usize>) -> Result<Span, RoiError> {
        let span = match *self {
            Self::Index(index) => {
                let start = resolve_bound(axis, index, length)?;
                Span::new(start, start + 1)
            }
            Self::Range { start, stop, step } => {
                let step = match step {
                    None => NonZeroUsize::MIN,
                    Some(step) => usize::try_from(step)
                        .ok()
                        .and_then(NonZeroUsize::new)
                        .ok_or(RoiError::InvalidStep { axis, step })?,
                };
                let start = match start {
                    Some(start) => resolve_bound(axis, start, length)?,
                    None => 0,
                };
                let stop = match stop {
                    Some(stop) => resolve_bound(axis, stop, length)?,
                    None => length.ok_or(RoiError::OpenStop { axis })?,
                };

                Span::new(start, stop).with_step(step)
            }
        };

        span.check_length(axis, length)
    }
}

/// Negative values count back from `length`
fn resolve_bound(axis: usize, value: isize, length: Option<usize>) -> Result<usize, RoiError> {
    if let Ok(value) = usize::try_from(value) {
        return Ok(value);
    }

    let length = length.ok_or(RoiError::UnresolvedNegative { axis, value })?;

    length
        .checked_sub(value.unsigned_abs())
        .ok_or(RoiError::NegativeBound { axis, value })
}

impl RoiSpec for AxisSpec {
    type Resolved = Span;

    fn resolve(&self, shape: Option<&Extent>) -> Result<Span, RoiError> {
        self.resolve_axis(0, shape.and_then(|shape| shape.axis(0)))
            .inspect_err(|err| tracing::trace!("Rejected axis specifier {:?}: {}", self, err))
    }
}

impl RoiSpec for Span {
    type Resolved = Span;

    fn resolve(&self, shape: Option<&Extent>) -> Result<Span, RoiError> {
        self.check_length(0, shape.and_then(|shape| shape.axis(0)))
    }
}
