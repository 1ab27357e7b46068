use crate::RoiError;
use core::ops::{Range, RangeFrom, RangeFull, RangeTo};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
/// An unresolved index specifier for one axis
///
/// Negative values count back from the end of the axis and a missing stop means "to the end",
/// so both need the axis length before they can become a [crate::Span]
pub enum AxisSpec {
    /// A single element, selected as a span of length one
    Index(isize),
    Range {
        start: Option<isize>,
        stop: Option<isize>,
        step: Option<isize>,
    },
}

impl AxisSpec {
    /// The whole axis
    pub const FULL: Self = Self::Range {
        start: None,
        stop: None,
        step: None,
    };

    pub const fn new(start: Option<isize>, stop: Option<isize>) -> Self {
        Self::Range {
            start,
            stop,
            step: None,
        }
    }

    /// Attach a step to a range, scalar indices carry no step and are returned as is
    pub const fn with_step(self, step: isize) -> Self {
        match self {
            Self::Index(_) => self,
            Self::Range { start, stop, .. } => Self::Range {
                start,
                stop,
                step: Some(step),
            },
        }
    }
}

impl From<isize> for AxisSpec {
    fn from(index: isize) -> Self {
        Self::Index(index)
    }
}

impl From<Range<isize>> for AxisSpec {
    fn from(range: Range<isize>) -> Self {
        Self::new(Some(range.start), Some(range.end))
    }
}

impl From<RangeTo<isize>> for AxisSpec {
    fn from(range: RangeTo<isize>) -> Self {
        Self::new(None, Some(range.end))
    }
}

impl From<RangeFrom<isize>> for AxisSpec {
    fn from(range: RangeFrom<isize>) -> Self {
        Self::new(Some(range.start), None)
    }
}

impl From<RangeFull> for AxisSpec {
    fn from(_: RangeFull) -> Self {
        Self::FULL
    }
}

impl FromStr for AxisSpec {
    type Err = RoiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let error = || RoiError::Parse(s.to_string());
        let bound = |part: &str| -> Result<Option<isize>, RoiError> {
            let part = part.trim();

            if part.is_empty() {
                return Ok(None);
            }

            part.parse().map(Some).map_err(|_| error())
        };

        let parts: Vec<&str> = s.split(':').collect();

        match parts.as_slice() {
            [index] => index.trim().parse().map(Self::Index).map_err(|_| error()),
            [start, stop] => Ok(Self::new(bound(start)?, bound(stop)?)),
            [start, stop, step] => Ok(Self::Range {
                start: bound(start)?,
                stop: bound(stop)?,
                step: bound(step)?,
            }),
            _ => Err(error()),
        }
    }
}

/// Parse a comma separated list of axis specifiers such as `"[2:4, :-1]"`
///
/// The surrounding brackets are optional
pub fn parse_roi(s: &str) -> Result<Vec<AxisSpec>, RoiError> {
    let s = s.trim();
    let s = s
        .strip_prefix('[')
        .and_then(|s| s.strip_suffix(']'))
        .unwrap_or(s);

    s.split(',')
        .filter(|axis| !axis.trim().is_empty())
        .map(str::parse)
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
/// Axis lengths, either one value broadcast to every axis or one value per axis
pub enum Extent {
    Scalar(usize),
    PerAxis(Vec<usize>),
}

impl Extent {
    /// Length of `axis`, if this extent covers it
    pub fn axis(&self, axis: usize) -> Option<usize> {
        match self {
            Self::Scalar(length) => Some(*length),
            Self::PerAxis(lengths) => lengths.get(axis).copied(),
        }
    }

    /// Scalars cover any number of axes, per axis extents must match exactly
    pub(crate) fn check_axes(&self, ndim: usize) -> Result<(), RoiError> {
        match self {
            Self::PerAxis(lengths) if lengths.len() != ndim => Err(RoiError::AxisCountMismatch {
                expected: ndim,
                actual: lengths.len(),
            }),
            _ => Ok(()),
        }
    }
}

impl From<usize> for Extent {
    fn from(length: usize) -> Self {
        Self::Scalar(length)
    }
}

impl From<Vec<usize>> for Extent {
    fn from(lengths: Vec<usize>) -> Self {
        Self::PerAxis(lengths)
    }
}

impl From<&[usize]> for Extent {
    fn from(lengths: &[usize]) -> Self {
        Self::PerAxis(lengths.to_vec())
    }
}

impl<const N: usize> From<[usize; N]> for Extent {
    fn from(lengths: [usize; N]) -> Self {
        Self::PerAxis(lengths.to_vec())
    }
}

impl From<&Extent> for Extent {
    fn from(extent: &Extent) -> Self {
        extent.clone()
    }
}
