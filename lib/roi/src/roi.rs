use crate::{AxisSpec, Extent, Region, RoiError, RoiSpec, Span};
use core::fmt::Display;
use itertools::Itertools;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
/// A resolved region with one [Span] per array axis, in axis order
pub struct Roi(Vec<Span>);

impl Roi {
    pub fn new(spans: impl IntoIterator<Item = Span>) -> Self {
        Self(spans.into_iter().collect())
    }

    /// The degenerate `0:0` region over `ndim` axes
    pub fn empty(ndim: usize) -> Self {
        Self(vec![Span::new(0, 0); ndim])
    }

    pub fn ndim(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> core::slice::Iter<'_, Span> {
        self.0.iter()
    }
}

impl FromIterator<Span> for Roi {
    fn from_iter<T: IntoIterator<Item = Span>>(iter: T) -> Self {
        Self::new(iter)
    }
}

impl From<Vec<Span>> for Roi {
    fn from(spans: Vec<Span>) -> Self {
        Self(spans)
    }
}

impl<'a> IntoIterator for &'a Roi {
    type Item = &'a Span;
    type IntoIter = core::slice::Iter<'a, Span>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Display for Roi {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "[{}]", self.0.iter().join(", "))
    }
}

impl Region for Roi {
    type Shape = Vec<usize>;
    type Center = Vec<f64>;

    fn spans(&self) -> &[Span] {
        &self.0
    }

    fn map_spans(&self, mut f: impl FnMut(usize, Span) -> Span) -> Self {
        self.0
            .iter()
            .enumerate()
            .map(|(axis, span)| f(axis, *span))
            .collect()
    }

    fn shape(&self) -> Vec<usize> {
        self.0.iter().map(Span::len).collect()
    }

    fn center(&self) -> Vec<f64> {
        self.0.iter().map(Region::center).collect()
    }
}

impl RoiSpec for [AxisSpec] {
    type Resolved = Roi;

    fn resolve(&self, shape: Option<&Extent>) -> Result<Roi, RoiError> {
        if let Some(shape) = shape {
            shape.check_axes(self.len())?;
        }

        self.iter()
            .enumerate()
            .map(|(axis, specifier)| {
                specifier.resolve_axis(axis, shape.and_then(|shape| shape.axis(axis)))
                    .inspect_err(|err| tracing::trace!("Rejected region {:?}: {}", self, err))
            })
            .collect()
    }
}

impl<const N: usize> RoiSpec for [AxisSpec; N] {
    type Resolved = Roi;

    fn resolve(&self, shape: Option<&Extent>) -> Result<Roi, RoiError> {
        self.as_slice().resolve(shape)
    }
}

impl RoiSpec for Vec<AxisSpec> {
    type Resolved = Roi;

    fn resolve(&self, shape: Option<&Extent>) -> Result<Roi, RoiError> {
        self.as_slice().resolve(shape)
    }
}

impl RoiSpec for Roi {
    type Resolved = Roi;

    fn resolve(&self, shape: Option<&Extent>) -> Result<Roi, RoiError> {
        if let Some(shape) = shape {
            shape.check_axes(self.ndim())?;
        }

        self.iter()
            .enumerate()
            .map(|(axis, span)| span.check_length(axis, shape.and_then(|shape| shape.axis(axis))))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roi;

    #[test]
    fn sequences_resolve_per_axis() {
        let shape = Extent::from([10, 20, 100]);

        assert_eq!(
            roi![-2..-1, .., 3..4].resolve(Some(&shape)),
            Ok(Roi::new([Span::new(8, 9), Span::new(0, 20), Span::new(3, 4)]))
        );
    }

    #[test]
    fn scalar_shape_broadcasts() {
        assert_eq!(
            roi![..-1].resolve(Some(&Extent::from(3))),
            Ok(Roi::new([Span::new(0, 2)]))
        );
        assert_eq!(
            roi![.., 1..].resolve(Some(&Extent::from(5))),
            Ok(Roi::new([Span::new(0, 5), Span::new(1, 5)]))
        );
    }

    #[test]
    fn failures_name_the_axis() {
        assert_eq!(
            roi![0..2, 5..].resolve(None),
            Err(RoiError::OpenStop { axis: 1 })
        );
        assert_eq!(
            roi![0..2, 0..30].resolve(Some(&Extent::from([10, 20]))),
            Err(RoiError::StopOutOfBounds {
                axis: 1,
                stop: 30,
                length: 20
            })
        );
    }

    #[test]
    fn shape_must_match_axis_count() {
        assert_eq!(
            roi![0..2, 0..3].resolve(Some(&Extent::from([10]))),
            Err(RoiError::AxisCountMismatch {
                expected: 2,
                actual: 1
            })
        );
    }

    #[test]
    fn arrays_and_resolved_regions() {
        let specifiers = [AxisSpec::from(1..3), AxisSpec::Index(4)];
        let resolved = specifiers.resolve(None).unwrap();

        assert_eq!(resolved, Roi::new([Span::new(1, 3), Span::new(4, 5)]));
        assert_eq!(resolved.resolve(Some(&Extent::from([3, 5]))), Ok(resolved.clone()));
        assert!(resolved.resolve(Some(&Extent::from([3, 4]))).is_err());
    }

    #[test]
    fn display() {
        let roi = Roi::new([Span::new(2, 4), Span::new(3, 4)]);

        assert_eq!(roi.to_string(), "[2:4, 3:4]");
        assert_eq!(Roi::empty(2).to_string(), "[0:0, 0:0]");
    }
}
