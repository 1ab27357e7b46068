use crate::{Extent, RangeIntersection, Region, Roi, RoiError, RoiSpec, Span};

/// Resolve `roi` against an array of the given `shape`
///
/// Open ends and negative indices are filled in from the shape, nothing is clipped
pub fn roi_normalize<S: RoiSpec + ?Sized>(
    roi: &S,
    shape: impl Into<Extent>,
) -> Result<S::Resolved, RoiError> {
    roi.resolve(Some(&shape.into()))
}

/// Resolve `roi` without knowing the array shape, which only works for bounded, non negative specifiers
pub fn roi_resolve<S: RoiSpec + ?Sized>(roi: &S) -> Result<S::Resolved, RoiError> {
    roi.resolve(None)
}

pub fn roi_shape<S: RoiSpec + ?Sized>(
    roi: &S,
) -> Result<<S::Resolved as Region>::Shape, RoiError> {
    Ok(roi.resolve(None)?.shape())
}

pub fn roi_is_empty<S: RoiSpec + ?Sized>(roi: &S) -> Result<bool, RoiError> {
    Ok(roi.resolve(None)?.is_empty())
}

/// Does `roi` cover the whole of an array with this `shape`
///
/// Regions that do not fit into the shape are not full
pub fn roi_is_full<S: RoiSpec + ?Sized>(roi: &S, shape: impl Into<Extent>) -> bool {
    let shape = shape.into();

    roi.resolve(Some(&shape)).is_ok_and(|roi| {
        roi.spans()
            .iter()
            .enumerate()
            .all(|(axis, span)| span.start() == 0 && Some(span.stop()) == shape.axis(axis))
    })
}

pub fn roi_center<S: RoiSpec + ?Sized>(
    roi: &S,
) -> Result<<S::Resolved as Region>::Center, RoiError> {
    Ok(roi.resolve(None)?.center())
}

pub fn roi_intersect<A: RangeIntersection<B> + ?Sized, B: ?Sized>(a: &A, b: &B) -> A::Output {
    a.intersection(b)
}

/// Grow every axis of `roi` by `pad` on both sides, then clip to `shape`
///
/// Scalar indices count as unit spans. Only the outer edges are clipped, so a window that lies
/// entirely past the end of an axis comes out reversed (and therefore empty)
pub fn roi_pad<S: RoiSpec + ?Sized>(
    roi: &S,
    pad: impl Into<Extent>,
    shape: impl Into<Extent>,
) -> Result<S::Resolved, RoiError> {
    let pad = pad.into();
    let shape = shape.into();
    let roi = roi.resolve(None)?;
    let ndim = roi.spans().len();

    pad.check_axes(ndim)?;
    shape.check_axes(ndim)?;

    Ok(roi.map_spans(|axis, span| {
        let pad = pad.axis(axis).unwrap_or_default();
        let length = shape.axis(axis).unwrap_or_default();

        span.rebound(
            span.start().saturating_sub(pad),
            span.stop().saturating_add(pad).min(length),
        )
    }))
}

/// Disjoint spans collapse onto the edge of `a` nearest to `b`
fn intersect_spans(a: &Span, b: &Span) -> Span {
    let start = a.start().max(b.start());
    let stop = a.stop().min(b.stop());

    if stop < start {
        let anchor = start.min(a.stop());
        return a.rebound(anchor, anchor);
    }

    a.rebound(start, stop)
}

impl RangeIntersection for Span {
    type Output = Span;

    #[inline]
    fn intersection(&self, rhs: &Self) -> Span {
        intersect_spans(self, rhs)
    }
}

impl RangeIntersection for Roi {
    type Output = Roi;

    #[inline]
    fn intersection(&self, rhs: &Self) -> Roi {
        self.iter()
            .zip(rhs.iter())
            .map(|(a, b)| intersect_spans(a, b))
            .collect()
    }
}

/// A bare span only describes one axis, so only the first axis of the [Roi] takes part and any
/// further axes are dropped from the result
impl RangeIntersection<Roi> for Span {
    type Output = Roi;

    #[inline]
    fn intersection(&self, rhs: &Roi) -> Roi {
        rhs.iter().take(1).map(|b| intersect_spans(self, b)).collect()
    }
}

/// Only the first axis of the [Roi] takes part, any further axes are dropped from the result
impl RangeIntersection<Span> for Roi {
    type Output = Roi;

    #[inline]
    fn intersection(&self, rhs: &Span) -> Roi {
        self.iter().take(1).map(|a| intersect_spans(a, rhs)).collect()
    }
}
