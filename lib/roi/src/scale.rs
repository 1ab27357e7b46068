use crate::{Extent, Region, RoiError};
use num::Integer;

fn check_factor(factor: usize) -> Result<(), RoiError> {
    if factor == 0 {
        return Err(RoiError::ZeroScale);
    }

    Ok(())
}

/// Shape of an array after shrinking it by `factor`, partial pixels count as whole
pub fn scaled_down_shape(shape: &[usize], factor: usize) -> Result<Vec<usize>, RoiError> {
    check_factor(factor)?;

    Ok(shape
        .iter()
        .map(|dim| Integer::div_ceil(dim, &factor))
        .collect())
}

/// Smallest region at `1/factor` resolution that contains `roi`
pub fn scaled_down_roi<R: Region>(roi: &R, factor: usize) -> Result<R, RoiError> {
    check_factor(factor)?;

    Ok(roi.map_spans(|_, span| {
        span.rebound(
            Integer::div_floor(&span.start(), &factor),
            Integer::div_ceil(&span.stop(), &factor),
        )
    }))
}

/// Map `roi` from `1/factor` resolution back to full resolution
///
/// When the full resolution `shape` is known the result is clipped to it, which matters for the
/// last row and column of a pyramid level. Bounds saturate at `usize::MAX` before clipping
pub fn scaled_up_roi<R: Region>(
    roi: &R,
    factor: usize,
    shape: Option<&Extent>,
) -> Result<R, RoiError> {
    check_factor(factor)?;

    if let Some(shape) = shape {
        shape.check_axes(roi.spans().len())?;
    }

    Ok(roi.map_spans(|axis, span| {
        let start = span.start().saturating_mul(factor);
        let stop = span.stop().saturating_mul(factor);

        match shape.and_then(|shape| shape.axis(axis)) {
            Some(length) => span.rebound(start.min(length), stop.min(length)),
            None => span.rebound(start, stop),
        }
    }))
}
