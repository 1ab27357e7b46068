use crate::{Region, Roi, RoiError, Span};
use nalgebra::{Matrix2x5, Point2};
use num::ToPrimitive;

/// `[floor(lo), ceil(hi))` clipped to `[0, length]`
fn clipped_span(lo: f64, hi: f64, length: usize) -> Span {
    let limit = length as f64;
    let start = num::clamp(lo.floor(), 0.0, limit);
    let stop = num::clamp(hi.ceil(), 0.0, limit);

    Span::new(
        start.to_usize().unwrap_or_default(),
        stop.to_usize().unwrap_or_default(),
    )
}

/// Bounding region, in row/column order, of points given as `(x, y)` = `(column, row)`
///
/// Points with a non finite coordinate are ignored. When none are left the result is the
/// degenerate `0:0` region over every axis of `shape`
pub fn roi_from_points(points: &[Point2<f64>], shape: &[usize]) -> Result<Roi, RoiError> {
    let mut finite = points
        .iter()
        .filter(|point| point.x.is_finite() && point.y.is_finite())
        .peekable();

    let Some(first) = finite.peek().copied() else {
        return Ok(Roi::empty(shape.len()));
    };

    let [rows, columns] = shape else {
        return Err(RoiError::AxisCountMismatch {
            expected: 2,
            actual: shape.len(),
        });
    };

    let (min, max) = finite.fold((*first, *first), |(min, max), point| {
        (min.inf(point), max.sup(point))
    });

    Ok(Roi::new([
        clipped_span(min.y, max.y, *rows),
        clipped_span(min.x, max.x, *columns),
    ]))
}

/// Corners of a two axis region as `(x, y)` points, clockwise from the origin corner
///
/// Feeding them back through [roi_from_points] gives the same region
pub fn roi_boundary<R: Region>(roi: &R) -> Result<[Point2<f64>; 4], RoiError> {
    let [rows, columns] = roi.spans() else {
        return Err(RoiError::AxisCountMismatch {
            expected: 2,
            actual: roi.spans().len(),
        });
    };

    let (x0, x1) = (columns.start() as f64, columns.stop() as f64);
    let (y0, y1) = (rows.start() as f64, rows.stop() as f64);

    Ok([
        Point2::new(x0, y0),
        Point2::new(x1, y0),
        Point2::new(x1, y1),
        Point2::new(x0, y1),
    ])
}

/// Closed rectangular path over the extents `xs` and `ys`, which default to `xs`
///
/// Row 0 holds the x coordinates and row 1 the y coordinates, the first corner is repeated at the
/// end
pub fn polygon_path(xs: [f64; 2], ys: Option<[f64; 2]>) -> Matrix2x5<f64> {
    let [x0, x1] = xs;
    let [y0, y1] = ys.unwrap_or(xs);

    Matrix2x5::new(x0, x1, x1, x0, x0, y0, y0, y1, y1, y0)
}
