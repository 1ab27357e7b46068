use crate::{Region, RoiError, RoiSpec};

/// `((row_start, row_stop), (col_start, col_stop))`, the window layout raster readers expect
pub type Window = ((usize, usize), (usize, usize));

/// Render a two axis region as a [Window], passing `None` through
pub fn to_window<S: RoiSpec + ?Sized>(roi: Option<&S>) -> Result<Option<Window>, RoiError> {
    let Some(roi) = roi else {
        return Ok(None);
    };

    let roi = roi.resolve(None)?;

    match roi.spans() {
        [rows, columns] => Ok(Some((
            (rows.start(), rows.stop()),
            (columns.start(), columns.stop()),
        ))),
        spans => Err(RoiError::AxisCountMismatch {
            expected: 2,
            actual: spans.len(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AxisSpec, Roi, Span, roi};

    #[test]
    fn none_passes_through() {
        assert_eq!(to_window::<Roi>(None), Ok(None));
    }

    #[test]
    fn two_axes() {
        assert_eq!(
            to_window(Some(&roi![..3, 4..5])),
            Ok(Some(((0, 3), (4, 5))))
        );
        assert_eq!(
            to_window(Some(&roi![0..3, ..5])),
            Ok(Some(((0, 3), (0, 5))))
        );
        assert_eq!(
            to_window(Some(&[AxisSpec::from(0..3), AxisSpec::from(..5)])),
            Ok(Some(((0, 3), (0, 5))))
        );
        assert_eq!(
            to_window(Some(&Roi::new([Span::new(1, 2), Span::new(3, 4)]))),
            Ok(Some(((1, 2), (3, 4))))
        );
    }

    #[test]
    fn other_arities_fail() {
        assert!(to_window(Some(&roi![..3])).is_err());
        assert!(to_window(Some(&roi![..3, ..4, ..5])).is_err());
        assert!(to_window(Some(&AxisSpec::Index(0))).is_err());
        assert!(to_window(Some(&Span::new(0, 3))).is_err());
    }

    #[test]
    fn open_ends_fail() {
        assert_eq!(
            to_window(Some(&roi![.., 0..4])),
            Err(RoiError::OpenStop { axis: 0 })
        );
    }
}
