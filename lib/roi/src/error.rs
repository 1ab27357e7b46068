#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
/// Every way a region can be invalid
pub enum RoiError {
    #[error("Axis {axis} has an open stop and no length to close it")]
    /// Open stops need the axis length
    OpenStop { axis: usize },
    #[error("Axis {axis} uses negative index {value} with no length to resolve it")]
    /// Negative indices count back from the axis length
    UnresolvedNegative { axis: usize, value: isize },
    #[error("Axis {axis} index {value} resolves before the start of the axis")]
    NegativeBound { axis: usize, value: isize },
    #[error("Axis {axis} stop {stop} is past the axis length {length}")]
    StopOutOfBounds {
        axis: usize,
        stop: usize,
        length: usize,
    },
    #[error("Axis {axis} step {step} is not positive")]
    InvalidStep { axis: usize, step: isize },
    #[error("Expected {expected} axes, got {actual}")]
    AxisCountMismatch { expected: usize, actual: usize },
    #[error("Scale factor must be positive")]
    ZeroScale,
    #[error("Axis {axis} has a zero tile size")]
    ZeroTile { axis: usize },
    #[error("Tile index {index:?} is outside the grid {grid:?}")]
    TileOutOfRange { index: Vec<usize>, grid: Vec<usize> },
    #[error("Pixel {pixel:?} is outside the base shape {base:?}")]
    PixelOutOfRange { pixel: Vec<usize>, base: Vec<usize> },
    #[error("Cannot parse axis specifier {0:?}")]
    /// Textual specifiers look like `3`, `2:4`, `:-1` or `10:100:3`
    Parse(String),
}
