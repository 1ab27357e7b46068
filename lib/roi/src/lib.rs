//! Region of interest algebra for windowed and tiled access to N-dimensional arrays

mod algebra;
mod error;
mod geometry;
mod roi;
mod scale;
mod span;
mod specifier;
mod tiles;
mod window;

pub use algebra::*;
pub use error::RoiError;
pub use geometry::*;
pub use roi::Roi;
pub use scale::*;
pub use span::Span;
pub use specifier::{AxisSpec, Extent, parse_roi};
pub use tiles::TileGrid;
pub use window::{Window, to_window};

/// A resolved region, either a bare [Span] or a [Roi] holding one span per axis
///
/// Operations that hand back a region of the same arity return the same kind they were given,
/// so a single axis stays a [Span] and a sequence of one axis stays a [Roi]
pub trait Region: Clone + core::fmt::Debug {
    /// Per axis lengths, a bare count for [Span]
    type Shape: Clone + PartialEq + core::fmt::Debug;
    /// Per axis midpoints, a bare value for [Span]
    type Center;

    fn spans(&self) -> &[Span];

    /// Rebuild the region one axis at a time, keeping its wrapping
    fn map_spans(&self, f: impl FnMut(usize, Span) -> Span) -> Self;

    fn shape(&self) -> Self::Shape;

    fn center(&self) -> Self::Center;

    /// A region is empty if any of its axes is
    fn is_empty(&self) -> bool {
        self.spans().iter().any(Span::is_empty)
    }
}

/// Anything that resolves into a [Region] once the axis lengths are (optionally) known
pub trait RoiSpec {
    type Resolved: Region;

    /// Resolve open ends, negative indices and scalar indices
    ///
    /// Without a shape only specifiers that are already bounded and non negative resolve
    fn resolve(&self, shape: Option<&Extent>) -> Result<Self::Resolved, RoiError>;
}

/// Intersection between regions
///
/// The output is a [Roi] whenever either side is one
pub trait RangeIntersection<Rhs: ?Sized = Self> {
    type Output: Region;

    fn intersection(&self, rhs: &Rhs) -> Self::Output;

    fn intersects(&self, rhs: &Rhs) -> bool {
        !self.intersection(rhs).is_empty()
    }

    fn disjoint(&self, rhs: &Rhs) -> bool {
        !self.intersects(rhs)
    }
}

/// Build a sequence of [AxisSpec] from ranges and indices
///
/// `roi![2..4, 3]` is the region `[2:4, 3:4]` and `roi![-2..-1, ..]` needs a shape to resolve
#[macro_export]
macro_rules! roi {
    ($($axis:expr),* $(,)?) => {
        ::std::vec![$($crate::AxisSpec::from($axis)),*]
    };
}
