use crate::{Extent, Region, Roi, RoiError, Span};
use itertools::Itertools;
use num::Integer;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
/// Partition of an array into equally sized tiles, the last tile along each axis being clipped to
/// the array
pub struct TileGrid {
    base: Vec<usize>,
    tile: Vec<usize>,
    shape: Vec<usize>,
}

impl TileGrid {
    /// Split an array of shape `base` into tiles of shape `tile`
    ///
    /// A scalar `tile` is used for every axis
    pub fn new(base: impl Into<Vec<usize>>, tile: impl Into<Extent>) -> Result<Self, RoiError> {
        let base = base.into();
        let tile = tile.into();

        tile.check_axes(base.len())?;

        let tile: Vec<usize> = (0..base.len())
            .map(|axis| tile.axis(axis).unwrap_or_default())
            .collect();

        if let Some(axis) = tile.iter().position(|size| *size == 0) {
            return Err(RoiError::ZeroTile { axis });
        }

        let shape: Vec<usize> = base
            .iter()
            .zip(&tile)
            .map(|(base, tile)| Integer::div_ceil(base, tile))
            .collect();

        tracing::debug!(
            "Partitioned shape {:?} into a {:?} grid of {:?} tiles",
            base,
            shape,
            tile
        );

        Ok(Self { base, tile, shape })
    }

    /// Shape of the array being tiled
    pub fn base(&self) -> &[usize] {
        &self.base
    }

    /// Nominal tile shape
    pub fn tile(&self) -> &[usize] {
        &self.tile
    }

    /// Number of tiles along each axis
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Region of the array covered by the tile at grid coordinate `index`
    pub fn get(&self, index: &[usize]) -> Result<Roi, RoiError> {
        self.check_index(index)?;

        Ok(self.tile_roi(index))
    }

    /// Actual shape of the tile at `index`, smaller than [Self::tile] along the last row or column
    pub fn tile_shape(&self, index: &[usize]) -> Result<Vec<usize>, RoiError> {
        Ok(self.get(index)?.shape())
    }

    /// Per axis list of tile sizes, the way chunked array libraries describe a layout
    pub fn chunks(&self) -> Vec<Vec<usize>> {
        self.base
            .iter()
            .zip(&self.tile)
            .zip(&self.shape)
            .map(|((base, tile), count)| {
                (0..*count)
                    .map(|i| (base - i * tile).min(*tile))
                    .collect()
            })
            .collect()
    }

    /// Every tile with its grid coordinate, in row major order
    pub fn tiles(&self) -> impl Iterator<Item = (Vec<usize>, Roi)> + '_ {
        self.shape
            .iter()
            .map(|count| 0..*count)
            .multi_cartesian_product()
            .map(|index| {
                let roi = self.tile_roi(&index);
                (index, roi)
            })
    }

    /// Grid coordinate of the tile containing `pixel`
    pub fn locate(&self, pixel: &[usize]) -> Result<Vec<usize>, RoiError> {
        if pixel.len() != self.base.len()
            || pixel.iter().zip(&self.base).any(|(pixel, base)| pixel >= base)
        {
            return Err(RoiError::PixelOutOfRange {
                pixel: pixel.to_vec(),
                base: self.base.clone(),
            });
        }

        Ok(pixel
            .iter()
            .zip(&self.tile)
            .map(|(pixel, tile)| pixel / tile)
            .collect())
    }

    /// Region in grid coordinates of every tile that overlaps `roi`
    ///
    /// An empty `roi` covers no tiles
    pub fn covering<R: Region>(&self, roi: &R) -> Result<R, RoiError> {
        let ndim = roi.spans().len();

        if ndim != self.base.len() {
            return Err(RoiError::AxisCountMismatch {
                expected: self.base.len(),
                actual: ndim,
            });
        }

        Ok(roi.map_spans(|axis, span| {
            let (tile, count) = (self.tile[axis], self.shape[axis]);
            let start = Integer::div_floor(&span.start(), &tile).min(count);

            if span.is_empty() {
                return span.rebound(start, start);
            }

            span.rebound(start, Integer::div_ceil(&span.stop(), &tile).min(count))
        }))
    }

    fn check_index(&self, index: &[usize]) -> Result<(), RoiError> {
        if index.len() != self.shape.len()
            || index.iter().zip(&self.shape).any(|(index, count)| index >= count)
        {
            return Err(RoiError::TileOutOfRange {
                index: index.to_vec(),
                grid: self.shape.clone(),
            });
        }

        Ok(())
    }

    fn tile_roi(&self, index: &[usize]) -> Roi {
        index
            .iter()
            .zip(&self.tile)
            .zip(&self.base)
            .map(|((index, tile), base)| Span::new(index * tile, ((index + 1) * tile).min(*base)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roi2(rows: (usize, usize), cols: (usize, usize)) -> Roi {
        Roi::new([Span::new(rows.0, rows.1), Span::new(cols.0, cols.1)])
    }

    fn grid() -> TileGrid {
        TileGrid::new([10, 20], [3, 7]).unwrap()
    }

    #[test]
    fn basic_layout() {
        let grid = grid();

        assert_eq!(grid.shape(), &[4, 3]);
        assert_eq!(grid.base(), &[10, 20]);
        assert_eq!(grid.tile(), &[3, 7]);
        assert_eq!(grid.tile_shape(&[0, 0]), Ok(vec![3, 7]));
        assert_eq!(grid.tile_shape(&[3, 2]), Ok(vec![1, 6]));
    }

    #[test]
    fn lookup() {
        let grid = grid();

        assert_eq!(grid.get(&[0, 0]), Ok(roi2((0, 3), (0, 7))));
        assert_eq!(grid.get(&[3, 2]), Ok(roi2((9, 10), (14, 20))));
        assert_eq!(grid.get(&[1, 1]), Ok(roi2((3, 6), (7, 14))));
    }

    #[test]
    fn out_of_range() {
        let grid = grid();

        assert_eq!(
            grid.get(&[4, 0]),
            Err(RoiError::TileOutOfRange {
                index: vec![4, 0],
                grid: vec![4, 3]
            })
        );
        assert!(grid.get(&[0, 3]).is_err());
        assert!(grid.get(&[0]).is_err());
        assert!(grid.tile_shape(&[0, 0, 0]).is_err());
    }

    #[test]
    fn invalid_tiles() {
        assert_eq!(
            TileGrid::new([10, 20], [3, 0]),
            Err(RoiError::ZeroTile { axis: 1 })
        );
        assert!(TileGrid::new([10, 20], [3]).is_err());
    }

    #[test]
    fn scalar_tile() {
        let grid = TileGrid::new([10, 20], 8).unwrap();

        assert_eq!(grid.shape(), &[2, 3]);
        assert_eq!(grid.get(&[1, 2]), Ok(roi2((8, 10), (16, 20))));
    }

    #[test]
    fn chunks() {
        assert_eq!(grid().chunks(), vec![vec![3, 3, 3, 1], vec![7, 7, 6]]);
        assert_eq!(
            TileGrid::new([9], 3).unwrap().chunks(),
            vec![vec![3, 3, 3]]
        );
    }

    #[test]
    fn tiles_cover_the_base_once() {
        let grid = grid();
        let tiles: Vec<_> = grid.tiles().collect();

        assert_eq!(tiles.len(), 12);
        assert_eq!(tiles[0], (vec![0, 0], roi2((0, 3), (0, 7))));
        assert_eq!(tiles[1].0, vec![0, 1]);
        assert_eq!(tiles[11], (vec![3, 2], roi2((9, 10), (14, 20))));

        let area: usize = tiles
            .iter()
            .map(|(_, roi)| roi.shape().iter().product::<usize>())
            .sum();
        assert_eq!(area, 10 * 20);
    }

    #[test]
    fn empty_base_has_no_tiles() {
        let grid = TileGrid::new([0, 20], [3, 7]).unwrap();

        assert_eq!(grid.shape(), &[0, 3]);
        assert_eq!(grid.tiles().count(), 0);
    }

    #[test]
    fn locate() {
        let grid = grid();

        assert_eq!(grid.locate(&[0, 0]), Ok(vec![0, 0]));
        assert_eq!(grid.locate(&[9, 19]), Ok(vec![3, 2]));
        assert_eq!(grid.locate(&[5, 7]), Ok(vec![1, 1]));
        assert!(grid.locate(&[10, 0]).is_err());
        assert!(grid.locate(&[1]).is_err());
    }

    #[test]
    fn located_tiles_contain_the_pixel() {
        let grid = grid();

        for pixel in [[0, 0], [2, 6], [3, 7], [9, 19], [6, 13]] {
            let roi = grid.get(&grid.locate(&pixel).unwrap()).unwrap();

            for (span, pixel) in roi.iter().zip(pixel) {
                assert!(span.start() <= pixel && pixel < span.stop());
            }
        }
    }

    #[test]
    fn covering() {
        let grid = grid();

        assert_eq!(grid.covering(&roi2((0, 10), (0, 20))), Ok(roi2((0, 4), (0, 3))));
        assert_eq!(grid.covering(&roi2((2, 4), (7, 8))), Ok(roi2((0, 2), (1, 2))));
        assert_eq!(grid.covering(&roi2((4, 4), (7, 8))), Ok(roi2((1, 1), (1, 2))));
        assert!(grid.covering(&Span::new(0, 3)).is_err());
    }
}
