use crate::{UtilsError, emit, extent};
use clap::Subcommand;
use geowin_config::{OutputFormat, Settings};
use geowin_roi::TileGrid;
use itertools::Itertools;

#[derive(Clone, Debug, Subcommand)]
pub enum TileAction {
    /// List every tile of an array with its grid coordinate
    Tiles {
        #[clap(short, long, value_delimiter = ',', required = true)]
        base: Vec<usize>,
        #[clap(short, long, value_delimiter = ',')]
        /// Defaults to the configured tile shape
        tile: Vec<usize>,
    },
    /// Region covered by one tile
    Tile {
        #[clap(short, long, value_delimiter = ',', required = true)]
        base: Vec<usize>,
        #[clap(short, long, value_delimiter = ',')]
        tile: Vec<usize>,
        #[clap(short, long, value_delimiter = ',', required = true)]
        index: Vec<usize>,
    },
    /// Grid coordinate of the tile holding a pixel
    Locate {
        #[clap(short, long, value_delimiter = ',', required = true)]
        base: Vec<usize>,
        #[clap(short, long, value_delimiter = ',')]
        tile: Vec<usize>,
        #[clap(short, long, value_delimiter = ',', required = true)]
        pixel: Vec<usize>,
    },
}

fn grid(base: Vec<usize>, tile: &[usize], settings: &Settings) -> Result<TileGrid, UtilsError> {
    let tile = if tile.is_empty() {
        settings.tile_shape.as_slice()
    } else {
        tile
    };

    Ok(TileGrid::new(base, extent(tile))?)
}

pub fn run(action: TileAction, settings: &Settings, format: OutputFormat) -> Result<(), UtilsError> {
    match action {
        TileAction::Tiles { base, tile } => {
            let grid = grid(base, &tile, settings)?;
            let tiles: Vec<_> = grid.tiles().collect();

            tracing::info!("{} tiles in a {:?} grid", tiles.len(), grid.shape());

            let text = tiles
                .iter()
                .map(|(index, roi)| format!("({}) {}", index.iter().join(", "), roi))
                .join("\n");
            emit(&tiles, text, format)
        }
        TileAction::Tile { base, tile, index } => {
            let roi = grid(base, &tile, settings)?.get(&index)?;
            emit(&roi, &roi, format)
        }
        TileAction::Locate { base, tile, pixel } => {
            let index = grid(base, &tile, settings)?.locate(&pixel)?;
            emit(&index, format!("({})", index.iter().join(", ")), format)
        }
    }
}
