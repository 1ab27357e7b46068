use crate::{UtilsError, emit, extent};
use clap::Subcommand;
use geowin_config::{OutputFormat, Settings};
use geowin_roi::{
    AxisSpec, parse_roi, roi_normalize, roi_pad, roi_resolve, roi_shape, scaled_down_roi,
    scaled_up_roi, to_window,
};
use itertools::Itertools;

#[derive(Clone, Debug, Subcommand)]
pub enum RoiAction {
    /// Resolve open ends and negative indices against an array shape
    Normalize {
        #[clap(allow_hyphen_values = true)]
        roi: String,
        #[clap(short, long, value_delimiter = ',', required = true)]
        shape: Vec<usize>,
    },
    /// Per axis size of a bounded region
    Shape {
        #[clap(allow_hyphen_values = true)]
        roi: String,
    },
    /// Two axis region as ((row_start, row_stop), (col_start, col_stop))
    Window {
        #[clap(allow_hyphen_values = true)]
        roi: String,
    },
    /// Grow a region on every side, then clip it to an array shape
    Pad {
        #[clap(allow_hyphen_values = true)]
        roi: String,
        #[clap(short, long)]
        /// Defaults to the configured padding
        amount: Option<usize>,
        #[clap(short, long, value_delimiter = ',', required = true)]
        shape: Vec<usize>,
    },
    /// Smallest region of an overview level that contains a full resolution region
    ScaleDown {
        #[clap(allow_hyphen_values = true)]
        roi: String,
        #[clap(short, long)]
        /// Defaults to the configured overview factor
        factor: Option<usize>,
    },
    /// Full resolution region under an overview level region
    ScaleUp {
        #[clap(allow_hyphen_values = true)]
        roi: String,
        #[clap(short, long)]
        /// Defaults to the configured overview factor
        factor: Option<usize>,
        #[clap(short, long, value_delimiter = ',')]
        /// Full resolution shape to clip against
        shape: Vec<usize>,
    },
}

fn parse(roi: &str) -> Result<Vec<AxisSpec>, UtilsError> {
    let specifiers = parse_roi(roi)?;
    tracing::debug!("Parsed {:?} into {} axes", roi, specifiers.len());

    Ok(specifiers)
}

pub fn run(action: RoiAction, settings: &Settings, format: OutputFormat) -> Result<(), UtilsError> {
    match action {
        RoiAction::Normalize { roi, shape } => {
            let roi = roi_normalize(parse(&roi)?.as_slice(), extent(&shape))?;
            emit(&roi, &roi, format)
        }
        RoiAction::Shape { roi } => {
            let shape = roi_shape(parse(&roi)?.as_slice())?;
            emit(&shape, format!("({})", shape.iter().join(", ")), format)
        }
        RoiAction::Window { roi } => {
            let Some(window) = to_window(Some(parse(&roi)?.as_slice()))? else {
                return Ok(());
            };
            emit(&window, format!("{:?}", window), format)
        }
        RoiAction::Pad { roi, amount, shape } => {
            let amount = amount.unwrap_or(settings.padding);
            let roi = roi_pad(parse(&roi)?.as_slice(), amount, extent(&shape))?;
            emit(&roi, &roi, format)
        }
        RoiAction::ScaleDown { roi, factor } => {
            let roi = roi_resolve(parse(&roi)?.as_slice())?;
            let roi = scaled_down_roi(&roi, factor.unwrap_or(settings.overview_factor))?;
            emit(&roi, &roi, format)
        }
        RoiAction::ScaleUp { roi, factor, shape } => {
            let roi = roi_resolve(parse(&roi)?.as_slice())?;
            let shape = (!shape.is_empty()).then(|| extent(&shape));
            let roi = scaled_up_roi(
                &roi,
                factor.unwrap_or(settings.overview_factor),
                shape.as_ref(),
            )?;
            emit(&roi, &roi, format)
        }
    }
}
