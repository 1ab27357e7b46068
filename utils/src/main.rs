use crate::{region::RoiAction, tiles::TileAction};
use clap::{Parser, Subcommand};
use geowin_config::{OutputFormat, SETTINGS_LOCATION, STORAGE_DIRECTORY, Settings};
use geowin_roi::{Extent, RoiError};
use ron::ser::PrettyConfig;
use serde::Serialize;
use std::{
    fmt::Display,
    fs::{File, create_dir_all},
    ops::Deref,
    process::ExitCode,
};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

mod region;
mod tiles;

#[derive(Clone, Debug, Parser)]
#[clap(version, about)]
pub struct Cli {
    #[clap(long)]
    /// Output format, overriding the config file
    format: Option<OutputFormat>,
    #[clap(subcommand)]
    action: Action,
}

#[derive(Clone, Debug, Subcommand)]
pub enum Action {
    #[clap(flatten)]
    Roi(RoiAction),
    #[clap(flatten)]
    Tiles(TileAction),
    /// Write the current settings to the config file
    WriteConfig,
}

#[derive(Debug, thiserror::Error)]
pub enum UtilsError {
    #[error(transparent)]
    Roi(#[from] RoiError),
    #[error(transparent)]
    Ron(#[from] ron::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .init();

    let args = Cli::parse();
    let settings = load_settings();
    let format = args.format.unwrap_or(settings.output_format);

    let result = match args.action {
        Action::Roi(action) => region::run(action, &settings, format),
        Action::Tiles(action) => tiles::run(action, &settings, format),
        Action::WriteConfig => write_settings(&settings),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            tracing::error!("{}", error);
            ExitCode::FAILURE
        }
    }
}

fn load_settings() -> Settings {
    let Ok(file) = File::open(SETTINGS_LOCATION.deref()) else {
        tracing::info!(
            "No config found at {}, using defaults",
            SETTINGS_LOCATION.display()
        );
        return Settings::default();
    };

    Settings::load(file).unwrap_or_else(|error| {
        tracing::warn!(
            "Config at {} is invalid, using defaults: {}",
            SETTINGS_LOCATION.display(),
            error
        );
        Settings::default()
    })
}

fn write_settings(settings: &Settings) -> Result<(), UtilsError> {
    create_dir_all(STORAGE_DIRECTORY.deref())?;
    settings.save(File::create(SETTINGS_LOCATION.deref())?)?;

    tracing::info!("Wrote config to {}", SETTINGS_LOCATION.display());

    Ok(())
}

/// Lengths from the command line, a single value applies to every axis
pub fn extent(lengths: &[usize]) -> Extent {
    match lengths {
        [length] => Extent::Scalar(*length),
        lengths => Extent::from(lengths),
    }
}

/// Print `value` as `text` or as RON
pub fn emit(
    value: &impl Serialize,
    text: impl Display,
    format: OutputFormat,
) -> Result<(), UtilsError> {
    match format {
        OutputFormat::Text => println!("{}", text),
        OutputFormat::Ron => println!(
            "{}",
            ron::ser::to_string_pretty(value, PrettyConfig::new().struct_names(false))?
        ),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn negative_regions_are_not_flags() {
        let cli =
            Cli::try_parse_from(["geowin-utils", "normalize", "-2:-1, :", "--shape", "10,20"])
                .unwrap();

        assert!(matches!(
            cli.action,
            Action::Roi(RoiAction::Normalize { ref roi, ref shape })
                if roi == "-2:-1, :" && shape == &[10, 20]
        ));
    }

    #[test]
    fn format_override() {
        let cli = Cli::try_parse_from(["geowin-utils", "--format", "ron", "shape", "2:4,3:4"])
            .unwrap();

        assert_eq!(cli.format, Some(OutputFormat::Ron));
        assert!(Cli::try_parse_from(["geowin-utils", "--format", "xml", "shape", "2:4"]).is_err());
    }

    #[test]
    fn lengths() {
        assert_eq!(extent(&[7]), Extent::Scalar(7));
        assert_eq!(extent(&[7, 8]), Extent::PerAxis(vec![7, 8]));
    }
}
