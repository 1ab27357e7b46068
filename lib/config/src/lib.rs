use ron::ser::PrettyConfig;
use serde::{Deserialize, Serialize};
use serde_inline_default::serde_inline_default;
use std::{
    io::{Read, Write},
    path::PathBuf,
    sync::LazyLock,
};
use strum::{Display, EnumIter, EnumString};

#[cfg(any(target_family = "unix", target_os = "windows"))]
pub static STORAGE_DIRECTORY: LazyLock<PathBuf> =
    LazyLock::new(|| dirs::config_dir().unwrap_or_default().join("geowin"));

#[cfg(not(any(target_family = "unix", target_os = "windows")))]
pub static STORAGE_DIRECTORY: LazyLock<PathBuf> = LazyLock::new(|| PathBuf::from("geowin"));

/// Config location
pub static SETTINGS_LOCATION: LazyLock<PathBuf> =
    LazyLock::new(|| STORAGE_DIRECTORY.join("config.ron"));

#[derive(
    Serialize,
    Deserialize,
    Debug,
    Clone,
    Copy,
    EnumIter,
    EnumString,
    Display,
    PartialEq,
    Eq,
    Default,
)]
#[strum(serialize_all = "lowercase")]
/// How the command line tool prints regions and grids
pub enum OutputFormat {
    #[default]
    /// `[2:4, 3:4]` style
    Text,
    Ron,
}

#[serde_inline_default]
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
/// Defaults for anything not given on the command line
pub struct Settings {
    #[serde_inline_default(vec![512, 512])]
    /// Tile shape used when none is given, a single entry applies to every axis
    pub tile_shape: Vec<usize>,
    #[serde(default)]
    /// Padding added on every side of a region
    pub padding: usize,
    #[serde_inline_default(2)]
    /// Downsampling factor between overview levels
    pub overview_factor: usize,
    #[serde(default)]
    pub output_format: OutputFormat,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tile_shape: vec![512, 512],
            padding: 0,
            overview_factor: 2,
            output_format: OutputFormat::default(),
        }
    }
}

impl Settings {
    pub fn save(&self, writer: impl Write) -> Result<(), ron::Error> {
        ron::Options::default().to_io_writer_pretty(
            writer,
            self,
            PrettyConfig::new().struct_names(false),
        )
    }

    pub fn load(reader: impl Read) -> Result<Self, ron::Error> {
        Ok(ron::de::from_reader(reader)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn missing_fields_take_defaults() {
        assert_eq!(Settings::load("()".as_bytes()).unwrap(), Settings::default());

        let settings = Settings::load("(padding: 4, output_format: Ron)".as_bytes()).unwrap();
        assert_eq!(settings.padding, 4);
        assert_eq!(settings.output_format, OutputFormat::Ron);
        assert_eq!(settings.tile_shape, vec![512, 512]);
        assert_eq!(settings.overview_factor, 2);
    }

    #[test]
    fn save_then_load() {
        let settings = Settings {
            tile_shape: vec![256],
            padding: 3,
            overview_factor: 4,
            output_format: OutputFormat::Ron,
        };

        let mut buffer = Vec::new();
        settings.save(&mut buffer).unwrap();

        assert_eq!(Settings::load(buffer.as_slice()).unwrap(), settings);
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(Settings::load("(padding: \"wide\")".as_bytes()).is_err());
    }

    #[test]
    fn output_format_names() {
        for format in OutputFormat::iter() {
            assert_eq!(format.to_string().parse::<OutputFormat>(), Ok(format));
        }

        assert_eq!("ron".parse::<OutputFormat>(), Ok(OutputFormat::Ron));
        assert!("yaml".parse::<OutputFormat>().is_err());
    }
}
