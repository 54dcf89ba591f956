use crate::color::HexColor;
use serde::{Deserialize, Serialize};
use std::{
    num::NonZeroU32,
    path::{Path, PathBuf},
};

pub const DEFAULT_LOGO: &str = "logo.png";
pub const DEFAULT_OUTPUT_DIR: &str = "public/icons";
pub const DEFAULT_BACKGROUND: HexColor = HexColor::new(0x31, 0x65, 0x59);
pub const DEFAULT_SIZES: &[u32] = &[72, 96, 128, 144, 152, 192, 384, 512];

/// What a run does after one size fails.
#[derive(Debug, Default, PartialEq, Eq, Hash, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OnError {
    /// Keep generating the remaining sizes and report all failures at the end.
    #[default]
    Continue,
    /// Stop at the first failed size.
    Abort,
}

#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct Config {
    pub logo: PathBuf,
    pub output_dir: PathBuf,
    pub background: HexColor,
    pub sizes: Vec<NonZeroU32>,
    pub on_error: OnError,

    /// path of the configuration file, if the configuration was loaded from a file
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            logo: PathBuf::from(DEFAULT_LOGO),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            background: DEFAULT_BACKGROUND,
            sizes: DEFAULT_SIZES
                .iter()
                .filter_map(|&size| NonZeroU32::new(size))
                .collect(),
            on_error: OnError::default(),
            source: None,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigLoadError {
    #[error("invalid configuration string")]
    InvalidConfigString(#[source] toml::de::Error),
    #[error("invalid configuration file {}", .0.display())]
    InvalidConfigFile(PathBuf, #[source] toml::de::Error),
    #[error("i/o error reading configuration file {}", .0.display())]
    IoError(PathBuf, #[source] std::io::Error),
    #[error("no icon sizes configured")]
    NoSizes,
}

impl Config {
    pub fn parse(s: &str) -> Result<Config, ConfigLoadError> {
        let config: Config = toml::from_str(s).map_err(ConfigLoadError::InvalidConfigString)?;
        config.validate()?;
        Ok(config)
    }

    pub fn parse_file(p: &Path) -> Result<Config, ConfigLoadError> {
        let config_string =
            std::fs::read_to_string(p).map_err(|e| ConfigLoadError::IoError(p.to_owned(), e))?;
        let mut config: Config = toml::from_str(&config_string)
            .map_err(|e| ConfigLoadError::InvalidConfigFile(p.to_owned(), e))?;
        config.validate()?;
        config.source = Some(p.to_owned());
        Ok(config)
    }

    /// Loads the file if it exists and falls back to the defaults otherwise.
    pub fn parse_file_or_default(p: &Path) -> Result<Config, ConfigLoadError> {
        match std::fs::metadata(p) {
            Ok(_) => Config::parse_file(p),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("no configuration file at {}, using defaults", p.display());
                Ok(Config::default())
            }
            Err(e) => Err(ConfigLoadError::IoError(p.to_owned(), e)),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigLoadError> {
        if self.sizes.is_empty() {
            return Err(ConfigLoadError::NoSizes);
        }
        Ok(())
    }

    /// File name of the icon for one size, e.g. `icon-192x192.png`.
    pub fn icon_file_name(size: NonZeroU32) -> String {
        format!("icon-{size}x{size}.png")
    }

    pub fn icon_path(&self, size: NonZeroU32) -> PathBuf {
        self.output_dir.join(Config::icon_file_name(size))
    }
}
