use pwa_icons_core::{color::HexColor, config::OnError};
use std::{num::NonZeroU32, path::PathBuf};

pub const DEFAULT_CONFIG_FILE: &str = "pwa-icons.toml";

/// Generates web-app manifest icons from a single logo.
#[derive(clap::Parser)]
#[command(name = "pwa-icons", disable_version_flag = true)]
pub struct Cli {
    /// Sets a custom configuration file path [default: pwa-icons.toml if present]
    #[arg(short, long, env = "PWA_ICONS_CONFIG_FILE", global = true)]
    pub config_file: Option<PathBuf>,

    #[command(flatten)]
    pub overrides: Overrides,

    /// Prints debug output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub subcommand: Option<Cmd>,
}

#[derive(clap::Subcommand, Default)]
pub enum Cmd {
    /// Generates all configured icon sizes (the default)
    #[default]
    Generate,

    /// Prints the active configuration
    Config,

    /// Prints version information
    Version,
}

/// Settings that take precedence over the configuration file.
#[derive(clap::Args, Default)]
pub struct Overrides {
    /// Sets the source logo image
    #[arg(short, long, env = "PWA_ICONS_LOGO", global = true)]
    pub logo: Option<PathBuf>,

    /// Sets the directory the icons are written to
    #[arg(short, long, env = "PWA_ICONS_OUTPUT_DIR", global = true)]
    pub output_dir: Option<PathBuf>,

    /// Sets the background color, e.g. '#316559'
    #[arg(short, long, env = "PWA_ICONS_BACKGROUND", global = true)]
    pub background: Option<HexColor>,

    /// Sets the icon sizes as a comma-separated list, e.g. '72,96,192'
    #[arg(
        short,
        long,
        env = "PWA_ICONS_SIZES",
        value_delimiter = ',',
        global = true
    )]
    pub sizes: Option<Vec<NonZeroU32>>,

    /// Sets what happens after a size fails
    #[arg(long, env = "PWA_ICONS_ON_ERROR", value_enum, global = true)]
    pub on_error: Option<OnErrorArg>,
}

#[derive(clap::ValueEnum, Clone, Copy)]
pub enum OnErrorArg {
    /// Keep going and report all failures at the end
    Continue,
    /// Stop at the first failure
    Abort,
}

impl From<OnErrorArg> for OnError {
    fn from(arg: OnErrorArg) -> Self {
        match arg {
            OnErrorArg::Continue => OnError::Continue,
            OnErrorArg::Abort => OnError::Abort,
        }
    }
}
