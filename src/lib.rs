use clap::Parser as _;
use cli::{Cli, Cmd, Overrides};
use eyre::WrapErr;
use pwa_icons_core::config::Config;
use std::path::Path;

pub mod cli;
pub mod commands;

fn setup_logger(verbose: bool) -> eyre::Result<()> {
    use std::io::IsTerminal;
    use tracing::Level;
    use tracing_subscriber::{
        filter::LevelFilter, fmt::layer, layer::SubscriberExt, util::SubscriberInitExt, Registry,
    };

    let level = if verbose { Level::DEBUG } else { Level::INFO };
    Registry::default()
        .with(LevelFilter::from(level))
        .with(
            layer()
                .with_ansi(std::io::stderr().is_terminal())
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .try_init()?;
    Ok(())
}

impl Overrides {
    pub fn apply(self, mut config: Config) -> Config {
        if let Some(logo) = self.logo {
            config.logo = logo;
        }
        if let Some(output_dir) = self.output_dir {
            config.output_dir = output_dir;
        }
        if let Some(background) = self.background {
            config.background = background;
        }
        if let Some(sizes) = self.sizes {
            config.sizes = sizes;
        }
        if let Some(on_error) = self.on_error {
            config.on_error = on_error.into();
        }
        config
    }
}

pub fn load_config(config_file: Option<&Path>, overrides: Overrides) -> eyre::Result<Config> {
    let config = match config_file {
        Some(path) => Config::parse_file(path)?,
        None => Config::parse_file_or_default(Path::new(cli::DEFAULT_CONFIG_FILE))?,
    };
    let config = overrides.apply(config);
    config.validate()?;
    tracing::debug!("active configuration: {:?}", config);
    Ok(config)
}

pub fn main() -> eyre::Result<()> {
    color_eyre::install()?;
    let Cli {
        config_file,
        overrides,
        verbose,
        subcommand,
    } = Cli::parse();
    setup_logger(verbose)?;

    match subcommand.unwrap_or_default() {
        Cmd::Generate => {
            let config = load_config(config_file.as_deref(), overrides)
                .wrap_err("failed to load configuration")?;
            commands::generate::run(&config)
        }
        Cmd::Config => {
            let config = load_config(config_file.as_deref(), overrides)
                .wrap_err("failed to load configuration")?;
            commands::config(&config)
        }
        Cmd::Version => commands::version(),
    }
}
