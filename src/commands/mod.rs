use pwa_icons_core::config::Config;

pub mod generate;

pub fn config(config: &Config) -> eyre::Result<()> {
    if let Some(source) = &config.source {
        println!("# loaded from {}", source.display());
    }
    print!("{}", toml::to_string_pretty(config)?);
    Ok(())
}

pub fn version() -> eyre::Result<()> {
    println!("pwa-icons: {}", pwa_icons_core::VERSION);
    Ok(())
}
