use eyre::WrapErr;
use pwa_icons_core::{
    config::Config,
    generate::{self, Event},
};
use std::{
    io::{IsTerminal, Write as _},
    time::Duration,
};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

fn write_color(text: &str, fg_color: Color) -> std::io::Result<()> {
    let choice = if std::io::stdout().is_terminal() {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    };
    let mut stdout = StandardStream::stdout(choice);
    stdout.set_color(ColorSpec::new().set_fg(Some(fg_color)))?;
    let result = stdout.write_all(text.as_bytes());
    stdout.reset().ok();
    result
}

fn error_chain(error: &(dyn std::error::Error + 'static)) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

fn print_event(event: Event<'_>) -> std::io::Result<()> {
    match event {
        Event::Generated(icon) => {
            write_color("✓", Color::Green)?;
            println!(
                " {} - {}",
                icon.path.display(),
                humansize::format_size(icon.bytes, humansize::DECIMAL)
            );
        }
        Event::Failed(failed) => {
            write_color("✗", Color::Red)?;
            println!(
                " {} ({}x{}): {}",
                failed.path.display(),
                failed.size,
                failed.size,
                error_chain(&failed.error)
            );
        }
    }
    Ok(())
}

fn sizes_list(config: &Config) -> String {
    config
        .sizes
        .iter()
        .map(|size| size.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn run(config: &Config) -> eyre::Result<()> {
    println!("Generating {} icons", config.sizes.len());
    println!("Logo: {}", config.logo.display());
    println!("Background: {}", config.background);
    println!("Sizes: {}", sizes_list(config));
    println!();

    let report = generate::run(config, |event| {
        if let Err(err) = print_event(event) {
            tracing::warn!("failed to print progress: {}", err);
        }
    })
    .wrap_err_with(|| format!("failed to generate icons in {}", config.output_dir.display()))?;

    let elapsed = Duration::from_millis(
        report
            .elapsed
            .as_millis()
            .try_into()
            .unwrap_or(u64::MAX),
    );
    println!();
    if report.is_success() {
        write_color("✓", Color::Green)?;
        println!(
            " generated {} icons in {}",
            report.generated.len(),
            humantime::format_duration(elapsed)
        );
        println!("Location: {}", config.output_dir.display());
        Ok(())
    } else {
        write_color("✗", Color::Red)?;
        println!(
            " generated {} of {} icons in {}",
            report.generated.len(),
            config.sizes.len(),
            humantime::format_duration(elapsed)
        );
        if !report.skipped.is_empty() {
            tracing::warn!(
                "skipped {} sizes after the first failure",
                report.skipped.len()
            );
        }
        Err(eyre::eyre!(
            "{} of {} icon sizes failed",
            report.failed.len() + report.skipped.len(),
            config.sizes.len()
        ))
    }
}
