use crate::{
    config::{Config, OnError},
    icon::{self, GenerateError},
};
use std::{
    num::NonZeroU32,
    path::PathBuf,
    time::{Duration, Instant},
};

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct GeneratedIcon {
    pub size: NonZeroU32,
    pub path: PathBuf,
    pub bytes: u64,
}

#[derive(Debug)]
pub struct FailedIcon {
    pub size: NonZeroU32,
    pub path: PathBuf,
    pub error: GenerateError,
}

/// Progress of a run, delivered as each size finishes.
#[derive(Debug)]
pub enum Event<'a> {
    Generated(&'a GeneratedIcon),
    Failed(&'a FailedIcon),
}

#[derive(Debug, Default)]
pub struct Report {
    pub generated: Vec<GeneratedIcon>,
    pub failed: Vec<FailedIcon>,
    /// sizes never attempted because the run was aborted
    pub skipped: Vec<NonZeroU32>,
    pub elapsed: Duration,
}

impl Report {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty() && self.skipped.is_empty()
    }
}

/// Generates one icon per configured size into the output directory.
///
/// Only a failure to create the output directory is returned as an error; failures of
/// individual sizes end up in the report, and whether the remaining sizes are still
/// attempted depends on [`Config::on_error`].
pub fn run(config: &Config, mut on_event: impl FnMut(Event<'_>)) -> Result<Report, GenerateError> {
    let started = Instant::now();
    std::fs::create_dir_all(&config.output_dir)
        .map_err(|e| GenerateError::CreateDir(config.output_dir.clone(), e))?;

    let mut report = Report::default();
    let mut sizes = config.sizes.iter().copied();
    for size in sizes.by_ref() {
        let path = config.icon_path(size);
        let _span = tracing::debug_span!("icon", size = size.get()).entered();
        match icon::generate_icon(&config.logo, size, &path, config.background) {
            Ok(bytes) => {
                tracing::debug!("wrote {} ({} bytes)", path.display(), bytes);
                let generated = GeneratedIcon { size, path, bytes };
                on_event(Event::Generated(&generated));
                report.generated.push(generated);
            }
            Err(error) => {
                let failed = FailedIcon { size, path, error };
                on_event(Event::Failed(&failed));
                report.failed.push(failed);
                if config.on_error == OnError::Abort {
                    tracing::warn!("aborting after failed size {}", size);
                    break;
                }
            }
        }
    }
    report.skipped = sizes.collect();
    report.elapsed = started.elapsed();
    Ok(report)
}
