//! Log setup. The terminal belongs to the UI, so logs only ever go to a file.

use std::fs::OpenOptions;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::config::LoggingSettings;
use crate::error::Result;

/// Install the global subscriber when a log file is configured.
///
/// `RUST_LOG` takes precedence over `logging.level`. Returns whether a
/// subscriber was installed.
pub fn init(settings: &LoggingSettings) -> Result<bool> {
    let Some(path) = settings.file.as_ref() else {
        return Ok(false);
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .is_ok();

    tracing::info!(path = %path.display(), "logging started");
    Ok(installed)
}
