use crate::error::{Error, Result};
use std::fs::File;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Builds the log filter from a directive string
pub fn filter(directive: &str) -> Result<EnvFilter> {
    EnvFilter::try_new(directive).map_err(|err| Error::LogFilter {
        filter: directive.to_string(),
        reason: err.to_string(),
    })
}

/// Installs the global subscriber.
///
/// The terminal owns stdout and stderr while the widget runs, so logs only go
/// to a file. Without a file no subscriber is installed and every event is
/// dropped.
pub fn init(log_file: Option<&Path>, directive: &str) -> Result<bool> {
    let filter = filter(directive)?;
    let Some(path) = log_file else {
        return Ok(false);
    };

    let file = File::create(path)?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .map_err(|err| Error::Logging(err.to_string()))?;
    Ok(true)
}
