//! File and console logging for the CLI
//!
//! - Human-readable console output on stderr, so stdout stays the response body
//! - Optional JSON formatted logs to a rolling file when a log directory is configured
//! - Size-based rotation (10MB per file) plus daily rotation

use anyhow::Result;
use rolling_file::{RollingConditionBasic, RollingFileAppender};
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Open `settee.log` under `log_dir`, rotated at 10MB or daily, whichever comes first.
///
/// Returns the error instead of creating anything when the directory is unusable.
pub fn open_log_file(log_dir: &Path) -> std::io::Result<RollingFileAppender<RollingConditionBasic>> {
    std::fs::create_dir_all(log_dir)?;
    RollingFileAppender::new(
        log_dir.join("settee.log"),
        RollingConditionBasic::new()
            .daily()
            .max_size(10 * 1024 * 1024),
        9,
    )
}

/// Initialize tracing, with file logging under `log_dir` when one is given.
///
/// A log directory that cannot be opened degrades to console-only logging.
/// The returned guard must be kept alive to ensure file logs are flushed.
pub fn init_telemetry(log_dir: Option<&str>, verbose: bool) -> Result<Option<WorkerGuard>> {
    let file = log_dir.map(|dir| (dir, open_log_file(Path::new(dir))));

    let (file_writer, guard, file_error) = match file {
        Some((_, Ok(appender))) => {
            let (writer, guard) = tracing_appender::non_blocking(appender);
            (Some(writer), Some(guard), None)
        }
        Some((dir, Err(e))) => (None, None, Some((dir, e))),
        None => (None, None, None),
    };

    let default_filter = if verbose {
        "settee_cli=debug,settee_rs=debug"
    } else {
        "settee_cli=info,settee_rs=info"
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let file_layer = file_writer.map(|writer| {
        fmt::layer()
            .json()
            .with_writer(writer)
            .with_current_span(true)
            .with_target(true)
            .with_thread_ids(true)
    });

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(console_layer)
        .try_init()?;

    if let Some((dir, e)) = file_error {
        tracing::warn!("Cannot log to {}, console only: {}", dir, e);
    }

    Ok(guard)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_log_file_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let log_dir = dir.path().join("logs");

        assert!(open_log_file(&log_dir).is_ok());
        assert!(log_dir.is_dir());
    }

    #[test]
    fn test_open_log_file_fails_under_a_regular_file() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let log_dir = file.path().join("logs");

        assert!(open_log_file(&log_dir).is_err());
        assert!(!log_dir.exists());
    }
}
