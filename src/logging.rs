//! Diagnostic logging.
//!
//! The terminal belongs to the viewer, so logs go to a file through a
//! non-blocking writer. `RUST_LOG` takes precedence over the configured
//! level.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

/// Logging configuration from the command line.
#[derive(Debug, Clone)]
pub struct LogSettings {
    /// Level for this crate when `RUST_LOG` is not set
    pub level: String,
    /// Log file; a random name in the temp dir when `None`
    pub file: Option<PathBuf>,
}

/// A fresh log file path in the temp directory, e.g. `seqpair-1a2b3c4d.log`.
pub fn default_log_path() -> PathBuf {
    let suffix: u32 = rand::random();
    std::env::temp_dir().join(format!("seqpair-{suffix:08x}.log"))
}

/// Installs the global subscriber.
///
/// The returned guard flushes pending lines when dropped and must be kept
/// alive for the whole run.
pub fn init(settings: &LogSettings) -> Result<(WorkerGuard, PathBuf)> {
    let path = settings.file.clone().unwrap_or_else(default_log_path);
    let (dir, file_name) = split_log_path(&path)?;
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("Could not create log directory {}", dir.display()))?;

    let file_appender = tracing_appender::rolling::never(&dir, &file_name);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("seqpair={}", settings.level)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true),
        )
        .try_init()
        .context("Failed to install log subscriber")?;

    Ok((guard, path))
}

fn split_log_path(path: &Path) -> Result<(PathBuf, String)> {
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .with_context(|| format!("Invalid log file path: {}", path.display()))?
        .to_string();
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    Ok((dir, file_name))
}
