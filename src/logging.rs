//! File-backed `tracing` setup.
//!
//! The terminal belongs to the form while it runs, so log records go to a
//! file instead of stderr. `ADWIZ_LOG` takes an `EnvFilter` directive and
//! overrides the configured level.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use tracing::{Level, info};
use tracing_subscriber::{EnvFilter, Registry, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::app_dirs;

pub const LOG_ENV: &str = "ADWIZ_LOG";
pub const DEFAULT_LEVEL: &str = "info";
const DEFAULT_FILE_NAME: &str = "adwiz.log";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingOptions {
    pub level: String,
    /// Log file; defaults to `adwiz.log` in the data directory.
    pub file: Option<PathBuf>,
}

impl Default for LoggingOptions {
    fn default() -> Self {
        Self {
            level: DEFAULT_LEVEL.to_string(),
            file: None,
        }
    }
}

impl LoggingOptions {
    /// The file records are written to.
    pub fn resolve_file(&self) -> Result<PathBuf> {
        match &self.file {
            Some(file) => Ok(file.clone()),
            None => Ok(app_dirs::get_data_dir()?.join(DEFAULT_FILE_NAME)),
        }
    }
}

/// Install the global subscriber.
///
/// Returns `false` when a subscriber was already installed, in which case
/// nothing changes.
pub fn initialize(options: &LoggingOptions) -> Result<bool> {
    parse_log_level(&options.level)?;
    let path = options.resolve_file()?;
    let (dir, file_name) = split_log_path(&path)?;
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("failed to create log directory {}", dir.display()))?;

    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(&options.level))
        .with_context(|| format!("invalid log filter '{}'", options.level))?;
    let appender = tracing_appender::rolling::never(&dir, file_name);
    let file = fmt::layer()
        .with_writer(appender)
        .with_ansi(false)
        .with_target(true)
        .with_thread_names(true);

    if Registry::default().with(filter).with(file).try_init().is_err() {
        return Ok(false);
    }

    info!(path = %path.display(), level = %options.level, "logging initialized");
    Ok(true)
}

/// Parse a level name (`trace` through `error`, `warning` accepted).
pub fn parse_log_level(level: &str) -> Result<Level> {
    match level.trim().to_lowercase().as_str() {
        "trace" => Ok(Level::TRACE),
        "debug" => Ok(Level::DEBUG),
        "info" => Ok(Level::INFO),
        "warn" | "warning" => Ok(Level::WARN),
        "error" => Ok(Level::ERROR),
        _ => bail!("invalid log level '{level}'. Use trace, debug, info, warn, or error"),
    }
}

fn split_log_path(path: &Path) -> Result<(PathBuf, String)> {
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .with_context(|| format!("log path {} has no file name", path.display()))?
        .to_string();
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    Ok((dir, file_name))
}
