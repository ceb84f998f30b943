//! tracing 初始化
//!
//! Text or JSON lines, to stdout or a (daily rotated) file. `RUST_LOG`
//! overrides `logging.level` when set.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{self, RollingFileAppender};
use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;

type BoxedWriter = Box<dyn Write + Send + Sync>;

/// Install the global subscriber. Call once, after the config is loaded.
///
/// Keep the returned guard alive until exit, otherwise buffered lines are lost.
pub fn init_logging(config: &LoggingConfig) -> Result<WorkerGuard> {
    let log_file = config.file.as_deref().filter(|f| !f.is_empty());
    let writer = build_writer(config, log_file)?;

    let (writer, guard) = tracing_appender::non_blocking(writer);
    let builder = tracing_subscriber::fmt()
        .with_writer(writer)
        .with_env_filter(build_filter(&config.level))
        .with_target(false)
        .with_ansi(log_file.is_none());

    let installed = match config.format.as_str() {
        "json" => builder.json().try_init(),
        _ => builder.try_init(),
    };
    installed.map_err(|e| anyhow::anyhow!("Failed to install tracing subscriber: {}", e))?;

    Ok(guard)
}

fn build_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

fn build_writer(config: &LoggingConfig, log_file: Option<&str>) -> Result<BoxedWriter> {
    let Some(log_file) = log_file else {
        return Ok(Box::new(std::io::stdout()));
    };

    if config.enable_rotation {
        return Ok(Box::new(rolling_appender(log_file, config.max_backups)?));
    }

    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)
        .with_context(|| format!("Failed to open log file {}", log_file))?;
    Ok(Box::new(file))
}

/// `logs/waypoint.log` rotates into `logs/waypoint.<date>.log`.
fn rolling_appender(log_file: &str, max_backups: u32) -> Result<RollingFileAppender> {
    let path = Path::new(log_file);
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    let stem = path
        .file_stem()
        .and_then(|f| f.to_str())
        .unwrap_or("waypoint");

    rolling::Builder::new()
        .rotation(rolling::Rotation::DAILY)
        .filename_prefix(stem)
        .filename_suffix("log")
        .max_log_files(max_backups.max(1) as usize)
        .build(dir)
        .context("Failed to create rolling log appender")
}
