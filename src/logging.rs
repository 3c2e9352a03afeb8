//! Logging setup.
//!
//! Installs a global tracing subscriber that writes to a per-launch log file.
//! Nothing goes to stdout: the TUI owns the terminal. Files are timestamped
//! and kept to a bounded count.

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use std::time::SystemTime;

use chrono::{DateTime, Local, TimeZone};
use tracing_appender::{non_blocking::WorkerGuard, rolling};
use tracing_subscriber::{EnvFilter, Registry, fmt, prelude::*};

use crate::error::AppError;

/// Maximum number of log files to retain.
const MAX_LOG_FILES: usize = 10;
const LOG_FILE_PREFIX: &str = "autodash";
const DEFAULT_LOG_DIR: &str = "logs";
/// Environment override for the log directory.
pub const LOG_DIR_ENV: &str = "AUTODASH_LOG_DIR";

static LOG_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

/// Initialize file logging. Subsequent calls are no-ops.
///
/// Failures are returned so callers can degrade gracefully without aborting
/// startup. Returns the log file path.
pub fn init() -> Result<PathBuf, AppError> {
    let log_dir = log_directory();
    let log_file_name = format_log_file_name(Local::now());
    let log_path = log_dir.join(&log_file_name);
    if LOG_GUARD.get().is_some() {
        return Ok(log_path);
    }

    fs::create_dir_all(&log_dir).map_err(|e| {
        AppError::runtime(format!("Failed to prepare log directory {}: {e}", log_dir.display()))
    })?;
    ensure_file_exists(&log_path)?;

    let file_appender = rolling::never(&log_dir, &log_file_name);
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);
    prune_old_logs(&log_dir, MAX_LOG_FILES)?;

    let file_layer = fmt::layer().with_ansi(false).with_writer(file_writer);
    let subscriber = Registry::default().with(build_env_filter()).with(file_layer);
    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| AppError::runtime(format!("Failed to install tracing subscriber: {e}")))?;
    let _ = LOG_GUARD.set(guard);

    tracing::info!("Logging initialized; log file at {}", log_path.display());
    Ok(log_path)
}

fn log_directory() -> PathBuf {
    match std::env::var(LOG_DIR_ENV) {
        Ok(dir) if !dir.trim().is_empty() => PathBuf::from(dir.trim()),
        _ => PathBuf::from(DEFAULT_LOG_DIR),
    }
}

fn ensure_file_exists(path: &Path) -> Result<(), AppError> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map(|_| ())
        .map_err(|e| {
            AppError::runtime(format!("Failed to create log file at {}: {e}", path.display()))
        })
}

fn prune_old_logs(dir: &Path, max_files: usize) -> Result<(), AppError> {
    let mut entries = fs::read_dir(dir)
        .map_err(|e| {
            AppError::runtime(format!("Failed to read log directory {}: {e}", dir.display()))
        })?
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().map(|ft| ft.is_file()).unwrap_or(false))
        .filter(|entry| entry.path().extension().and_then(|ext| ext.to_str()) == Some("log"))
        .map(|entry| {
            let modified = entry
                .metadata()
                .and_then(|meta| meta.modified())
                .unwrap_or(SystemTime::UNIX_EPOCH);
            (modified, entry.path())
        })
        .collect::<Vec<_>>();

    entries.sort_by_key(|(modified, _)| *modified);
    let excess = entries.len().saturating_sub(max_files);
    for (_, path) in entries.iter().take(excess) {
        fs::remove_file(path).map_err(|e| {
            AppError::runtime(format!("Failed to remove old log file {}: {e}", path.display()))
        })?;
    }
    Ok(())
}

fn format_log_file_name<Tz: TimeZone>(now: DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!("{LOG_FILE_PREFIX}_{}.log", now.format("%Y-%m-%d_%H-%M-%S"))
}

fn build_env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}
