//! Export a rendered report view to JSON.
//!
//! The export is the chart data exactly as the handlers produced it, meant to
//! be easy to consume in notebooks or downstream scripts.

use std::fs::{File, create_dir_all};
use std::path::{Path, PathBuf};

use chrono::Local;
use tracing::info;

use crate::charts::ReportView;
use crate::error::AppError;

/// Write `view` as pretty-printed JSON.
pub fn write_report_json(path: &Path, view: &ReportView) -> Result<(), AppError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        create_dir_all(parent).map_err(|e| {
            AppError::input(format!("Failed to create export dir '{}': {e}", parent.display()))
        })?;
    }

    let file = File::create(path).map_err(|e| {
        AppError::input(format!("Failed to create export JSON '{}': {e}", path.display()))
    })?;

    serde_json::to_writer_pretty(file, view)
        .map_err(|e| AppError::input(format!("Failed to write export JSON: {e}")))?;

    info!(path = %path.display(), kind = view.kind.slug(), year = ?view.year, "exported report");
    Ok(())
}

/// Default export location used by the TUI: `exports/autodash_<kind>[_<year>]_<ts>.json`.
pub fn default_export_path(dir: &Path, view: &ReportView) -> PathBuf {
    let ts = Local::now().format("%Y%m%d_%H%M%S");
    let name = match view.year {
        Some(year) => format!("autodash_{}_{year}_{ts}.json", view.kind.slug()),
        None => format!("autodash_{}_{ts}.json", view.kind.slug()),
    };
    dir.join(name)
}
