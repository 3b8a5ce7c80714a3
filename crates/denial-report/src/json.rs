//! JSON output of a denial report.

use std::fs;
use std::path::Path;

use tracing::info;

use denial_model::DenialReport;

use crate::error::{ReportError, Result};

/// Pretty-printed JSON for one report.
pub fn report_json(report: &DenialReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

/// Writes the report as JSON, creating parent directories as needed.
pub fn write_report_json(path: &Path, report: &DenialReport) -> Result<()> {
    let write_err = |source| ReportError::Write {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(write_err)?;
    }
    let json = report_json(report)?;
    fs::write(path, json).map_err(write_err)?;
    info!(path = %path.display(), "report written");
    Ok(())
}
