use std::fs;
use std::path::Path;

use epi_core::{EpiError, ErrorInfo};

use crate::report::EpistasisReport;

/// Pretty-printed JSON for a report.
pub fn report_to_json(report: &EpistasisReport) -> Result<String, EpiError> {
    serde_json::to_string_pretty(report)
        .map_err(|err| EpiError::Serde(ErrorInfo::new("report-serialize", err.to_string())))
}

/// Parses a report, rejecting columns of unequal length.
pub fn report_from_json(json: &str) -> Result<EpistasisReport, EpiError> {
    let report: EpistasisReport = serde_json::from_str(json)
        .map_err(|err| EpiError::Serde(ErrorInfo::new("report-deserialize", err.to_string())))?;
    let tags = report.tags.len();
    if report.results.len() != tags || report.errors.len() != tags {
        return Err(EpiError::Shape(
            ErrorInfo::new("report-columns", "report columns differ in length")
                .with_context("results", report.results.len().to_string())
                .with_context("errors", report.errors.len().to_string())
                .with_context("tags", tags.to_string()),
        ));
    }
    Ok(report)
}

/// Writes `report` to `path` as JSON.
pub fn save_report(path: &Path, report: &EpistasisReport) -> Result<(), EpiError> {
    let json = report_to_json(report)?;
    fs::write(path, json).map_err(|err| file_error("report-write", path, err))
}

/// Reads a report written by [`save_report`].
pub fn load_report(path: &Path) -> Result<EpistasisReport, EpiError> {
    let json = fs::read_to_string(path).map_err(|err| file_error("report-read", path, err))?;
    report_from_json(&json)
}

fn file_error(code: &str, path: &Path, err: std::io::Error) -> EpiError {
    EpiError::Serde(
        ErrorInfo::new(code, err.to_string()).with_context("path", path.display().to_string()),
    )
}
