//! Export file handling
//!
//! Exports are the stored document prefixed with a UTF-8 byte-order mark so
//! spreadsheet applications pick the right encoding for the Chinese header.

use crate::types::SurveyError;
use chrono::{DateTime, Utc};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// UTF-8 byte-order mark
pub const BOM: char = '\u{feff}';

/// File name of an export taken at `now` (UTC)
///
/// `survey_responses_<YYYYMMDD>_<HHMMSS>.csv`
pub fn export_filename(now: DateTime<Utc>) -> String {
    now.format("survey_responses_%Y%m%d_%H%M%S.csv").to_string()
}

/// Prefix a CSV document with the byte-order mark
pub fn with_bom(csv: &str) -> String {
    let mut output = String::with_capacity(csv.len() + BOM.len_utf8());
    output.push(BOM);
    output.push_str(csv);
    output
}

/// Write an export file into `dir` and return its path
///
/// The directory must already exist.
pub fn write_export(dir: &Path, csv: &str, now: DateTime<Utc>) -> Result<PathBuf, SurveyError> {
    if !dir.is_dir() {
        return Err(SurveyError::file_not_found(dir));
    }

    let path = dir.join(export_filename(now));
    fs::write(&path, with_bom(csv)).map_err(|e| match e.kind() {
        ErrorKind::NotFound => SurveyError::file_not_found(&path),
        _ => SurveyError::from(e),
    })?;

    Ok(path)
}
