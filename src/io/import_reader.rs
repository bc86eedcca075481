//! Batch import reader with iterator interface
//!
//! Reads a CSV file laid out like an export (the five document columns,
//! header first) and yields one validated record per data row. A leading
//! byte-order mark is ignored, so export files can be imported back.
//!
//! # Iterator Interface
//!
//! ImportReader implements the Iterator trait, yielding
//! `Result<Record, SurveyError>` for each CSV row:
//!
//! ```no_run
//! use survey_store::io::import_reader::ImportReader;
//! use chrono::Utc;
//! use std::path::Path;
//!
//! let reader = ImportReader::new(Path::new("responses.csv"), Utc::now()).unwrap();
//! for result in reader {
//!     match result {
//!         Ok(record) => println!("Importing: {:?}", record),
//!         Err(e) => eprintln!("Skipped: {}", e),
//!     }
//! }
//! ```
//!
//! # Error Handling
//!
//! - Fatal errors (file not found, unreadable file) are returned from `new()`
//! - Malformed or invalid rows are yielded as `Err` with their line number
//!   and the iteration continues with the next row

use crate::core::validator;
use crate::io::export::BOM;
use crate::types::{Record, Submission, SurveyError};
use chrono::{DateTime, Utc};
use csv::{ReaderBuilder, StringRecordsIntoIter, Trim};
use serde::Deserialize;
use std::fs;
use std::io::{Cursor, ErrorKind};
use std::path::Path;

/// Raw import row
///
/// Column names match the document header. The timestamp may be left blank,
/// in which case the import time is used.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct CsvRow {
    #[serde(rename = "姓名")]
    pub name: String,
    #[serde(rename = "電話")]
    pub phone: String,
    #[serde(rename = "地區")]
    pub region: String,
    #[serde(rename = "工作性質")]
    pub occupation: String,
    #[serde(rename = "提交時間", default)]
    pub timestamp: Option<String>,
}

/// Convert an import row into a record
///
/// The row goes through the same validation as an interactive submission.
/// A blank timestamp is replaced by `imported_at`.
pub fn convert_csv_row(row: CsvRow, imported_at: DateTime<Utc>) -> Result<Record, SurveyError> {
    let submission = Submission::new(row.name, row.phone, row.region, row.occupation);
    validator::validate(&submission)?;

    let mut record = submission.into_record(imported_at);
    if let Some(timestamp) = row.timestamp.filter(|t| !t.trim().is_empty()) {
        record.timestamp = timestamp;
    }

    Ok(record)
}

/// Synchronous import reader
pub struct ImportReader {
    headers: csv::StringRecord,
    rows: StringRecordsIntoIter<Cursor<Vec<u8>>>,
    imported_at: DateTime<Utc>,
}

impl ImportReader {
    /// Open an import file
    ///
    /// The CSV reader is configured to trim whitespace from all fields and to
    /// accept rows with a missing trailing timestamp column.
    ///
    /// # Errors
    ///
    /// * `FileNotFound` if the path does not exist
    /// * `IoError` if the file cannot be read as UTF-8 text
    /// * `ParseError` if the header row is unreadable
    pub fn new(path: &Path, imported_at: DateTime<Utc>) -> Result<Self, SurveyError> {
        let text = fs::read_to_string(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => SurveyError::file_not_found(path),
            _ => SurveyError::from(e),
        })?;
        let text = text.strip_prefix(BOM).unwrap_or(&text).to_string();

        let mut reader = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .from_reader(Cursor::new(text.into_bytes()));
        let headers = reader.headers()?.clone();

        Ok(Self {
            headers,
            rows: reader.into_records(),
            imported_at,
        })
    }
}

impl Iterator for ImportReader {
    type Item = Result<Record, SurveyError>;

    fn next(&mut self) -> Option<Self::Item> {
        let result = self.rows.next()?;

        Some(result.map_err(SurveyError::from).and_then(|raw| {
            let line = raw.position().map(|pos| pos.line());
            raw.deserialize::<CsvRow>(Some(&self.headers))
                .map_err(SurveyError::from)
                .and_then(|row| convert_csv_row(row, self.imported_at))
                .map_err(|e| SurveyError::ParseError {
                    line,
                    message: e.to_string(),
                })
        }))
    }
}
