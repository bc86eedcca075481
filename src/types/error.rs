//! Error types for the survey store
//!
//! This module defines all error types that can occur while storing,
//! validating, importing and exporting survey responses.
//!
//! # Error Categories
//!
//! - **Storage Errors**: the key-value store could not be read or written
//! - **File I/O Errors**: export or import files could not be accessed
//! - **CSV Errors**: an import file is not readable as CSV
//! - **Validation Errors**: a submission breaks one or more field rules
//! - **Access Errors**: the export password is missing or wrong
//!
//! Malformed stored CSV text is deliberately absent: the decoder never fails.

use std::fmt;
use thiserror::Error;

/// Form field a validation message refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    Phone,
    Region,
    Occupation,
}

impl Field {
    /// Machine name of the field
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Phone => "phone",
            Field::Region => "region",
            Field::Occupation => "occupation",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single failed validation rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// The offending field
    pub field: Field,
    /// User-facing message
    pub message: String,
}

impl FieldError {
    pub fn new(field: Field, message: &str) -> Self {
        FieldError {
            field,
            message: message.to_string(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

fn join_field_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Main error type for the survey store
///
/// Each variant includes enough context to print a useful CLI message.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SurveyError {
    /// The key-value store failed to read or write a slot
    ///
    /// A failed write leaves the previously stored text intact.
    #[error("Storage error for key '{key}': {message}")]
    Storage {
        /// Storage key involved
        key: String,
        /// Description of the failure
        message: String,
    },

    /// File not found at the specified path
    #[error("File not found: {path}")]
    FileNotFound {
        /// The path that was not found
        path: String,
    },

    /// I/O error while reading or writing an import or export file
    #[error("I/O error: {message}")]
    IoError {
        /// Description of the I/O error
        message: String,
    },

    /// CSV error while reading an import file
    #[error("CSV parse error{}: {message}", line.map(|l| format!(" at line {}", l)).unwrap_or_default())]
    ParseError {
        /// Line number where the error occurred (if available)
        line: Option<u64>,
        /// Description of the parsing error
        message: String,
    },

    /// The submission failed validation
    #[error("Invalid submission: {}", join_field_errors(errors))]
    Validation {
        /// Every failed rule, in field order
        errors: Vec<FieldError>,
    },

    /// No admin password was supplied
    #[error("請輸入管理員密碼")]
    MissingPassword,

    /// The admin password did not match
    #[error("密碼錯誤，請重試")]
    AuthenticationFailed,

    /// The append queue worker has stopped
    #[error("Append queue is closed")]
    QueueClosed,
}

// Conversion from io::Error to SurveyError
impl From<std::io::Error> for SurveyError {
    fn from(error: std::io::Error) -> Self {
        SurveyError::IoError {
            message: error.to_string(),
        }
    }
}

// Conversion from csv::Error to SurveyError
impl From<csv::Error> for SurveyError {
    fn from(error: csv::Error) -> Self {
        let line = error.position().map(|pos| pos.line());

        SurveyError::ParseError {
            line,
            message: error.to_string(),
        }
    }
}

impl SurveyError {
    /// Create a Storage error
    pub fn storage(key: &str, message: impl fmt::Display) -> Self {
        SurveyError::Storage {
            key: key.to_string(),
            message: message.to_string(),
        }
    }

    /// Create a FileNotFound error
    pub fn file_not_found(path: &std::path::Path) -> Self {
        SurveyError::FileNotFound {
            path: path.display().to_string(),
        }
    }

    /// Create a Validation error
    pub fn validation(errors: Vec<FieldError>) -> Self {
        SurveyError::Validation { errors }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::storage(
        SurveyError::Storage { key: "survey_responses_csv".to_string(), message: "disk full".to_string() },
        "Storage error for key 'survey_responses_csv': disk full"
    )]
    #[case::file_not_found(
        SurveyError::FileNotFound { path: "import.csv".to_string() },
        "File not found: import.csv"
    )]
    #[case::io_error(
        SurveyError::IoError { message: "Permission denied".to_string() },
        "I/O error: Permission denied"
    )]
    #[case::parse_error_with_line(
        SurveyError::ParseError { line: Some(42), message: "Invalid field".to_string() },
        "CSV parse error at line 42: Invalid field"
    )]
    #[case::parse_error_without_line(
        SurveyError::ParseError { line: None, message: "Invalid field".to_string() },
        "CSV parse error: Invalid field"
    )]
    #[case::validation(
        SurveyError::Validation { errors: vec![
            FieldError::new(Field::Name, "此欄位為必填"),
            FieldError::new(Field::Region, "請選擇一個選項"),
        ] },
        "Invalid submission: name: 此欄位為必填; region: 請選擇一個選項"
    )]
    #[case::missing_password(SurveyError::MissingPassword, "請輸入管理員密碼")]
    #[case::authentication_failed(SurveyError::AuthenticationFailed, "密碼錯誤，請重試")]
    #[case::queue_closed(SurveyError::QueueClosed, "Append queue is closed")]
    fn test_error_display(#[case] error: SurveyError, #[case] expected: &str) {
        assert_eq!(error.to_string(), expected);
    }

    #[rstest]
    #[case::storage(
        SurveyError::storage("k", "boom"),
        SurveyError::Storage { key: "k".to_string(), message: "boom".to_string() }
    )]
    #[case::file_not_found(
        SurveyError::file_not_found(std::path::Path::new("a.csv")),
        SurveyError::FileNotFound { path: "a.csv".to_string() }
    )]
    #[case::validation(
        SurveyError::validation(vec![FieldError::new(Field::Phone, "此欄位為必填")]),
        SurveyError::Validation { errors: vec![FieldError::new(Field::Phone, "此欄位為必填")] }
    )]
    fn test_helper_functions(#[case] result: SurveyError, #[case] expected: SurveyError) {
        assert_eq!(result, expected);
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error =
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "Permission denied");
        let error: SurveyError = io_error.into();
        assert!(matches!(error, SurveyError::IoError { .. }));
        assert_eq!(error.to_string(), "I/O error: Permission denied");
    }
}
