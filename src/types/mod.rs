//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `record`: Survey record and submission types
//! - `error`: Error types for the survey store

pub mod error;
pub mod record;

pub use error::{Field, FieldError, SurveyError};
pub use record::{format_timestamp, Record, Submission, HEADER_FIELDS};
