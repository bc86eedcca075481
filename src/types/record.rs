//! Survey record types
//!
//! This module defines the fixed-shape survey record persisted by the store
//! and the raw submission from which records are built.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Column labels of the persisted document, in field order
///
/// name, phone, region, occupation type, submission time
pub const HEADER_FIELDS: [&str; 5] = ["姓名", "電話", "地區", "工作性質", "提交時間"];

/// One survey submission
///
/// Every field is plain text. Records have no identity beyond their position
/// in the dataset, so equality is structural.
///
/// The serde names match [`HEADER_FIELDS`], which lets any RFC 4180 reader
/// (e.g. the `csv` crate) deserialize an exported document directly.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Record {
    /// Respondent name
    #[serde(rename = "姓名")]
    pub name: String,

    /// Contact phone number
    #[serde(rename = "電話")]
    pub phone: String,

    /// Region (county or city)
    #[serde(rename = "地區")]
    pub region: String,

    /// Occupation type
    #[serde(rename = "工作性質")]
    pub occupation: String,

    /// Submission time, ISO-8601 UTC with millisecond precision
    #[serde(rename = "提交時間")]
    pub timestamp: String,
}

impl Record {
    /// Create a record from its five fields
    pub fn new(
        name: impl Into<String>,
        phone: impl Into<String>,
        region: impl Into<String>,
        occupation: impl Into<String>,
        timestamp: impl Into<String>,
    ) -> Self {
        Record {
            name: name.into(),
            phone: phone.into(),
            region: region.into(),
            occupation: occupation.into(),
            timestamp: timestamp.into(),
        }
    }

    /// Fields in document column order
    pub fn fields(&self) -> [&str; 5] {
        [
            &self.name,
            &self.phone,
            &self.region,
            &self.occupation,
            &self.timestamp,
        ]
    }

    /// Build a record from positional fields
    ///
    /// Missing trailing fields become empty strings and anything past the
    /// fifth field is ignored.
    pub fn from_fields<I>(fields: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let mut fields = fields.into_iter();
        let mut next = || fields.next().unwrap_or_default();

        Record {
            name: next(),
            phone: next(),
            region: next(),
            occupation: next(),
            timestamp: next(),
        }
    }
}

/// Format a submission timestamp the way records store it
///
/// `2024-01-01T00:00:00.000Z`
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Raw form input, before validation and timestamping
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Submission {
    pub name: String,
    pub phone: String,
    pub region: String,
    pub occupation: String,
}

impl Submission {
    /// Create a submission from user input
    ///
    /// Name and phone are trimmed; region and occupation come from fixed
    /// choice lists and are kept verbatim.
    pub fn new(
        name: impl AsRef<str>,
        phone: impl AsRef<str>,
        region: impl Into<String>,
        occupation: impl Into<String>,
    ) -> Self {
        Submission {
            name: name.as_ref().trim().to_string(),
            phone: phone.as_ref().trim().to_string(),
            region: region.into(),
            occupation: occupation.into(),
        }
    }

    /// Turn the submission into a record stamped with `at`
    ///
    /// No validation happens here; see [`crate::core::validator`].
    pub fn into_record(self, at: DateTime<Utc>) -> Record {
        Record {
            name: self.name,
            phone: self.phone,
            region: self.region,
            occupation: self.occupation,
            timestamp: format_timestamp(at),
        }
    }
}
