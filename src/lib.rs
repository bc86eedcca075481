//! Survey Store Library
//! # Overview
//!
//! This library stores survey responses as a single CSV document held in a
//! key-value text store, with a lossless encode/decode round trip.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (Record, Submission, errors)
//! - [`cli`] - CLI arguments parsing and command execution
//! - [`core`] - Storage and business logic:
//!   - [`core::response_store`] - Load-all and append over the CSV document
//!   - [`core::traits`] - Key-value store abstraction, with memory and file backends
//!   - [`core::r#async`] - Single-writer append queue
//!   - [`core::validator`], [`core::auth`], [`core::statistics`] - Collaborators
//! - [`io`] - The CSV codec, export and import
//!
//! # Document Format
//!
//! ```text
//! 姓名,電話,地區,工作性質,提交時間
//! 王小明,0912345678,台北市,藥師,2024-01-01T00:00:00.000Z
//! "王""小""明","02-1234,5678",台北市,藥師,2024-01-01T00:00:00.000Z
//! ```
//!
//! - Fields are joined by commas and rows by a single line feed
//! - A field is quoted only if it contains `,`, `"` or a line feed;
//!   inner quotes are doubled
//! - Decoding never fails: blank rows are skipped, short rows padded,
//!   long rows truncated

// Module declarations
pub mod cli;
pub mod core;
pub mod io;
pub mod types;

pub use crate::core::{
    AdminGate, AppendQueue, FileStore, KeyValueStore, MemoryStore, ResponseStore, Statistics,
};
pub use crate::io::{decode, encode, escape_field, parse_line};
pub use crate::types::{Field, FieldError, Record, Submission, SurveyError};
