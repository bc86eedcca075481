//! CSV format handling for the survey response document
//!
//! This module centralizes the document codec:
//! - [`escape_field`] quotes a single field when needed
//! - [`encode`] renders a full dataset, header first
//! - [`decode`] rebuilds the dataset from stored text
//! - [`split_rows`] and [`parse_line`] are the two decoding stages
//!
//! The dialect is fixed: comma delimiter, double-quote quoting, LF row
//! separator. Fields are quoted only when they contain `,`, `"` or `\n`.
//!
//! Decoding never fails. Blank rows are dropped, short rows are padded with
//! empty fields, long rows are truncated. Row splitting is quote-aware, so a
//! field holding a raw line feed survives a round trip.
//!
//! All functions are pure (no I/O) for easy testing.

use crate::types::{Record, HEADER_FIELDS};
use std::borrow::Cow;

/// Record separator
const ROW_SEPARATOR: char = '\n';

/// Field delimiter
const DELIMITER: char = ',';

/// Quote character
const QUOTE: char = '"';

/// Header row of every encoded document
pub fn header() -> String {
    HEADER_FIELDS.join(",")
}

/// Escape a single field for inclusion in a CSV row
///
/// Returns the value wrapped in double quotes, with inner quotes doubled,
/// when it contains a comma, a double quote or a line feed. Any other value
/// is returned unchanged.
///
/// # Examples
///
/// ```
/// use survey_store::io::csv_format::escape_field;
///
/// assert_eq!(escape_field("王小明"), "王小明");
/// assert_eq!(escape_field("a\"b"), "\"a\"\"b\"");
/// assert_eq!(escape_field("02-1234,5678"), "\"02-1234,5678\"");
/// ```
pub fn escape_field(value: &str) -> Cow<'_, str> {
    if !value.contains([DELIMITER, QUOTE, ROW_SEPARATOR]) {
        return Cow::Borrowed(value);
    }

    let mut escaped = String::with_capacity(value.len() + 2);
    escaped.push(QUOTE);
    for c in value.chars() {
        if c == QUOTE {
            escaped.push(QUOTE);
        }
        escaped.push(c);
    }
    escaped.push(QUOTE);
    Cow::Owned(escaped)
}

/// Encode a dataset into a CSV document
///
/// The header comes first, followed by one row per record in input order.
/// Rows are joined by a single line feed with no trailing separator, so an
/// empty dataset encodes to the header alone.
pub fn encode(records: &[Record]) -> String {
    let mut output = header();

    for record in records {
        output.push(ROW_SEPARATOR);
        for (i, field) in record.fields().into_iter().enumerate() {
            if i > 0 {
                output.push(DELIMITER);
            }
            output.push_str(&escape_field(field));
        }
    }

    output
}

/// Decode a CSV document into a dataset
///
/// The first non-blank row is the header and is never returned as data.
/// Empty input, whitespace-only input and header-only input all decode to an
/// empty dataset.
pub fn decode(text: &str) -> Vec<Record> {
    if text.trim().is_empty() {
        return Vec::new();
    }

    split_rows(text)
        .into_iter()
        .filter(|row| !row.trim().is_empty())
        .skip(1)
        .map(|row| Record::from_fields(parse_line(row)))
        .collect()
}

/// Split a document into logical rows
///
/// A line feed ends a row only outside quotes, which keeps quoted multi-line
/// fields in one piece. An unterminated quote swallows the rest of the text
/// into the current row.
pub fn split_rows(text: &str) -> Vec<&str> {
    let mut rows = Vec::new();
    let mut in_quotes = false;
    let mut start = 0;

    for (i, c) in text.char_indices() {
        match c {
            QUOTE => in_quotes = !in_quotes,
            ROW_SEPARATOR if !in_quotes => {
                rows.push(&text[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    rows.push(&text[start..]);

    rows
}

/// Parse one row into its fields
///
/// A quote toggles the quoted state, except that `""` inside quotes yields a
/// literal quote. Commas split fields only outside quotes. The last field is
/// always emitted, so the result has at least one element.
pub fn parse_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            QUOTE if in_quotes && chars.peek() == Some(&QUOTE) => {
                current.push(QUOTE);
                chars.next();
            }
            QUOTE => in_quotes = !in_quotes,
            DELIMITER if !in_quotes => fields.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    fields.push(current);

    fields
}
