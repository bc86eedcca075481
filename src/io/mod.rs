//! I/O module
//!
//! Handles CSV encoding, decoding, import and export.
//!
//! # Components
//!
//! - `csv_format` - The document codec (field escaping, encode, decode)
//! - `export` - Export file naming and byte-order mark handling
//! - `import_reader` - Validated batch import with iterator interface

pub mod csv_format;
pub mod export;
pub mod import_reader;

pub use csv_format::{decode, encode, escape_field, parse_line};
pub use export::{export_filename, with_bom, write_export};
pub use import_reader::ImportReader;
