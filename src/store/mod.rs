//! Location Store Module
//!
//! Flat-file persistence for the location table.
//!
//! ## Responsibilities
//! - Rebuild the table from the backing file (full load)
//! - Append one entry and reload so memory matches disk
//! - Regenerate the whole file after a delete (full rewrite)
//!
//! ## File Format
//! ```text
//! # Location Data File
//! # Format: key;building;floor;room;description
//! c_lab;Engineering Hall;2nd;204;Computer Lab
//! library;Main Library;Ground;G01;Central library
//! ```
//!
//! - One entry per line, five fields separated by `;`
//! - Lines starting with `#` and lines shorter than 5 characters are skipped
//! - Fields are trimmed; there is no escaping, so a `;` inside a field
//!   shifts every later column

mod file;
mod format;

pub use file::{LoadReport, LocationStore};
pub use format::{format_line, parse_line, ParsedLine, FIELD_COUNT, FIELD_SEPARATOR, HEADER_LINES};
