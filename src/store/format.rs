//! Line format
//!
//! Parsing and formatting of single data-file lines.

use crate::config::FieldLimits;
use crate::table::LocationEntry;

/// Separator between fields
pub const FIELD_SEPARATOR: &str = ";";

/// Fields per entry line
pub const FIELD_COUNT: usize = 5;

/// Lines shorter than this (terminator excluded) are treated as blank
const MIN_LINE_LEN: usize = 5;

/// Header written at the top of a rewritten file
pub const HEADER_LINES: [&str; 2] = [
    "# Location Data File",
    "# Format: key;building;floor;room;description",
];

/// Classification of one line of the data file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedLine {
    /// Comment, empty or too-short line
    Blank,

    /// Fewer than five fields
    Malformed,

    /// A location
    Entry(LocationEntry),
}

/// Parse one line (with or without its line terminator)
///
/// Fields past the fifth are ignored. Every field is trimmed and then
/// truncated to `limits`.
pub fn parse_line(line: &str, limits: &FieldLimits) -> ParsedLine {
    let line = line.trim_end_matches(['\n', '\r']);
    if line.starts_with('#') || line.chars().count() < MIN_LINE_LEN {
        return ParsedLine::Blank;
    }

    let fields: Vec<&str> = line
        .split(FIELD_SEPARATOR)
        .map(str::trim)
        .take(FIELD_COUNT)
        .collect();
    let [key, building, floor, room, description] = fields[..] else {
        return ParsedLine::Malformed;
    };

    ParsedLine::Entry(LocationEntry::new(key, building, floor, room, description).bounded(limits))
}

/// Render an entry as a data-file line, without terminator
pub fn format_line(entry: &LocationEntry) -> String {
    [
        entry.key.as_str(),
        entry.building.as_str(),
        entry.floor.as_str(),
        entry.room.as_str(),
        entry.description.as_str(),
    ]
    .join(FIELD_SEPARATOR)
}
