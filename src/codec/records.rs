//! Record lines: `(x,y,z)=content`, one cell per line
//!
//! Used for diff output, patch input, and the unpacked form consumed by pack.
//! Parsing is lenient on numbers: a coordinate field that is not a valid
//! integer reads as 0 and is logged. Missing separators are still rejected,
//! since without them no value can be located at all.

use std::fmt;

use crate::io::error::{MapError, Result};
use crate::spatial::{Content, Coordinate};

/// One cell assignment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// Target cell
    pub at: Coordinate,
    /// Tile content for the cell
    pub content: Content,
}

impl Record {
    /// Create a record
    pub fn new(at: Coordinate, content: impl Into<Content>) -> Self {
        Self {
            at,
            content: content.into(),
        }
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({},{},{})={}",
            self.at.x, self.at.y, self.at.z, self.content
        )
    }
}

/// Parse a single record line
///
/// Blank lines yield `Ok(None)`. The content is everything after the first
/// `=` following the closing parenthesis.
///
/// # Errors
///
/// Returns [`MapError::MalformedRecord`] when a `,`, `)` or `=` separator is missing
pub fn parse_record(line: &str, line_number: usize) -> Result<Option<Record>> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let malformed = || MapError::MalformedRecord {
        line: line_number,
        text: line.to_string(),
    };

    let mut chars = line.chars();
    chars.next();
    let body = chars.as_str();

    let (x, rest) = body.split_once(',').ok_or_else(malformed)?;
    let (y, rest) = rest.split_once(',').ok_or_else(malformed)?;
    let (z, rest) = rest.split_once(')').ok_or_else(malformed)?;
    let (_, content) = rest.split_once('=').ok_or_else(malformed)?;

    let at = Coordinate::new(
        lenient_int(x, line_number),
        lenient_int(y, line_number),
        lenient_int(z, line_number),
    );
    Ok(Some(Record::new(at, content)))
}

/// Parse every record in a text, skipping blank lines
///
/// # Errors
///
/// Returns the first [`MapError::MalformedRecord`] encountered
pub fn parse_records(text: &str) -> Result<Vec<Record>> {
    let mut records = Vec::new();
    for (index, line) in text.lines().enumerate() {
        if let Some(record) = parse_record(line, index + 1)? {
            records.push(record);
        }
    }
    Ok(records)
}

/// Render records one per line
pub fn render_records(records: &[Record]) -> String {
    let mut text = String::new();
    for record in records {
        text.push_str(&record.to_string());
        text.push('\n');
    }
    text
}

/// Render groups of records, each group followed by a blank line
pub fn render_record_groups(groups: &[Vec<Record>]) -> String {
    let mut text = String::new();
    for group in groups {
        text.push_str(&render_records(group));
        text.push('\n');
    }
    text
}

fn lenient_int(field: &str, line_number: usize) -> i32 {
    field.trim().parse().unwrap_or_else(|_| {
        tracing::warn!(line = line_number, field, "unreadable coordinate, using 0");
        0
    })
}
