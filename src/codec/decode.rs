//! Map file decoding
//!
//! Two passes over the text: the dictionary first (its longest code fixes the
//! row-splitting width), then the level blocks. Any malformed level row or
//! unknown code fails the whole decode; nothing partial is returned.

use crate::codec::codes::{CodeTable, is_code};
use crate::io::configuration::UNKNOWN_MAP_NAME;
use crate::io::error::{MapError, Result, parse_error};
use crate::spatial::{Coordinate, Grid};

/// How much of a map file to decode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParseMode {
    /// Dictionary and every level block
    #[default]
    Full,
    /// Dictionary only; the grid stays empty and its size unknown
    DictionaryOnly,
}

/// A decoded map file
#[derive(Debug, Clone, Default)]
pub struct MapDocument {
    /// Display name used in log output
    pub name: String,
    /// Decoded cells
    pub grid: Grid,
    /// Dictionary as found in the file
    pub codes: CodeTable,
}

/// Decode map text with a placeholder name
///
/// # Errors
///
/// Returns an error if a level header, row, or code cannot be decoded
pub fn parse(text: &str, mode: ParseMode) -> Result<MapDocument> {
    parse_named(UNKNOWN_MAP_NAME, text, mode)
}

/// Decode map text, tagging log output with `name`
///
/// # Errors
///
/// Returns an error if:
/// - A level header has non-numeric coordinates
/// - A row contains non-alphabetic symbols or a length that is not a multiple
///   of the code width
/// - A row uses a code missing from the dictionary
/// - A level block is never closed
pub fn parse_named(name: &str, text: &str, mode: ParseMode) -> Result<MapDocument> {
    tracing::info!(map = name, "loading tiles");
    let codes = parse_dictionary(text);
    let mut grid = Grid::new();

    if mode == ParseMode::Full {
        tracing::info!(map = name, "loading levels");
        parse_levels(name, text, &codes, &mut grid)?;
    }

    tracing::debug!(
        map = name,
        codes = codes.len(),
        cells = grid.len(),
        "decoded map"
    );
    Ok(MapDocument {
        name: name.to_string(),
        grid,
        codes,
    })
}

fn parse_dictionary(text: &str) -> CodeTable {
    let mut codes = CodeTable::new();
    for line in text.lines() {
        if let Some((code, value)) = dictionary_entry(line) {
            if !codes.define(code, value) {
                tracing::debug!(code, "duplicate dictionary code ignored");
            }
        }
    }
    codes
}

/// Split a `"code" = (content)` line into its code and content
///
/// The content keeps its enclosing parentheses.
pub fn dictionary_entry(line: &str) -> Option<(&str, &str)> {
    let rest = line.trim().strip_prefix('"')?;
    let (code, rest) = rest.split_once('"')?;
    if !is_code(code) {
        return None;
    }
    let value = rest.trim_start().strip_prefix('=')?.trim_start();
    is_descriptor(value).then_some((code, value))
}

/// Whether `value` can stand on the right of a dictionary line and be read back
///
/// That means a single line enclosed in parentheses.
pub fn is_descriptor(value: &str) -> bool {
    value.len() >= 2
        && value.starts_with('(')
        && value.ends_with(')')
        && !value.contains(['\n', '\r'])
}

fn parse_levels(name: &str, text: &str, codes: &CodeTable, grid: &mut Grid) -> Result<()> {
    let width = codes.width();
    let mut cursor: Option<(Coordinate, usize)> = None;

    for (index, raw) in text.lines().enumerate() {
        let line_number = index + 1;
        let line = raw.trim();

        let Some((mut at, opened)) = cursor else {
            if let Some(origin) = level_header(line, line_number)? {
                tracing::debug!(map = name, %origin, "new map part");
                cursor = Some((origin, line_number));
            }
            continue;
        };

        if line.starts_with("\"}") {
            cursor = None;
            continue;
        }
        if line.is_empty() {
            continue;
        }

        consume_row(line, width, at, codes, grid, line_number)?;
        at.y += 1;
        cursor = Some((at, opened));
    }

    cursor.map_or(Ok(()), |(_, opened)| {
        Err(parse_error(opened, &"level block is never closed"))
    })
}

/// Parse a `(x,y,z) = {"` block header
///
/// Returns `Ok(None)` for lines of any other shape.
fn level_header(line: &str, line_number: usize) -> Result<Option<Coordinate>> {
    let Some(rest) = line.strip_prefix('(') else {
        return Ok(None);
    };
    let Some((fields, tail)) = rest.split_once(')') else {
        return Ok(None);
    };
    let opens_block = tail
        .trim_start()
        .strip_prefix('=')
        .is_some_and(|tail| tail.trim() == "{\"");
    if !opens_block {
        return Ok(None);
    }

    let mut numbers = fields.split(',').map(|field| field.trim().parse::<i32>());
    match (numbers.next(), numbers.next(), numbers.next(), numbers.next()) {
        (Some(Ok(x)), Some(Ok(y)), Some(Ok(z)), None) => Ok(Some(Coordinate::new(x, y, z))),
        _ => Err(parse_error(
            line_number,
            &format!("invalid level origin '({fields})'"),
        )),
    }
}

fn consume_row(
    row: &str,
    width: usize,
    start: Coordinate,
    codes: &CodeTable,
    grid: &mut Grid,
    line_number: usize,
) -> Result<()> {
    if width == 0 {
        return Err(parse_error(
            line_number,
            &"level row found but the dictionary is empty",
        ));
    }
    if !row.is_ascii() || row.len() % width != 0 {
        return Err(parse_error(
            line_number,
            &format!("row of length {} does not split into codes of width {width}", row.len()),
        ));
    }

    let mut at = start;
    let mut rest = row;
    while let Some((code, tail)) = rest.split_at_checked(width) {
        let value = codes.value_of(code).ok_or_else(|| MapError::UnknownCode {
            line: line_number,
            code: code.to_string(),
        })?;
        grid.set(at, value.clone());
        at.x += 1;
        rest = tail;
    }
    Ok(())
}
