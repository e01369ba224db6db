//! Map file encoding
//!
//! Output layout:
//! - one `"code" = (content)` line per code, ascending code order
//! - a blank line
//! - one `(minX,minY,z) = {"` ... `"}` block per level, blank-line separated
//!
//! Levels are rendered on scoped worker threads and joined back in ascending
//! z order, independent of which worker finishes first.

use std::num::NonZeroUsize;
use std::thread;

use crate::codec::codes::{CodeTable, allocate_codes};
use crate::codec::decode::is_descriptor;
use crate::io::configuration::default_workers;
use crate::io::error::{MapError, Result, computation_error};
use crate::spatial::{Bounds, Coordinate, Grid};

/// Tuning for the encoder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodeOptions {
    /// Maximum number of level-rendering threads
    pub workers: NonZeroUsize,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            workers: default_workers(),
        }
    }
}

impl EncodeOptions {
    /// Options that render all levels on a single worker thread
    pub const fn sequential() -> Self {
        Self {
            workers: NonZeroUsize::MIN,
        }
    }
}

/// Encoded map text together with the code table used to produce it
#[derive(Debug, Clone)]
pub struct Encoded {
    /// Complete file contents
    pub text: String,
    /// Codes assigned during this encode
    pub codes: CodeTable,
}

/// Encode a grid, optionally reusing codes from a reference table
///
/// # Errors
///
/// Returns an error if:
/// - The grid has no cells (its size is unknown)
/// - Any coordinate inside the bounding box is a hole
/// - A tile value is not a parenthesised single-line descriptor, so the
///   written file could not be decoded again
/// - A level worker thread panics
pub fn encode(
    grid: &Grid,
    reference: Option<&CodeTable>,
    options: &EncodeOptions,
) -> Result<Encoded> {
    let bounds = grid.bounds().ok_or(MapError::EmptyGrid)?;
    if let Some(first) = grid.missing_cells().next() {
        return Err(MapError::IncompleteGrid {
            holes: grid.missing_cells().count(),
            first,
        });
    }

    let values = grid.distinct_values();
    if let Some(value) = values.iter().find(|value| !is_descriptor(value)) {
        return Err(MapError::UnencodableContent {
            value: value.to_string(),
        });
    }

    let codes = allocate_codes(&values, reference);
    tracing::info!(tiles = codes.len(), %bounds, "encoding map");

    let mut text = String::new();
    for (code, value) in codes.entries() {
        text.push('"');
        text.push_str(code);
        text.push_str("\" = ");
        text.push_str(value);
        text.push('\n');
    }
    text.push('\n');

    let levels = render_levels(grid, bounds, &codes, options.workers)?;
    text.push_str(&levels.join("\n"));

    Ok(Encoded { text, codes })
}

fn render_levels(
    grid: &Grid,
    bounds: Bounds,
    codes: &CodeTable,
    workers: NonZeroUsize,
) -> Result<Vec<String>> {
    let levels: Vec<i32> = bounds.levels().collect();
    let per_worker = levels.len().div_ceil(workers.get()).max(1);

    thread::scope(|scope| {
        let handles: Vec<_> = levels
            .chunks(per_worker)
            .map(|chunk| {
                scope.spawn(move || {
                    chunk
                        .iter()
                        .map(|&z| render_level(grid, bounds, codes, z))
                        .collect::<Result<Vec<String>>>()
                })
            })
            .collect();

        let mut rendered = Vec::with_capacity(levels.len());
        for handle in handles {
            let chunk = handle
                .join()
                .map_err(|_payload| MapError::WorkerPanicked {
                    task: "level encoding",
                })??;
            rendered.extend(chunk);
        }
        Ok(rendered)
    })
}

fn render_level(grid: &Grid, bounds: Bounds, codes: &CodeTable, z: i32) -> Result<String> {
    let row_length = bounds.width() as usize * codes.width() + 1;
    let mut block = String::with_capacity(row_length * bounds.height() as usize + 32);

    block.push_str(&format!("({},{},{z}) = {{\"\n", bounds.min.x, bounds.min.y));
    for y in bounds.rows() {
        for x in bounds.columns() {
            let at = Coordinate::new(x, y, z);
            let value = grid.content_at(at);
            let code = codes.code_of(value).ok_or_else(|| {
                computation_error("level encoding", &format!("no code assigned for tile at {at}"))
            })?;
            block.push_str(code);
        }
        block.push('\n');
    }
    block.push_str("\"}\n");

    tracing::debug!(z, "encoded level");
    Ok(block)
}
