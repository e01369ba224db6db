//! Applying records to grids: patch, pack and unpack
//!
//! Patch and unpack flip rows between storage and display orientation using
//! the grid's maximum y. Pack takes records as written, then mirrors the whole
//! grid so a hand-edited, display-oriented file lands in storage orientation.

use crate::codec::records::Record;
use crate::spatial::{Coordinate, Grid, flip_y};

/// Apply diff records to a copy of `original`
///
/// Record rows are flipped back against the original's maximum y, which stays
/// fixed even when records widen the box. An original of unknown size flips
/// against 0.
pub fn patch(original: &Grid, records: &[Record]) -> Grid {
    let max_y = original.max().map_or(0, |max| max.y);
    let mut grid = original.clone();
    for record in records {
        let at = Coordinate::new(record.at.x, flip_y(max_y, record.at.y), record.at.z);
        grid.set(at, record.content.clone());
    }
    tracing::info!(records = records.len(), "applied records");
    grid
}

/// Build a grid from unpacked records, then mirror it across y
pub fn pack(records: &[Record]) -> Grid {
    let mut grid: Grid = records
        .iter()
        .map(|record| (record.at, record.content.clone()))
        .collect();
    tracing::info!(records = records.len(), "flipping");
    grid.mirror_y();
    grid
}

/// Emit a record for every cell in the box, grouped by level
///
/// Holes are emitted with the hole sentinel as their content. Packing such a
/// record gives a grid that the encoder refuses.
pub fn unpack(grid: &Grid) -> Vec<Vec<Record>> {
    let Some(bounds) = grid.bounds() else {
        return Vec::new();
    };
    bounds
        .levels()
        .map(|z| {
            tracing::debug!(z, "unpacking level");
            bounds
                .level_cells(z)
                .map(|at| {
                    Record::new(
                        Coordinate::new(at.x, flip_y(bounds.max.y, at.y), at.z),
                        grid.shared_content_at(at),
                    )
                })
                .collect()
        })
        .collect()
}
