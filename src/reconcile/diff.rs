//! Cell-by-cell comparison of two grids
//!
//! Only the overlap of both bounding boxes is compared. Records are emitted in
//! display orientation (`y' = 1 + new.max.y - y`) so that patch can reverse
//! the flip against the same original.

use crate::codec::records::{Record, render_records};
use crate::spatial::{Bounds, Coordinate, Grid, flip_y};

/// Result of comparing two grids
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diff {
    /// Region that was compared, `None` when the boxes do not overlap
    pub compared: Option<Bounds>,
    /// One record per differing cell, carrying the revised content
    pub records: Vec<Record>,
}

impl Diff {
    /// Number of differing cells
    pub const fn count(&self) -> usize {
        self.records.len()
    }

    /// Whether the compared region is identical in both grids
    pub const fn is_match(&self) -> bool {
        self.records.is_empty()
    }

    /// Records rendered one per line
    pub fn render(&self) -> String {
        render_records(&self.records)
    }
}

/// Compare `old` against `new` over the intersection of their boxes
///
/// Holes on either side compare as the hole sentinel, so a missing cell shows
/// up as a difference instead of aborting the comparison.
pub fn diff(old: &Grid, new: &Grid) -> Diff {
    let (Some(old_bounds), Some(new_bounds)) = (old.bounds(), new.bounds()) else {
        tracing::warn!("cannot compare maps with unknown size");
        return Diff::default();
    };
    let Some(compared) = old_bounds.intersection(&new_bounds) else {
        tracing::warn!(old = %old_bounds, new = %new_bounds, "maps do not overlap");
        return Diff::default();
    };
    tracing::info!(%compared, "comparing");

    let max_y = new_bounds.max.y;
    let mut records = Vec::new();
    for z in compared.levels() {
        tracing::debug!(z, "comparing level");
        for at in compared.level_cells(z) {
            let revised = new.shared_content_at(at);
            if old.content_at(at) != &*revised {
                records.push(Record::new(
                    Coordinate::new(at.x, flip_y(max_y, at.y), at.z),
                    revised,
                ));
            }
        }
    }

    let result = Diff {
        compared: Some(compared),
        records,
    };
    if result.is_match() {
        tracing::info!("files do match");
    } else {
        tracing::info!(differences = result.count(), "found differences");
    }
    result
}
