//! Sparse 3-D tile grid with an incrementally tracked bounding box
//!
//! Cells map a [`Coordinate`] to an opaque tile-content string. The box is
//! unknown until the first write and only ever grows afterwards. Reading a
//! coordinate inside the box that was never written is a "hole": it is
//! logged, counted, and answered with [`HOLE_SENTINEL`] so comparisons can
//! carry on and surface the anomaly as an ordinary difference.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::io::configuration::HOLE_SENTINEL;
use crate::spatial::coordinate::{Bounds, Coordinate};

/// Shared tile-content payload
///
/// Many cells repeat the same content, so values are reference counted
/// instead of copied per cell.
pub type Content = Arc<str>;

/// Sparse mapping from coordinate to tile content
#[derive(Debug, Default)]
pub struct Grid {
    cells: HashMap<Coordinate, Content>,
    bounds: Option<Bounds>,
    holes: AtomicUsize,
}

impl Clone for Grid {
    fn clone(&self) -> Self {
        Self {
            cells: self.cells.clone(),
            bounds: self.bounds,
            holes: AtomicUsize::new(self.holes_reported()),
        }
    }
}

impl PartialEq for Grid {
    fn eq(&self, other: &Self) -> bool {
        self.bounds == other.bounds && self.cells == other.cells
    }
}

impl Eq for Grid {}

impl Grid {
    /// Create an empty grid with unknown size
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite a cell, widening the bounding box as needed
    pub fn set(&mut self, at: Coordinate, value: impl Into<Content>) {
        self.bounds.get_or_insert(Bounds::single(at)).include(at);
        self.cells.insert(at, value.into());
    }

    /// Raw lookup without hole reporting
    pub fn get(&self, at: Coordinate) -> Option<&str> {
        self.cells.get(&at).map(|value| &**value)
    }

    /// Content at a coordinate, substituting the hole sentinel when absent
    ///
    /// Every hole is reported through `tracing` and counted in
    /// [`Grid::holes_reported`].
    pub fn content_at(&self, at: Coordinate) -> &str {
        if let Some(value) = self.cells.get(&at) {
            return value;
        }
        self.report_hole(at);
        HOLE_SENTINEL
    }

    /// Shared content at a coordinate, with the same hole handling as
    /// [`Grid::content_at`]
    pub fn shared_content_at(&self, at: Coordinate) -> Content {
        if let Some(value) = self.cells.get(&at) {
            return value.clone();
        }
        self.report_hole(at);
        Content::from(HOLE_SENTINEL)
    }

    fn report_hole(&self, at: Coordinate) {
        self.holes.fetch_add(1, Ordering::Relaxed);
        tracing::warn!(x = at.x, y = at.y, z = at.z, "no tile stored, possible loading error");
    }

    /// Bounding box of all written cells, `None` before the first write
    pub const fn bounds(&self) -> Option<Bounds> {
        self.bounds
    }

    /// Whether at least one cell has been written
    pub const fn is_size_known(&self) -> bool {
        self.bounds.is_some()
    }

    /// Minimum corner of the bounding box
    pub fn min(&self) -> Option<Coordinate> {
        self.bounds.map(|b| b.min)
    }

    /// Maximum corner of the bounding box
    pub fn max(&self) -> Option<Coordinate> {
        self.bounds.map(|b| b.max)
    }

    /// Number of stored cells
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether no cell is stored
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// How many hole lookups have been answered with the sentinel
    pub fn holes_reported(&self) -> usize {
        self.holes.load(Ordering::Relaxed)
    }

    /// Iterate stored cells in arbitrary order
    pub fn iter(&self) -> impl Iterator<Item = (Coordinate, &str)> {
        self.cells.iter().map(|(at, value)| (*at, &**value))
    }

    /// Coordinates inside the bounding box with no stored value
    pub fn missing_cells(&self) -> impl Iterator<Item = Coordinate> {
        self.bounds
            .into_iter()
            .flat_map(Bounds::cells)
            .filter(|at| !self.cells.contains_key(at))
    }

    /// Distinct content values in sorted order
    pub fn distinct_values(&self) -> BTreeSet<Content> {
        self.cells.values().cloned().collect()
    }

    /// Reflect every level across its horizontal centre line
    ///
    /// Row `min.y + k` trades places with row `max.y - k`. Holes travel with
    /// their row, so mirroring twice restores the grid exactly.
    pub fn mirror_y(&mut self) {
        let Some(bounds) = self.bounds else {
            return;
        };
        let half = bounds.height() / 2;
        for z in bounds.levels() {
            for x in bounds.columns() {
                for offset in 0..half {
                    let low = Coordinate::new(x, bounds.min.y + offset as i32, z);
                    let high = Coordinate::new(x, bounds.max.y - offset as i32, z);
                    let low_value = self.cells.remove(&low);
                    let high_value = self.cells.remove(&high);
                    if let Some(value) = high_value {
                        self.cells.insert(low, value);
                    }
                    if let Some(value) = low_value {
                        self.cells.insert(high, value);
                    }
                }
            }
        }
    }
}

impl FromIterator<(Coordinate, Content)> for Grid {
    fn from_iter<I: IntoIterator<Item = (Coordinate, Content)>>(iter: I) -> Self {
        let mut grid = Self::new();
        for (at, value) in iter {
            grid.set(at, value);
        }
        grid
    }
}
