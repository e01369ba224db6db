//! Integer map coordinates and axis-aligned bounding boxes
//!
//! Bounds iterate their cells in z-major, then y, then x order. That is the
//! row/column order of the on-disk format, so every reconciliation job and the
//! encoder share one traversal.

use std::fmt;
use std::ops::RangeInclusive;

/// A cell address in a 3-D tile map
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Coordinate {
    /// Column
    pub x: i32,
    /// Row in storage orientation
    pub y: i32,
    /// Level
    pub z: i32,
}

impl Coordinate {
    /// Create a coordinate from its three components
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{},{})", self.x, self.y, self.z)
    }
}

/// Convert a row between storage and display orientation
///
/// The format stores rows top-down while records present them bottom-up, so
/// `1 + max_y - y` is used in both directions (the mapping is its own inverse).
pub const fn flip_y(max_y: i32, y: i32) -> i32 {
    1 + max_y - y
}

/// Axis-aligned box with inclusive corners
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Bounds {
    /// Minimum corner (inclusive)
    pub min: Coordinate,
    /// Maximum corner (inclusive)
    pub max: Coordinate,
}

impl Bounds {
    /// A box enclosing exactly one cell
    pub const fn single(at: Coordinate) -> Self {
        Self { min: at, max: at }
    }

    /// Widen the box to enclose `at`, touching only the axes that need it
    pub fn include(&mut self, at: Coordinate) {
        self.min.x = self.min.x.min(at.x);
        self.min.y = self.min.y.min(at.y);
        self.min.z = self.min.z.min(at.z);
        self.max.x = self.max.x.max(at.x);
        self.max.y = self.max.y.max(at.y);
        self.max.z = self.max.z.max(at.z);
    }

    /// Overlap of two boxes, `None` when they are disjoint on any axis
    pub fn intersection(&self, other: &Self) -> Option<Self> {
        let min = Coordinate::new(
            self.min.x.max(other.min.x),
            self.min.y.max(other.min.y),
            self.min.z.max(other.min.z),
        );
        let max = Coordinate::new(
            self.max.x.min(other.max.x),
            self.max.y.min(other.max.y),
            self.max.z.min(other.max.z),
        );
        (min.x <= max.x && min.y <= max.y && min.z <= max.z).then_some(Self { min, max })
    }

    /// Column range
    pub const fn columns(&self) -> RangeInclusive<i32> {
        self.min.x..=self.max.x
    }

    /// Row range
    pub const fn rows(&self) -> RangeInclusive<i32> {
        self.min.y..=self.max.y
    }

    /// Level range
    pub const fn levels(&self) -> RangeInclusive<i32> {
        self.min.z..=self.max.z
    }

    /// Number of cells along x
    pub const fn width(&self) -> u64 {
        (self.max.x as i64 - self.min.x as i64 + 1) as u64
    }

    /// Number of cells along y
    pub const fn height(&self) -> u64 {
        (self.max.y as i64 - self.min.y as i64 + 1) as u64
    }

    /// All cells of one level, row by row
    pub fn level_cells(self, z: i32) -> impl Iterator<Item = Coordinate> {
        self.rows()
            .flat_map(move |y| self.columns().map(move |x| Coordinate::new(x, y, z)))
    }

    /// All cells in canonical order (z, then y, then x)
    pub fn cells(self) -> impl Iterator<Item = Coordinate> {
        self.levels().flat_map(move |z| self.level_cells(z))
    }
}

impl fmt::Display for Bounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "x{{{} - {}}}, y{{{} - {}}}, z{{{} - {}}}",
            self.min.x, self.max.x, self.min.y, self.max.y, self.min.z, self.max.z
        )
    }
}
