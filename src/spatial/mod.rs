//! Spatial data structures for sparse tile maps
//!
//! This module contains:
//! - Coordinates, bounding boxes and the storage/display row flip
//! - The sparse grid with hole reporting

/// Coordinates and axis-aligned bounds
pub mod coordinate;
/// Sparse grid storage
pub mod grid;

pub use coordinate::{Bounds, Coordinate, flip_y};
pub use grid::{Content, Grid};
