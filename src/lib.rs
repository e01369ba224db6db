//! Reconciliation tools for sparse 3-D tile maps stored in a compact text format
//!
//! Maps are decoded into sparse grids, compared, patched, re-encoded with
//! stable tile codes, or merged three ways with conflicts settled by a
//! pluggable resolver.

#![forbid(unsafe_code)]

/// Map text format: tile codes, decoding, encoding and record lines
pub mod codec;
/// Input/output operations, jobs and error handling
pub mod io;
/// Diff, patch, pack, unpack, clean and merge over grids
pub mod reconcile;
/// Coordinates, bounds and the sparse grid
pub mod spatial;

pub use io::error::{MapError, Result};
