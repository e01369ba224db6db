//! Reconciliation jobs over decoded grids
//!
//! All jobs walk bounding boxes in canonical z, y, x order and never touch
//! the filesystem; file handling lives in `io::jobs`.

/// Re-encoding against a predecessor's codes
pub mod clean;
/// Two-grid comparison
pub mod diff;
/// Three-way merge and conflict resolution
pub mod merge;
/// Patch, pack and unpack
pub mod patch;

pub use clean::{Cleaned, clean};
pub use diff::{Diff, diff};
pub use merge::{
    Conflict, ConflictResolver, MergeOutcome, Resolution, ScriptedResolver, merge,
};
pub use patch::{pack, patch, unpack};
