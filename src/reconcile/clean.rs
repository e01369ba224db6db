//! Canonical re-encoding against a predecessor's code table
//!
//! Values shared with the predecessor keep their codes, so a version-control
//! diff of the output only shows dictionary lines and rows that really changed.

use crate::codec::codes::CodeTable;
use crate::codec::encode::{EncodeOptions, Encoded, encode};
use crate::io::error::Result;
use crate::spatial::Grid;

/// Re-encoded map plus a tally of how codes moved
#[derive(Debug, Clone)]
pub struct Cleaned {
    /// Encoded output
    pub encoded: Encoded,
    /// Values that kept the code they had in the reference
    pub kept: usize,
    /// Values present in the reference that received a different code
    pub reassigned: usize,
    /// Values the reference did not know
    pub added: usize,
}

/// Encode `revised` reusing codes from `reference` wherever possible
///
/// # Errors
///
/// Propagates encoding errors (empty grid, holes, worker failure)
pub fn clean(reference: &CodeTable, revised: &Grid, options: &EncodeOptions) -> Result<Cleaned> {
    let encoded = encode(revised, Some(reference), options)?;

    let mut kept = 0;
    let mut reassigned = 0;
    let mut added = 0;
    for (code, value) in encoded.codes.entries() {
        match reference.code_of(value) {
            Some(previous) if previous == code => kept += 1,
            Some(_) => reassigned += 1,
            None => added += 1,
        }
    }
    tracing::info!(kept, reassigned, added, "cleaned map codes");

    Ok(Cleaned {
        encoded,
        kept,
        reassigned,
        added,
    })
}
