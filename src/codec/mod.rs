//! Text format codec for tile maps
//!
//! Decoding and encoding of map files, the code allocation scheme shared by
//! both directions, and the record-line format used by diff/patch/pack.

/// Tile codes, code tables and allocation
pub mod codes;
/// Map file decoding
pub mod decode;
/// Map file encoding
pub mod encode;
/// Record line parsing and rendering
pub mod records;

pub use codes::{CodeTable, allocate_codes};
pub use decode::{MapDocument, ParseMode, is_descriptor, parse, parse_named};
pub use encode::{EncodeOptions, Encoded, encode};
pub use records::{Record, parse_records, render_record_groups, render_records};
