//! Format constants and runtime defaults

use std::num::NonZeroUsize;

/// Content substituted for a cell with no stored value
pub const HOLE_SENTINEL: &str = "null";

/// Name given to maps decoded from text without a file
pub const UNKNOWN_MAP_NAME: &str = "unknown";

/// Conventional extension of map files
pub const MAP_EXTENSION: &str = "dmm";

// Each worker renders whole levels; maps rarely have more levels than this
/// Upper bound on encoder worker threads
pub const MAX_WORKER_THREADS: usize = 8;

// Logging filters, overridden by RUST_LOG when set
/// Default log filter
pub const DEFAULT_LOG_FILTER: &str = "gridmerge=info";
/// Log filter with `-v`
pub const VERBOSE_LOG_FILTER: &str = "gridmerge=debug";
/// Log filter in silent mode
pub const SILENT_LOG_FILTER: &str = "gridmerge=error";

// Progress display settings
/// Spinner redraw interval in milliseconds
pub const PROGRESS_TICK_MS: u64 = 100;

// Process exit codes
/// I/O, decode and other unrecoverable failures
pub const EXIT_FAILURE: u8 = 1;
/// Rejected inputs: mismatched bounds, refused overwrite, bad parameters
pub const EXIT_VALIDATION: u8 = 2;
/// Merge stopped by the conflict resolver
pub const EXIT_ABORTED: u8 = 3;

/// Encoder workers to use when none are requested
pub fn default_workers() -> NonZeroUsize {
    let available = std::thread::available_parallelism().map_or(1, NonZeroUsize::get);
    NonZeroUsize::new(available.min(MAX_WORKER_THREADS)).unwrap_or(NonZeroUsize::MIN)
}
