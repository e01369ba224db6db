//! Tracing subscriber setup for the command-line tool
//!
//! Log lines share stderr with the progress spinners, so every write clears
//! the spinners first and lets them redraw below the new line.

use std::io::{self, Write};

use indicatif::MultiProgress;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::MakeWriter;

use crate::io::configuration::{DEFAULT_LOG_FILTER, SILENT_LOG_FILTER, VERBOSE_LOG_FILTER};

/// Log filter implied by the command-line flags
pub const fn log_filter(verbosity: u8, silent: bool) -> &'static str {
    if silent {
        SILENT_LOG_FILTER
    } else if verbosity > 0 {
        VERBOSE_LOG_FILTER
    } else {
        DEFAULT_LOG_FILTER
    }
}

/// Stderr writer that suspends a progress display around each write
#[derive(Clone)]
pub struct ProgressAwareWriter {
    display: MultiProgress,
}

impl ProgressAwareWriter {
    /// Writer pausing `display` while it writes
    pub const fn new(display: MultiProgress) -> Self {
        Self { display }
    }
}

impl Write for ProgressAwareWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.display.suspend(|| io::stderr().write_all(buf))?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stderr().flush()
    }
}

impl<'a> MakeWriter<'a> for ProgressAwareWriter {
    type Writer = Self;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Install a stderr formatter; `RUST_LOG` takes precedence over the flags
///
/// Log output pauses `display` while it is written. Returns `false` if a
/// global subscriber was already installed.
pub fn init_tracing(verbosity: u8, silent: bool, display: MultiProgress) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_filter(verbosity, silent)));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(ProgressAwareWriter::new(display))
        .with_target(false)
        .try_init()
        .is_ok()
}
