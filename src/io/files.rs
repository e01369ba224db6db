//! File source and sink for jobs
//!
//! Reads whole files as text and replaces outputs atomically: content goes to
//! a temporary file in the destination directory, which is then renamed over
//! the target.

use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

use crate::io::configuration::MAP_EXTENSION;
use crate::io::error::{MapError, Result, WithPath};
use crate::io::prompt::confirm_overwrite;

/// What to do when an output path already exists
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverwritePolicy {
    /// Replace existing files
    Allow,
    /// Fail with [`MapError::OutputExists`]
    Refuse,
    /// Ask on the terminal
    Confirm,
}

/// Whole-file reads and atomic writes
#[derive(Debug, Clone)]
pub struct FileStore {
    overwrite: OverwritePolicy,
}

impl FileStore {
    /// Create a store with the given overwrite behaviour
    pub const fn new(overwrite: OverwritePolicy) -> Self {
        Self { overwrite }
    }

    /// Configured overwrite behaviour
    pub const fn overwrite_policy(&self) -> OverwritePolicy {
        self.overwrite
    }

    /// Read a file into a string
    ///
    /// # Errors
    ///
    /// Returns [`MapError::FileSystem`] if the file cannot be read as UTF-8 text
    pub fn read_text(&self, path: &Path) -> Result<String> {
        std::fs::read_to_string(path).with_path(path, "read")
    }

    /// Check that `path` may be written, asking if the policy says so
    ///
    /// # Errors
    ///
    /// Returns [`MapError::OutputExists`] if the file exists and overwriting
    /// is refused or declined
    pub fn prepare_output(&self, path: &Path) -> Result<()> {
        if !path.exists() {
            return Ok(());
        }
        let allowed = match self.overwrite {
            OverwritePolicy::Allow => true,
            OverwritePolicy::Refuse => false,
            OverwritePolicy::Confirm => {
                confirm_overwrite(std::io::stdin().lock(), std::io::stderr(), path)
            }
        };
        if allowed {
            Ok(())
        } else {
            Err(MapError::OutputExists {
                path: path.to_path_buf(),
            })
        }
    }

    /// Replace `path` with `text` in one step
    ///
    /// # Errors
    ///
    /// Returns [`MapError::FileSystem`] if the temporary file cannot be
    /// created, written, or moved into place
    pub fn write_atomic(&self, path: &Path, text: &str) -> Result<()> {
        let directory = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut staged =
            NamedTempFile::new_in(directory).with_path(directory, "create temporary file")?;
        staged.write_all(text.as_bytes()).with_path(path, "write")?;
        staged.flush().with_path(path, "write")?;
        staged.persist(path).map_err(|err| MapError::FileSystem {
            path: path.to_path_buf(),
            operation: "replace",
            source: err.error,
        })?;
        tracing::info!(path = %path.display(), bytes = text.len(), "wrote output");
        Ok(())
    }
}

/// Whether a path carries the conventional map extension
pub fn is_map_path(path: &Path) -> bool {
    path.extension()
        .and_then(|extension| extension.to_str())
        .is_some_and(|extension| extension.eq_ignore_ascii_case(MAP_EXTENSION))
}
