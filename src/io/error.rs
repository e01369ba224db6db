//! Error types and path context for map operations

use std::fmt;
use std::path::{Path, PathBuf};

use crate::io::configuration::{EXIT_ABORTED, EXIT_FAILURE, EXIT_VALIDATION};
use crate::spatial::{Bounds, Coordinate};

/// Main error type for all map operations
#[derive(Debug)]
pub enum MapError {
    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Map text could not be decoded
    Parse {
        /// 1-based line number
        line: usize,
        /// What was wrong with the line
        reason: String,
    },

    /// A level row uses a code the dictionary does not define
    UnknownCode {
        /// 1-based line number
        line: usize,
        /// The undefined code
        code: String,
    },

    /// A record line is missing one of its separators
    MalformedRecord {
        /// 1-based line number
        line: usize,
        /// The offending line
        text: String,
    },

    /// Merge inputs do not share one bounding box
    BoundsMismatch {
        /// Original map bounds
        original: Option<Bounds>,
        /// Local map bounds
        local: Option<Bounds>,
        /// Remote map bounds
        remote: Option<Bounds>,
    },

    /// The conflict resolver asked to stop the merge
    MergeAborted {
        /// Conflict being resolved when the merge stopped
        at: Coordinate,
    },

    /// Cells inside the bounding box have no content
    IncompleteGrid {
        /// Number of missing cells
        holes: usize,
        /// First missing cell in canonical order
        first: Coordinate,
    },

    /// A tile value has no dictionary form that decodes back to it
    UnencodableContent {
        /// The offending value
        value: String,
    },

    /// Grid has no cells, so its size is unknown
    EmptyGrid,

    /// Output file exists and overwriting was not allowed
    OutputExists {
        /// Path of the existing file
        path: PathBuf,
    },

    /// Parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Internal computation produced an inconsistent result
    Computation {
        /// Name of the computation that failed
        operation: &'static str,
        /// Description of the failure
        reason: String,
    },

    /// A worker thread panicked
    WorkerPanicked {
        /// Work the thread was doing
        task: &'static str,
    },
}

fn describe_bounds(bounds: Option<&Bounds>) -> String {
    bounds.map_or_else(|| "unknown".to_string(), ToString::to_string)
}

impl fmt::Display for MapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
            Self::Parse { line, reason } => {
                write!(f, "Parse error on line {line}: {reason}")
            }
            Self::UnknownCode { line, code } => {
                write!(f, "Unknown tile code '{code}' on line {line}")
            }
            Self::MalformedRecord { line, text } => {
                write!(f, "Malformed record on line {line}: '{text}'")
            }
            Self::BoundsMismatch {
                original,
                local,
                remote,
            } => {
                write!(
                    f,
                    "Map sizes differ (original {}, local {}, remote {})",
                    describe_bounds(original.as_ref()),
                    describe_bounds(local.as_ref()),
                    describe_bounds(remote.as_ref())
                )
            }
            Self::MergeAborted { at } => {
                write!(f, "Merge aborted at {at}")
            }
            Self::IncompleteGrid { holes, first } => {
                write!(f, "Grid has {holes} cells without content (first at {first})")
            }
            Self::UnencodableContent { value } => {
                write!(f, "Tile content '{value}' is not a parenthesised descriptor")
            }
            Self::EmptyGrid => write!(f, "Grid has no cells"),
            Self::OutputExists { path } => {
                write!(f, "Output '{}' already exists", path.display())
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::Computation { operation, reason } => {
                write!(f, "Computation error in {operation}: {reason}")
            }
            Self::WorkerPanicked { task } => {
                write!(f, "Worker thread panicked during {task}")
            }
        }
    }
}

impl std::error::Error for MapError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl MapError {
    /// Process exit code for this error
    ///
    /// Validation failures and resolver aborts are distinguished from I/O and
    /// decode failures.
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::BoundsMismatch { .. }
            | Self::OutputExists { .. }
            | Self::InvalidParameter { .. }
            | Self::UnencodableContent { .. } => EXIT_VALIDATION,
            Self::MergeAborted { .. } => EXIT_ABORTED,
            _ => EXIT_FAILURE,
        }
    }
}

/// Convenience type alias for map results
pub type Result<T> = std::result::Result<T, MapError>;

/// Attaches a path to I/O failures
pub trait WithPath<T> {
    /// Convert an I/O error into [`MapError::FileSystem`] naming `path`
    ///
    /// # Errors
    ///
    /// Propagates the original error with the path and operation applied
    fn with_path(self, path: &Path, operation: &'static str) -> Result<T>;
}

impl<T> WithPath<T> for std::result::Result<T, std::io::Error> {
    fn with_path(self, path: &Path, operation: &'static str) -> Result<T> {
        self.map_err(|source| MapError::FileSystem {
            path: path.to_path_buf(),
            operation,
            source,
        })
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> MapError {
    MapError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create a decode error for a line
pub fn parse_error(line: usize, reason: &impl ToString) -> MapError {
    MapError::Parse {
        line,
        reason: reason.to_string(),
    }
}

/// Create a computation error
pub fn computation_error(operation: &'static str, reason: &impl ToString) -> MapError {
    MapError::Computation {
        operation,
        reason: reason.to_string(),
    }
}
