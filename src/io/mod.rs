//! Input/output around the core engine
//!
//! This module contains:
//! - Errors, constants and logging setup
//! - File access, prompts and progress display
//! - The job runner and the command-line surface

/// Command-line parsing and dispatch
pub mod cli;
/// Format constants and runtime defaults
pub mod configuration;
/// Error types and path context
pub mod error;
/// Whole-file reads and atomic writes
pub mod files;
/// File-level jobs with parallel loading
pub mod jobs;
/// Tracing subscriber setup
pub mod logging;
/// Progress display
pub mod progress;
/// Terminal prompts
pub mod prompt;
