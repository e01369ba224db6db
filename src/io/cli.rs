//! Command-line interface for the map reconciliation jobs

use crate::codec::encode::EncodeOptions;
use crate::io::error::{Result, invalid_parameter};
use crate::io::files::{FileStore, OverwritePolicy};
use crate::io::jobs::{JobRunner, JobSummary};
use crate::io::progress::ProgressManager;
use crate::io::prompt::ConsoleResolver;
use crate::reconcile::{ConflictResolver, Resolution, ScriptedResolver};
use clap::{Parser, Subcommand, ValueEnum};
use indicatif::MultiProgress;
use std::num::NonZeroUsize;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "gridmerge")]
#[command(
    author,
    version,
    about = "Diff, patch, clean and three-way merge tile map files"
)]
/// Command-line arguments for the map tool
pub struct Cli {
    /// Job to run
    #[command(subcommand)]
    pub command: Command,

    /// Never prompt or draw progress; refuse to overwrite unless forced
    #[arg(short, long, global = true)]
    pub silent: bool,

    /// Overwrite existing output files
    #[arg(short, long, global = true)]
    pub force: bool,

    /// Worker threads for encoding (defaults to available cores)
    #[arg(short = 'j', long, global = true, value_name = "N")]
    pub threads: Option<usize>,

    /// Increase log detail
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Available jobs
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Write the cells that changed between two maps as records
    Diff {
        /// Map before the change
        old: PathBuf,
        /// Map after the change
        new: PathBuf,
        /// Record file to write
        diff_out: PathBuf,
    },
    /// Apply a record file to a map
    Patch {
        /// Map to patch
        old: PathBuf,
        /// Record file produced by `diff`
        diff: PathBuf,
        /// Patched map to write
        new_out: PathBuf,
    },
    /// Build a map from a record file
    Pack {
        /// Record file produced by `unpack`
        unpacked: PathBuf,
        /// Map to write
        packed_out: PathBuf,
    },
    /// Write every cell of a map as records
    Unpack {
        /// Map to unpack
        packed: PathBuf,
        /// Record file to write
        unpacked_out: PathBuf,
    },
    /// Re-encode a map keeping the tile codes of its predecessor
    Clean {
        /// Map whose codes should be kept
        old: PathBuf,
        /// Map to re-encode
        new: PathBuf,
        /// Cleaned map to write
        clean_out: PathBuf,
    },
    /// Three-way merge of a map edited on two sides
    Merge {
        /// Common ancestor
        original: PathBuf,
        /// Our side
        local: PathBuf,
        /// Their side
        remote: PathBuf,
        /// Merged map to write
        out: PathBuf,
        /// How to settle cells both sides changed differently
        #[arg(long, value_enum, default_value_t = ConflictStrategy::Ask)]
        on_conflict: ConflictStrategy,
    },
}

/// Conflict handling for `merge`
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictStrategy {
    /// Prompt on the terminal (abort when silent)
    Ask,
    /// Take our side for every conflict
    Local,
    /// Take their side for every conflict
    Remote,
    /// Stop at the first conflict
    Abort,
}

impl Cli {
    /// Overwrite behaviour implied by the flags
    pub const fn overwrite_policy(&self) -> OverwritePolicy {
        if self.force {
            OverwritePolicy::Allow
        } else if self.silent {
            OverwritePolicy::Refuse
        } else {
            OverwritePolicy::Confirm
        }
    }

    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.silent
    }

    /// Encoder settings implied by `--threads`
    ///
    /// # Errors
    ///
    /// Returns an error if zero threads are requested
    pub fn encode_options(&self) -> Result<EncodeOptions> {
        match self.threads {
            None => Ok(EncodeOptions::default()),
            Some(count) => NonZeroUsize::new(count)
                .map(|workers| EncodeOptions { workers })
                .ok_or_else(|| invalid_parameter("threads", &count, &"must be at least 1")),
        }
    }

    /// Resolver for `merge` conflicts
    pub fn conflict_resolver(&self, strategy: ConflictStrategy) -> Box<dyn ConflictResolver> {
        match strategy {
            ConflictStrategy::Ask if !self.silent => Box::new(ConsoleResolver::stdio()),
            ConflictStrategy::Ask | ConflictStrategy::Abort => {
                Box::new(ScriptedResolver::always(Resolution::Abort))
            }
            ConflictStrategy::Local => Box::new(ScriptedResolver::always(Resolution::UseLocal)),
            ConflictStrategy::Remote => Box::new(ScriptedResolver::always(Resolution::UseRemote)),
        }
    }
}

/// Runs the job selected on the command line
pub struct CommandProcessor {
    cli: Cli,
    progress: ProgressManager,
}

impl CommandProcessor {
    /// Create a new processor with the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress = if cli.should_show_progress() {
            ProgressManager::new()
        } else {
            ProgressManager::hidden()
        };
        Self { cli, progress }
    }

    /// Progress display the job draws on, for log output to pause
    pub fn display(&self) -> MultiProgress {
        self.progress.display()
    }

    /// Run the selected job
    ///
    /// # Errors
    ///
    /// Returns an error if the parameters are invalid or the job fails
    pub fn process(self) -> Result<JobSummary> {
        let mut runner = JobRunner::new(
            FileStore::new(self.cli.overwrite_policy()),
            self.cli.encode_options()?,
            self.progress,
        );

        match &self.cli.command {
            Command::Diff { old, new, diff_out } => runner.diff(old, new, diff_out),
            Command::Patch { old, diff, new_out } => runner.patch(old, diff, new_out),
            Command::Pack {
                unpacked,
                packed_out,
            } => runner.pack(unpacked, packed_out),
            Command::Unpack {
                packed,
                unpacked_out,
            } => runner.unpack(packed, unpacked_out),
            Command::Clean {
                old,
                new,
                clean_out,
            } => runner.clean(old, new, clean_out),
            Command::Merge {
                original,
                local,
                remote,
                out,
                on_conflict,
            } => {
                let mut resolver = self.cli.conflict_resolver(*on_conflict);
                runner.merge(original, local, remote, out, resolver.as_mut())
            }
        }
    }
}
