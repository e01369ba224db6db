//! File-level jobs: load inputs, run a reconciliation, write the result
//!
//! Input maps are decoded on scoped threads, one per file, and handed back in
//! argument order. A failure in any loader fails the job before anything is
//! written.

use std::fmt;
use std::path::Path;
use std::thread;

use crate::codec::decode::{MapDocument, ParseMode, parse_named};
use crate::codec::encode::{EncodeOptions, encode};
use crate::codec::records::{parse_records, render_record_groups};
use crate::io::error::{MapError, Result};
use crate::io::files::{FileStore, is_map_path};
use crate::io::progress::ProgressManager;
use crate::reconcile::{
    Conflict, ConflictResolver, Resolution, clean, diff, merge, pack, patch, unpack,
};
use crate::spatial::Bounds;

/// Outcome of a successful job
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobSummary {
    /// Diff finished
    Diff {
        /// Number of differing cells written
        differences: usize,
    },
    /// Patch finished
    Patch {
        /// Number of records applied
        records: usize,
    },
    /// Pack finished
    Pack {
        /// Number of records read
        records: usize,
        /// Bounds of the packed map
        bounds: Bounds,
    },
    /// Unpack finished
    Unpack {
        /// Number of records written
        records: usize,
    },
    /// Clean finished
    Clean {
        /// Values that kept their previous code
        kept: usize,
        /// Values that needed a new code
        changed: usize,
    },
    /// Merge finished
    Merge {
        /// Conflicting cells
        conflicts: usize,
        /// Cells taken from local or remote without conflict
        changes: usize,
    },
}

impl fmt::Display for JobSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Diff { differences: 0 } => write!(f, "Files do match"),
            Self::Diff { differences } => write!(f, "Wrote out {differences} differences"),
            Self::Patch { records } => write!(f, "Applied {records} records"),
            Self::Pack { records, bounds } => {
                write!(f, "Packed {records} records, bounds: {bounds}")
            }
            Self::Unpack { records } => write!(f, "Wrote out {records} records"),
            Self::Clean { kept, changed } => {
                write!(f, "Kept {kept} tile codes, assigned {changed}")
            }
            Self::Merge { conflicts, changes } => {
                write!(f, "Merged {changes} changes with {conflicts} conflicts")
            }
        }
    }
}

/// Runs jobs against the filesystem
pub struct JobRunner {
    store: FileStore,
    encode_options: EncodeOptions,
    progress: ProgressManager,
}

impl JobRunner {
    /// Create a runner
    pub const fn new(
        store: FileStore,
        encode_options: EncodeOptions,
        progress: ProgressManager,
    ) -> Self {
        Self {
            store,
            encode_options,
            progress,
        }
    }

    /// Write the cells of `revised` that differ from `original` as records
    ///
    /// # Errors
    ///
    /// Returns an error if the output is refused, an input fails to load, or
    /// the output cannot be written
    pub fn diff(&mut self, original: &Path, revised: &Path, output: &Path) -> Result<JobSummary> {
        self.prepare(output)?;
        let [old, new] = self.load_maps([(original, ParseMode::Full), (revised, ParseMode::Full)])?;

        self.progress.stage("comparing");
        let result = diff(&old.grid, &new.grid);
        self.write(output, &result.render())?;

        Ok(self.done(JobSummary::Diff {
            differences: result.count(),
        }))
    }

    /// Apply a record file to a map
    ///
    /// # Errors
    ///
    /// Returns an error if the output is refused, an input fails to load, a
    /// record is malformed, or the patched map cannot be encoded or written
    pub fn patch(&mut self, original: &Path, records: &Path, output: &Path) -> Result<JobSummary> {
        self.prepare(output)?;
        let [map] = self.load_maps([(original, ParseMode::Full)])?;
        let records = parse_records(&self.store.read_text(records)?)?;

        self.progress.stage("patching");
        let grid = patch(&map.grid, &records);
        self.progress.stage("saving");
        let encoded = encode(&grid, Some(&map.codes), &self.encode_options)?;
        self.write(output, &encoded.text)?;

        Ok(self.done(JobSummary::Patch {
            records: records.len(),
        }))
    }

    /// Build a map file from unpacked records
    ///
    /// # Errors
    ///
    /// Returns an error if the output is refused, the records cannot be read,
    /// or the packed map cannot be encoded or written
    pub fn pack(&mut self, unpacked: &Path, output: &Path) -> Result<JobSummary> {
        self.prepare(output)?;
        self.progress.stage("loading");
        let records = parse_records(&self.store.read_text(unpacked)?)?;

        self.progress.stage("flipping");
        let grid = pack(&records);
        let bounds = grid.bounds().ok_or(MapError::EmptyGrid)?;
        tracing::info!(%bounds, "saving");
        self.progress.stage("saving");
        let encoded = encode(&grid, None, &self.encode_options)?;
        self.write(output, &encoded.text)?;

        Ok(self.done(JobSummary::Pack {
            records: records.len(),
            bounds,
        }))
    }

    /// Write every cell of a map as records
    ///
    /// # Errors
    ///
    /// Returns an error if the output is refused, the map fails to load, or
    /// the output cannot be written
    pub fn unpack(&mut self, packed: &Path, output: &Path) -> Result<JobSummary> {
        self.prepare(output)?;
        let [map] = self.load_maps([(packed, ParseMode::Full)])?;

        self.progress.stage("unpacking");
        let levels = unpack(&map.grid);
        let records = levels.iter().map(Vec::len).sum();
        self.write(output, &render_record_groups(&levels))?;

        Ok(self.done(JobSummary::Unpack { records }))
    }

    /// Re-encode `revised` keeping the codes used by `original`
    ///
    /// # Errors
    ///
    /// Returns an error if the output is refused, an input fails to load, or
    /// the map cannot be encoded or written
    pub fn clean(&mut self, original: &Path, revised: &Path, output: &Path) -> Result<JobSummary> {
        self.prepare(output)?;
        let [old, new] = self.load_maps([
            (original, ParseMode::DictionaryOnly),
            (revised, ParseMode::Full),
        ])?;

        self.progress.stage("cleaning");
        let cleaned = clean(&old.codes, &new.grid, &self.encode_options)?;
        self.write(output, &cleaned.encoded.text)?;

        Ok(self.done(JobSummary::Clean {
            kept: cleaned.kept,
            changed: cleaned.reassigned + cleaned.added,
        }))
    }

    /// Three-way merge of map files, asking `resolver` about conflicts
    ///
    /// Spinners are cleared while `resolver` runs so an interactive prompt
    /// stays readable.
    ///
    /// # Errors
    ///
    /// Returns an error if the output is refused, an input fails to load, the
    /// maps differ in size, the resolver aborts, or the result cannot be
    /// encoded or written. Nothing is written on error.
    pub fn merge<R>(
        &mut self,
        original: &Path,
        local: &Path,
        remote: &Path,
        output: &Path,
        resolver: &mut R,
    ) -> Result<JobSummary>
    where
        R: ConflictResolver + ?Sized,
    {
        self.prepare(output)?;
        let [base, ours, theirs] = self.load_maps([
            (original, ParseMode::Full),
            (local, ParseMode::Full),
            (remote, ParseMode::Full),
        ])?;

        self.progress.stage("merging");
        let mut paused = PausingResolver {
            progress: &self.progress,
            inner: resolver,
        };
        let outcome = merge(&base.grid, &ours.grid, &theirs.grid, &mut paused)?;
        self.progress.stage("saving");
        let encoded = encode(&outcome.grid, Some(&base.codes), &self.encode_options)?;
        self.write(output, &encoded.text)?;

        Ok(self.done(JobSummary::Merge {
            conflicts: outcome.conflicts,
            changes: outcome.local_changes + outcome.remote_changes,
        }))
    }

    fn load_maps<const N: usize>(
        &self,
        requests: [(&Path, ParseMode); N],
    ) -> Result<[MapDocument; N]> {
        let store = &self.store;
        let loaded = thread::scope(|scope| {
            let handles: Vec<_> = requests
                .iter()
                .map(|&(path, mode)| {
                    let bar = self.progress.start_load(path);
                    scope.spawn(move || {
                        let document = load_document(store, path, mode);
                        document.as_ref().map_or_else(
                            |_| bar.abandon_with_message("failed"),
                            |loaded| ProgressManager::finish_load(&bar, loaded.grid.len()),
                        );
                        document
                    })
                })
                .collect();

            handles
                .into_iter()
                .map(|handle| {
                    handle.join().map_err(|_payload| MapError::WorkerPanicked {
                        task: "map loading",
                    })?
                })
                .collect::<Result<Vec<MapDocument>>>()
        })?;

        loaded.try_into().map_err(|_partial: Vec<MapDocument>| MapError::Computation {
            operation: "map loading",
            reason: "loader count does not match request count".to_string(),
        })
    }

    // An overwrite prompt must not be drawn over by a spinner
    fn prepare(&self, output: &Path) -> Result<()> {
        let store = &self.store;
        self.progress.suspend(|| store.prepare_output(output))
    }

    fn write(&mut self, output: &Path, text: &str) -> Result<()> {
        self.progress.stage("writing");
        self.store.write_atomic(output, text)
    }

    fn done(&mut self, summary: JobSummary) -> JobSummary {
        self.progress.finish(summary.to_string());
        summary
    }
}

/// Forwards conflicts to `inner` with the spinners cleared
struct PausingResolver<'a, R: ?Sized> {
    progress: &'a ProgressManager,
    inner: &'a mut R,
}

impl<R: ConflictResolver + ?Sized> ConflictResolver for PausingResolver<'_, R> {
    fn resolve(&mut self, conflict: &Conflict<'_>) -> Resolution {
        self.progress.suspend(|| self.inner.resolve(conflict))
    }
}

fn load_document(store: &FileStore, path: &Path, mode: ParseMode) -> Result<MapDocument> {
    if !is_map_path(path) {
        tracing::debug!(path = %path.display(), "map input without the map extension");
    }
    let text = store.read_text(path)?;
    let name = path
        .file_name()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string();
    parse_named(&name, &text, mode)
}
