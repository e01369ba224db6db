//! Three-way merge of tile grids
//!
//! Every cell of the shared box is classified against the original:
//!
//! | local     | remote    | result                         |
//! |-----------|-----------|--------------------------------|
//! | unchanged | unchanged | original                       |
//! | changed   | unchanged | local                          |
//! | unchanged | changed   | remote                         |
//! | changed   | changed   | local if equal, else conflict  |
//!
//! Conflicts are handed to a [`ConflictResolver`]. The engine never touches a
//! terminal itself; interactive prompting lives in `io::prompt`.

use std::collections::VecDeque;
use std::fmt;

use crate::io::configuration::HOLE_SENTINEL;
use crate::io::error::{MapError, Result};
use crate::spatial::{Content, Coordinate, Grid};

/// A cell where local and remote both diverge from the original and from
/// each other
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Conflict<'a> {
    /// Conflicting cell
    pub at: Coordinate,
    /// Local content
    pub local: &'a str,
    /// Remote content
    pub remote: &'a str,
    /// Common ancestor content
    pub original: &'a str,
}

impl fmt::Display for Conflict<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} local and remote don't match original and differ [\n\nLOCAL:  {} \n\nREMOTE: {} \n\nORIGIN: {}\n\n]",
            self.at, self.local, self.remote, self.original
        )
    }
}

/// Decision for a single conflict
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Take the local content
    UseLocal,
    /// Take the remote content
    UseRemote,
    /// Write the given content instead of either side
    UseCustom(String),
    /// Take local here and for every later conflict
    MakeLocalSticky,
    /// Take remote here and for every later conflict
    MakeRemoteSticky,
    /// Stop the merge without producing output
    Abort,
}

/// Supplies decisions for merge conflicts
///
/// Called synchronously, once per conflict that is not already covered by a
/// sticky decision. Closures of the right shape implement it directly.
pub trait ConflictResolver {
    /// Decide how to resolve `conflict`
    fn resolve(&mut self, conflict: &Conflict<'_>) -> Resolution;
}

impl<F> ConflictResolver for F
where
    F: FnMut(&Conflict<'_>) -> Resolution,
{
    fn resolve(&mut self, conflict: &Conflict<'_>) -> Resolution {
        self(conflict)
    }
}

/// Resolver that replays queued decisions, then repeats a fallback
///
/// Every conflict it is asked about is remembered in order.
#[derive(Debug, Clone)]
pub struct ScriptedResolver {
    queued: VecDeque<Resolution>,
    fallback: Resolution,
    seen: Vec<Coordinate>,
}

impl ScriptedResolver {
    /// Answer every conflict the same way
    pub fn always(resolution: Resolution) -> Self {
        Self::sequence(None, resolution)
    }

    /// Answer with `decisions` in order, then with `fallback`
    pub fn sequence(decisions: impl IntoIterator<Item = Resolution>, fallback: Resolution) -> Self {
        Self {
            queued: decisions.into_iter().collect(),
            fallback,
            seen: Vec::new(),
        }
    }

    /// Cells this resolver was consulted about
    pub fn seen(&self) -> &[Coordinate] {
        &self.seen
    }
}

impl ConflictResolver for ScriptedResolver {
    fn resolve(&mut self, conflict: &Conflict<'_>) -> Resolution {
        self.seen.push(conflict.at);
        self.queued
            .pop_front()
            .unwrap_or_else(|| self.fallback.clone())
    }
}

/// Merged grid and bookkeeping
#[derive(Debug, Clone, Default)]
pub struct MergeOutcome {
    /// Merged cells
    pub grid: Grid,
    /// Cells taken from local because only local changed (or both agreed)
    pub local_changes: usize,
    /// Cells taken from remote because only remote changed
    pub remote_changes: usize,
    /// Cells where local and remote disagreed
    pub conflicts: usize,
    /// Conflicts settled by an earlier sticky decision
    pub auto_resolved: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Sticky {
    Undecided,
    Local,
    Remote,
}

/// Merge `local` and `remote` edits of `original`
///
/// # Errors
///
/// Returns an error if:
/// - The three bounding boxes are not identical ([`MapError::BoundsMismatch`])
/// - The resolver answers [`Resolution::Abort`] ([`MapError::MergeAborted`])
/// - A merged cell would be a hole because the side it is taken from has no
///   stored value there ([`MapError::IncompleteGrid`])
pub fn merge<R>(
    original: &Grid,
    local: &Grid,
    remote: &Grid,
    resolver: &mut R,
) -> Result<MergeOutcome>
where
    R: ConflictResolver + ?Sized,
{
    let bounds = original.bounds();
    if bounds != local.bounds() || bounds != remote.bounds() {
        return Err(MapError::BoundsMismatch {
            original: bounds,
            local: local.bounds(),
            remote: remote.bounds(),
        });
    }

    let mut outcome = MergeOutcome::default();
    let Some(bounds) = bounds else {
        return Ok(outcome);
    };

    let mut sticky = Sticky::Undecided;
    let mut holes = 0;
    let mut first_hole = None;
    for at in bounds.cells() {
        let base = original.shared_content_at(at);
        let ours = local.shared_content_at(at);
        let theirs = remote.shared_content_at(at);

        let chosen = match (ours != base, theirs != base) {
            (false, false) => base,
            (true, false) => {
                outcome.local_changes += 1;
                ours
            }
            (false, true) => {
                outcome.remote_changes += 1;
                theirs
            }
            (true, true) if ours == theirs => {
                outcome.local_changes += 1;
                ours
            }
            (true, true) => {
                outcome.conflicts += 1;
                match sticky {
                    Sticky::Local => {
                        outcome.auto_resolved += 1;
                        ours
                    }
                    Sticky::Remote => {
                        outcome.auto_resolved += 1;
                        theirs
                    }
                    Sticky::Undecided => {
                        let conflict = Conflict {
                            at,
                            local: &ours,
                            remote: &theirs,
                            original: &base,
                        };
                        match resolver.resolve(&conflict) {
                            Resolution::UseLocal => ours,
                            Resolution::UseRemote => theirs,
                            Resolution::UseCustom(value) => Content::from(value),
                            Resolution::MakeLocalSticky => {
                                sticky = Sticky::Local;
                                ours
                            }
                            Resolution::MakeRemoteSticky => {
                                sticky = Sticky::Remote;
                                theirs
                            }
                            Resolution::Abort => {
                                tracing::warn!(%at, "merge aborted by resolver");
                                return Err(MapError::MergeAborted { at });
                            }
                        }
                    }
                }
            }
        };
        if &*chosen == HOLE_SENTINEL {
            holes += 1;
            first_hole = first_hole.or(Some(at));
            continue;
        }
        outcome.grid.set(at, chosen);
    }

    if let Some(first) = first_hole {
        tracing::warn!(holes, %first, "merged map would contain holes");
        return Err(MapError::IncompleteGrid { holes, first });
    }

    tracing::info!(
        local = outcome.local_changes,
        remote = outcome.remote_changes,
        conflicts = outcome.conflicts,
        "merged maps"
    );
    Ok(outcome)
}
