//! Spinner display for job stages and parallel file loads

use indicatif::{MultiProgress, ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::borrow::Cow;
use std::path::Path;
use std::sync::LazyLock;
use std::time::Duration;

use crate::io::configuration::PROGRESS_TICK_MS;

/// Coordinates progress display for one job
///
/// Each input file gets its own spinner while it loads; a single stage
/// spinner follows the job through comparing, encoding and writing. A hidden
/// manager accepts the same calls and draws nothing.
pub struct ProgressManager {
    multi_progress: MultiProgress,
    stage_bar: Option<ProgressBar>,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

static LOAD_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_spinner()
        .template("{spinner:.cyan} [{elapsed_precise}] {prefix:.bold} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
});

static STAGE_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_spinner()
        .template("{spinner:.green} [{elapsed_precise}] {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
});

impl ProgressManager {
    /// Create a manager drawing to stderr
    pub fn new() -> Self {
        Self {
            multi_progress: MultiProgress::new(),
            stage_bar: None,
        }
    }

    /// Create a manager that draws nothing
    pub fn hidden() -> Self {
        Self {
            multi_progress: MultiProgress::with_draw_target(ProgressDrawTarget::hidden()),
            stage_bar: None,
        }
    }

    /// Handle to the underlying display, for writers that must pause it
    pub fn display(&self) -> MultiProgress {
        self.multi_progress.clone()
    }

    /// Run `f` with every spinner cleared from the terminal
    ///
    /// Anything `f` writes to the terminal stays put; spinners are redrawn
    /// below it afterwards.
    pub fn suspend<T>(&self, f: impl FnOnce() -> T) -> T {
        self.multi_progress.suspend(f)
    }

    /// Add a spinner for a file that is about to be loaded
    pub fn start_load(&self, path: &Path) -> ProgressBar {
        let display_name = path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();
        let bar = self.multi_progress.add(ProgressBar::new_spinner());
        bar.set_style(LOAD_STYLE.clone());
        bar.set_prefix(display_name);
        bar.set_message("loading");
        bar.enable_steady_tick(Duration::from_millis(PROGRESS_TICK_MS));
        bar
    }

    /// Mark a load spinner as done
    pub fn finish_load(bar: &ProgressBar, cells: usize) {
        bar.finish_with_message(format!("✓ {cells} cells"));
    }

    /// Show the current stage of the job
    pub fn stage(&mut self, message: impl Into<Cow<'static, str>>) {
        let bar = self.stage_bar.get_or_insert_with(|| {
            let bar = self.multi_progress.add(ProgressBar::new_spinner());
            bar.set_style(STAGE_STYLE.clone());
            bar.enable_steady_tick(Duration::from_millis(PROGRESS_TICK_MS));
            bar
        });
        bar.set_message(message);
    }

    /// Finish the stage spinner and clear all displays
    pub fn finish(&mut self, message: impl Into<Cow<'static, str>>) {
        if let Some(bar) = self.stage_bar.take() {
            bar.finish_with_message(message);
        }
        let _ = self.multi_progress.clear();
    }
}
