//! Progress rendering for the CLI
//!
//! Turns [`ProgressUpdate`] messages into one indicatif bar per file.

use colored::*;
use indicatif::{MultiProgress, ProgressBar, ProgressDrawTarget, ProgressStyle};
use mhash_core::ProgressUpdate;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tokio::sync::mpsc;

const BAR_TEMPLATE: &str = "{msg}\n{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {percent}% | {bytes}/{total_bytes} | {bytes_per_sec} | ETA: {eta}";

/// Render progress updates from a channel until every sender is gone
pub async fn render_progress(mut rx: mpsc::Receiver<ProgressUpdate>) {
    let mut renderer = ProgressRenderer::new();

    while let Some(update) = rx.recv().await {
        renderer.handle_update(update);
    }

    renderer.finish();
}

/// Owns the bars currently on screen
pub struct ProgressRenderer {
    multi: MultiProgress,
    file_bars: HashMap<PathBuf, ProgressBar>,
}

impl ProgressRenderer {
    pub fn new() -> Self {
        Self::with_target(ProgressDrawTarget::stderr())
    }

    /// Renderer drawing nowhere, for tests
    pub fn hidden() -> Self {
        Self::with_target(ProgressDrawTarget::hidden())
    }

    fn with_target(target: ProgressDrawTarget) -> Self {
        Self {
            multi: MultiProgress::with_draw_target(target),
            file_bars: HashMap::new(),
        }
    }

    /// Number of files that have a bar, finished or not
    pub fn bar_count(&self) -> usize {
        self.file_bars.len()
    }

    /// Position of the bar for `path`, if one exists
    pub fn position(&self, path: &Path) -> Option<u64> {
        self.file_bars.get(path).map(ProgressBar::position)
    }

    pub fn handle_update(&mut self, update: ProgressUpdate) {
        let multi = &self.multi;
        let pb = self
            .file_bars
            .entry(update.path.clone())
            .or_insert_with(|| {
                let pb = multi.add(ProgressBar::new(update.total_bytes));
                if let Ok(style) = ProgressStyle::default_bar().template(BAR_TEMPLATE) {
                    pb.set_style(style.progress_chars("#>-"));
                }
                pb.set_message(format!(
                    "{}: {}",
                    "Hashing".bold(),
                    display_name(&update.path).cyan()
                ));
                pb
            });

        // A file that grew while being read overshoots its initial length
        if update.bytes_processed > pb.length().unwrap_or(0) {
            pb.set_length(update.bytes_processed);
        }
        pb.set_position(update.bytes_processed);

        if update.percent >= 100 && !pb.is_finished() {
            pb.finish_with_message(format!(
                "{} {}",
                "✓".green(),
                display_name(&update.path)
            ));
        }
    }

    /// Finish all progress bars
    ///
    /// Bars still running here belong to files that failed or were
    /// cancelled; they are abandoned where they stopped.
    pub fn finish(self) {
        for (path, pb) in self.file_bars {
            if !pb.is_finished() {
                pb.abandon_with_message(format!("{} {}", "✗".red(), display_name(&path)));
            }
        }
    }
}

impl Default for ProgressRenderer {
    fn default() -> Self {
        Self::new()
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
