//! Progress reporting utilities

use indicatif::{ProgressBar, ProgressStyle};

/// Progress bar over the prune loop
#[derive(Debug)]
pub struct PruneProgress {
    pub bar: Option<ProgressBar>,
}

impl PruneProgress {
    /// Create a progress bar for `total` deletions
    pub fn new(total: u64, dry_run: bool) -> Self {
        let message = if dry_run { "Simulating prune" } else { "Pruning" };
        Self {
            bar: Some(create_progress_bar(total, message)),
        }
    }

    /// Create minimal progress reporter (no progress bar)
    pub fn new_minimal() -> Self {
        Self { bar: None }
    }

    /// Run `f` with the bar hidden so report lines are not overdrawn
    pub fn suspend<F: FnOnce() -> R, R>(&self, f: F) -> R {
        match &self.bar {
            Some(pb) => pb.suspend(f),
            None => f(),
        }
    }

    /// Advance by one finished deletion
    pub fn inc(&self, snapshot: &str) {
        if let Some(pb) = &self.bar {
            pb.set_message(snapshot.to_string());
            pb.inc(1);
        }
    }

    pub fn finish(&mut self, message: &str) {
        if let Some(pb) = self.bar.take() {
            pb.finish_with_message(message.to_string());
        }
    }
}

impl Drop for PruneProgress {
    fn drop(&mut self) {
        if let Some(pb) = self.bar.take() {
            pb.finish_and_clear();
        }
    }
}

/// Create a progress bar with known total
fn create_progress_bar(total: u64, message: &str) -> ProgressBar {
    let pb = ProgressBar::new(total);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos:>4}/{len:4} {eta} {msg}")
            .expect("Invalid progress template")
            .progress_chars("#>-"),
    );
    pb.set_message(message.to_string());
    pb
}
