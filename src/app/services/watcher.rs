//! Input directory watcher with file-stability tracking
//!
//! Legacy systems drop CSV files into the input directory over an unknown
//! span of time. The watcher polls on a fixed interval and only hands a file
//! to the pipeline once its size has held steady for a full poll, so a file
//! still being written is never processed half-way.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};
use walkdir::WalkDir;

use crate::app::services::file_processor::{FileOutcome, FileProcessor};
use crate::config::Config;
use crate::constants::INPUT_FILE_EXTENSION;
use crate::Result;

/// Observation outcome for one file in one poll cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileStatus {
    /// The file is being tracked but is not yet eligible for processing
    Watched,

    /// The file's size held steady over a full poll and it can be processed
    Stable,
}

/// Per-path size tracking across poll cycles
///
/// The tracker is owned by the watcher and only ever touched from inside a
/// poll cycle; cycles never overlap, so no further synchronization is
/// needed. State is keyed by path, not file identity: a renamed or replaced
/// file starts over as unseen.
#[derive(Debug, Default)]
pub struct StabilityTracker {
    watched: HashMap<PathBuf, u64>,
}

impl StabilityTracker {
    /// Create an empty tracker
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one sighting of a file and judge its stability
    ///
    /// A first sighting only starts tracking. On later sightings the file is
    /// stable once its size matches the stored size and is non-zero; a size
    /// change (a file still being written) stores the new size and resets
    /// eligibility.
    pub fn observe(&mut self, path: &Path, current_size: u64) -> FileStatus {
        match self.watched.get_mut(path) {
            Some(stored_size) => {
                if *stored_size == current_size && current_size > 0 {
                    FileStatus::Stable
                } else {
                    *stored_size = current_size;
                    FileStatus::Watched
                }
            }
            None => {
                self.watched.insert(path.to_path_buf(), current_size);
                FileStatus::Watched
            }
        }
    }

    /// Stop tracking a path after it has been processed
    ///
    /// Called on success and on error alike; if the file reappears later it
    /// is treated as unseen.
    pub fn complete(&mut self, path: &Path) {
        self.watched.remove(path);
    }

    /// Number of paths currently being tracked
    pub fn tracked_count(&self) -> usize {
        self.watched.len()
    }
}

/// Polling watcher over the input directory
pub struct DirectoryWatcher {
    input_dir: PathBuf,
    poll_interval: std::time::Duration,
    tracker: StabilityTracker,
    processor: FileProcessor,
}

impl DirectoryWatcher {
    /// Create a watcher over the configured input directory
    pub fn new(config: &Config, processor: FileProcessor) -> Self {
        Self {
            input_dir: config.input_dir.clone(),
            poll_interval: config.poll_interval(),
            tracker: StabilityTracker::new(),
            processor,
        }
    }

    /// Run poll cycles until cancelled
    ///
    /// Cancellation is honored between files: an in-flight file finishes its
    /// writes and its move before the watcher returns. A new cycle never
    /// starts while the previous one is still running.
    pub async fn run(&mut self, cancel: CancellationToken) -> Result<()> {
        info!(
            "Watching {} every {:?}",
            self.input_dir.display(),
            self.poll_interval
        );

        let mut interval = tokio::time::interval(self.poll_interval);
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    info!("Watcher stopping");
                    return Ok(());
                }
                _ = interval.tick() => {
                    self.poll_cycle(&cancel).await;
                }
            }
        }
    }

    /// Run one poll cycle: discover files, judge stability, process the
    /// stable ones sequentially
    ///
    /// Public so one-shot invocations and tests can drive cycles without the
    /// timer.
    pub async fn poll_cycle(&mut self, cancel: &CancellationToken) {
        debug!("Monitoring incoming CSV dir: {}", self.input_dir.display());

        for path in self.discover_stable_files() {
            if cancel.is_cancelled() {
                return;
            }

            match self.processor.process_file(&path).await {
                Ok(FileOutcome::Delivered {
                    lines,
                    groups,
                    failed_groups,
                }) => {
                    info!(
                        "Processed {}: {} lines in {} groups ({} failed)",
                        path.display(),
                        lines,
                        groups,
                        failed_groups
                    );
                }
                Ok(FileOutcome::Rejected { lines, error_lines }) => {
                    info!(
                        "Rejected {}: {} of {} lines failed translation",
                        path.display(),
                        error_lines,
                        lines
                    );
                }
                Err(e) => {
                    error!("Exception occurred processing {}: {}", path.display(), e);
                    match self.processor.quarantine(&path) {
                        Ok(target) => {
                            error!("Moved file to error directory {}", target.display());
                        }
                        Err(move_error) => {
                            // Leave the file in place; it restarts as unseen
                            // and is retried on a later cycle
                            error!(
                                "Unable to move {} to error directory: {}",
                                path.display(),
                                move_error
                            );
                        }
                    }
                }
            }

            self.tracker.complete(&path);
        }
    }

    /// Scan the input directory and return the files stable this cycle
    fn discover_stable_files(&mut self) -> Vec<PathBuf> {
        let mut stable = Vec::new();

        for entry in WalkDir::new(&self.input_dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(false)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !path.is_file()
                || path.extension().and_then(|s| s.to_str()) != Some(INPUT_FILE_EXTENSION)
            {
                continue;
            }

            let size = match entry.metadata() {
                Ok(metadata) => metadata.len(),
                Err(e) => {
                    error!("Unable to calculate size of {}: {}", path.display(), e);
                    continue;
                }
            };

            if self.tracker.observe(path, size) == FileStatus::Stable {
                stable.push(path.to_path_buf());
            }
        }

        stable
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_sighting_is_not_stable() {
        let mut tracker = StabilityTracker::new();
        let path = Path::new("/input/report.csv");

        assert_eq!(tracker.observe(path, 100), FileStatus::Watched);
        assert_eq!(tracker.tracked_count(), 1);
    }

    #[test]
    fn test_unchanged_nonzero_size_becomes_stable() {
        let mut tracker = StabilityTracker::new();
        let path = Path::new("/input/report.csv");

        tracker.observe(path, 100);
        assert_eq!(tracker.observe(path, 100), FileStatus::Stable);
    }

    #[test]
    fn test_growth_resets_eligibility() {
        let mut tracker = StabilityTracker::new();
        let path = Path::new("/input/report.csv");

        tracker.observe(path, 100);
        // Still being written
        assert_eq!(tracker.observe(path, 250), FileStatus::Watched);
        // The new size must now hold steady
        assert_eq!(tracker.observe(path, 250), FileStatus::Stable);
    }

    #[test]
    fn test_zero_size_never_stabilizes() {
        let mut tracker = StabilityTracker::new();
        let path = Path::new("/input/empty.csv");

        tracker.observe(path, 0);
        assert_eq!(tracker.observe(path, 0), FileStatus::Watched);
        assert_eq!(tracker.observe(path, 0), FileStatus::Watched);
    }

    #[test]
    fn test_complete_restarts_tracking() {
        let mut tracker = StabilityTracker::new();
        let path = Path::new("/input/report.csv");

        tracker.observe(path, 100);
        tracker.observe(path, 100);
        tracker.complete(path);
        assert_eq!(tracker.tracked_count(), 0);

        // Reappearing file starts over as unseen
        assert_eq!(tracker.observe(path, 100), FileStatus::Watched);
    }

    #[test]
    fn test_paths_are_tracked_independently() {
        let mut tracker = StabilityTracker::new();
        let first = Path::new("/input/a.csv");
        let second = Path::new("/input/b.csv");

        tracker.observe(first, 100);
        tracker.observe(second, 50);

        assert_eq!(tracker.observe(first, 100), FileStatus::Stable);
        assert_eq!(tracker.observe(second, 80), FileStatus::Watched);
    }
}
