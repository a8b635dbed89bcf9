//! The snapshot engine: builds a fresh snapshot from a tree walk, diffs it
//! against the persisted baseline, and commits new baselines.

use crate::config::TrackingConfig;
use crate::output::Reporter;
use crate::snapshot::{self, FileStatus, Snapshot, store};
use crate::utils::{hash, should_ignore};
use anyhow::{Context, Result};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Per-classification counts from one report cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReportSummary {
    /// Files present now but not in the baseline
    pub added: usize,
    /// Files whose fingerprint differs from the baseline
    pub edited: usize,
    /// Files in the baseline but gone from the tree
    pub deleted: usize,
    /// Files identical to the baseline
    pub unchanged: usize,
}

impl ReportSummary {
    /// Number of entries that differ from the baseline.
    #[must_use]
    pub const fn changes(&self) -> usize {
        self.added + self.edited + self.deleted
    }

    fn record(&mut self, status: &FileStatus) {
        match status {
            FileStatus::Added(_) => self.added += 1,
            FileStatus::Edited(_) => self.edited += 1,
            FileStatus::Deleted(_) => self.deleted += 1,
            FileStatus::Unchanged(_) => self.unchanged += 1,
        }
    }
}

/// Builds, diffs, and persists snapshots of one watched root.
///
/// The root and snapshot location are fixed for the lifetime of the engine.
/// `diff` never touches persisted state; `commit` is the only operation that
/// advances the baseline.
#[derive(Debug, Clone)]
pub struct SnapshotEngine {
    root: PathBuf,
    snapshot_path: PathBuf,
    lock_path: PathBuf,
    ignore_patterns: Vec<String>,
    follow_symlinks: bool,
}

impl SnapshotEngine {
    /// Creates an engine for `root`, persisting to `snapshot_path`.
    #[must_use]
    pub fn new(root: PathBuf, snapshot_path: PathBuf, tracking: &TrackingConfig) -> Self {
        let lock_path = store::lock_path(&snapshot_path);
        Self {
            root,
            snapshot_path,
            lock_path,
            ignore_patterns: tracking.ignore_patterns.clone(),
            follow_symlinks: tracking.follow_symlinks,
        }
    }

    /// The watched root directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Location of the persisted snapshot file.
    #[must_use]
    pub fn snapshot_path(&self) -> &Path {
        &self.snapshot_path
    }

    /// Builds a fresh snapshot of every regular file under the root.
    ///
    /// The walk is always recursive, for both the on-demand and background
    /// paths. Files are fingerprinted in parallel; a file that cannot be
    /// hashed (vanished mid-walk, unreadable) is skipped with a logged
    /// warning rather than aborting the cycle. The snapshot file and its
    /// lock are never part of the walk.
    #[must_use]
    pub fn build_current(&self) -> Snapshot {
        let files = self.collect_files();

        let records: Vec<(PathBuf, String)> = files
            .par_iter()
            .filter_map(|path| match hash::hash_file(path) {
                Ok(fingerprint) => Some((self.relative(path), fingerprint)),
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "failed to hash file, skipping");
                    None
                }
            })
            .collect();

        let mut current = Snapshot::new();
        for (path, fingerprint) in records {
            current.insert(path, fingerprint);
        }
        current
    }

    /// Builds a fresh snapshot and persists it as the new baseline.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot file cannot be written; the commit
    /// must not silently appear to have succeeded.
    pub fn commit(&self) -> Result<Snapshot> {
        let current = self.build_current();
        current
            .save(&self.snapshot_path)
            .context("Failed to persist snapshot")?;
        debug!(files = current.len(), path = %self.snapshot_path.display(), "snapshot committed");
        Ok(current)
    }

    /// Loads the baseline, builds the current snapshot, and emits each
    /// classification to the reporter.
    ///
    /// The on-demand variant passes `include_unchanged = true`; the
    /// background poller passes `false` so every cycle reports only actual
    /// changes.
    ///
    /// # Errors
    ///
    /// Returns an error if an existing snapshot file cannot be read.
    pub fn report(&self, reporter: &dyn Reporter, include_unchanged: bool) -> Result<ReportSummary> {
        let previous = Snapshot::load(&self.snapshot_path)?;
        let current = self.build_current();

        let mut summary = ReportSummary::default();
        for status in snapshot::diff(&previous, &current) {
            summary.record(&status);
            if status.is_change() || include_unchanged {
                reporter.file_status(&status);
            }
        }

        Ok(summary)
    }

    fn collect_files(&self) -> Vec<PathBuf> {
        WalkDir::new(&self.root)
            .follow_links(self.follow_symlinks)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| !self.is_excluded(e.path()))
            .filter_map(|entry| match entry {
                Ok(entry) if entry.file_type().is_file() => Some(entry.path().to_path_buf()),
                Ok(_) => None,
                Err(e) => {
                    warn!(error = %e, "failed to read directory entry, skipping");
                    None
                }
            })
            .collect()
    }

    fn is_excluded(&self, path: &Path) -> bool {
        if path == self.snapshot_path || path == self.lock_path {
            return true;
        }
        should_ignore(&self.relative(path), &self.ignore_patterns)
    }

    fn relative(&self, path: &Path) -> PathBuf {
        path.strip_prefix(&self.root)
            .map_or_else(|_| path.to_path_buf(), Path::to_path_buf)
    }
}
