use anyhow::Result;
use driftwatch::WatchContext;
use driftwatch::config::Config;
use driftwatch::output::Reporter;
use driftwatch::snapshot::FileStatus;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tempfile::TempDir;

/// Watched-tree fixture for consistent test setup.
///
/// The tree lives under `root/`, the snapshot file next to it, matching the
/// default layout.
pub struct TestTree {
    pub temp_dir: TempDir,
    pub ctx: WatchContext,
}

impl TestTree {
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let root = temp_dir.path().join("root");
        std::fs::create_dir(&root)?;

        let ctx = WatchContext::new_explicit(
            root,
            temp_dir.path().join("snapshot.txt"),
            Config::default(),
        );

        Ok(Self { temp_dir, ctx })
    }

    pub fn root(&self) -> &Path {
        &self.ctx.root
    }

    pub fn write_file(&self, relative: &str, content: &str) -> Result<PathBuf> {
        let path = self.ctx.root.join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, content)?;
        Ok(path)
    }

    pub fn remove_file(&self, relative: &str) -> Result<()> {
        std::fs::remove_file(self.ctx.root.join(relative))?;
        Ok(())
    }
}

/// Reporter that records every classification it receives, in order.
#[derive(Default)]
pub struct CollectingReporter {
    statuses: Mutex<Vec<FileStatus>>,
}

impl CollectingReporter {
    pub fn statuses(&self) -> Vec<FileStatus> {
        self.statuses.lock().unwrap().clone()
    }

    pub fn count(&self) -> usize {
        self.statuses.lock().unwrap().len()
    }

    pub fn clear(&self) {
        self.statuses.lock().unwrap().clear();
    }
}

impl Reporter for CollectingReporter {
    fn file_status(&self, status: &FileStatus) {
        self.statuses.lock().unwrap().push(status.clone());
    }

    fn metadata(&self, _path: &Path, _field: &str, _value: &str) {}
}
