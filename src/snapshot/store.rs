//! Flat-text persistence for [`Snapshot`] values.
//!
//! One record per line, `path|fingerprint`, overwritten wholesale on each
//! save. Saves go through a temp file plus rename so a concurrent load
//! observes either the old or the new file, never a torn mix, and a sidecar
//! lock serializes saves against each other.

use super::{FINGERPRINT_LEN, Snapshot};
use crate::errors::WatchError;
use anyhow::{Context, Result};
use fs4::fs_std::FileExt;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::warn;

/// Field separator in the persisted snapshot file.
pub const DELIMITER: char = '|';

/// Path of the sidecar lock file guarding saves to `path`.
#[must_use]
pub fn lock_path(path: &Path) -> PathBuf {
    let mut os = path.as_os_str().to_owned();
    os.push(".lock");
    PathBuf::from(os)
}

/// Parses one persisted record into `(path, fingerprint)`.
///
/// The record grammar is exactly one delimiter, a non-empty path, and a
/// 32-character lowercase hex fingerprint.
///
/// # Errors
///
/// Returns [`WatchError::Format`] for any malformed record.
pub fn parse_line(line: &str) -> Result<(PathBuf, String), WatchError> {
    let fields: Vec<&str> = line.split(DELIMITER).collect();
    let [path, fingerprint] = fields.as_slice() else {
        return Err(WatchError::Format(format!(
            "expected `path{DELIMITER}fingerprint`, got `{line}`"
        )));
    };

    if path.is_empty() {
        return Err(WatchError::Format("record has an empty path".to_string()));
    }

    if fingerprint.len() != FINGERPRINT_LEN
        || !fingerprint
            .chars()
            .all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase())
    {
        return Err(WatchError::Format(format!(
            "invalid fingerprint `{fingerprint}` for `{path}`"
        )));
    }

    Ok((PathBuf::from(path), fingerprint.to_string()))
}

/// Holds the sidecar lock for the duration of one save.
struct SaveLock {
    file: File,
    path: PathBuf,
}

impl SaveLock {
    fn acquire(target: &Path) -> Result<Self> {
        let path = lock_path(target);
        let file = File::create(&path)
            .with_context(|| format!("Failed to create lock file: {}", path.display()))?;
        file.lock_exclusive()
            .with_context(|| format!("Failed to lock: {}", path.display()))?;
        Ok(Self { file, path })
    }
}

impl Drop for SaveLock {
    fn drop(&mut self) {
        let _ = self.file.unlock();
        let _ = fs::remove_file(&self.path);
    }
}

impl Snapshot {
    /// Loads the persisted snapshot, or an empty one if the file is absent
    /// (first run).
    ///
    /// Malformed records are skipped with a logged warning rather than
    /// aborting: partial corruption must not block future status checks.
    ///
    /// # Errors
    ///
    /// Returns an error if an existing file cannot be read.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::new());
        }

        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read snapshot file: {}", path.display()))?;

        let mut snapshot = Self::new();
        for (index, line) in text.lines().enumerate() {
            if line.is_empty() {
                continue;
            }
            match parse_line(line) {
                Ok((file, fingerprint)) => snapshot.insert(file, fingerprint),
                Err(e) => warn!(line = index + 1, error = %e, "skipping malformed snapshot record"),
            }
        }

        Ok(snapshot)
    }

    /// Persists the snapshot, atomically replacing any previous file.
    ///
    /// Records are written to a temp file in the destination directory and
    /// renamed over the target. At most one save runs at a time; concurrent
    /// saves queue on the sidecar lock. Records whose path contains the
    /// delimiter or a newline cannot be represented and are skipped with a
    /// warning.
    ///
    /// # Errors
    ///
    /// Returns an error if the destination is not writable. The caller must
    /// treat this as fatal to the commit that triggered the save.
    pub fn save(&self, path: &Path) -> Result<()> {
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let _lock = SaveLock::acquire(path)?;

        let mut tmp = NamedTempFile::new_in(dir)
            .with_context(|| format!("Failed to create temp file in: {}", dir.display()))?;

        for (file, fingerprint) in self.iter() {
            let text = file.to_string_lossy();
            if text.contains(DELIMITER) || text.contains('\n') {
                warn!(path = %file.display(), "path cannot be recorded, skipping");
                continue;
            }
            writeln!(tmp, "{text}{DELIMITER}{fingerprint}")
                .context("Failed to write snapshot record")?;
        }

        tmp.flush().context("Failed to flush snapshot records")?;
        tmp.persist(path)
            .with_context(|| format!("Failed to replace snapshot file: {}", path.display()))?;

        Ok(())
    }
}
