use anyhow::{Context, Result};
use memmap2::MmapOptions;
use std::fs::File;
use std::path::Path;
use xxhash_rust::xxh3::xxh3_128;

/// Files at or above this size are memory-mapped instead of read whole.
const MMAP_THRESHOLD: u64 = 1_048_576;

/// Computes the XXH3 128-bit fingerprint of raw bytes as lowercase hex.
#[must_use]
pub fn hash_bytes(data: &[u8]) -> String {
    let hash = xxh3_128(data);
    format!("{hash:032x}")
}

/// Computes the content fingerprint of a file.
///
/// Small files are read whole; files of 1 MiB or more are memory-mapped.
/// The fingerprint depends only on byte content, never on size or mtime.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or read.
pub fn hash_file(path: &Path) -> Result<String> {
    let file =
        File::open(path).with_context(|| format!("Failed to open file: {}", path.display()))?;
    let metadata = file
        .metadata()
        .with_context(|| format!("Failed to get metadata for: {}", path.display()))?;

    if metadata.len() == 0 {
        return Ok(hash_bytes(b""));
    }

    if metadata.len() < MMAP_THRESHOLD {
        let content = std::fs::read(path)
            .with_context(|| format!("Failed to read file: {}", path.display()))?;
        Ok(hash_bytes(&content))
    } else {
        let mmap = unsafe { MmapOptions::new().map(&file) }
            .with_context(|| format!("Failed to map file: {}", path.display()))?;
        Ok(hash_bytes(&mmap))
    }
}
