//! Utility functions and helpers.
//!
//! - Tilde expansion for configured paths
//! - Ignore pattern matching for the tree walk
//! - Content hashing ([`hash`])
//! - Thread pool configuration ([`thread_pool`])

/// Content fingerprinting (xxHash3)
pub mod hash;
/// Rayon thread pool configuration
pub mod thread_pool;

use anyhow::Result;
use std::path::{Path, PathBuf};

/// Expands a path starting with `~` to the user's home directory.
///
/// # Errors
///
/// Returns an error if the path is empty.
pub fn expand_tilde(path: &str) -> Result<PathBuf> {
    if path.is_empty() {
        anyhow::bail!("Path cannot be empty");
    }
    if path.starts_with("~/")
        && let Some(home) = dirs::home_dir()
    {
        return Ok(home.join(&path[2..]));
    }
    Ok(PathBuf::from(path))
}

/// Determines if a given path should be ignored based on provided patterns.
#[must_use]
pub fn should_ignore(path: &Path, patterns: &[String]) -> bool {
    let path_str = path.to_string_lossy();

    for pattern in patterns {
        // Directory patterns (ending with /)
        if pattern.ends_with('/') {
            let dir_name = &pattern[..pattern.len() - 1];
            if path.components().any(|c| c.as_os_str() == dir_name) {
                return true;
            }
            if path_str.contains(&format!("/{dir_name}/"))
                || path_str.starts_with(&format!("{dir_name}/"))
                || path_str == dir_name
            {
                return true;
            }
        } else if pattern.starts_with('*') && pattern.ends_with('*') && pattern.len() > 1 {
            let search = &pattern[1..pattern.len() - 1];
            if path_str.contains(search) {
                return true;
            }
        } else if let Some(suffix) = pattern.strip_prefix('*') {
            if path_str.ends_with(suffix) {
                return true;
            }
        } else if let Some(prefix) = pattern.strip_suffix('*') {
            if path_str.starts_with(prefix) {
                return true;
            }
        } else {
            // Exact match or path component match
            if path_str == pattern.as_str()
                || path.components().any(|c| c.as_os_str() == pattern.as_str())
            {
                return true;
            }
        }
    }

    false
}
