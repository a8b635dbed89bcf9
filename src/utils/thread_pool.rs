use anyhow::{Context, Result};
use rayon::ThreadPoolBuilder;

/// Configure the global rayon pool from the performance config.
///
/// A thread count of zero leaves rayon's default sizing in place.
///
/// # Errors
///
/// Returns an error if the global pool was already initialized with a
/// different configuration.
pub fn configure(num_threads: usize) -> Result<()> {
    if num_threads == 0 {
        return Ok(());
    }

    ThreadPoolBuilder::new()
        .num_threads(num_threads)
        .thread_name(|i| format!("driftwatch-worker-{i}"))
        .build_global()
        .context("Failed to configure thread pool")
}
