#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! # Driftwatch - Directory-Tree Change Observer
//!
//! Driftwatch tracks changes to a directory tree over time by hashing file
//! contents and diffing against a previously persisted snapshot, reporting
//! files as added, edited, or deleted. It is a read-only observation tool:
//! no merge semantics, no history, only the single most recent baseline.
//!
//! ## Architecture
//!
//! - [`snapshot`]: the path→fingerprint mapping, its flat-text persistence,
//!   and the pure diff classification
//! - [`engine`]: tree walk, parallel fingerprinting, commit and report
//! - [`poller`]: cancellable background polling thread
//! - [`inspect`]: on-demand per-file metadata reporting
//! - [`commands`]: CLI command implementations
//! - [`config`]: TOML configuration
//! - [`output`]: reporting collaborator (the engine never formats text)
//!
//! ## Example Usage
//!
//! ```no_run
//! use driftwatch::WatchContext;
//!
//! # fn main() -> anyhow::Result<()> {
//! let ctx = WatchContext::new()?;
//!
//! // Persist a baseline, then report drift against it
//! driftwatch::commands::commit::execute(&ctx)?;
//! driftwatch::commands::status::execute(&ctx, false, false)?;
//! # Ok(())
//! # }
//! ```

/// Command-line interface definitions (argument parsing structures).
pub mod cli;

/// Commands module containing all CLI command implementations.
pub mod commands;

/// Configuration parsing and management.
pub mod config;

/// The snapshot engine: build, diff, commit, report.
pub mod engine;

/// Typed error taxonomy.
pub mod errors;

/// On-demand file inspection.
pub mod inspect;

/// Output collaborator receiving classifications and metadata.
pub mod output;

/// Background polling task.
pub mod poller;

/// Snapshot model and persistence.
pub mod snapshot;

/// Utility functions and helpers.
pub mod utils;

use anyhow::{Context, Result};
use std::path::PathBuf;

/// Current version of the drift binary.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default configuration file path relative to the home directory.
pub const DEFAULT_CONFIG_PATH: &str = ".config/driftwatch/config.toml";

/// Default name of the persisted snapshot file.
pub const SNAPSHOT_FILE: &str = "snapshot.txt";

/// Central context for driftwatch operations.
///
/// Holds the resolved watched root, the snapshot file location, and the
/// loaded configuration. Root and snapshot path are fixed for the lifetime
/// of the context.
#[derive(Debug, Clone)]
pub struct WatchContext {
    /// Directory tree under observation.
    pub root: PathBuf,

    /// Location of the persisted snapshot file.
    pub snapshot_path: PathBuf,

    /// Path the configuration was loaded from.
    pub config_path: PathBuf,

    /// Loaded configuration settings.
    pub config: config::Config,
}

impl WatchContext {
    /// Creates a context from the default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined, the
    /// configuration cannot be loaded, or the watched root does not exist.
    pub fn new() -> Result<Self> {
        Self::with_overrides(None, None)
    }

    /// Creates a context, letting CLI flags override the configured root
    /// and snapshot file.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be loaded or the watched
    /// root does not exist.
    pub fn with_overrides(root: Option<PathBuf>, snapshot_file: Option<PathBuf>) -> Result<Self> {
        let config_path = if let Ok(path) = std::env::var("DRIFTWATCH_CONFIG_PATH") {
            PathBuf::from(path)
        } else {
            let home = dirs::home_dir().context("Could not find home directory")?;
            home.join(DEFAULT_CONFIG_PATH)
        };

        let config = config::Config::load(&config_path)?;

        if let Err(e) = utils::thread_pool::configure(config.performance.parallel_threads) {
            tracing::warn!(error = %e, "failed to configure thread pool");
        }

        let root = root.unwrap_or_else(|| config.core.root.clone());
        let root = utils::expand_tilde(&root.to_string_lossy())?;
        let root = root
            .canonicalize()
            .with_context(|| format!("Watched root does not exist: {}", root.display()))?;

        let snapshot_path = snapshot_file
            .or_else(|| config.core.snapshot_file.clone())
            .unwrap_or_else(|| {
                root.parent()
                    .unwrap_or(&root)
                    .join(SNAPSHOT_FILE)
            });
        let snapshot_path = if snapshot_path.is_absolute() {
            snapshot_path
        } else {
            std::env::current_dir()
                .context("Could not determine current directory")?
                .join(snapshot_path)
        };

        Ok(Self {
            root,
            snapshot_path,
            config_path,
            config,
        })
    }

    /// Creates a context with explicit paths and configuration, for testing.
    #[must_use]
    pub fn new_explicit(root: PathBuf, snapshot_path: PathBuf, config: config::Config) -> Self {
        Self {
            root,
            snapshot_path,
            config_path: PathBuf::new(),
            config,
        }
    }

    /// Builds a snapshot engine over this context's root and snapshot file.
    #[must_use]
    pub fn engine(&self) -> engine::SnapshotEngine {
        engine::SnapshotEngine::new(
            self.root.clone(),
            self.snapshot_path.clone(),
            &self.config.tracking,
        )
    }
}
