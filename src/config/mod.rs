use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Top-level configuration, loaded from a TOML file.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Watched root and snapshot file location
    #[serde(default)]
    pub core: CoreConfig,

    /// Background polling cadence
    #[serde(default)]
    pub poll: PollConfig,

    /// Tree walk filtering
    #[serde(default)]
    pub tracking: TrackingConfig,

    #[serde(default)]
    pub performance: PerformanceConfig,
}

/// Core paths: what to watch and where the baseline lives.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoreConfig {
    /// Directory tree under observation
    #[serde(default = "default_root")]
    pub root: PathBuf,

    /// Persisted snapshot file; defaults to `snapshot.txt` next to the root
    #[serde(default)]
    pub snapshot_file: Option<PathBuf>,
}

/// Polling cadence for `drift watch`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollConfig {
    /// Interval between background report cycles, in milliseconds
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,
}

/// Filters applied while walking the tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackingConfig {
    /// Paths matching any of these patterns are skipped
    pub ignore_patterns: Vec<String>,
    /// Whether the walk follows symbolic links
    pub follow_symlinks: bool,
}

/// Parallel hashing knobs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerformanceConfig {
    /// Worker threads for parallel hashing; 0 keeps rayon's default
    #[serde(default)]
    pub parallel_threads: usize,
}

fn default_root() -> PathBuf {
    PathBuf::from(".")
}

const fn default_interval_ms() -> u64 {
    1000
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            snapshot_file: None,
        }
    }
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval_ms: default_interval_ms(),
        }
    }
}

impl Default for TrackingConfig {
    fn default() -> Self {
        Self {
            ignore_patterns: vec![
                ".git".to_string(),
                "*.swp".to_string(),
                "*.tmp".to_string(),
                "node_modules".to_string(),
                "__pycache__".to_string(),
            ],
            follow_symlinks: false,
        }
    }
}

impl Default for PerformanceConfig {
    fn default() -> Self {
        Self {
            parallel_threads: 0,
        }
    }
}

impl Config {
    /// Load configuration from a file, creating it with defaults if absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or (on first
    /// run) created.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            let config = Self::default();
            config.save(path)?;
            return Ok(config);
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Save configuration to a file, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// The configured poll interval as a [`Duration`].
    #[must_use]
    pub const fn interval(&self) -> Duration {
        Duration::from_millis(self.poll.interval_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.poll.interval_ms, 1000);
        assert_eq!(config.core.root, PathBuf::from("."));
        assert!(config.core.snapshot_file.is_none());
        assert!(!config.tracking.follow_symlinks);
        assert!(
            config
                .tracking
                .ignore_patterns
                .contains(&".git".to_string())
        );
    }

    #[test]
    fn test_load_creates_default_config() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("config/config.toml");

        let config = Config::load(&path)?;
        assert!(path.exists());
        assert_eq!(config.poll.interval_ms, 1000);
        Ok(())
    }

    #[test]
    fn test_save_load_round_trip() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.core.root = PathBuf::from("/tmp/watched");
        config.poll.interval_ms = 250;
        config.tracking.follow_symlinks = true;
        config.save(&path)?;

        let loaded = Config::load(&path)?;
        assert_eq!(loaded.core.root, PathBuf::from("/tmp/watched"));
        assert_eq!(loaded.poll.interval_ms, 250);
        assert!(loaded.tracking.follow_symlinks);
        Ok(())
    }

    #[test]
    fn test_partial_config_uses_defaults() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[poll]\ninterval_ms = 50\n")?;

        let config = Config::load(&path)?;
        assert_eq!(config.poll.interval_ms, 50);
        assert_eq!(config.core.root, PathBuf::from("."));
        Ok(())
    }

    #[test]
    fn test_malformed_config_is_an_error() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "not [valid toml")?;

        assert!(Config::load(&path).is_err());
        Ok(())
    }
}
