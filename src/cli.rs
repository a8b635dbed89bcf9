//! Command-line interface definitions for driftwatch.
//!
//! This module contains all CLI argument parsing structures using clap's
//! derive macros. The definitions are shared between the main binary and
//! build tools (like xtask) for man page generation.
//!
//! Note: Field-level documentation is provided via clap attributes, so we
//! allow missing_docs for this module to avoid redundant documentation.

#![allow(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;
use std::time::Duration;

/// Main CLI structure for driftwatch.
#[derive(Parser)]
#[command(
    name = "drift",
    version = crate::VERSION,
    about = "Directory-tree change observer",
    long_about = "Tracks changes to a directory tree by hashing file contents \
                  and diffing against a persisted snapshot"
)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Directory tree to watch (overrides config)
    #[arg(long, global = true)]
    pub root: Option<PathBuf>,

    /// Snapshot file location (overrides config)
    #[arg(long, global = true)]
    pub snapshot_file: Option<PathBuf>,

    /// Show verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// All available commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Report every file's state since the last snapshot
    Status {
        /// One `<char> <path>` line per file
        #[arg(short, long)]
        short: bool,

        /// Hide unchanged files
        #[arg(short, long)]
        changes_only: bool,
    },

    /// Persist the current tree state as the new baseline snapshot
    Commit,

    /// Poll the tree in the background, reporting changes each cycle
    Watch {
        /// Poll interval, e.g. "500ms" or "2s" (default from config)
        #[arg(short, long, value_parser = humantime::parse_duration)]
        interval: Option<Duration>,
    },

    /// Show metadata for one file, named as <file>
    Inspect {
        /// Target token, e.g. "<notes.txt>"
        target: String,
    },

    /// Generate shell completion scripts
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}
