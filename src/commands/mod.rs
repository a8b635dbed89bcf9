//! Command implementations for the `drift` binary.

/// Persist a new baseline snapshot
pub mod commit;
/// Inspect one file's metadata
pub mod inspect;
/// On-demand diff against the baseline
pub mod status;
/// Background polling loop
pub mod watch;

use colored::Colorize;

pub fn print_success(message: &str) {
    println!("{} {}", "✓".green().bold(), message);
}

pub fn print_error(message: &str) {
    eprintln!("{} {}", "✗".red().bold(), message);
}

pub fn print_info(message: &str) {
    println!("{} {}", "ℹ".blue().bold(), message);
}

pub fn print_warning(message: &str) {
    println!("{} {}", "⚠".yellow().bold(), message);
}
