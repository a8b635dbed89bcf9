//! Output collaborator: the engine and poller hand classifications and
//! metadata tuples to a [`Reporter`] and never format presentation text
//! themselves.

use crate::snapshot::FileStatus;
use colored::Colorize;
use std::path::Path;

/// Receives the stream of classifications and metadata produced by the
/// engine and the inspection command.
pub trait Reporter: Send + Sync {
    /// Called once per classified path, in diff order.
    fn file_status(&self, status: &FileStatus);

    /// Called once per `(field, value)` metadata pair for an inspected file.
    fn metadata(&self, path: &Path, field: &str, value: &str);
}

/// Console presentation of report output.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleReporter {
    short: bool,
}

impl ConsoleReporter {
    /// Long format: one `label: path` line per entry.
    #[must_use]
    pub fn new() -> Self {
        Self { short: false }
    }

    /// Short format: one `<char> <path>` line per entry.
    #[must_use]
    pub fn short() -> Self {
        Self { short: true }
    }
}

impl Reporter for ConsoleReporter {
    fn file_status(&self, status: &FileStatus) {
        if self.short {
            println!("{} {}", status.status_char(), status.path().display());
            return;
        }

        let label = match status {
            FileStatus::Added(_) => status.label().green(),
            FileStatus::Edited(_) => status.label().yellow(),
            FileStatus::Deleted(_) => status.label().red(),
            FileStatus::Unchanged(_) => status.label().dimmed(),
        };
        println!("  {}: {}", label, status.path().display());
    }

    fn metadata(&self, _path: &Path, field: &str, value: &str) {
        println!("  {}: {}", field.bold(), value);
    }
}
