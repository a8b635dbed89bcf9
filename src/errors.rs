use std::fmt;

/// Categorized errors for snapshot and inspection operations
#[derive(Debug)]
pub enum WatchError {
    /// File could not be read or written (permissions, vanished mid-walk)
    Io(String),
    /// Malformed persisted snapshot record or inspection target token
    Format(String),
    /// Requested inspection target does not exist under the watched root
    NotFound(String),
}

impl WatchError {
    /// Get a short description of the error type
    #[must_use]
    pub const fn error_type(&self) -> &'static str {
        match self {
            Self::Io(_) => "I/O Error",
            Self::Format(_) => "Format Error",
            Self::NotFound(_) => "Not Found",
        }
    }

    /// Check if this error type is transient and might succeed on retry
    #[must_use]
    pub const fn should_retry(&self) -> bool {
        matches!(self, Self::Io(_))
    }
}

impl fmt::Display for WatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(msg) | Self::Format(msg) | Self::NotFound(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for WatchError {}

impl From<std::io::Error> for WatchError {
    fn from(err: std::io::Error) -> Self {
        if err.kind() == std::io::ErrorKind::NotFound {
            Self::NotFound(err.to_string())
        } else {
            Self::Io(err.to_string())
        }
    }
}
