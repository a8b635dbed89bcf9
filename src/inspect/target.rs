//! Grammar for the inspection target token.
//!
//! Targets name a file relative to the watched root, wrapped in angle
//! brackets: `<notes.txt>`, `<sub/dir/photo.png>`. Malformed tokens are a
//! typed format error, never a silent mis-parse.

use crate::errors::WatchError;
use std::path::{Component, Path};
use std::str::FromStr;

/// A validated inspection target naming one file under the root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InspectTarget {
    name: String,
}

impl InspectTarget {
    /// The root-relative file name inside the brackets.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Parses a `<file>` token.
    ///
    /// # Errors
    ///
    /// Returns [`WatchError::Format`] when the token is not bracketed, names
    /// nothing, nests brackets, or escapes the watched root.
    pub fn parse(input: &str) -> Result<Self, WatchError> {
        let token = input.trim();
        let inner = token
            .strip_prefix('<')
            .and_then(|rest| rest.strip_suffix('>'))
            .ok_or_else(|| {
                WatchError::Format(format!(
                    "expected a target of the form <file>, got `{token}`"
                ))
            })?;

        if inner.is_empty() {
            return Err(WatchError::Format("target names no file".to_string()));
        }
        if inner.contains(['<', '>']) {
            return Err(WatchError::Format(format!(
                "target `{inner}` contains stray angle brackets"
            )));
        }

        let path = Path::new(inner);
        if path.is_absolute()
            || path
                .components()
                .any(|c| matches!(c, Component::ParentDir))
        {
            return Err(WatchError::Format(format!(
                "target `{inner}` must stay relative to the watched root"
            )));
        }

        Ok(Self {
            name: inner.to_string(),
        })
    }
}

impl FromStr for InspectTarget {
    type Err = WatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
