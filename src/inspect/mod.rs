//! On-demand inspection of a single file under the watched root.
//!
//! Separate from the snapshot core: no shared state, read-only, reported
//! synchronously. Targets use the `<file>` token syntax parsed by
//! [`target::InspectTarget`].

/// Image header parsing for pixel dimensions
pub mod media;
/// Target token grammar
pub mod target;

pub use target::InspectTarget;

use crate::errors::WatchError;
use crate::output::Reporter;
use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use content_inspector::{ContentType, inspect};
use std::path::Path;
use std::time::SystemTime;

/// Extensions reported with text statistics.
const TEXT_EXTENSIONS: &[&str] = &["txt"];
/// Extensions reported with pixel dimensions.
const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg"];
/// Extensions reported with class-declaration counts.
const SOURCE_EXTENSIONS: &[&str] = &["cs", "java", "py"];

/// Reports metadata for one file as `(field, value)` tuples.
///
/// Every file gets its name and timestamps; text, image, and source files
/// additionally get type-specific fields.
///
/// # Errors
///
/// Returns [`WatchError::NotFound`] if the target does not exist, and an
/// error if its content cannot be read.
pub fn describe(root: &Path, target: &InspectTarget, reporter: &dyn Reporter) -> Result<()> {
    let path = root.join(target.name());
    if !path.is_file() {
        return Err(WatchError::NotFound(format!(
            "file {} does not exist",
            target.name()
        ))
        .into());
    }

    let metadata = std::fs::metadata(&path)
        .with_context(|| format!("Failed to read metadata for: {}", path.display()))?;

    reporter.metadata(&path, "name", target.name());
    if let Ok(created) = metadata.created() {
        reporter.metadata(&path, "created", &format_time(created));
    }
    if let Ok(modified) = metadata.modified() {
        reporter.metadata(&path, "updated", &format_time(modified));
    }

    let extension = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    if TEXT_EXTENSIONS.contains(&extension.as_str()) {
        report_text_stats(&path, reporter)?;
    } else if IMAGE_EXTENSIONS.contains(&extension.as_str()) {
        let (width, height) = media::image_dimensions(&path)?;
        reporter.metadata(&path, "dimensions", &format!("{width}x{height}"));
    } else if SOURCE_EXTENSIONS.contains(&extension.as_str()) {
        report_source_stats(&path, reporter)?;
    }

    Ok(())
}

/// Lines, whitespace-separated words, and non-whitespace characters.
fn report_text_stats(path: &Path, reporter: &dyn Reporter) -> Result<()> {
    let text = read_text(path)?;

    let lines = text.lines().count();
    let words: Vec<&str> = text.split_whitespace().collect();
    let characters: usize = words.iter().map(|w| w.chars().count()).sum();

    reporter.metadata(path, "lines", &lines.to_string());
    reporter.metadata(path, "words", &words.len().to_string());
    reporter.metadata(path, "characters", &characters.to_string());
    Ok(())
}

/// Lines and lines carrying a class declaration.
fn report_source_stats(path: &Path, reporter: &dyn Reporter) -> Result<()> {
    let text = read_text(path)?;

    let lines = text.lines().count();
    let classes = text.lines().filter(|line| line.contains("class")).count();

    reporter.metadata(path, "lines", &lines.to_string());
    reporter.metadata(path, "classes", &classes.to_string());
    Ok(())
}

fn read_text(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;

    if inspect(&bytes) == ContentType::BINARY {
        return Err(WatchError::Format(format!(
            "{} does not contain text",
            path.display()
        ))
        .into());
    }

    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn format_time(time: SystemTime) -> String {
    DateTime::<Local>::from(time)
        .format("%Y-%m-%d %H:%M:%S")
        .to_string()
}
