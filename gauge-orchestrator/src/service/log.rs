//! Log Service
//!
//! Reads and clears the worker's captured output.

use std::path::Path;

use super::Result;
use crate::repository::artifact_repository;

/// Default number of lines returned by [`tail`]
pub const DEFAULT_TAIL_LINES: usize = 200;

/// Last `max_lines` lines of the log, empty if the log does not exist
///
/// The whole artifact is read; only the returned text is bounded.
pub async fn tail(path: &Path, max_lines: usize) -> Result<String> {
    let Some(bytes) = artifact_repository::read(path).await? else {
        return Ok(String::new());
    };

    Ok(last_lines(&String::from_utf8_lossy(&bytes), max_lines))
}

/// Truncate the log to zero length, creating it if absent
pub async fn clear(path: &Path) -> Result<()> {
    artifact_repository::truncate(path).await?;
    tracing::info!("Cleared log {}", path.display());
    Ok(())
}

fn last_lines(text: &str, max_lines: usize) -> String {
    let lines: Vec<&str> = text.split_inclusive('\n').collect();
    let skip = lines.len().saturating_sub(max_lines);
    lines[skip..].concat()
}
