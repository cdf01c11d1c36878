//! Artifact Repository
//!
//! File operations on the artifacts exchanged with the worker.

use std::io::{self, ErrorKind};
use std::path::Path;
use std::time::SystemTime;

/// Read an artifact, `None` if it does not exist
pub async fn read(path: &Path) -> io::Result<Option<Vec<u8>>> {
    match tokio::fs::read(path).await {
        Ok(bytes) => Ok(Some(bytes)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e),
    }
}

/// Modification time of an artifact
pub async fn modified(path: &Path) -> io::Result<SystemTime> {
    tokio::fs::metadata(path).await?.modified()
}

/// Replace an artifact in full
///
/// Writes to a sibling temporary file and renames it over the target, so a
/// reader never sees a half-written document.
pub async fn write_atomic(path: &Path, contents: &[u8]) -> io::Result<()> {
    ensure_parent(path).await?;

    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");

    tokio::fs::write(&tmp, contents).await?;
    tokio::fs::rename(&tmp, path).await
}

/// Write an artifact in place
pub async fn write(path: &Path, contents: &[u8]) -> io::Result<()> {
    ensure_parent(path).await?;
    tokio::fs::write(path, contents).await
}

/// Truncate an artifact to zero length, creating it if absent
pub async fn truncate(path: &Path) -> io::Result<()> {
    write(path, b"").await
}

/// Open an artifact for appending, creating it if absent
///
/// Returns a std handle so it can be passed to a child process as stdio.
pub async fn open_append(path: &Path) -> io::Result<std::fs::File> {
    ensure_parent(path).await?;

    let file = tokio::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .await?;

    Ok(file.into_std().await)
}

async fn ensure_parent(path: &Path) -> io::Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => tokio::fs::create_dir_all(parent).await,
        _ => Ok(()),
    }
}
