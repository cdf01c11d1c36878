//! Upload Service
//!
//! Stores proxy source files uploaded by the caller so a later proxy run can
//! reference them by name.

use std::path::Path;

use super::{Result, ServiceError};
use crate::repository::artifact_repository;

const ALLOWED_EXTENSIONS: &[&str] = &["csv", "txt"];

/// Validate an uploaded filename and reduce it to a safe base name
///
/// Runs before anything touches disk.
pub fn validate_filename(filename: &str) -> Result<String> {
    let allowed = filename
        .rsplit_once('.')
        .map(|(_, ext)| ALLOWED_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
        .unwrap_or(false);

    if !allowed {
        return Err(ServiceError::ValidationRejected(
            "Only CSV or TXT files may be uploaded".to_string(),
        ));
    }

    let name = sanitize_filename(filename);
    if name.is_empty() || !name.contains('.') {
        return Err(ServiceError::ValidationRejected(format!(
            "Invalid filename: {}",
            filename
        )));
    }

    Ok(name)
}

/// Store an uploaded file in `upload_dir`, returning the stored name
pub async fn store(upload_dir: &Path, filename: &str, contents: &[u8]) -> Result<String> {
    let name = validate_filename(filename)?;

    artifact_repository::write(&upload_dir.join(&name), contents).await?;

    tracing::info!("Stored upload {} ({} bytes)", name, contents.len());
    Ok(name)
}

/// Keeps only the base name, replaces unsafe characters and strips leading dots
fn sanitize_filename(filename: &str) -> String {
    let base = filename.rsplit(['/', '\\']).next().unwrap_or_default();

    let cleaned: String = base
        .trim()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();

    cleaned.trim_start_matches('.').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allowed_extensions() {
        assert_eq!(validate_filename("ips.csv").unwrap(), "ips.csv");
        assert_eq!(validate_filename("IPS.TXT").unwrap(), "IPS.TXT");
    }

    #[test]
    fn test_rejected_extensions() {
        for name in ["report.pdf", "noext", "archive.csv.zip", "csv", ""] {
            let err = validate_filename(name).unwrap_err();
            assert!(matches!(err, ServiceError::ValidationRejected(_)), "{name}");
        }
    }

    #[test]
    fn test_sanitizes_paths_and_characters() {
        assert_eq!(validate_filename("../../etc/ips.csv").unwrap(), "ips.csv");
        assert_eq!(validate_filename("C:\\tmp\\my ips.txt").unwrap(), "my_ips.txt");
        assert_eq!(validate_filename("..hidden.csv").unwrap(), "hidden.csv");
        assert_eq!(validate_filename("节点.csv").unwrap(), "__.csv");
    }

    #[test]
    fn test_rejects_names_that_sanitize_away() {
        assert!(validate_filename("dir/.csv").is_err());
    }

    #[tokio::test]
    async fn test_store_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let upload_dir = dir.path().join("uploads");

        let name = store(&upload_dir, "my ips.csv", b"1.1.1.1\n").await.unwrap();

        assert_eq!(name, "my_ips.csv");
        let stored = tokio::fs::read(upload_dir.join("my_ips.csv")).await.unwrap();
        assert_eq!(stored, b"1.1.1.1\n");
    }

    #[tokio::test]
    async fn test_rejected_upload_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let upload_dir = dir.path().join("uploads");

        assert!(store(&upload_dir, "report.pdf", b"%PDF").await.is_err());
        assert!(!upload_dir.exists());
    }
}
