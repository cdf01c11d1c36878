//! Configuration Service
//!
//! Loads the persisted run configuration merged over defaults, and replaces
//! it in full on write.

use gauge_core::domain::config::RunConfiguration;
use std::path::Path;

use super::Result;
use crate::repository::artifact_repository;

/// Load the run configuration
///
/// Never fails: a missing, unreadable or malformed document yields the
/// defaults, and a partial document is merged over them.
pub async fn load(path: &Path) -> RunConfiguration {
    let bytes = match artifact_repository::read(path).await {
        Ok(Some(bytes)) => bytes,
        Ok(None) => return RunConfiguration::default(),
        Err(e) => {
            tracing::warn!("Failed to read {}: {}, using defaults", path.display(), e);
            return RunConfiguration::default();
        }
    };

    match serde_json::from_slice::<serde_json::Value>(&bytes) {
        Ok(document) => RunConfiguration::from(document),
        Err(e) => {
            tracing::warn!("Malformed config {}: {}, using defaults", path.display(), e);
            RunConfiguration::default()
        }
    }
}

/// Persist `config` as the whole configuration document
///
/// Every field is written, so no key from an earlier shape survives.
pub async fn save(path: &Path, config: &RunConfiguration) -> Result<()> {
    let document = serde_json::to_vec_pretty(config)
        .map_err(|e| super::ServiceError::MalformedArtifact(e.to_string()))?;

    artifact_repository::write_atomic(path, &document).await?;

    tracing::info!("Configuration saved to {}", path.display());
    Ok(())
}
