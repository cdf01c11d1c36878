//! Result Service
//!
//! Parses the worker's results table into normalized rows.

use chrono::{DateTime, Local};
use gauge_core::domain::result::ResultRow;
use std::path::Path;

use super::{Result, ServiceError};
use crate::repository::artifact_repository;

/// Rows of the results table plus the time the worker last wrote it
#[derive(Debug, Clone)]
pub struct ResultSet {
    pub rows: Vec<ResultRow>,
    pub last_update: DateTime<Local>,
}

impl ResultSet {
    /// `last_update` formatted for display
    pub fn last_update_display(&self) -> String {
        self.last_update.format("%Y-%m-%d %H:%M:%S").to_string()
    }
}

/// Read the results table
///
/// A missing table is [`ServiceError::NotFound`]: the worker has not
/// produced results yet. A table that cannot be parsed is
/// [`ServiceError::MalformedArtifact`].
pub async fn read_results(path: &Path) -> Result<ResultSet> {
    let Some(bytes) = artifact_repository::read(path).await? else {
        return Err(ServiceError::NotFound("No results yet".to_string()));
    };
    let last_update = DateTime::<Local>::from(artifact_repository::modified(path).await?);

    let rows = parse_table(&bytes).map_err(|e| ServiceError::MalformedArtifact(e.to_string()))?;
    tracing::debug!("Read {} result rows from {}", rows.len(), path.display());

    Ok(ResultSet { rows, last_update })
}

fn parse_table(bytes: &[u8]) -> std::result::Result<Vec<ResultRow>, csv::Error> {
    let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(bytes);

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();

    reader
        .records()
        .map(|record| {
            let cells: Vec<String> = record?.iter().map(str::to_string).collect();
            Ok(ResultRow::from_record(&headers, &cells))
        })
        .collect()
}
