//! Memory record domain types

use serde::{Deserialize, Serialize};

/// A single remembered note
///
/// Records are append-only and retrieved by substring match on `content`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemoryRecord {
    pub id: i64,
    pub content: String,
    pub entity_id: String,
    pub process_id: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}
