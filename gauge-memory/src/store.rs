//! Memory Store
//!
//! SQLite-backed storage for [`MemoryRecord`]s.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use gauge_core::domain::memory::MemoryRecord;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

use crate::error::{MemoryError, Result};

/// Attribution used until [`MemoryStore::attribution`] is called
pub const DEFAULT_ENTITY_ID: &str = "user";
pub const DEFAULT_PROCESS_ID: &str = "default";

/// Rendered in place of an empty search result
pub const NO_MATCHES: &str = "No matching memories found.";

/// Append-only note store
#[derive(Debug, Clone)]
pub struct MemoryStore {
    pool: SqlitePool,
    entity_id: String,
    process_id: String,
}

impl MemoryStore {
    /// Open (creating if needed) the store at `url`
    ///
    /// Accepts any SQLite URL, e.g. `sqlite://memory.db` or `sqlite::memory:`.
    /// A bare path is treated as a file name.
    pub async fn open(url: &str) -> Result<Self> {
        let url = if url.starts_with("sqlite:") {
            url.to_string()
        } else {
            format!("sqlite://{}", url)
        };

        let options = SqliteConnectOptions::from_str(&url)
            .map_err(|e| MemoryError::InvalidUrl(format!("{}: {}", url, e)))?
            .create_if_missing(true);

        // One long-lived connection: an in-memory database lives only as long
        // as its connection.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS memory (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                content TEXT NOT NULL,
                entity_id TEXT NOT NULL,
                process_id TEXT NOT NULL,
                created_at TEXT NOT NULL
            )
            "#,
        )
        .execute(&pool)
        .await?;

        tracing::debug!("Opened memory store at {}", url);

        Ok(Self {
            pool,
            entity_id: DEFAULT_ENTITY_ID.to_string(),
            process_id: DEFAULT_PROCESS_ID.to_string(),
        })
    }

    /// Set who subsequent notes are attributed to
    pub fn attribution(&mut self, entity_id: impl Into<String>, process_id: impl Into<String>) {
        self.entity_id = entity_id.into();
        self.process_id = process_id.into();
    }

    /// Append a note
    pub async fn add(&self, content: &str) -> Result<MemoryRecord> {
        if content.trim().is_empty() {
            return Err(MemoryError::EmptyContent);
        }

        let created_at = Utc::now();
        let result = sqlx::query(
            r#"
            INSERT INTO memory (content, entity_id, process_id, created_at)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(content)
        .bind(&self.entity_id)
        .bind(&self.process_id)
        .bind(created_at)
        .execute(&self.pool)
        .await?;

        Ok(MemoryRecord {
            id: result.last_insert_rowid(),
            content: content.to_string(),
            entity_id: self.entity_id.clone(),
            process_id: self.process_id.clone(),
            created_at,
        })
    }

    /// Notes whose content contains `query`, newest first
    ///
    /// Matching is case-sensitive and takes `query` literally: `%` and `_`
    /// are not wildcards.
    pub async fn search(&self, query: &str) -> Result<Vec<MemoryRecord>> {
        let rows = sqlx::query_as::<_, MemoryRow>(
            r#"
            SELECT id, content, entity_id, process_id, created_at
            FROM memory
            WHERE instr(content, ?) > 0
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(query)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }
}

/// Format search results for display
pub fn render(records: &[MemoryRecord]) -> String {
    if records.is_empty() {
        return NO_MATCHES.to_string();
    }

    records
        .iter()
        .map(|r| format!("[{}] {}", r.created_at.format("%Y-%m-%d %H:%M:%S"), r.content))
        .collect::<Vec<_>>()
        .join("\n---\n")
}

// =============================================================================
// Database Row Types
// =============================================================================

#[derive(sqlx::FromRow)]
struct MemoryRow {
    id: i64,
    content: String,
    entity_id: String,
    process_id: String,
    created_at: DateTime<Utc>,
}

impl From<MemoryRow> for MemoryRecord {
    fn from(row: MemoryRow) -> Self {
        MemoryRecord {
            id: row.id,
            content: row.content,
            entity_id: row.entity_id,
            process_id: row.process_id,
            created_at: row.created_at,
        }
    }
}
