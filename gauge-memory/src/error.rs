//! Error types for the memory store

use thiserror::Error;

pub type Result<T> = std::result::Result<T, MemoryError>;

#[derive(Debug, Error)]
pub enum MemoryError {
    #[error("Invalid database URL: {0}")]
    InvalidUrl(String),

    #[error("Refusing to store an empty note")]
    EmptyContent,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}
