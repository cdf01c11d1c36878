//! Service error type
//!
//! Every failure an operation can report. The API layer turns each variant
//! into a `{ success: false, message }` response.

use thiserror::Error;

use crate::channel::ChannelError;

#[derive(Debug, Error)]
pub enum ServiceError {
    /// An artifact does not exist (yet)
    #[error("{0}")]
    NotFound(String),

    /// The worker environment could not be reached
    #[error("{0}")]
    ChannelUnavailable(String),

    /// Input rejected before any side effect
    #[error("{0}")]
    ValidationRejected(String),

    /// An artifact exists but cannot be parsed
    #[error("{0}")]
    MalformedArtifact(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<ChannelError> for ServiceError {
    fn from(err: ChannelError) -> Self {
        ServiceError::ChannelUnavailable(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ServiceError>;
