use hopper_core::{ShortenerError, StorageError};
use jiff::Timestamp;
use thiserror::Error;

/// Type alias for redirector results.
pub type Result<T> = std::result::Result<T, RedirectorError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RedirectorError {
    #[error("short code not found: {0}")]
    NotFound(String),
    #[error("short code {code} expired at {expired_at}")]
    Expired { code: String, expired_at: Timestamp },
    #[error("storage operation failed: {0}")]
    Storage(#[from] StorageError),
}

impl From<RedirectorError> for ShortenerError {
    fn from(error: RedirectorError) -> Self {
        match error {
            RedirectorError::NotFound(code) => ShortenerError::NotFound(code),
            RedirectorError::Expired { code, .. } => ShortenerError::Expired(code),
            RedirectorError::Storage(source) => ShortenerError::Storage(source.to_string()),
        }
    }
}
