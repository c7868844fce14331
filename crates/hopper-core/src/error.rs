use thiserror::Error;

/// Errors raised while validating caller input.
pub type Result<T> = std::result::Result<T, CoreError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("invalid url: {0}")]
    InvalidUrl(String),
    #[error("invalid validity: {0}")]
    InvalidValidity(String),
    #[error("invalid short code: {0}")]
    InvalidShortCode(String),
}

/// Errors returned by [`Repository`](crate::Repository) implementations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    #[error("short code already exists: {0}")]
    Conflict(String),
    #[error("short code not found: {0}")]
    NotFound(String),
}

/// The error taxonomy surfaced by the engine facade.
///
/// Everything except [`ShortenerError::Storage`] is a caller-input or
/// caller-state error and is reported back as is. `Storage` carries
/// unexpected internal faults.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShortenerError {
    #[error("invalid url: {0}")]
    InvalidUrl(String),
    #[error("invalid validity: {0}")]
    InvalidValidity(String),
    #[error("invalid short code format: {0}")]
    InvalidShortcodeFormat(String),
    #[error("short code already taken: {0}")]
    ShortcodeTaken(String),
    #[error("short code not found: {0}")]
    NotFound(String),
    #[error("short code expired: {0}")]
    Expired(String),
    #[error("storage error: {0}")]
    Storage(String),
}

impl From<CoreError> for ShortenerError {
    fn from(value: CoreError) -> Self {
        match value {
            CoreError::InvalidUrl(message) => Self::InvalidUrl(message),
            CoreError::InvalidValidity(message) => Self::InvalidValidity(message),
            CoreError::InvalidShortCode(message) => Self::InvalidShortcodeFormat(message),
        }
    }
}

impl From<StorageError> for ShortenerError {
    fn from(value: StorageError) -> Self {
        match value {
            StorageError::Conflict(code) => Self::ShortcodeTaken(code),
            StorageError::NotFound(code) => Self::NotFound(code),
        }
    }
}
