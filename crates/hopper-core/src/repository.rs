use crate::error::StorageError;
use crate::shortcode::ShortCode;
use crate::validator::Validity;
use async_trait::async_trait;
use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// Type alias for repository results.
pub type Result<T> = std::result::Result<T, StorageError>;

/// A stored URL record in the repository.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UrlRecord {
    /// The short code this record is stored under.
    pub code: ShortCode,
    /// The original URL that was shortened.
    pub target_url: String,
    /// When the record was created.
    pub created_at: Timestamp,
    /// How long the record stays eligible for redirection.
    pub validity: Validity,
    /// `created_at + validity`, fixed at creation.
    pub expires_at: Timestamp,
    /// Every successful redirect, oldest first.
    pub clicks: Vec<ClickEvent>,
}

impl UrlRecord {
    /// Returns whether the record no longer permits redirection at `now`.
    pub fn is_expired_at(&self, now: Timestamp) -> bool {
        now >= self.expires_at
    }
}

/// One recorded redirect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClickEvent {
    pub timestamp: Timestamp,
    pub referrer: Option<String>,
    /// The caller's network origin, kept raw.
    pub source_address: String,
}

/// Requester metadata attached to a redirect.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClickMeta {
    pub referrer: Option<String>,
    pub source_address: String,
}

impl ClickMeta {
    pub fn new(referrer: Option<String>, source_address: impl Into<String>) -> Self {
        Self {
            referrer,
            source_address: source_address.into(),
        }
    }

    /// Stamps the metadata into a [`ClickEvent`] at `timestamp`.
    pub fn into_event(self, timestamp: Timestamp) -> ClickEvent {
        ClickEvent {
            timestamp,
            referrer: self.referrer,
            source_address: self.source_address,
        }
    }
}

/// A read-only view of a repository.
#[async_trait]
pub trait ReadRepository: Send + Sync + 'static {
    /// Retrieves a snapshot of the URL record for a given short code.
    /// Returns `None` if the code does not exist. Expired records are still returned.
    async fn get(&self, code: &ShortCode) -> Result<Option<UrlRecord>>;

    /// Checks whether a short code already exists in the repository.
    async fn exists(&self, code: &ShortCode) -> Result<bool>;
}

#[async_trait]
pub trait Repository: ReadRepository {
    /// Inserts a new URL record under `record.code`.
    ///
    /// The existence check and the insert are one atomic step. Returns
    /// `Err(Conflict)` if the code already exists; the existing record is
    /// left untouched.
    async fn insert(&self, record: UrlRecord) -> Result<()>;

    /// Appends a click to the record's log.
    /// Returns `Err(NotFound)` if the code does not exist.
    async fn append_click(&self, code: &ShortCode, event: ClickEvent) -> Result<()>;
}
