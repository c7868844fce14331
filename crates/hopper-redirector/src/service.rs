use std::sync::Arc;

use crate::error::{RedirectorError, Result};
use crate::redirector::Redirector;
use async_trait::async_trait;
use hopper_core::{ClickMeta, Repository, ShortCode};
use jiff::Timestamp;
use tracing::{debug, trace};

/// Service for handling URL redirects.
///
/// Fetches the record, rejects it once expired and records the click
/// otherwise. Holds no state of its own besides the shared repository.
#[derive(Debug)]
pub struct RedirectorService<R> {
    repository: Arc<R>,
}

impl<R> Clone for RedirectorService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

impl<R: Repository> RedirectorService<R> {
    /// Creates a new RedirectorService with the given repository.
    pub fn new(repository: R) -> Self {
        Self::with_shared(Arc::new(repository))
    }

    /// Creates a RedirectorService over a repository shared with other services.
    pub fn with_shared(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Resolves a short code to its target URL.
    ///
    /// # Returns
    ///
    /// * `Ok(url)` - The target URL; one click has been appended
    /// * `Err(NotFound)` - If the code doesn't exist
    /// * `Err(Expired)` - If `now` is at or past the record's expiry; nothing is recorded
    pub async fn resolve(
        &self,
        code: &ShortCode,
        now: Timestamp,
        meta: ClickMeta,
    ) -> Result<String> {
        Redirector::resolve(self, code, now, meta).await
    }
}

#[async_trait]
impl<R: Repository> Redirector for RedirectorService<R> {
    async fn resolve(
        &self,
        code: &ShortCode,
        now: Timestamp,
        meta: ClickMeta,
    ) -> Result<String> {
        trace!(code = %code, "resolving short code");

        let Some(record) = self.repository.get(code).await? else {
            trace!(code = %code, "Short code not found");
            return Err(RedirectorError::NotFound(code.to_string()));
        };

        if record.is_expired_at(now) {
            debug!(code = %code, expired_at = %record.expires_at, "Record has expired");
            return Err(RedirectorError::Expired {
                code: code.to_string(),
                expired_at: record.expires_at,
            });
        }

        self.repository
            .append_click(code, meta.into_event(now))
            .await?;

        debug!(code = %code, url = %record.target_url, "Resolved short code");
        Ok(record.target_url)
    }
}
