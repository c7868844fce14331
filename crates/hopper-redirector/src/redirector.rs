use crate::error::Result;
use async_trait::async_trait;
use hopper_core::{ClickMeta, ShortCode};
use jiff::Timestamp;

#[async_trait]
pub trait Redirector: Send + Sync + 'static {
    /// Resolves a short code to its target URL as of `now`, recording the click.
    ///
    /// Expiry is checked before the click is recorded, so an expired code
    /// never gains clicks.
    async fn resolve(&self, code: &ShortCode, now: Timestamp, meta: ClickMeta)
        -> Result<String>;
}
