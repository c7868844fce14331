use crate::repository::{ClickMeta, UrlRecord};
use crate::shortcode::ShortCode;
use async_trait::async_trait;
use jiff::Timestamp;

type Result<T> = std::result::Result<T, crate::error::ShortenerError>;

/// Raw, unvalidated parameters for creating a shortened URL.
#[derive(Debug, Clone, Default)]
pub struct CreateParams {
    /// The original URL to be shortened.
    pub url: String,
    /// Validity in minutes; `None` means the default of 30.
    pub validity: Option<i64>,
    /// Optional caller-chosen short code.
    pub shortcode: Option<String>,
}

impl CreateParams {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    pub fn with_validity(mut self, minutes: i64) -> Self {
        self.validity = Some(minutes);
        self
    }

    pub fn with_shortcode(mut self, code: impl Into<String>) -> Self {
        self.shortcode = Some(code.into());
        self
    }
}

/// The outcome of a successful create.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Created {
    pub code: ShortCode,
    pub expires_at: Timestamp,
}

#[async_trait]
pub trait Shortener: Send + Sync + 'static {
    /// Validates the parameters, allocates or claims a short code and stores the record.
    async fn create(&self, params: CreateParams) -> Result<Created>;

    /// Returns the record for `code`, expired or not.
    async fn stats(&self, code: &str) -> Result<UrlRecord>;

    /// Resolves `code` to its target URL and records the click.
    /// Fails with `NotFound` or `Expired`.
    async fn redirect(&self, code: &str, meta: ClickMeta) -> Result<String>;
}
