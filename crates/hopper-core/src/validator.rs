//! Pure input checks run before anything touches the repository.

use crate::error::{CoreError, Result};
use crate::shortcode::ShortCode;
use jiff::{SignedDuration, Timestamp};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use url::Url;

/// Validity applied when the caller does not supply one.
pub const DEFAULT_VALIDITY_MINUTES: i64 = 30;

/// How long, in whole minutes, a short code stays eligible for redirection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct Validity(i64);

impl Validity {
    /// Creates a validity of `minutes`, which must be strictly positive.
    pub fn new(minutes: i64) -> Result<Self> {
        if minutes <= 0 {
            return Err(CoreError::InvalidValidity(format!(
                "must be a positive integer (minutes), got {}",
                minutes
            )));
        }
        Ok(Self(minutes))
    }

    pub fn minutes(&self) -> i64 {
        self.0
    }

    /// Computes the expiry for a record created at `created_at`.
    ///
    /// Fails with [`CoreError::InvalidValidity`] when the result would fall
    /// outside the representable timestamp range.
    pub fn expires_after(&self, created_at: Timestamp) -> Result<Timestamp> {
        let out_of_range =
            || CoreError::InvalidValidity(format!("{} minutes is out of range", self.0));

        let seconds = self.0.checked_mul(60).ok_or_else(out_of_range)?;
        created_at
            .checked_add(SignedDuration::from_secs(seconds))
            .map_err(|_| out_of_range())
    }
}

impl TryFrom<i64> for Validity {
    type Error = CoreError;

    fn try_from(minutes: i64) -> Result<Self> {
        Self::new(minutes)
    }
}

impl From<Validity> for i64 {
    fn from(validity: Validity) -> Self {
        validity.0
    }
}

impl Default for Validity {
    fn default() -> Self {
        Self(DEFAULT_VALIDITY_MINUTES)
    }
}

impl Display for Validity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}m", self.0)
    }
}

/// Succeeds iff `url` parses as an absolute URL with a scheme and a host.
///
/// Control characters are rejected even where the parser would strip them,
/// since the raw string is what gets stored.
pub fn validate_url(url: &str) -> Result<Url> {
    if url.is_empty() {
        return Err(CoreError::InvalidUrl("URL cannot be empty".to_string()));
    }
    if url.chars().any(char::is_control) {
        return Err(CoreError::InvalidUrl(format!(
            "URL must not contain control characters: {:?}",
            url
        )));
    }

    let parsed = Url::parse(url).map_err(|e| CoreError::InvalidUrl(format!("{}: {}", e, url)))?;

    match parsed.host_str() {
        Some(host) if !host.is_empty() => Ok(parsed),
        _ => Err(CoreError::InvalidUrl(format!(
            "URL must have a valid scheme and host: {}",
            url
        ))),
    }
}

/// Resolves the caller's optional validity, defaulting to 30 minutes.
pub fn validate_validity(minutes: Option<i64>) -> Result<Validity> {
    match minutes {
        Some(minutes) => Validity::new(minutes),
        None => Ok(Validity::default()),
    }
}

/// Succeeds iff `code` matches `^[a-zA-Z0-9]{4,16}$`.
pub fn validate_shortcode_format(code: &str) -> Result<ShortCode> {
    ShortCode::new(code)
}
