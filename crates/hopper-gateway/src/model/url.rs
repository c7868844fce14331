use hopper_core::{ClickEvent, CreateParams, ShortenerError, UrlRecord};
use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body of `POST /shorturls`.
///
/// Fields are taken loosely so that a wrongly typed field is reported as
/// the matching validation error rather than a generic parse failure.
#[derive(Debug, Default, Deserialize)]
pub struct CreateUrlRequest {
    #[serde(default)]
    pub url: Option<Value>,
    #[serde(default)]
    pub validity: Option<Value>,
    #[serde(default)]
    pub shortcode: Option<Value>,
}

impl CreateUrlRequest {
    pub fn into_params(self) -> Result<CreateParams, ShortenerError> {
        let url = match self.url {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(url)) => url,
            Some(other) => return Err(ShortenerError::InvalidUrl(other.to_string())),
        };

        let validity = match self.validity {
            None | Some(Value::Null) => None,
            Some(Value::Number(n)) => Some(
                integral(&n).ok_or_else(|| ShortenerError::InvalidValidity(n.to_string()))?,
            ),
            Some(other) => return Err(ShortenerError::InvalidValidity(other.to_string())),
        };

        // An empty shortcode means "generate one".
        let shortcode = match self.shortcode {
            None | Some(Value::Null) => None,
            Some(Value::String(code)) if code.is_empty() => None,
            Some(Value::String(code)) => Some(code),
            Some(other) => {
                return Err(ShortenerError::InvalidShortcodeFormat(other.to_string()))
            }
        };

        Ok(CreateParams {
            url,
            validity,
            shortcode,
        })
    }
}

/// Accepts `5` and `5.0`, rejects `5.5`.
fn integral(n: &serde_json::Number) -> Option<i64> {
    n.as_i64().or_else(|| {
        n.as_f64()
            .filter(|f| f.fract() == 0.0 && *f >= i64::MIN as f64 && *f <= i64::MAX as f64)
            .map(|f| f as i64)
    })
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUrlResponse {
    pub short_link: String,
    pub expiry: Timestamp,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClickResponse {
    pub timestamp: Timestamp,
    pub referrer: Option<String>,
    pub source_address: String,
}

impl From<ClickEvent> for ClickResponse {
    fn from(click: ClickEvent) -> Self {
        Self {
            timestamp: click.timestamp,
            referrer: click.referrer,
            source_address: click.source_address,
        }
    }
}

/// Body of `GET /shorturls/{shortcode}`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub url: String,
    pub created_at: Timestamp,
    pub expiry: Timestamp,
    /// Minutes.
    pub validity: i64,
    pub click_count: usize,
    pub clicks: Vec<ClickResponse>,
}

impl From<UrlRecord> for StatsResponse {
    fn from(record: UrlRecord) -> Self {
        Self {
            url: record.target_url,
            created_at: record.created_at,
            expiry: record.expires_at,
            validity: record.validity.minutes(),
            click_count: record.clicks.len(),
            clicks: record.clicks.into_iter().map(ClickResponse::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(body: Value) -> Result<CreateParams, ShortenerError> {
        serde_json::from_value::<CreateUrlRequest>(body)
            .unwrap()
            .into_params()
    }

    #[test]
    fn full_request() {
        let params =
            parse(json!({"url": "https://example.com", "validity": 5, "shortcode": "abcd"}))
                .unwrap();
        assert_eq!(params.url, "https://example.com");
        assert_eq!(params.validity, Some(5));
        assert_eq!(params.shortcode.as_deref(), Some("abcd"));
    }

    #[test]
    fn absent_and_null_fields_fall_back() {
        let params = parse(json!({"url": "https://example.com", "validity": null})).unwrap();
        assert_eq!(params.validity, None);
        assert_eq!(params.shortcode, None);

        let params = parse(json!({})).unwrap();
        assert_eq!(params.url, "");
    }

    #[test]
    fn empty_shortcode_means_generate() {
        let params = parse(json!({"url": "https://example.com", "shortcode": ""})).unwrap();
        assert_eq!(params.shortcode, None);
    }

    #[test]
    fn validity_must_be_integral() {
        assert_eq!(parse(json!({"validity": 10.0})).unwrap().validity, Some(10));
        assert!(matches!(
            parse(json!({"validity": 1.5})),
            Err(ShortenerError::InvalidValidity(_))
        ));
        assert!(matches!(
            parse(json!({"validity": "10"})),
            Err(ShortenerError::InvalidValidity(_))
        ));
    }

    #[test]
    fn wrongly_typed_fields() {
        assert!(matches!(parse(json!({"url": 42})), Err(ShortenerError::InvalidUrl(_))));
        assert!(matches!(
            parse(json!({"url": "https://example.com", "shortcode": 1234})),
            Err(ShortenerError::InvalidShortcodeFormat(_))
        ));
    }

    #[test]
    fn stats_serialize_camel_case() {
        let created_at: Timestamp = "2026-01-01T00:00:00Z".parse().unwrap();
        let response = StatsResponse {
            url: "https://example.com".into(),
            created_at,
            expiry: created_at,
            validity: 30,
            click_count: 1,
            clicks: vec![ClickResponse {
                timestamp: created_at,
                referrer: None,
                source_address: "127.0.0.1".into(),
            }],
        };

        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["createdAt"], "2026-01-01T00:00:00Z");
        assert_eq!(value["clickCount"], 1);
        assert_eq!(value["clicks"][0]["sourceAddress"], "127.0.0.1");
        assert!(value["clicks"][0]["referrer"].is_null());
    }
}
