use crate::error::{AppError, Result};
use crate::model::{CreateUrlRequest, CreateUrlResponse, StatsResponse};
use crate::state::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::{ConnectInfo, Path, State};
use axum::http::header::{LOCATION, REFERER};
use axum::http::{HeaderMap, HeaderName, HeaderValue, StatusCode};
use axum::Json;
use hopper_core::{ClickMeta, ShortenerError};
use std::net::SocketAddr;
use tracing::{debug, error};

pub async fn create_url_handler(
    State(state): State<AppState>,
    payload: std::result::Result<Json<CreateUrlRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CreateUrlResponse>)> {
    let Json(request) = payload.map_err(|rejection| {
        debug!(error = %rejection, "rejected create request body");
        AppError::MalformedBody(rejection.body_text())
    })?;

    let created = state.shortener().create(request.into_params()?).await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateUrlResponse {
            short_link: created.code.to_url(state.base_url()),
            expiry: created.expires_at,
        }),
    ))
}

pub async fn get_stats_handler(
    Path(shortcode): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<StatsResponse>> {
    let record = state.shortener().stats(&shortcode).await?;
    Ok(Json(StatsResponse::from(record)))
}

pub async fn redirect_handler(
    Path(shortcode): Path<String>,
    State(state): State<AppState>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
) -> Result<(StatusCode, [(HeaderName, HeaderValue); 1])> {
    let referrer = headers
        .get(REFERER)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .map(str::to_owned);
    let meta = ClickMeta::new(referrer, peer.ip().to_string());

    let target = state.shortener().redirect(&shortcode, meta).await?;

    Ok((StatusCode::FOUND, [(LOCATION, location(&target)?)]))
}

/// Stored targets are kept as submitted; non-ASCII ones are sent in their
/// percent-encoded form.
fn location(target: &str) -> Result<HeaderValue> {
    let value = if target.is_ascii() {
        target.to_owned()
    } else {
        url::Url::parse(target)
            .map(String::from)
            .unwrap_or_else(|_| target.to_owned())
    };

    HeaderValue::try_from(value).map_err(|e| {
        error!(url = target, error = %e, "target URL is not a valid Location header");
        AppError::Shortener(ShortenerError::Storage(e.to_string()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn location_percent_encodes_unicode() {
        let value = location("https://example.com/caf\u{e9}").unwrap();
        assert_eq!(value, "https://example.com/caf%C3%A9");
    }

    #[test]
    fn location_keeps_ascii_targets_verbatim() {
        let value = location("https://example.com").unwrap();
        assert_eq!(value, "https://example.com");
    }
}
