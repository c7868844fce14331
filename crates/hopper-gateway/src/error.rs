use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use hopper_core::ShortenerError;
use tracing::error;

use crate::model::ErrorResponse;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug)]
pub enum AppError {
    /// An engine outcome.
    Shortener(ShortenerError),
    /// The request could not be read as JSON at all.
    MalformedBody(String),
}

impl From<ShortenerError> for AppError {
    fn from(err: ShortenerError) -> Self {
        AppError::Shortener(err)
    }
}

impl AppError {
    fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            AppError::MalformedBody(detail) => (StatusCode::BAD_REQUEST, detail.clone()),
            AppError::Shortener(err) => match err {
                ShortenerError::InvalidUrl(_) => (StatusCode::BAD_REQUEST, "Invalid URL".into()),
                ShortenerError::InvalidValidity(_) => (
                    StatusCode::BAD_REQUEST,
                    "Validity must be a positive integer (minutes)".into(),
                ),
                ShortenerError::InvalidShortcodeFormat(_) => (
                    StatusCode::BAD_REQUEST,
                    "Shortcode must be alphanumeric, 4-16 chars".into(),
                ),
                ShortenerError::ShortcodeTaken(_) => {
                    (StatusCode::CONFLICT, "Shortcode already exists".into())
                }
                ShortenerError::NotFound(_) => {
                    (StatusCode::NOT_FOUND, "Shortcode not found".into())
                }
                ShortenerError::Expired(_) => (StatusCode::GONE, "Shortcode expired".into()),
                ShortenerError::Storage(_) => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".into(),
                ),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();
        if status.is_server_error() {
            error!(error = ?self, "request failed");
        }
        (status, Json(ErrorResponse { error: message })).into_response()
    }
}
