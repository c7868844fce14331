mod url;

pub use self::url::*;

use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
