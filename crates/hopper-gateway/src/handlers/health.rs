use crate::model::HealthResponse;
use axum::Json;

pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        message: "URL Shortener Backend is running.",
    })
}
