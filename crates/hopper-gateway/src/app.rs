use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers::{create_url_handler, get_stats_handler, health_handler, redirect_handler};
use crate::state::AppState;

pub struct App {}

impl App {
    /// Builds the router.
    ///
    /// The redirect route reads the peer address, so the router must be
    /// served with `into_make_service_with_connect_info::<SocketAddr>()`.
    pub fn router(state: AppState) -> Router {
        Router::new()
            .route("/", get(health_handler))
            .route("/shorturls", post(create_url_handler))
            .route("/shorturls/{shortcode}", get(get_stats_handler))
            .route("/shorturls/{shortcode}/redirect", get(redirect_handler))
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive())
            .with_state(state)
    }
}
