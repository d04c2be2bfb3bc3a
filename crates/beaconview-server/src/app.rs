use std::sync::Arc;

use axum::{http::HeaderValue, routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{routes, state::AppState};

/// Construct the Axum [`Router`] with all routes and middleware attached.
///
/// Middleware, outer to inner:
/// 1. `TraceLayer` — structured request/response logging via `tracing`.
/// 2. `CorsLayer` — the dashboard is typically served from a different
///    origin than this API; origins come from config, empty meaning any.
pub fn build_app(state: Arc<AppState>) -> Router {
    let cors = if state.config.cors_origins.is_empty() {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> = state
            .config
            .cors_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();
        CorsLayer::new().allow_origin(origins)
    };

    Router::new()
        .route("/health", get(routes::health::health))
        .route("/api/analytics", get(routes::analytics::analytics))
        .layer(TraceLayer::new_for_http())
        .layer(cors.allow_methods(Any).allow_headers(Any))
        .with_state(state)
}
