use axum::{response::IntoResponse, Json};
use serde_json::json;

/// `GET /health` — liveness check, unauthenticated.
///
/// The engine holds no connections or files of its own; store outages
/// surface per-request, so liveness here means "the service is up".
pub async fn health() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION")
    }))
}
