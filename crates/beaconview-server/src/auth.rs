//! Static API-key authentication for the analytics API.

use axum::http::HeaderMap;

use crate::error::AppError;

/// Check the request against the configured key.
///
/// Two header forms are accepted, matching what the dashboard and
/// third-party API consumers already send: `Authorization: Bearer
/// <key>` and `X-API-Key: <key>`. A Bearer header, when present, wins;
/// there is no fallthrough from a wrong Bearer token to `X-API-Key`.
pub fn require_api_key(headers: &HeaderMap, expected: &str) -> Result<(), AppError> {
    if let Some(auth) = headers.get("authorization").and_then(|v| v.to_str().ok()) {
        if let Some(token) = auth.strip_prefix("Bearer ") {
            if token == expected {
                return Ok(());
            }
            return Err(AppError::Unauthorized);
        }
    }

    if let Some(key) = headers.get("x-api-key").and_then(|v| v.to_str().ok()) {
        if key == expected {
            return Ok(());
        }
    }

    Err(AppError::Unauthorized)
}
