use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::HeaderMap,
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use serde::Deserialize;

use beaconview_core::analytics::{AggregateRequest, Endpoint};
use beaconview_core::error::EngineError;
use beaconview_core::filters::FilterSet;
use beaconview_core::time_range::{parse_timezone, Interval};

use crate::{auth::require_api_key, error::AppError, state::AppState};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsQuery {
    pub site_id: Option<String>,
    pub interval: Option<String>,
    pub timezone: Option<String>,
    pub endpoint: Option<String>,
    pub path: Option<String>,
    pub referrer: Option<String>,
    pub device_model: Option<String>,
    pub device_type: Option<String>,
    pub country: Option<String>,
    pub browser_name: Option<String>,
    pub browser_version: Option<String>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

/// `GET /api/analytics` — the single aggregation endpoint.
///
/// Validation happens entirely before the engine issues any store
/// query: missing siteId, an unknown endpoint, or a bad interval token
/// are rejected here. An unparsable timezone is the one recovered
/// error — it logs a warning and falls back to UTC rather than failing
/// the request.
pub async fn analytics(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(query): Query<AnalyticsQuery>,
) -> Result<impl IntoResponse, AppError> {
    require_api_key(&headers, &state.config.api_key)?;

    let site_id = query
        .site_id
        .as_deref()
        .ok_or(EngineError::MissingParameter("siteId"))?;

    let endpoint = Endpoint::parse(query.endpoint.as_deref().unwrap_or("stats"))?;
    let interval = Interval::parse(query.interval.as_deref().unwrap_or("24h"))?;

    let tz = match query.timezone.as_deref() {
        None | Some("") => chrono_tz::UTC,
        Some(raw) => match parse_timezone(raw) {
            Ok(tz) => tz,
            Err(err) => {
                tracing::warn!(timezone = raw, error = %err, "falling back to UTC");
                chrono_tz::UTC
            }
        },
    };
    let range = interval.resolve(tz, Utc::now());

    let filters = FilterSet::from_params([
        ("path", query.path.as_deref().unwrap_or("")),
        ("referrer", query.referrer.as_deref().unwrap_or("")),
        ("deviceModel", query.device_model.as_deref().unwrap_or("")),
        ("deviceType", query.device_type.as_deref().unwrap_or("")),
        ("country", query.country.as_deref().unwrap_or("")),
        ("browserName", query.browser_name.as_deref().unwrap_or("")),
        (
            "browserVersion",
            query.browser_version.as_deref().unwrap_or(""),
        ),
    ]);

    let request =
        AggregateRequest::new(site_id, range, filters, endpoint, query.limit, query.offset)?;

    let result = state.engine.dispatch(&request).await?;
    Ok(Json(result))
}
