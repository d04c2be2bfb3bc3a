//! Request and result types shared by the engine and the HTTP boundary.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::EngineError;
use crate::filters::FilterSet;
use crate::schema::LogicalField;
use crate::time_range::TimeRange;

/// The nine queryable report shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Stats,
    Timeseries,
    Paths,
    Referrers,
    Countries,
    Browsers,
    BrowserVersions,
    Devices,
    Events,
}

impl Endpoint {
    pub fn parse(token: &str) -> Result<Self, EngineError> {
        match token {
            "stats" => Ok(Endpoint::Stats),
            "timeseries" => Ok(Endpoint::Timeseries),
            "paths" => Ok(Endpoint::Paths),
            "referrers" => Ok(Endpoint::Referrers),
            "countries" => Ok(Endpoint::Countries),
            "browsers" => Ok(Endpoint::Browsers),
            "browserversions" => Ok(Endpoint::BrowserVersions),
            "devices" => Ok(Endpoint::Devices),
            "events" => Ok(Endpoint::Events),
            other => Err(EngineError::UnknownEndpoint(other.to_string())),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Endpoint::Stats => "stats",
            Endpoint::Timeseries => "timeseries",
            Endpoint::Paths => "paths",
            Endpoint::Referrers => "referrers",
            Endpoint::Countries => "countries",
            Endpoint::Browsers => "browsers",
            Endpoint::BrowserVersions => "browserversions",
            Endpoint::Devices => "devices",
            Endpoint::Events => "events",
        }
    }

    /// The grouping field for breakdown endpoints, `None` for the
    /// scalar/series shapes.
    ///
    /// `browserversions` groups by [`LogicalField::BrowserVersion`] and
    /// is only meaningful once a browserName filter is applied; without
    /// one it still executes and returns a cross-browser version
    /// listing. Documented quirk, preserved from the original product.
    pub fn group_field(self) -> Option<LogicalField> {
        match self {
            Endpoint::Stats | Endpoint::Timeseries => None,
            Endpoint::Paths => Some(LogicalField::Path),
            Endpoint::Referrers => Some(LogicalField::Referrer),
            Endpoint::Countries => Some(LogicalField::Country),
            Endpoint::Browsers => Some(LogicalField::BrowserName),
            Endpoint::BrowserVersions => Some(LogicalField::BrowserVersion),
            Endpoint::Devices => Some(LogicalField::DeviceType),
            Endpoint::Events => Some(LogicalField::EventName),
        }
    }
}

/// One validated aggregation request, constructed per HTTP call and
/// passed once to the engine.
#[derive(Debug, Clone)]
pub struct AggregateRequest {
    pub site_id: String,
    pub range: TimeRange,
    pub filters: FilterSet,
    pub endpoint: Endpoint,
    /// Applied to breakdown endpoints only.
    pub limit: u32,
    pub offset: u32,
}

impl AggregateRequest {
    pub const DEFAULT_LIMIT: u32 = 10;

    pub fn new(
        site_id: &str,
        range: TimeRange,
        filters: FilterSet,
        endpoint: Endpoint,
        limit: Option<u32>,
        offset: Option<u32>,
    ) -> Result<Self, EngineError> {
        if site_id.is_empty() {
            return Err(EngineError::MissingParameter("siteId"));
        }
        Ok(Self {
            site_id: site_id.to_string(),
            range,
            filters,
            endpoint,
            limit: limit.unwrap_or(Self::DEFAULT_LIMIT),
            offset: offset.unwrap_or(0),
        })
    }
}

/// Raw counts for the stats endpoint, straight from the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScalarCounts {
    pub views: i64,
    pub visitors: i64,
    pub bounces: i64,
}

/// All-time earliest timestamps used to gate bounce-rate validity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EarliestEvents {
    pub earliest_event: Option<DateTime<Utc>>,
    pub earliest_bounce: Option<DateTime<Utc>>,
}

/// Stats response body. `bounce_rate` is absent (not zero) when there
/// are no visitors, so a missing rate is distinguishable from a true
/// zero rate.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DerivedStats {
    pub views: i64,
    pub visitors: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bounce_rate: Option<f64>,
    pub has_sufficient_bounce_data: bool,
}

/// One time-series bucket. Buckets with no matching events still appear
/// with zero counts — consumers never special-case gaps.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TimeSeriesPoint {
    pub bucket_start: String,
    pub views: i64,
    pub visitors: i64,
}

/// One row of a top-N breakdown.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct BreakdownRow {
    pub label: String,
    pub count: i64,
}

/// Endpoint-discriminated result, serialized as the bare shape the
/// dashboard consumes (no envelope, no tag).
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(untagged)]
pub enum AggregateResult {
    Stats(DerivedStats),
    Timeseries(Vec<TimeSeriesPoint>),
    Breakdown(Vec<BreakdownRow>),
}
