//! The aggregation engine: one method per query shape, one dispatch
//! entry point per request.

use std::sync::Arc;

use beaconview_core::analytics::{
    AggregateRequest, AggregateResult, BreakdownRow, DerivedStats, EarliestEvents, Endpoint,
    ScalarCounts, TimeSeriesPoint,
};
use beaconview_core::error::EngineError;
use beaconview_core::filters::FilterSet;
use beaconview_core::metrics::derive_stats;
use beaconview_core::schema::LogicalField;
use beaconview_core::time_range::TimeRange;
use tracing::debug;

use crate::queries::{breakdown, stats, timeseries};
use crate::store::AggregateStore;

/// Request-scoped, stateless aggregation over the external column
/// store. Cheap to clone; the store handle is shared.
#[derive(Clone)]
pub struct AnalyticsEngine {
    store: Arc<dyn AggregateStore>,
    dataset: String,
}

impl AnalyticsEngine {
    pub fn new(store: Arc<dyn AggregateStore>, dataset: &str) -> Self {
        Self {
            store,
            dataset: dataset.to_string(),
        }
    }

    async fn run(&self, endpoint: Endpoint, sql: &str) -> Result<Vec<serde_json::Value>, EngineError> {
        debug!(endpoint = endpoint.name(), %sql, "issuing store query");
        self.store
            .query(sql)
            .await
            .map_err(|source| EngineError::QueryExecution {
                endpoint: endpoint.name(),
                source,
            })
    }

    /// Ranged, filtered scalar counts for the stats endpoint.
    pub async fn scalar_counts(
        &self,
        site_id: &str,
        range: &TimeRange,
        filters: &FilterSet,
    ) -> Result<ScalarCounts, EngineError> {
        let sql = stats::counts_sql(&self.dataset, site_id, range, filters);
        let rows = self.run(Endpoint::Stats, &sql).await?;
        Ok(stats::parse_counts(&rows))
    }

    /// All-time earliest event/bounce timestamps for a site.
    pub async fn earliest_events(&self, site_id: &str) -> Result<EarliestEvents, EngineError> {
        let sql = stats::earliest_sql(&self.dataset, site_id);
        let rows = self.run(Endpoint::Stats, &sql).await?;
        Ok(stats::parse_earliest(&rows))
    }

    /// Stats endpoint: counts and the earliest-events lookup are
    /// independent, so they run concurrently. Either failure fails the
    /// whole computation — partial results are never masked as
    /// "insufficient data".
    pub async fn stats(
        &self,
        site_id: &str,
        range: &TimeRange,
        filters: &FilterSet,
    ) -> Result<DerivedStats, EngineError> {
        let (counts, earliest) = tokio::try_join!(
            self.scalar_counts(site_id, range, filters),
            self.earliest_events(site_id),
        )?;
        Ok(derive_stats(&counts, &earliest, range.start))
    }

    /// One point per bucket in range, gaps zero-filled.
    pub async fn time_series(
        &self,
        site_id: &str,
        range: &TimeRange,
        filters: &FilterSet,
    ) -> Result<Vec<TimeSeriesPoint>, EngineError> {
        let sql = timeseries::timeseries_sql(&self.dataset, site_id, range, filters);
        let rows = self.run(Endpoint::Timeseries, &sql).await?;
        Ok(timeseries::zero_filled_series(range, &rows))
    }

    /// Paginated top-N over a single logical field.
    #[allow(clippy::too_many_arguments)]
    pub async fn top_breakdown(
        &self,
        endpoint: Endpoint,
        site_id: &str,
        range: &TimeRange,
        filters: &FilterSet,
        group_field: LogicalField,
        limit: u32,
        offset: u32,
    ) -> Result<Vec<BreakdownRow>, EngineError> {
        let sql = breakdown::breakdown_sql(
            &self.dataset,
            site_id,
            range,
            filters,
            group_field,
            limit,
            offset,
        );
        let rows = self.run(endpoint, &sql).await?;
        Ok(breakdown::parse_breakdown(&rows))
    }

    /// Execute one validated request. The same `FilterSet` feeds every
    /// endpoint, which is what keeps the nine shapes from diverging.
    pub async fn dispatch(&self, req: &AggregateRequest) -> Result<AggregateResult, EngineError> {
        match req.endpoint {
            Endpoint::Stats => self
                .stats(&req.site_id, &req.range, &req.filters)
                .await
                .map(AggregateResult::Stats),
            Endpoint::Timeseries => self
                .time_series(&req.site_id, &req.range, &req.filters)
                .await
                .map(AggregateResult::Timeseries),
            endpoint => {
                // Every remaining endpoint is a breakdown; group_field
                // is Some for all of them by construction.
                let Some(group_field) = endpoint.group_field() else {
                    return Err(EngineError::UnknownEndpoint(endpoint.name().to_string()));
                };
                self.top_breakdown(
                    endpoint,
                    &req.site_id,
                    &req.range,
                    &req.filters,
                    group_field,
                    req.limit,
                    req.offset,
                )
                .await
                .map(AggregateResult::Breakdown)
            }
        }
    }
}
