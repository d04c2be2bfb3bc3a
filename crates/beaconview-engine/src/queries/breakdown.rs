//! Grouped top-N breakdowns with server-side pagination.

use beaconview_core::analytics::BreakdownRow;
use beaconview_core::filters::FilterSet;
use beaconview_core::results::shape_breakdown;
use beaconview_core::schema::LogicalField;
use beaconview_core::time_range::TimeRange;
use serde_json::Value;

use crate::sql::{filter_clause, site_predicate, time_predicate};

/// Top values of `group_field` by event count.
///
/// Ordering (count descending, label ascending) and LIMIT/OFFSET are
/// pushed into the store — paginating by over-fetching and truncating
/// client-side would pay the full scan cost on every page.
pub fn breakdown_sql(
    dataset: &str,
    site_id: &str,
    range: &TimeRange,
    filters: &FilterSet,
    group_field: LogicalField,
    limit: u32,
    offset: u32,
) -> String {
    format!(
        "SELECT {column} AS label, COUNT() AS count \
         FROM {dataset} \
         WHERE {site} AND {time}{filters} \
         GROUP BY label \
         ORDER BY count DESC, label ASC \
         LIMIT {limit} OFFSET {offset}",
        column = group_field.column(),
        site = site_predicate(site_id),
        time = time_predicate(range),
        filters = filter_clause(filters),
    )
}

/// Read grouped rows and normalize them through the result shaper.
pub fn parse_breakdown(rows: &[Value]) -> Vec<BreakdownRow> {
    let raw = rows
        .iter()
        .map(|row| BreakdownRow {
            label: super::row_str(row, "label"),
            count: super::row_i64(row, "count"),
        })
        .collect();
    shape_breakdown(raw)
}
