//! Time-bucketed views/visitors series with gap zero-filling.

use std::collections::HashMap;

use beaconview_core::analytics::TimeSeriesPoint;
use beaconview_core::filters::FilterSet;
use beaconview_core::schema::LogicalField;
use beaconview_core::time_range::TimeRange;
use serde_json::Value;

use crate::sql::{bucket_expr, filter_clause, site_predicate, time_predicate};

pub fn timeseries_sql(
    dataset: &str,
    site_id: &str,
    range: &TimeRange,
    filters: &FilterSet,
) -> String {
    format!(
        "SELECT {bucket} AS bucket, \
                COUNT() AS views, \
                SUM({new_visitor}) AS visitors \
         FROM {dataset} \
         WHERE {site} AND {time}{filters} \
         GROUP BY bucket \
         ORDER BY bucket ASC",
        bucket = bucket_expr(range),
        new_visitor = LogicalField::NewVisitor.column(),
        site = site_predicate(site_id),
        time = time_predicate(range),
        filters = filter_clause(filters),
    )
}

/// Shape raw grouped rows into one point per bucket in the range.
///
/// Buckets the store returned nothing for materialize with zero counts,
/// so callers never see gaps. Matching is exact-or-prefix because the
/// store renders date buckets both with and without a time-of-day part.
pub fn zero_filled_series(range: &TimeRange, rows: &[Value]) -> Vec<TimeSeriesPoint> {
    let mut by_bucket: HashMap<String, (i64, i64)> = HashMap::new();
    for row in rows {
        by_bucket.insert(
            super::row_str(row, "bucket"),
            (super::row_i64(row, "views"), super::row_i64(row, "visitors")),
        );
    }

    range
        .bucket_labels()
        .into_iter()
        .map(|label| {
            let (views, visitors) = lookup_bucket(&by_bucket, &label);
            TimeSeriesPoint {
                bucket_start: label,
                views,
                visitors,
            }
        })
        .collect()
}

fn lookup_bucket(by_bucket: &HashMap<String, (i64, i64)>, label: &str) -> (i64, i64) {
    if let Some(&counts) = by_bucket.get(label) {
        return counts;
    }
    for (key, &counts) in by_bucket {
        if key.starts_with(label) || label.starts_with(key.as_str()) {
            return counts;
        }
    }
    (0, 0)
}
