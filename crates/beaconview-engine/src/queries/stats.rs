//! Scalar counts and the all-time earliest-event lookup.

use beaconview_core::analytics::{EarliestEvents, ScalarCounts};
use beaconview_core::filters::FilterSet;
use beaconview_core::schema::LogicalField;
use beaconview_core::time_range::TimeRange;
use serde_json::Value;

use crate::sql::{filter_clause, site_predicate, time_predicate};

/// Total events plus the newVisitor / bounce flag sums within range.
pub fn counts_sql(dataset: &str, site_id: &str, range: &TimeRange, filters: &FilterSet) -> String {
    format!(
        "SELECT COUNT() AS views, \
                SUM({new_visitor}) AS visitors, \
                SUM({bounce}) AS bounces \
         FROM {dataset} \
         WHERE {site} AND {time}{filters}",
        new_visitor = LogicalField::NewVisitor.column(),
        bounce = LogicalField::Bounce.column(),
        site = site_predicate(site_id),
        time = time_predicate(range),
        filters = filter_clause(filters),
    )
}

pub fn parse_counts(rows: &[Value]) -> ScalarCounts {
    let row = rows.first().cloned().unwrap_or_default();
    ScalarCounts {
        views: super::row_i64(&row, "views"),
        visitors: super::row_i64(&row, "visitors"),
        bounces: super::row_i64(&row, "bounces"),
    }
}

/// All-time, unfiltered earliest event and earliest bounce-flagged
/// event for a site. Used only to gate bounce-rate validity, so the
/// query deliberately ignores the request's range and filters.
pub fn earliest_sql(dataset: &str, site_id: &str) -> String {
    format!(
        "SELECT MIN(timestamp) AS earliest_event, \
                MIN(CASE WHEN {bounce} = 1 THEN timestamp END) AS earliest_bounce \
         FROM {dataset} \
         WHERE {site}",
        bounce = LogicalField::Bounce.column(),
        site = site_predicate(site_id),
    )
}

pub fn parse_earliest(rows: &[Value]) -> EarliestEvents {
    let row = rows.first().cloned().unwrap_or_default();
    EarliestEvents {
        earliest_event: super::row_timestamp(&row, "earliest_event"),
        earliest_bounce: super::row_timestamp(&row, "earliest_bounce"),
    }
}

#[cfg(test)]
mod tests {
    use beaconview_core::time_range::Interval;
    use chrono::{DateTime, Utc};
    use serde_json::json;

    use super::*;

    fn range() -> TimeRange {
        let now = DateTime::parse_from_rfc3339("2026-08-30T10:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        Interval::TrailingDays(7).resolve(chrono_tz::UTC, now)
    }

    #[test]
    fn counts_sql_maps_flags_to_doubles() {
        let sql = counts_sql("site_events", "site1", &range(), &FilterSet::default());
        assert!(sql.contains("SUM(double1) AS visitors"));
        assert!(sql.contains("SUM(double3) AS bounces"));
        assert!(sql.contains("WHERE blob8 = 'site1'"));
        assert!(!sql.contains(" AND blob3"));
    }

    #[test]
    fn counts_sql_appends_compiled_filters() {
        let filters = FilterSet::from_params([("country", "PL")]);
        let sql = counts_sql("site_events", "site1", &range(), &filters);
        assert!(sql.ends_with(" AND blob4 = 'PL'"));
    }

    #[test]
    fn earliest_sql_is_unfiltered_and_rangeless() {
        let sql = earliest_sql("site_events", "site1");
        assert!(!sql.contains("timestamp >="));
        assert!(sql.contains("CASE WHEN double3 = 1 THEN timestamp END"));
    }

    #[test]
    fn parses_counts_and_earliest_rows() {
        let counts = parse_counts(&[json!({"views": 500, "visitors": 100.0, "bounces": "40"})]);
        assert_eq!(
            counts,
            ScalarCounts {
                views: 500,
                visitors: 100,
                bounces: 40
            }
        );

        let earliest = parse_earliest(&[json!({
            "earliest_event": "2024-01-01 00:00:00",
            "earliest_bounce": null,
        })]);
        assert!(earliest.earliest_event.is_some());
        assert_eq!(earliest.earliest_bounce, None);

        // No rows at all (store returned an empty data array).
        assert_eq!(parse_counts(&[]).views, 0);
        assert_eq!(parse_earliest(&[]), EarliestEvents::default());
    }
}
