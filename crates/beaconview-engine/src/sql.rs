//! SQL fragment composition in physical column terms.
//!
//! The store's HTTP API takes no bound parameters, so every
//! user-supplied value is inlined through [`quote`]. Predicates only
//! ever compose as AND-chains of exact equalities, which keeps the
//! generated statements trivially auditable.

use beaconview_core::filters::FilterSet;
use beaconview_core::schema::LogicalField;
use beaconview_core::time_range::{Bucket, TimeRange};

/// Escape and single-quote a string literal.
pub fn quote(value: &str) -> String {
    let escaped = value.replace('\\', "\\\\").replace('\'', "''");
    format!("'{escaped}'")
}

/// `blob8 = '<site_id>'`.
pub fn site_predicate(site_id: &str) -> String {
    format!("{} = {}", LogicalField::SiteId.column(), quote(site_id))
}

/// Half-open `[start, end)` predicate on the event timestamp.
pub fn time_predicate(range: &TimeRange) -> String {
    let start = range.start.format("%Y-%m-%d %H:%M:%S");
    let end = range.end.format("%Y-%m-%d %H:%M:%S");
    format!(
        "timestamp >= toDateTime('{start}', 'UTC') AND timestamp < toDateTime('{end}', 'UTC')"
    )
}

/// Zero or more ` AND blobN = '<value>'` fragments for the active
/// filters, ready to append to an existing WHERE clause.
pub fn filter_clause(filters: &FilterSet) -> String {
    filters
        .entries()
        .iter()
        .map(|(field, value)| format!(" AND {} = {}", field.column(), quote(value)))
        .collect()
}

/// Grouping expression whose rendered output matches
/// [`TimeRange::bucket_labels`]: hour buckets as UTC `YYYY-MM-DD
/// HH:00:00`, day buckets as zone-local `YYYY-MM-DD`.
pub fn bucket_expr(range: &TimeRange) -> String {
    match range.bucket {
        Bucket::Hour => "toStartOfHour(timestamp, 'UTC')".to_string(),
        Bucket::Day => format!("toDate(timestamp, {})", quote(range.tz.name())),
    }
}

#[cfg(test)]
mod tests {
    use beaconview_core::time_range::Interval;
    use chrono::{DateTime, Utc};

    use super::*;

    fn utc(s: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
    }

    #[test]
    fn quote_escapes_quotes_and_backslashes() {
        assert_eq!(quote("plain"), "'plain'");
        assert_eq!(quote("O'Neill"), "'O''Neill'");
        assert_eq!(quote(r"a\b"), r"'a\\b'");
        assert_eq!(quote("'; DROP TABLE x --"), "'''; DROP TABLE x --'");
    }

    #[test]
    fn site_predicate_uses_the_mapped_blob() {
        assert_eq!(site_predicate("site1"), "blob8 = 'site1'");
    }

    #[test]
    fn filter_clause_is_an_and_chain_in_physical_terms() {
        let filters = FilterSet::from_params([("path", "/docs"), ("browserName", "Firefox")]);
        assert_eq!(
            filter_clause(&filters),
            " AND blob3 = '/docs' AND blob6 = 'Firefox'"
        );
        assert_eq!(filter_clause(&FilterSet::default()), "");
    }

    #[test]
    fn time_predicate_is_half_open_utc() {
        let range = Interval::TrailingDays(7).resolve(chrono_tz::UTC, utc("2026-08-30T10:00:00Z"));
        assert_eq!(
            time_predicate(&range),
            "timestamp >= toDateTime('2026-08-23 10:00:00', 'UTC') \
             AND timestamp < toDateTime('2026-08-30 10:00:00', 'UTC')"
        );
    }

    #[test]
    fn bucket_expr_matches_bucket_kind() {
        let hourly = Interval::Today.resolve(chrono_tz::UTC, utc("2026-08-30T10:00:00Z"));
        assert_eq!(bucket_expr(&hourly), "toStartOfHour(timestamp, 'UTC')");
        let daily =
            Interval::TrailingDays(30).resolve(chrono_tz::Europe::Warsaw, utc("2026-08-30T10:00:00Z"));
        assert_eq!(bucket_expr(&daily), "toDate(timestamp, 'Europe/Warsaw')");
    }
}
