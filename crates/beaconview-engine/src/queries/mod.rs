//! One module per query shape, mirroring the endpoints.
//!
//! Each module exposes pure `*_sql` builders and `parse_*` row readers
//! so the statement text and the shaping logic are testable without a
//! live store; the engine wires them to [`crate::store::AggregateStore`].

pub mod breakdown;
pub mod stats;
pub mod timeseries;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde_json::Value;

/// Read a numeric field tolerantly. The store renders aggregates
/// inconsistently across types: 64-bit integers arrive as JSON strings,
/// `SUM` over doubles arrives as a float even when integral.
pub(crate) fn row_i64(row: &Value, key: &str) -> i64 {
    match row.get(key) {
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f.round() as i64))
            .unwrap_or(0),
        Some(Value::String(s)) => s
            .parse::<i64>()
            .ok()
            .or_else(|| s.parse::<f64>().ok().map(|f| f.round() as i64))
            .unwrap_or(0),
        _ => 0,
    }
}

pub(crate) fn row_str(row: &Value, key: &str) -> String {
    row.get(key)
        .and_then(|v| v.as_str())
        .unwrap_or_default()
        .to_string()
}

/// Parse a store-rendered timestamp (`YYYY-MM-DD HH:MM:SS`, UTC) or an
/// RFC 3339 string. `NULL` and unparsable values read as `None`.
pub(crate) fn row_timestamp(row: &Value, key: &str) -> Option<DateTime<Utc>> {
    let raw = row.get(key)?.as_str()?;
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
        .ok()
        .map(|naive| naive.and_utc())
        .or_else(|| {
            DateTime::parse_from_rfc3339(raw)
                .ok()
                .map(|dt| dt.with_timezone(&Utc))
        })
}
