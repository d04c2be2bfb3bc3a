//! Derived metrics computed from raw counts and earliest-event lookups.

use chrono::{DateTime, Utc};

use crate::analytics::{DerivedStats, EarliestEvents, ScalarCounts};

/// bounces / visitors, or `None` when there are no visitors. Absence of
/// a meaningful rate is deliberately distinct from a zero rate.
pub fn bounce_rate(counts: &ScalarCounts) -> Option<f64> {
    if counts.visitors > 0 {
        Some(counts.bounces as f64 / counts.visitors as f64)
    } else {
        None
    }
}

/// Whether a bounce percentage may be rendered at all for a range
/// starting at `range_start`.
///
/// Bounce tracking shipped after event tracking in some deployments, so
/// a range that predates bounce instrumentation would otherwise report
/// a misleadingly low rate. The gate holds iff both timestamps exist
/// and either bounce tracking started with event tracking (equal
/// timestamps) or it predates the queried range.
///
/// The equality is an exact timestamp comparison, as the product
/// defined it. TODO(precision): revisit if the store ever records the
/// two columns with different timestamp rounding.
pub fn has_sufficient_bounce_data(
    earliest: &EarliestEvents,
    range_start: DateTime<Utc>,
) -> bool {
    match (earliest.earliest_event, earliest.earliest_bounce) {
        (Some(event), Some(bounce)) => event == bounce || bounce < range_start,
        _ => false,
    }
}

/// Assemble the stats endpoint response.
pub fn derive_stats(
    counts: &ScalarCounts,
    earliest: &EarliestEvents,
    range_start: DateTime<Utc>,
) -> DerivedStats {
    DerivedStats {
        views: counts.views,
        visitors: counts.visitors,
        bounce_rate: bounce_rate(counts),
        has_sufficient_bounce_data: has_sufficient_bounce_data(earliest, range_start),
    }
}
