//! Breakdown row normalization and stable ordering.

use std::cmp::Ordering;

use crate::analytics::BreakdownRow;

/// Label rendered for rows whose grouped value is empty or missing.
/// The dashboard depends on this being distinct from any real value.
pub const UNKNOWN_LABEL: &str = "(unknown)";

/// Normalize raw grouped rows into canonical breakdown rows.
///
/// Empty labels collapse into [`UNKNOWN_LABEL`], then the stable order
/// (count descending, label ascending, plain lexicographic) is
/// re-asserted. The store already orders and paginates; re-sorting here
/// keeps pagination reproducible even if its collation differs from
/// byte order, and restores the tie-break after label rewriting.
pub fn shape_breakdown(rows: Vec<BreakdownRow>) -> Vec<BreakdownRow> {
    let mut shaped: Vec<BreakdownRow> = rows
        .into_iter()
        .map(|row| BreakdownRow {
            label: if row.label.is_empty() {
                UNKNOWN_LABEL.to_string()
            } else {
                row.label
            },
            count: row.count,
        })
        .collect();
    shaped.sort_by(compare_rows);
    shaped
}

fn compare_rows(a: &BreakdownRow, b: &BreakdownRow) -> Ordering {
    b.count.cmp(&a.count).then_with(|| a.label.cmp(&b.label))
}
