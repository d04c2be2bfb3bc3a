//! Interval tokens and timezone-aware time-range resolution.
//!
//! All range boundaries are computed in the requested zone and then
//! converted to absolute instants for querying. Daily buckets follow
//! local calendar dates, so a day containing a DST transition still
//! produces exactly one bucket labeled by that date. Hourly buckets are
//! absolute hour instants labeled in UTC, so the repeated wall-clock
//! hour of a fall-back day stays two distinct buckets.

use chrono::{DateTime, Duration, DurationRound, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;

use crate::error::EngineError;

/// Bucket size for time-series aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bucket {
    Hour,
    Day,
}

/// A recognized interval token. `24h` is an alias for the trailing
/// 1-day case and is the API default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interval {
    Today,
    Yesterday,
    TrailingDays(i64),
}

impl Interval {
    pub fn parse(token: &str) -> Result<Self, EngineError> {
        match token {
            "today" => Ok(Interval::Today),
            "yesterday" => Ok(Interval::Yesterday),
            "1d" | "24h" => Ok(Interval::TrailingDays(1)),
            "7d" => Ok(Interval::TrailingDays(7)),
            "30d" => Ok(Interval::TrailingDays(30)),
            "90d" => Ok(Interval::TrailingDays(90)),
            other => Err(EngineError::InvalidInterval(other.to_string())),
        }
    }

    /// Resolve to an absolute `[start, end)` range as seen from `now`.
    ///
    /// `now` is explicit so callers (and tests) control the clock; the
    /// HTTP boundary passes `Utc::now()`.
    pub fn resolve(self, tz: Tz, now: DateTime<Utc>) -> TimeRange {
        let local_today = now.with_timezone(&tz).date_naive();
        let (start, end) = match self {
            Interval::Today => {
                let start = local_midnight(tz, local_today);
                // At the stroke of local midnight `now == start`; keep
                // the half-open range non-empty.
                (start, now.max(start + Duration::seconds(1)))
            }
            Interval::Yesterday => (
                local_midnight(tz, local_today - Duration::days(1)),
                local_midnight(tz, local_today),
            ),
            Interval::TrailingDays(n) => (now - Duration::days(n), now),
        };
        // Sub-48h ranges chart hourly, anything longer daily.
        let bucket = if end - start <= Duration::hours(48) {
            Bucket::Hour
        } else {
            Bucket::Day
        };
        TimeRange {
            start,
            end,
            bucket,
            tz,
        }
    }
}

/// Parse an IANA zone id. The caller decides whether to surface the
/// error or fall back to UTC (the API boundary falls back and logs).
pub fn parse_timezone(raw: &str) -> Result<Tz, EngineError> {
    raw.parse::<Tz>()
        .map_err(|_| EngineError::InvalidTimezone(raw.to_string()))
}

/// First valid instant of `date` in `tz`, as UTC.
///
/// Spring-forward can remove midnight entirely (some zones shift at
/// 00:00); probe forward hour by hour until the wall clock exists.
/// Fall-back ambiguity takes the earlier occurrence.
fn local_midnight(tz: Tz, date: NaiveDate) -> DateTime<Utc> {
    let mut naive = date.and_time(NaiveTime::MIN);
    for _ in 0..3 {
        if let Some(dt) = tz.from_local_datetime(&naive).earliest() {
            return dt.with_timezone(&Utc);
        }
        naive += Duration::hours(1);
    }
    Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN))
}

/// An absolute half-open query range plus its bucketing decision.
#[derive(Debug, Clone, Copy)]
pub struct TimeRange {
    pub start: DateTime<Utc>,
    /// Exclusive.
    pub end: DateTime<Utc>,
    pub bucket: Bucket,
    pub tz: Tz,
}

impl TimeRange {
    /// Every bucket label in the range, in order, for zero-filling.
    ///
    /// Label formats match what the store renders for the grouping
    /// expressions the engine emits: `YYYY-MM-DD HH:00:00` (UTC) for
    /// hourly buckets, `YYYY-MM-DD` (zone-local date) for daily.
    pub fn bucket_labels(&self) -> Vec<String> {
        let mut labels = Vec::new();
        match self.bucket {
            Bucket::Hour => {
                let mut cur = self
                    .start
                    .duration_trunc(Duration::hours(1))
                    .unwrap_or(self.start);
                while cur < self.end {
                    labels.push(cur.format("%Y-%m-%d %H:00:00").to_string());
                    cur += Duration::hours(1);
                }
            }
            Bucket::Day => {
                let last = (self.end - Duration::seconds(1))
                    .with_timezone(&self.tz)
                    .date_naive();
                let mut date = self.start.with_timezone(&self.tz).date_naive();
                while date <= last {
                    labels.push(date.format("%Y-%m-%d").to_string());
                    match date.succ_opt() {
                        Some(next) => date = next,
                        None => break,
                    }
                }
            }
        }
        labels
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utc(s: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
    }

    #[test]
    fn parse_accepts_all_tokens() {
        for token in ["today", "yesterday", "1d", "24h", "7d", "30d", "90d"] {
            Interval::parse(token).unwrap();
        }
        assert!(matches!(
            Interval::parse("14d"),
            Err(EngineError::InvalidInterval(_))
        ));
    }

    #[test]
    fn start_precedes_end_for_all_intervals_and_zones() {
        let now = utc("2026-08-30T10:00:00Z");
        for token in ["today", "yesterday", "1d", "24h", "7d", "30d", "90d"] {
            for tz in [
                chrono_tz::UTC,
                chrono_tz::America::New_York,
                chrono_tz::Asia::Kolkata,
                chrono_tz::Pacific::Auckland,
            ] {
                let range = Interval::parse(token).unwrap().resolve(tz, now);
                assert!(range.start < range.end, "{token} in {tz}");
            }
        }
    }

    #[test]
    fn today_starts_at_local_midnight() {
        let tz = chrono_tz::America::New_York;
        // 10:00 local on 2026-08-30 (EDT, UTC-4).
        let now = utc("2026-08-30T14:00:00Z");
        let range = Interval::Today.resolve(tz, now);
        assert_eq!(range.start, utc("2026-08-30T04:00:00Z"));
        assert_eq!(range.end, now);
        assert_eq!(range.bucket, Bucket::Hour);
    }

    #[test]
    fn yesterday_spans_local_midnight_to_midnight() {
        let tz = chrono_tz::America::New_York;
        let now = utc("2026-08-30T14:00:00Z");
        let range = Interval::Yesterday.resolve(tz, now);
        assert_eq!(range.start, utc("2026-08-29T04:00:00Z"));
        assert_eq!(range.end, utc("2026-08-30T04:00:00Z"));
        assert_eq!(range.bucket, Bucket::Hour);
    }

    #[test]
    fn today_at_exact_local_midnight_is_still_a_range() {
        let tz = chrono_tz::America::New_York;
        // 2026-08-30T00:00:00 local (EDT, UTC-4), the degenerate instant.
        let now = utc("2026-08-30T04:00:00Z");
        let range = Interval::Today.resolve(tz, now);
        assert!(range.start < range.end);
        assert_eq!(range.bucket_labels(), vec!["2026-08-30 04:00:00"]);
    }

    #[test]
    fn trailing_intervals_bucket_by_length() {
        let now = utc("2026-08-30T10:00:00Z");
        let one = Interval::TrailingDays(1).resolve(chrono_tz::UTC, now);
        assert_eq!(one.bucket, Bucket::Hour);
        let week = Interval::TrailingDays(7).resolve(chrono_tz::UTC, now);
        assert_eq!(week.bucket, Bucket::Day);
        assert_eq!(week.start, now - Duration::days(7));
    }

    #[test]
    fn dst_transition_day_has_one_daily_bucket() {
        let tz = chrono_tz::America::New_York;
        // Range covering 2026-03-08 (spring forward, 23-hour day).
        let now = utc("2026-03-11T17:00:00Z");
        let range = Interval::TrailingDays(7).resolve(tz, now);
        let labels = range.bucket_labels();
        let transition_day = labels.iter().filter(|l| *l == "2026-03-08").count();
        assert_eq!(transition_day, 1);
        // No duplicates anywhere in the range.
        let mut dedup = labels.clone();
        dedup.dedup();
        assert_eq!(labels, dedup);
    }

    #[test]
    fn skipped_local_midnight_probes_to_first_valid_hour() {
        // Chile springs forward at midnight: 2026-09-06 00:00 does not
        // exist in America/Santiago, the day starts at 01:00 (UTC-3).
        let tz = chrono_tz::America::Santiago;
        assert_eq!(
            local_midnight(tz, NaiveDate::from_ymd_opt(2026, 9, 6).unwrap()),
            utc("2026-09-06T04:00:00Z")
        );
        // The transition day still yields exactly one daily bucket.
        let now = utc("2026-09-09T15:00:00Z");
        let labels = Interval::TrailingDays(7).resolve(tz, now).bucket_labels();
        assert_eq!(
            labels.iter().filter(|l| *l == "2026-09-06").count(),
            1
        );
    }

    #[test]
    fn hourly_labels_are_contiguous_and_distinct() {
        let range = Interval::Yesterday.resolve(chrono_tz::UTC, utc("2026-08-30T10:30:00Z"));
        let labels = range.bucket_labels();
        assert_eq!(labels.len(), 24);
        assert_eq!(labels[0], "2026-08-29 00:00:00");
        assert_eq!(labels[23], "2026-08-29 23:00:00");
    }

    #[test]
    fn fall_back_day_keeps_25_hourly_buckets() {
        let tz = chrono_tz::America::New_York;
        // 2026-11-01: clocks fall back, the local day is 25 hours long.
        let now = utc("2026-11-02T05:00:00Z"); // local midnight after
        let range = Interval::Yesterday.resolve(tz, now);
        let labels = range.bucket_labels();
        assert_eq!(labels.len(), 25);
        let mut dedup = labels.clone();
        dedup.dedup();
        assert_eq!(labels, dedup);
    }

    #[test]
    fn unknown_timezone_is_an_error() {
        assert!(matches!(
            parse_timezone("Mars/Olympus_Mons"),
            Err(EngineError::InvalidTimezone(_))
        ));
        assert_eq!(parse_timezone("Europe/Warsaw").unwrap(), chrono_tz::Europe::Warsaw);
    }
}
