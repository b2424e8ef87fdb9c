//! Current-streak counters
//!
//! Each streak walks the distinct buckets (days, ISO weeks, weekend slices) that
//! contain at least one record, newest first, starting from the bucket that holds
//! "now". The walk stops at the first missing bucket, so no activity in the current
//! bucket means a streak of zero.

use chrono::{DateTime, NaiveDate, TimeDelta, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use super::time_bucket::{WeekendBucket, iso_week_start, local_date};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Streaks {
    pub days: u64,
    pub weeks: u64,
    pub weekends: u64,
}

/// Compute all three current streaks for the given record timestamps.
pub fn current_streaks<Tz: TimeZone>(timestamps: &[DateTime<Utc>], now: &DateTime<Tz>) -> Streaks {
    let dates: Vec<NaiveDate> = timestamps.iter().map(|t| local_date(t, now)).collect();
    let today = now.date_naive();

    Streaks {
        days: walk_streak(dates.clone(), today, |d| d - TimeDelta::days(1)),
        weeks: walk_streak(
            dates.iter().copied().map(iso_week_start).collect(),
            iso_week_start(today),
            |monday| monday - TimeDelta::days(7),
        ),
        weekends: walk_streak(
            dates.iter().copied().map(WeekendBucket::of).collect(),
            WeekendBucket::of(today),
            WeekendBucket::previous,
        ),
    }
}

fn walk_streak<K: Ord + Copy>(mut keys: Vec<K>, start: K, previous: impl Fn(K) -> K) -> u64 {
    keys.sort_unstable_by(|a, b| b.cmp(a));
    keys.dedup();

    let mut expected = start;
    let mut count = 0u64;
    for key in keys {
        if key > expected {
            // Records dated after "now" never extend the streak
            continue;
        }
        if key != expected {
            break;
        }
        count += 1;
        expected = previous(expected);
    }
    count
}
