//! Reduces a user's beverage records into a [`StatisticsSnapshot`]
//!
//! Pure and deterministic for a fixed `now`. Malformed or missing numeric fields
//! never fail; they contribute nothing to the aggregates that depend on them.

use std::collections::HashSet;

use chrono::{DateTime, TimeDelta, TimeZone, Timelike, Utc};

use super::snapshot::{NO_CATEGORY, StatisticsSnapshot};
use super::streaks::current_streaks;
use super::time_bucket::WEEK_MS;
use crate::domain::BeverageRecord;

pub const HIGH_ABV_MIN: f64 = 8.0;
pub const LOW_ABV_BELOW: f64 = 4.0;
pub const LARGE_VOLUME_MIN_ML: f64 = 500.0;
pub const STANDARD_VOLUME_ML: f64 = 330.0;
pub const MEGA_VOLUME_MIN_ML: f64 = 1000.0;
pub const LATE_NIGHT_HOUR: u32 = 22;

const TRAILING_WEEK_DAYS: i64 = 7;
const TRAILING_MONTH_DAYS: i64 = 30;

/// Compute the statistics snapshot for one user's records.
///
/// `now` anchors the trailing windows and streaks, and its time zone defines
/// "local" for calendar days and the late-night hour.
pub fn compute_snapshot<Tz: TimeZone>(
    records: &[BeverageRecord],
    now: &DateTime<Tz>,
) -> StatisticsSnapshot {
    if records.is_empty() {
        return StatisticsSnapshot::default();
    }

    let now_utc = now.with_timezone(&Utc);
    let week_start = now_utc - TimeDelta::days(TRAILING_WEEK_DAYS);
    let month_start = now_utc - TimeDelta::days(TRAILING_MONTH_DAYS);
    let local_zone = now.timezone();

    let mut snapshot = StatisticsSnapshot {
        total_count: records.len() as u64,
        ..StatisticsSnapshot::default()
    };

    let mut volume_ml_sum = 0.0;
    let mut abv_sum = 0.0;
    let mut abv_samples = 0u64;
    // Insertion-ordered so ties resolve to the first style seen
    let mut category_counts: Vec<(&str, u64)> = Vec::new();
    let mut abv_buckets: HashSet<u64> = HashSet::new();

    for record in records {
        let volume = record.volume_ml.as_ref().and_then(|m| m.value());
        let abv = record.abv.as_ref().and_then(|m| m.value());

        if let Some(ml) = volume {
            volume_ml_sum += ml;
            if ml >= LARGE_VOLUME_MIN_ML {
                snapshot.large_volume_count += 1;
            }
            if (ml - STANDARD_VOLUME_ML).abs() < f64::EPSILON {
                snapshot.standard_volume_count += 1;
            }
            if ml >= MEGA_VOLUME_MIN_ML {
                snapshot.mega_volume_count += 1;
            }
        }

        if let Some(pct) = abv {
            if pct > 0.0 {
                abv_sum += pct;
                abv_samples += 1;
                abv_buckets.insert(pct.floor() as u64);
            }
            if pct >= HIGH_ABV_MIN {
                snapshot.high_abv_count += 1;
            }
            if pct < LOW_ABV_BELOW {
                snapshot.low_abv_count += 1;
            }
        }

        if let (Some(ml), Some(pct)) = (volume, abv) {
            if ml > 0.0 && pct > 0.0 {
                snapshot.total_pure_alcohol_liters += (pct / 100.0) * (ml / 1000.0);
                snapshot.detailed_record_count += 1;
            }
        }

        let style = record.style.as_str();
        match category_counts.iter_mut().find(|(name, _)| *name == style) {
            Some((_, count)) => *count += 1,
            None => category_counts.push((style, 1)),
        }

        let created = record.created_at;
        if created >= week_start && created <= now_utc {
            snapshot.count_in_trailing_week += 1;
        }
        if created >= month_start && created <= now_utc {
            snapshot.count_in_trailing_month += 1;
        }

        if created.with_timezone(&local_zone).hour() >= LATE_NIGHT_HOUR {
            snapshot.late_night_count += 1;
        }
    }

    snapshot.total_volume_liters = volume_ml_sum / 1000.0;
    snapshot.average_abv = if abv_samples > 0 {
        abv_sum / abv_samples as f64
    } else {
        0.0
    };

    snapshot.unique_category_count = category_counts.len() as u64;
    snapshot.dominant_category = dominant_category(&category_counts);
    snapshot.distinct_abv_bucket_count = abv_buckets.len() as u64;
    snapshot.mean_records_per_week = mean_per_week(records);

    let timestamps: Vec<DateTime<Utc>> = records.iter().map(|r| r.created_at).collect();
    let streaks = current_streaks(&timestamps, now);
    snapshot.current_day_streak = streaks.days;
    snapshot.current_week_streak = streaks.weeks;
    snapshot.current_weekend_streak = streaks.weekends;

    tracing::debug!(
        "Computed snapshot: {} records, {:.2} L, dominant {}",
        snapshot.total_count,
        snapshot.total_volume_liters,
        snapshot.dominant_category
    );

    snapshot
}

fn dominant_category(counts: &[(&str, u64)]) -> String {
    let mut best: Option<(&str, u64)> = None;
    for &(name, count) in counts {
        // Strict comparison keeps the earlier style on ties
        if best.is_none_or(|(_, best_count)| count > best_count) {
            best = Some((name, count));
        }
    }
    best.map(|(name, _)| name.to_string())
        .unwrap_or_else(|| NO_CATEGORY.to_string())
}

/// Records per week over the span between the earliest and latest record,
/// with the span floored at one week.
fn mean_per_week(records: &[BeverageRecord]) -> f64 {
    let earliest = records.iter().map(|r| r.created_at).min();
    let latest = records.iter().map(|r| r.created_at).max();
    let span_ms = match (earliest, latest) {
        (Some(first), Some(last)) => (last - first).num_milliseconds(),
        _ => 0,
    };
    let weeks = (span_ms as f64 / WEEK_MS as f64).max(1.0);
    records.len() as f64 / weeks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BeerStyle, Measure};
    use chrono::FixedOffset;

    const TOLERANCE: f64 = 1e-9;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 12, 12, 0, 0).unwrap()
    }

    fn record(style: &str, volume: Option<&str>, abv: Option<&str>, created_at: DateTime<Utc>) -> BeverageRecord {
        BeverageRecord {
            id: format!("r-{}", created_at.timestamp_millis()),
            user_id: "u1".to_string(),
            name: "Test Beer".to_string(),
            style: BeerStyle::parse(style),
            volume_ml: volume.map(Measure::from),
            abv: abv.map(Measure::from),
            created_at,
        }
    }

    fn assert_counts_bounded(s: &StatisticsSnapshot) {
        for (label, value) in s.counters() {
            assert!(value <= s.total_count, "{} = {} exceeds total {}", label, value, s.total_count);
        }
    }

    #[test]
    fn test_empty_records_zero_snapshot() {
        let s = compute_snapshot(&[], &now());
        assert_eq!(s.total_count, 0);
        assert_eq!(s.total_volume_liters, 0.0);
        assert_eq!(s.average_abv, 0.0);
        assert_eq!(s.total_pure_alcohol_liters, 0.0);
        assert_eq!(s.mean_records_per_week, 0.0);
        assert_eq!(s.dominant_category, NO_CATEGORY);
    }

    #[test]
    fn test_single_record_pure_alcohol() {
        let records = vec![record("Lager", Some("330"), Some("5"), now())];
        let s = compute_snapshot(&records, &now());
        assert!((s.total_pure_alcohol_liters - 0.0165).abs() < TOLERANCE);
    }

    #[test]
    fn test_two_record_scenario() {
        let t = now() - TimeDelta::hours(2);
        let records = vec![
            record("IPA", Some("330"), Some("5"), t),
            record("Stout", Some("500"), Some("8"), t + TimeDelta::minutes(10)),
        ];
        let s = compute_snapshot(&records, &now());
        assert_eq!(s.total_count, 2);
        assert!((s.total_volume_liters - 0.83).abs() < TOLERANCE);
        assert!((s.total_pure_alcohol_liters - 0.0565).abs() < TOLERANCE);
        assert!((s.average_abv - 6.5).abs() < TOLERANCE);
        assert_eq!(s.dominant_category, "IPA");
        assert_eq!(s.unique_category_count, 2);
        assert_eq!(s.high_abv_count, 1);
        assert_eq!(s.standard_volume_count, 1);
        assert_eq!(s.large_volume_count, 1);
        assert_counts_bounded(&s);
    }

    #[test]
    fn test_volume_sum_order_independent() {
        let base = now() - TimeDelta::days(3);
        let mut records: Vec<BeverageRecord> = ["330", "500 ml", "1000", "250.5", "abc"]
            .iter()
            .enumerate()
            .map(|(i, v)| record("Lager", Some(*v), Some("4.5"), base + TimeDelta::hours(i as i64)))
            .collect();
        let forward = compute_snapshot(&records, &now()).total_volume_liters;
        records.reverse();
        let backward = compute_snapshot(&records, &now()).total_volume_liters;
        records.swap(0, 2);
        let shuffled = compute_snapshot(&records, &now()).total_volume_liters;
        assert!((forward - backward).abs() < TOLERANCE);
        assert!((forward - shuffled).abs() < TOLERANCE);
        assert!((forward - 2.0805).abs() < TOLERANCE);
    }

    #[test]
    fn test_malformed_alcohol_degrades() {
        let records = vec![
            record("Lager", Some("500"), Some("abc"), now()),
            record("Lager", Some("500"), Some("6"), now()),
        ];
        let s = compute_snapshot(&records, &now());
        assert_eq!(s.total_count, 2);
        assert!((s.average_abv - 6.0).abs() < TOLERANCE);
        assert!((s.total_pure_alcohol_liters - 0.03).abs() < TOLERANCE);
        assert_eq!(s.detailed_record_count, 1);
    }

    #[test]
    fn test_missing_fields_count_but_contribute_nothing() {
        let records = vec![record("Other", None, None, now())];
        let s = compute_snapshot(&records, &now());
        assert_eq!(s.total_count, 1);
        assert_eq!(s.total_volume_liters, 0.0);
        assert_eq!(s.average_abv, 0.0);
        assert_eq!(s.low_abv_count, 0);
    }

    #[test]
    fn test_volume_thresholds() {
        let records: Vec<BeverageRecord> = (0..10)
            .map(|i| record("Lager", Some("500"), Some("5"), now() - TimeDelta::hours(i)))
            .collect();
        let s = compute_snapshot(&records, &now());
        assert_eq!(s.large_volume_count, 10);
        assert_eq!(s.standard_volume_count, 0);
        assert_eq!(s.mega_volume_count, 0);
        assert_counts_bounded(&s);
    }

    #[test]
    fn test_abv_classification() {
        let records = vec![
            record("Stout", Some("330"), Some("8"), now()),
            record("Stout", Some("330"), Some("9.5"), now()),
            record("Lager", Some("330"), Some("3.9"), now()),
            record("Lager", Some("330"), Some("0"), now()),
            record("Lager", Some("330"), Some("4"), now()),
        ];
        let s = compute_snapshot(&records, &now());
        assert_eq!(s.high_abv_count, 2);
        assert_eq!(s.low_abv_count, 2);
        // floors: 8, 9, 3, 4 (zero ABV is not a bucket)
        assert_eq!(s.distinct_abv_bucket_count, 4);
        assert_eq!(s.dominant_category, "Lager");
    }

    #[test]
    fn test_dominant_tie_keeps_first_seen() {
        let records = vec![
            record("Porter", None, None, now()),
            record("Wheat", None, None, now()),
            record("Wheat", None, None, now()),
            record("Porter", None, None, now()),
        ];
        let s = compute_snapshot(&records, &now());
        assert_eq!(s.dominant_category, "Porter");
    }

    #[test]
    fn test_trailing_windows_inclusive_bounds() {
        let n = now();
        let records = vec![
            record("Lager", None, None, n),
            record("Lager", None, None, n - TimeDelta::days(7)),
            record("Lager", None, None, n - TimeDelta::days(7) - TimeDelta::seconds(1)),
            record("Lager", None, None, n - TimeDelta::days(30)),
            record("Lager", None, None, n - TimeDelta::days(31)),
            record("Lager", None, None, n + TimeDelta::hours(1)),
        ];
        let s = compute_snapshot(&records, &n);
        assert_eq!(s.count_in_trailing_week, 2);
        assert_eq!(s.count_in_trailing_month, 4);
    }

    #[test]
    fn test_mean_per_week_floors_span() {
        let n = now();
        let same_day = vec![
            record("Lager", None, None, n),
            record("Lager", None, None, n - TimeDelta::hours(3)),
            record("Lager", None, None, n - TimeDelta::hours(6)),
        ];
        assert!((compute_snapshot(&same_day, &n).mean_records_per_week - 3.0).abs() < TOLERANCE);

        let spread = vec![
            record("Lager", None, None, n),
            record("Lager", None, None, n - TimeDelta::days(14)),
            record("Lager", None, None, n - TimeDelta::days(28)),
            record("Lager", None, None, n - TimeDelta::days(28)),
        ];
        let s = compute_snapshot(&spread, &n);
        assert!((s.mean_records_per_week - 1.0).abs() < TOLERANCE);
        assert_eq!(s.weeks_active(), 4.0);
    }

    #[test]
    fn test_late_night_uses_local_hour() {
        let tz = FixedOffset::east_opt(2 * 3600).unwrap();
        let local_now = tz.with_ymd_and_hms(2026, 3, 12, 23, 30, 0).unwrap();
        // 20:30 UTC == 22:30 local; 19:59 UTC == 21:59 local
        let records = vec![
            record("Lager", None, None, Utc.with_ymd_and_hms(2026, 3, 12, 20, 30, 0).unwrap()),
            record("Lager", None, None, Utc.with_ymd_and_hms(2026, 3, 12, 19, 59, 0).unwrap()),
        ];
        let s = compute_snapshot(&records, &local_now);
        assert_eq!(s.late_night_count, 1);
        assert_eq!(s.current_day_streak, 1);
    }

    #[test]
    fn test_counters_bounded_on_mixed_input() {
        let n = now();
        let records: Vec<BeverageRecord> = (0..40)
            .map(|i| {
                let volume = ["330", "500", "1000", "x", "2000 ml"][i % 5];
                let abv = ["5", "8.5", "3", "", "12"][i % 5];
                let style = KNOWN[i % KNOWN.len()];
                record(style, Some(volume), Some(abv), n - TimeDelta::hours(i as i64 * 7))
            })
            .collect();
        let s = compute_snapshot(&records, &n);
        assert_counts_bounded(&s);
        assert!(s.total_volume_liters >= 0.0);
        assert!(s.total_pure_alcohol_liters >= 0.0);
    }

    const KNOWN: [&str; 4] = ["IPA", "Stout", "Lager", "Sour"];
}
