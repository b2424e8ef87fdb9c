//! Derived statistics for one user at one instant

use serde::{Deserialize, Serialize};

/// Value of `dominant_category` when there are no records
pub const NO_CATEGORY: &str = "None";

/// Aggregate metrics over a user's full record list.
///
/// Recomputed from scratch on every call; never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatisticsSnapshot {
    pub total_count: u64,
    pub total_volume_liters: f64,
    pub average_abv: f64,
    pub total_pure_alcohol_liters: f64,
    pub dominant_category: String,
    pub count_in_trailing_week: u64,
    pub count_in_trailing_month: u64,
    pub mean_records_per_week: f64,

    // Achievement counters
    pub unique_category_count: u64,
    /// ABV >= 8%
    pub high_abv_count: u64,
    /// ABV < 4%
    pub low_abv_count: u64,
    /// Volume >= 500 ml
    pub large_volume_count: u64,
    /// Volume == 330 ml
    pub standard_volume_count: u64,
    /// Volume >= 1000 ml
    pub mega_volume_count: u64,
    pub current_day_streak: u64,
    pub current_week_streak: u64,
    pub current_weekend_streak: u64,
    /// Logged at or after 22:00 local time
    pub late_night_count: u64,
    pub distinct_abv_bucket_count: u64,
    /// Records with both a positive volume and a positive ABV
    pub detailed_record_count: u64,
}

impl Default for StatisticsSnapshot {
    fn default() -> Self {
        Self {
            total_count: 0,
            total_volume_liters: 0.0,
            average_abv: 0.0,
            total_pure_alcohol_liters: 0.0,
            dominant_category: NO_CATEGORY.to_string(),
            count_in_trailing_week: 0,
            count_in_trailing_month: 0,
            mean_records_per_week: 0.0,
            unique_category_count: 0,
            high_abv_count: 0,
            low_abv_count: 0,
            large_volume_count: 0,
            standard_volume_count: 0,
            mega_volume_count: 0,
            current_day_streak: 0,
            current_week_streak: 0,
            current_weekend_streak: 0,
            late_night_count: 0,
            distinct_abv_bucket_count: 0,
            detailed_record_count: 0,
        }
    }
}

impl StatisticsSnapshot {
    /// Weeks of activity implied by the weekly average: `ceil(total / mean)`, 0 without activity.
    pub fn weeks_active(&self) -> f64 {
        if self.mean_records_per_week > 0.0 {
            (self.total_count as f64 / self.mean_records_per_week).ceil()
        } else {
            0.0
        }
    }

    /// All count-type fields, labelled. Used for display and invariant checks.
    pub fn counters(&self) -> [(&'static str, u64); 15] {
        [
            ("trailing_week", self.count_in_trailing_week),
            ("trailing_month", self.count_in_trailing_month),
            ("unique_categories", self.unique_category_count),
            ("high_abv", self.high_abv_count),
            ("low_abv", self.low_abv_count),
            ("large_volume", self.large_volume_count),
            ("standard_volume", self.standard_volume_count),
            ("mega_volume", self.mega_volume_count),
            ("day_streak", self.current_day_streak),
            ("week_streak", self.current_week_streak),
            ("weekend_streak", self.current_weekend_streak),
            ("late_night", self.late_night_count),
            ("abv_buckets", self.distinct_abv_bucket_count),
            ("detailed", self.detailed_record_count),
            ("total", self.total_count),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_zero_snapshot() {
        let s = StatisticsSnapshot::default();
        assert_eq!(s.total_count, 0);
        assert_eq!(s.dominant_category, NO_CATEGORY);
        assert_eq!(s.weeks_active(), 0.0);
        assert!(s.counters().iter().all(|(_, v)| *v == 0));
    }

    #[test]
    fn test_weeks_active_rounds_up() {
        let s = StatisticsSnapshot {
            total_count: 10,
            mean_records_per_week: 3.0,
            ..StatisticsSnapshot::default()
        };
        assert_eq!(s.weeks_active(), 4.0);
    }
}
