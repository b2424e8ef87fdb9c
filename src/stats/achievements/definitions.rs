//! Achievement definitions and criterion resolution
//!
//! Catalog entries arrive as loosely typed `(category, unit, target)` triples.
//! [`Criterion::resolve`] maps each pair onto the one snapshot field it reads, so
//! evaluation is an exhaustive `match` instead of string dispatch.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::UserRole;
use crate::stats::StatisticsSnapshot;

/// Category tag of a catalog entry. Tags this build does not know are kept in `Unknown`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AchievementCategory {
    Milestone,
    BeerCount,
    TimeBased,
    Variety,
    Streak,
    Alcohol,
    Quantity,
    Special,
    Unknown(String),
}

impl AchievementCategory {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Milestone => "milestone",
            Self::BeerCount => "beer_count",
            Self::TimeBased => "time_based",
            Self::Variety => "variety",
            Self::Streak => "streak",
            Self::Alcohol => "alcohol",
            Self::Quantity => "quantity",
            Self::Special => "special",
            Self::Unknown(tag) => tag,
        }
    }

    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "milestone" => Self::Milestone,
            "beer_count" => Self::BeerCount,
            "time_based" => Self::TimeBased,
            "variety" => Self::Variety,
            "streak" => Self::Streak,
            "alcohol" => Self::Alcohol,
            "quantity" => Self::Quantity,
            "special" => Self::Special,
            other => Self::Unknown(other.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::Milestone => "Milestones",
            Self::BeerCount => "Beer Count",
            Self::TimeBased => "Time",
            Self::Variety => "Variety",
            Self::Streak => "Streaks",
            Self::Alcohol => "Alcohol",
            Self::Quantity => "Quantity",
            Self::Special => "Special",
            Self::Unknown(tag) => tag,
        }
    }
}

impl fmt::Display for AchievementCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for AchievementCategory {
    fn from(value: String) -> Self {
        Self::from_tag(&value)
    }
}

impl From<AchievementCategory> for String {
    fn from(value: AchievementCategory) -> Self {
        value.as_str().to_string()
    }
}

/// Numeric unlock condition of a catalog entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Criteria {
    pub target: f64,
    pub unit: String,
}

/// One catalog entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AchievementDefinition {
    pub id: String,
    #[serde(alias = "type")]
    pub category: AchievementCategory,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub icon: String,
    pub criteria: Criteria,
}

impl AchievementDefinition {
    pub fn criterion(&self) -> Criterion {
        Criterion::resolve(&self.category, &self.criteria.unit, self.criteria.target)
    }

    /// A definition is usable only with a positive, finite target
    pub fn has_valid_target(&self) -> bool {
        self.criteria.target.is_finite() && self.criteria.target > 0.0
    }
}

/// What a definition measures, resolved from its category and unit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Criterion {
    /// `total_count`
    TotalRecords,
    /// `ceil(total_count / mean_records_per_week)`
    WeeksActive,
    /// `unique_category_count`
    UniqueStyles,
    /// `count_in_trailing_week` (7-day streak badge)
    TrailingWeek,
    /// `count_in_trailing_month` (30-day streak badge)
    TrailingMonth,
    HighAbv,
    LowAbv,
    PureAlcoholLiters,
    LargeVolume,
    TotalLiters,
    StandardVolume,
    MegaVolume,
    WeekStreak,
    WeekendStreak,
    LateNights,
    DetailedRecords,
    DistinctAbvBuckets,
    /// Holder of the owner role
    Owner,
    /// Every other evaluable definition is unlocked
    AllOthers,
    /// Unknown category/unit pair; never satisfied
    Unsupported,
}

impl Criterion {
    pub fn resolve(category: &AchievementCategory, unit: &str, target: f64) -> Self {
        use AchievementCategory as C;

        match (category, unit) {
            (C::Milestone, "beers") | (C::BeerCount, _) => Self::TotalRecords,
            (C::TimeBased, "weeks") => Self::WeeksActive,
            (C::Variety, "types" | "all_types") => Self::UniqueStyles,
            (C::Streak, "days") if target == 7.0 => Self::TrailingWeek,
            (C::Streak, "days") if target == 30.0 => Self::TrailingMonth,
            (C::Streak, "weeks") => Self::WeekStreak,
            (C::Streak, "weekends") => Self::WeekendStreak,
            (C::Streak, "late_nights") => Self::LateNights,
            (C::Alcohol, "high_alcohol") => Self::HighAbv,
            (C::Alcohol, "low_alcohol") => Self::LowAbv,
            (C::Alcohol, "pure_alcohol_liters") => Self::PureAlcoholLiters,
            (C::Alcohol, "rated_beers") => Self::DetailedRecords,
            (C::Alcohol, "varied_alcohol") => Self::DistinctAbvBuckets,
            (C::Quantity, "large_beers") => Self::LargeVolume,
            (C::Quantity, "total_liters") => Self::TotalLiters,
            (C::Quantity, "pint_sized") => Self::StandardVolume,
            (C::Quantity, "mega_beers") => Self::MegaVolume,
            (C::Special, "owner") => Self::Owner,
            (C::Special, "all_achievements") => Self::AllOthers,
            _ => Self::Unsupported,
        }
    }

    /// Current value of the snapshot field this criterion reads.
    ///
    /// `None` for criteria that do not come from beverage data.
    pub fn measure(&self, snapshot: &StatisticsSnapshot) -> Option<f64> {
        let value = match self {
            Self::TotalRecords => snapshot.total_count as f64,
            Self::WeeksActive => snapshot.weeks_active(),
            Self::UniqueStyles => snapshot.unique_category_count as f64,
            Self::TrailingWeek => snapshot.count_in_trailing_week as f64,
            Self::TrailingMonth => snapshot.count_in_trailing_month as f64,
            Self::HighAbv => snapshot.high_abv_count as f64,
            Self::LowAbv => snapshot.low_abv_count as f64,
            Self::PureAlcoholLiters => snapshot.total_pure_alcohol_liters,
            Self::LargeVolume => snapshot.large_volume_count as f64,
            Self::TotalLiters => snapshot.total_volume_liters,
            Self::StandardVolume => snapshot.standard_volume_count as f64,
            Self::MegaVolume => snapshot.mega_volume_count as f64,
            Self::WeekStreak => snapshot.current_week_streak as f64,
            Self::WeekendStreak => snapshot.current_weekend_streak as f64,
            Self::LateNights => snapshot.late_night_count as f64,
            Self::DetailedRecords => snapshot.detailed_record_count as f64,
            Self::DistinctAbvBuckets => snapshot.distinct_abv_bucket_count as f64,
            Self::Owner | Self::AllOthers | Self::Unsupported => return None,
        };
        Some(value)
    }

    /// Whether the criterion is met, ignoring `AllOthers` which needs the whole catalog
    pub fn is_met(&self, snapshot: &StatisticsSnapshot, role: UserRole, target: f64) -> bool {
        match self {
            Self::Owner => role == UserRole::Owner,
            Self::AllOthers | Self::Unsupported => false,
            measured => measured
                .measure(snapshot)
                .is_some_and(|value| value >= target),
        }
    }

    /// Can this criterion ever unlock for some user?
    pub fn is_evaluable(&self) -> bool {
        !matches!(self, Self::Unsupported)
    }
}
