//! Ranking users by recent activity

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{BeverageRecord, User};
use crate::stats::{start_of_day, start_of_iso_week};

/// Lookback period of the leaderboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeFilter {
    /// Since local midnight
    Today,
    /// Since Monday 00:00 local
    Week,
    /// Trailing 30 days
    #[default]
    Month,
}

impl TimeFilter {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Today => "today",
            Self::Week => "week",
            Self::Month => "month",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Today => "Today",
            Self::Week => "This Week",
            Self::Month => "Last 30 Days",
        }
    }

    /// First instant counted by this filter, in the zone of `now`
    pub fn start<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> DateTime<Utc> {
        match self {
            Self::Today => start_of_day(now),
            Self::Week => start_of_iso_week(now),
            Self::Month => now.with_timezone(&Utc) - TimeDelta::days(30),
        }
    }
}

impl fmt::Display for TimeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "today" | "day" => Ok(Self::Today),
            "week" => Ok(Self::Week),
            "month" => Ok(Self::Month),
            other => Err(format!(
                "Unknown leaderboard period '{}' (expected today, week or month)",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeaderboardEntry {
    pub user: User,
    pub count: u64,
    /// 1-based
    pub rank: usize,
}

/// Rank users by the number of records since `filter.start(now)`.
///
/// Sorted by count descending. Equal counts keep input order.
pub fn rank_users<Tz: TimeZone>(
    users: &[(User, Vec<BeverageRecord>)],
    filter: TimeFilter,
    now: &DateTime<Tz>,
) -> Vec<LeaderboardEntry> {
    let start = filter.start(now);

    let mut entries: Vec<LeaderboardEntry> = users
        .iter()
        .map(|(user, records)| LeaderboardEntry {
            user: user.clone(),
            count: records.iter().filter(|r| r.created_at >= start).count() as u64,
            rank: 0,
        })
        .collect();

    entries.sort_by(|a, b| b.count.cmp(&a.count));
    for (index, entry) in entries.iter_mut().enumerate() {
        entry.rank = index + 1;
    }
    entries
}

/// Rank of `user_id`, or 0 when the user is not on the board
pub fn rank_of(entries: &[LeaderboardEntry], user_id: &str) -> usize {
    entries
        .iter()
        .find(|e| e.user.id == user_id)
        .map(|e| e.rank)
        .unwrap_or(0)
}
