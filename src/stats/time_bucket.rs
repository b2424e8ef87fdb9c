//! Calendar bucketing for streaks and time filters
//!
//! All buckets are computed in the time zone of the caller's "now":
//! - Day buckets: the local calendar date
//! - Week buckets: the Monday that starts the ISO week
//! - Weekend buckets: `(year, day_of_year / 7)`, a fixed seven-day slice of the year

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, TimeDelta, TimeZone, Utc};

pub const DAY_MS: i64 = 24 * 60 * 60 * 1000;
pub const WEEK_MS: i64 = 7 * DAY_MS;

/// Seven-day slice of a calendar year, used for the weekend cadence counter.
///
/// Not aligned to Saturday/Sunday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WeekendBucket {
    pub year: i32,
    pub index: u32,
}

impl WeekendBucket {
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            index: date.ordinal0() / 7,
        }
    }

    /// The bucket immediately before this one; bucket 0 wraps to the last bucket of the previous year.
    pub fn previous(self) -> Self {
        if self.index > 0 {
            Self {
                year: self.year,
                index: self.index - 1,
            }
        } else {
            let year = self.year - 1;
            Self {
                year,
                index: last_weekend_index(year),
            }
        }
    }
}

fn last_weekend_index(year: i32) -> u32 {
    NaiveDate::from_ymd_opt(year, 12, 31)
        .map(|d| d.ordinal0() / 7)
        .unwrap_or(52)
}

/// Local calendar date of `instant` in the zone of `now`.
pub fn local_date<Tz: TimeZone>(instant: &DateTime<Utc>, now: &DateTime<Tz>) -> NaiveDate {
    instant.with_timezone(&now.timezone()).date_naive()
}

/// Monday of the ISO week containing `date`.
pub fn iso_week_start(date: NaiveDate) -> NaiveDate {
    date - TimeDelta::days(i64::from(date.weekday().num_days_from_monday()))
}

/// Start of the local day containing `now`, as a UTC instant.
pub fn start_of_day<Tz: TimeZone>(now: &DateTime<Tz>) -> DateTime<Utc> {
    local_midnight(now, now.date_naive())
}

/// Monday 00:00 local time of the ISO week containing `now`, as a UTC instant.
pub fn start_of_iso_week<Tz: TimeZone>(now: &DateTime<Tz>) -> DateTime<Utc> {
    local_midnight(now, iso_week_start(now.date_naive()))
}

fn local_midnight<Tz: TimeZone>(now: &DateTime<Tz>, date: NaiveDate) -> DateTime<Utc> {
    let naive: NaiveDateTime = date.and_time(chrono::NaiveTime::MIN);
    // Midnight may not exist on DST transition days; fall back to reading it as UTC.
    now.timezone()
        .from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|| naive.and_utc())
}
