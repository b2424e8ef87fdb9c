//! Statistics and achievements for logged beverages
//!
//! Both engines are pure functions over in-memory data. Loading records and
//! persisting unlocks is the job of the caller (see [`crate::Tavern`]).
//!
//! # Data flow
//!
//! ```text
//! ┌─────────────────┐     ┌──────────────────┐     ┌──────────────────┐
//! │  RecordStore    │────▶│ compute_snapshot │────▶│ check_achievements│
//! │ (beverage list) │     │  (this module)   │     │ (+ catalog, ids)  │
//! └─────────────────┘     └──────────────────┘     └─────────┬────────┘
//!                                                            ▼
//!                                                      UnlockSink
//! ```
//!
//! # Usage
//!
//! ```ignore
//! let snapshot = compute_snapshot(&records, &Local::now());
//! let newly = check_achievements(&snapshot, &catalog, &unlocked, UserRole::User);
//! ```

pub mod achievements;
mod engine;
mod snapshot;
mod streaks;
mod time_bucket;

pub use engine::{
    HIGH_ABV_MIN, LARGE_VOLUME_MIN_ML, LATE_NIGHT_HOUR, LOW_ABV_BELOW, MEGA_VOLUME_MIN_ML,
    STANDARD_VOLUME_ML, compute_snapshot,
};
pub use snapshot::{NO_CATEGORY, StatisticsSnapshot};
pub use streaks::{Streaks, current_streaks};
pub use time_bucket::{
    DAY_MS, WEEK_MS, WeekendBucket, iso_week_start, local_date, start_of_day, start_of_iso_week,
};
