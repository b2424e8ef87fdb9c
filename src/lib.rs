//! Tavern - a beer log with statistics, achievements and a leaderboard
//!
//! Patrons log the beverages they drink. From that list the tavern derives
//! aggregate statistics, unlocks badges from a data-driven catalog, and ranks
//! patrons by recent activity.
//!
//! ## Layers
//!
//! 1. **Engines** ([`stats`], [`leaderboard`]): pure functions over in-memory
//!    records and an explicit `now`.
//! 2. **Store** ([`store`]): SQLite persistence behind small traits.
//! 3. **Service** ([`Tavern`]): fetch, evaluate, persist unlocks.

pub mod config;
pub mod domain;
pub mod leaderboard;
pub mod stats;
pub mod store;
mod tavern;

pub use config::Config;
pub use domain::*;
pub use leaderboard::{LeaderboardEntry, TimeFilter, rank_of, rank_users};
pub use stats::achievements::{AchievementDefinition, AchievementProgress, default_catalog};
pub use stats::{StatisticsSnapshot, compute_snapshot};
pub use store::TavernDb;
pub use tavern::{LogOutcome, RefreshOutcome, Tavern, TavernEvent, UnlockedAchievement};
