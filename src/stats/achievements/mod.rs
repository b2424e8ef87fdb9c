//! Achievement catalog, unlock checking and progress
//!
//! The catalog is data: definitions come from the store (or the built-in
//! [`default_catalog`]) and are resolved to a closed [`Criterion`] set.

mod catalog;
mod checker;
mod definitions;
mod progress;

pub use catalog::default_catalog;
pub use checker::check_achievements;
pub use definitions::{AchievementCategory, AchievementDefinition, Criteria, Criterion};
pub use progress::{
    AchievementProgress, by_category, locked_only, progress, unlocked_count, unlocked_only,
};
