//! Persistence collaborators of the tavern
//!
//! The engines in [`crate::stats`] never see these traits. [`crate::Tavern`]
//! fetches through them, runs the engines and writes unlocks back.
//! [`TavernDb`] implements all of them on top of SQLite.

mod catalog;
mod db;
mod records;
mod users;

pub use db::TavernDb;

use anyhow::Result;
use chrono::{DateTime, Utc};

use crate::domain::{BeverageRecord, RecordId, User, ValidBeverage};
use crate::stats::achievements::AchievementDefinition;

/// Source and sink of beverage records
pub trait RecordStore {
    /// All records of one user, newest first
    fn list(&self, user_id: &str) -> Result<Vec<BeverageRecord>>;

    /// Append a validated beverage logged at `at`
    fn append(&self, user_id: &str, beverage: &ValidBeverage, at: DateTime<Utc>) -> Result<RecordId>;
}

/// Achievement catalog and per-user unlock history
pub trait CatalogStore {
    fn list_definitions(&self) -> Result<Vec<AchievementDefinition>>;

    fn list_unlocked_ids(&self, user_id: &str) -> Result<Vec<String>>;
}

/// Receives newly qualified achievement ids, one call per id
pub trait UnlockSink {
    /// Must be idempotent: marking an id twice keeps the first timestamp
    fn mark_unlocked(&self, user_id: &str, achievement_id: &str, at: DateTime<Utc>) -> Result<()>;
}

/// Registered users and their roles
pub trait UserDirectory {
    fn get_user(&self, user_id: &str) -> Result<Option<User>>;

    fn list_users(&self) -> Result<Vec<User>>;
}
