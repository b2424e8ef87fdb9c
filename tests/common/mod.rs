//! Shared test utilities for tavern integration tests

#![allow(dead_code)]

use std::cell::RefCell;

use anyhow::{Result, bail};
use chrono::{DateTime, TimeZone, Utc};
use tempfile::TempDir;

use tavern::stats::achievements::AchievementDefinition;
use tavern::store::{CatalogStore, RecordStore, UnlockSink, UserDirectory};
use tavern::{
    BeverageRecord, NewBeverage, RecordId, Tavern, TavernDb, User, ValidBeverage, default_catalog,
};

/// A tavern on a fresh database in a temp dir, seeded with the default catalog.
///
/// Keep the `TempDir` alive for as long as the tavern is used.
pub fn create_test_tavern() -> (TempDir, Tavern<TavernDb>) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db = TavernDb::open(&temp_dir.path().join("tavern.db")).expect("Failed to open db");
    db.seed_definitions(&default_catalog())
        .expect("Failed to seed catalog");
    (temp_dir, Tavern::new(db))
}

pub fn register(tavern: &Tavern<TavernDb>, user: User) {
    tavern.store().upsert_user(&user).expect("Failed to save user");
}

pub fn utc(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
}

pub fn lager(abv: &str) -> NewBeverage {
    NewBeverage::new("Ursus", "Lager").volume("500").abv(abv)
}

/// Store whose reads fail; records every unlock it receives
#[derive(Default)]
pub struct FailingStore {
    pub unlocks: RefCell<Vec<(String, String)>>,
    pub appended: RefCell<usize>,
}

impl RecordStore for FailingStore {
    fn list(&self, _user_id: &str) -> Result<Vec<BeverageRecord>> {
        bail!("record store unreachable")
    }

    fn append(&self, _user_id: &str, _beverage: &ValidBeverage, _at: DateTime<Utc>) -> Result<RecordId> {
        *self.appended.borrow_mut() += 1;
        Ok("r-1".to_string())
    }
}

impl CatalogStore for FailingStore {
    fn list_definitions(&self) -> Result<Vec<AchievementDefinition>> {
        Ok(default_catalog())
    }

    fn list_unlocked_ids(&self, _user_id: &str) -> Result<Vec<String>> {
        Ok(Vec::new())
    }
}

impl UnlockSink for FailingStore {
    fn mark_unlocked(&self, user_id: &str, achievement_id: &str, _at: DateTime<Utc>) -> Result<()> {
        self.unlocks
            .borrow_mut()
            .push((user_id.to_string(), achievement_id.to_string()));
        Ok(())
    }
}

impl UserDirectory for FailingStore {
    fn get_user(&self, user_id: &str) -> Result<Option<User>> {
        Ok(Some(User::new(user_id, user_id)))
    }

    fn list_users(&self) -> Result<Vec<User>> {
        Ok(vec![User::new("ana", "Ana")])
    }
}
