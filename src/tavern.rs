//! The tavern service: log, evaluate, persist unlocks
//!
//! Every operation fetches everything it needs first. A failed fetch returns
//! before any snapshot is computed, so persisted state stays as it was.

use std::collections::HashMap;

use anyhow::{Context, Result};
use chrono::{DateTime, TimeZone, Utc};
use serde::Serialize;

use crate::domain::{NewBeverage, RecordId, UserRole};
use crate::leaderboard::{LeaderboardEntry, TimeFilter, rank_users};
use crate::stats::achievements::{
    AchievementDefinition, AchievementProgress, check_achievements, progress,
};
use crate::stats::{StatisticsSnapshot, compute_snapshot};
use crate::store::{CatalogStore, RecordStore, UnlockSink, UserDirectory};

/// An achievement that was just unlocked
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnlockedAchievement {
    pub definition: AchievementDefinition,
    pub unlocked_at: DateTime<Utc>,
}

/// Things that happened during one service call
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum TavernEvent {
    BeverageLogged { record_id: RecordId, name: String },
    AchievementUnlocked(UnlockedAchievement),
}

/// Result of [`Tavern::log_beverage`]
#[derive(Debug, Clone, Serialize)]
pub struct LogOutcome {
    pub record_id: RecordId,
    pub snapshot: StatisticsSnapshot,
    pub events: Vec<TavernEvent>,
}

impl LogOutcome {
    pub fn unlocked(&self) -> impl Iterator<Item = &UnlockedAchievement> {
        self.events.iter().filter_map(|e| match e {
            TavernEvent::AchievementUnlocked(u) => Some(u),
            TavernEvent::BeverageLogged { .. } => None,
        })
    }
}

/// Result of re-evaluating one user without logging anything
#[derive(Debug, Clone, Serialize)]
pub struct RefreshOutcome {
    pub user_id: String,
    pub snapshot: StatisticsSnapshot,
    pub unlocked: Vec<UnlockedAchievement>,
}

/// Ties the record store, catalog and unlock sink to the pure engines
pub struct Tavern<S> {
    store: S,
}

impl<S> Tavern<S>
where
    S: RecordStore + CatalogStore + UnlockSink + UserDirectory,
{
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Validate and append a beverage, then unlock whatever newly qualifies.
    ///
    /// Invalid input fails with a [`crate::ValidationError`] and writes nothing.
    pub fn log_beverage<Tz: TimeZone>(
        &self,
        user_id: &str,
        beverage: &NewBeverage,
        now: &DateTime<Tz>,
    ) -> Result<LogOutcome> {
        let valid = match beverage.validate() {
            Ok(valid) => valid,
            Err(e) => {
                tracing::warn!("Rejected beverage for {}: {}", user_id, e);
                return Err(e.into());
            }
        };

        let record_id = self
            .store
            .append(user_id, &valid, now.with_timezone(&Utc))?;
        tracing::info!("{} logged {} ({})", user_id, valid.name, valid.style);

        let outcome = self.evaluate(user_id, now)?;

        let mut events = vec![TavernEvent::BeverageLogged {
            record_id: record_id.clone(),
            name: valid.name,
        }];
        events.extend(
            outcome
                .unlocked
                .into_iter()
                .map(TavernEvent::AchievementUnlocked),
        );

        Ok(LogOutcome {
            record_id,
            snapshot: outcome.snapshot,
            events,
        })
    }

    /// Re-evaluate one user's achievements against their current records
    pub fn refresh<Tz: TimeZone>(&self, user_id: &str, now: &DateTime<Tz>) -> Result<RefreshOutcome> {
        self.evaluate(user_id, now)
    }

    /// Re-evaluate every registered user. A failing user is logged and skipped.
    pub fn refresh_all<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> Result<Vec<RefreshOutcome>> {
        let users = self.store.list_users()?;
        let mut outcomes = Vec::with_capacity(users.len());

        for user in &users {
            match self.evaluate(&user.id, now) {
                Ok(outcome) => outcomes.push(outcome),
                Err(e) => tracing::warn!("Failed to refresh achievements of {}: {:#}", user.id, e),
            }
        }

        let total: usize = outcomes.iter().map(|o| o.unlocked.len()).sum();
        tracing::info!("Refreshed {} users, {} new unlocks", outcomes.len(), total);
        Ok(outcomes)
    }

    pub fn snapshot<Tz: TimeZone>(&self, user_id: &str, now: &DateTime<Tz>) -> Result<StatisticsSnapshot> {
        let records = self.store.list(user_id)?;
        Ok(compute_snapshot(&records, now))
    }

    /// Progress of every catalog entry for one user
    pub fn progress<Tz: TimeZone>(
        &self,
        user_id: &str,
        now: &DateTime<Tz>,
    ) -> Result<Vec<AchievementProgress>> {
        let records = self.store.list(user_id)?;
        let catalog = self.store.list_definitions()?;
        let unlocked = self.store.list_unlocked_ids(user_id)?;
        let role = self.role_of(user_id)?;

        let snapshot = compute_snapshot(&records, now);
        Ok(progress(&snapshot, &catalog, &unlocked, role))
    }

    pub fn leaderboard<Tz: TimeZone>(
        &self,
        filter: TimeFilter,
        now: &DateTime<Tz>,
    ) -> Result<Vec<LeaderboardEntry>> {
        let users = self.store.list_users()?;
        let mut board = Vec::with_capacity(users.len());
        for user in users {
            let records = self
                .store
                .list(&user.id)
                .with_context(|| format!("Failed to load records of {}", user.id))?;
            board.push((user, records));
        }
        Ok(rank_users(&board, filter, now))
    }

    fn role_of(&self, user_id: &str) -> Result<UserRole> {
        Ok(self
            .store
            .get_user(user_id)?
            .map(|u| u.role)
            .unwrap_or_default())
    }

    fn evaluate<Tz: TimeZone>(&self, user_id: &str, now: &DateTime<Tz>) -> Result<RefreshOutcome> {
        let records = self.store.list(user_id)?;
        let catalog = self.store.list_definitions()?;
        let unlocked = self.store.list_unlocked_ids(user_id)?;
        let role = self.role_of(user_id)?;

        let snapshot = compute_snapshot(&records, now);
        let newly = check_achievements(&snapshot, &catalog, &unlocked, role);

        let at = now.with_timezone(&Utc);
        let by_id: HashMap<&str, &AchievementDefinition> =
            catalog.iter().map(|d| (d.id.as_str(), d)).collect();

        let mut unlocked_now = Vec::with_capacity(newly.len());
        for id in &newly {
            self.store.mark_unlocked(user_id, id, at)?;
            if let Some(definition) = by_id.get(id.as_str()) {
                tracing::info!(
                    "{} unlocked {} {} ({})",
                    user_id,
                    definition.icon,
                    definition.title,
                    definition.id
                );
                unlocked_now.push(UnlockedAchievement {
                    definition: (*definition).clone(),
                    unlocked_at: at,
                });
            }
        }

        Ok(RefreshOutcome {
            user_id: user_id.to_string(),
            snapshot,
            unlocked: unlocked_now,
        })
    }
}
