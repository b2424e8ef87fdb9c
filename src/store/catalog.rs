//! Achievement catalog and unlock history in SQLite

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use rusqlite::params;

use super::db::{TavernDb, instant_from_ms};
use super::{CatalogStore, UnlockSink};
use crate::stats::achievements::{AchievementCategory, AchievementDefinition, Criteria};

impl TavernDb {
    /// Insert definitions whose ids are not stored yet. Returns how many were added.
    ///
    /// Existing entries are left untouched so a re-seed never rewrites an edited catalog.
    pub fn seed_definitions(&self, definitions: &[AchievementDefinition]) -> Result<usize> {
        let mut conn = self.conn();
        let tx = conn.transaction()?;

        let next_position: i64 = tx.query_row(
            "SELECT COALESCE(MAX(position), -1) + 1 FROM achievement_definitions",
            [],
            |r| r.get(0),
        )?;

        let mut inserted = 0;
        {
            let mut stmt = tx.prepare(
                r#"
                INSERT OR IGNORE INTO achievement_definitions
                    (id, category, title, description, icon, target, unit, position)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
                "#,
            )?;
            for def in definitions {
                let changed = stmt
                    .execute(params![
                        def.id,
                        def.category.as_str(),
                        def.title,
                        def.description,
                        def.icon,
                        def.criteria.target,
                        def.criteria.unit,
                        next_position + inserted as i64,
                    ])
                    .with_context(|| format!("Failed to store achievement {}", def.id))?;
                inserted += changed;
            }
        }
        tx.commit()?;

        if inserted > 0 {
            tracing::info!("Seeded {} achievement definitions", inserted);
        }
        Ok(inserted)
    }

    /// Unlock history of one user with timestamps, oldest first
    pub fn list_unlocks(&self, user_id: &str) -> Result<Vec<(String, DateTime<Utc>)>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(
            "SELECT achievement_id, unlocked_at FROM user_achievements WHERE user_id = ?1 ORDER BY unlocked_at, achievement_id",
        )?;
        let rows = stmt.query_map([user_id], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?))
        })?;

        let mut unlocks = Vec::new();
        for row in rows {
            let (id, ms) = row?;
            unlocks.push((id, instant_from_ms(ms)?));
        }
        Ok(unlocks)
    }
}

impl CatalogStore for TavernDb {
    fn list_definitions(&self) -> Result<Vec<AchievementDefinition>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(
            r#"
            SELECT id, category, title, description, icon, target, unit
            FROM achievement_definitions
            ORDER BY position, id
            "#,
        )?;

        let definitions = stmt
            .query_map([], |row| {
                Ok(AchievementDefinition {
                    id: row.get(0)?,
                    category: AchievementCategory::from_tag(&row.get::<_, String>(1)?),
                    title: row.get(2)?,
                    description: row.get(3)?,
                    icon: row.get(4)?,
                    criteria: Criteria {
                        target: row.get(5)?,
                        unit: row.get(6)?,
                    },
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()
            .context("Failed to read achievement catalog")?;
        Ok(definitions)
    }

    fn list_unlocked_ids(&self, user_id: &str) -> Result<Vec<String>> {
        let conn = self.conn();
        let mut stmt =
            conn.prepare("SELECT achievement_id FROM user_achievements WHERE user_id = ?1")?;
        let ids = stmt
            .query_map([user_id], |row| row.get(0))?
            .collect::<rusqlite::Result<Vec<String>>>()
            .with_context(|| format!("Failed to read unlocks of {}", user_id))?;
        Ok(ids)
    }
}

impl UnlockSink for TavernDb {
    fn mark_unlocked(&self, user_id: &str, achievement_id: &str, at: DateTime<Utc>) -> Result<()> {
        let conn = self.conn();
        conn.execute(
            "INSERT OR IGNORE INTO user_achievements (user_id, achievement_id, unlocked_at) VALUES (?1, ?2, ?3)",
            params![user_id, achievement_id, at.timestamp_millis()],
        )
        .with_context(|| format!("Failed to unlock {} for {}", achievement_id, user_id))?;
        Ok(())
    }
}
