//! Beverage records in SQLite

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use rusqlite::params;

use super::RecordStore;
use super::db::{TavernDb, instant_from_ms};
use crate::domain::{BeerStyle, BeverageRecord, Measure, RecordId, ValidBeverage};

impl RecordStore for TavernDb {
    fn list(&self, user_id: &str) -> Result<Vec<BeverageRecord>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(
            r#"
            SELECT id, user_id, name, style, volume_ml, abv, created_at
            FROM beverages
            WHERE user_id = ?1
            ORDER BY created_at DESC, rowid DESC
            "#,
        )?;

        let rows = stmt.query_map([user_id], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, String>(3)?,
                row.get::<_, Option<String>>(4)?,
                row.get::<_, Option<String>>(5)?,
                row.get::<_, i64>(6)?,
            ))
        })?;

        let mut records = Vec::new();
        for row in rows {
            let (id, user_id, name, style, volume_ml, abv, created_ms) =
                row.context("Failed to read beverage row")?;
            records.push(BeverageRecord {
                created_at: instant_from_ms(created_ms)
                    .with_context(|| format!("Beverage {} has a bad timestamp", id))?,
                id,
                user_id,
                name,
                style: BeerStyle::parse(&style),
                volume_ml: volume_ml.map(Measure::Text),
                abv: abv.map(Measure::Text),
            });
        }
        Ok(records)
    }

    fn append(&self, user_id: &str, beverage: &ValidBeverage, at: DateTime<Utc>) -> Result<RecordId> {
        let id = uuid::Uuid::new_v4().to_string();
        let conn = self.conn();
        conn.execute(
            r#"
            INSERT INTO beverages (id, user_id, name, style, volume_ml, abv, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
            params![
                id,
                user_id,
                beverage.name,
                beverage.style.as_str(),
                beverage.volume_ml.as_ref().map(|m| m.to_string()),
                beverage.abv.as_ref().map(|m| m.to_string()),
                at.timestamp_millis(),
            ],
        )
        .with_context(|| format!("Failed to append beverage for {}", user_id))?;

        tracing::debug!("Appended beverage {} for {}", id, user_id);
        Ok(id)
    }
}
