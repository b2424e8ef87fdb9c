//! Registered users in SQLite

use anyhow::{Context, Result};
use chrono::Utc;
use rusqlite::{OptionalExtension, Row, params};

use super::UserDirectory;
use super::db::TavernDb;
use crate::domain::{User, UserRole};

impl TavernDb {
    /// Insert a user or update name and role of an existing one
    pub fn upsert_user(&self, user: &User) -> Result<()> {
        let conn = self.conn();
        conn.execute(
            r#"
            INSERT INTO users (id, display_name, display_name_lower, role, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            ON CONFLICT(id) DO UPDATE SET
                display_name = excluded.display_name,
                display_name_lower = excluded.display_name_lower,
                role = excluded.role
            "#,
            params![
                user.id,
                user.display_name,
                user.display_name.to_lowercase(),
                user.role.as_str(),
                Utc::now().timestamp_millis(),
            ],
        )
        .with_context(|| format!("Failed to save user {}", user.id))?;
        tracing::info!("Saved user {} ({})", user.id, user.role);
        Ok(())
    }

    /// Case-insensitive lookup by display name
    pub fn find_user_by_name(&self, display_name: &str) -> Result<Option<User>> {
        let conn = self.conn();
        let user = conn
            .query_row(
                "SELECT id, display_name, role FROM users WHERE display_name_lower = ?1",
                [display_name.to_lowercase()],
                user_from_row,
            )
            .optional()?;
        Ok(user)
    }
}

fn user_from_row(row: &Row<'_>) -> rusqlite::Result<User> {
    let role: String = row.get(2)?;
    Ok(User {
        id: row.get(0)?,
        display_name: row.get(1)?,
        role: role.parse::<UserRole>().unwrap_or_default(),
    })
}

impl UserDirectory for TavernDb {
    fn get_user(&self, user_id: &str) -> Result<Option<User>> {
        let conn = self.conn();
        let user = conn
            .query_row(
                "SELECT id, display_name, role FROM users WHERE id = ?1",
                [user_id],
                user_from_row,
            )
            .optional()
            .with_context(|| format!("Failed to load user {}", user_id))?;
        Ok(user)
    }

    fn list_users(&self) -> Result<Vec<User>> {
        let conn = self.conn();
        let mut stmt =
            conn.prepare("SELECT id, display_name, role FROM users ORDER BY created_at, id")?;
        let users = stmt
            .query_map([], user_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()
            .context("Failed to list users")?;
        Ok(users)
    }
}
