//! SQLite connection and schema management
//!
//! Manages the `~/.tavern/tavern.db` database with automatic schema migration.

use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use rusqlite::Connection;

/// Database wrapper shared by every store trait implementation
#[derive(Clone)]
pub struct TavernDb {
    conn: Arc<Mutex<Connection>>,
}

impl TavernDb {
    /// Open or create the database at a specific path
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create database dir: {}", parent.display()))?;
        }

        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open tavern db: {}", path.display()))?;

        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.pragma_update(None, "synchronous", "NORMAL")?;
        conn.pragma_update(None, "foreign_keys", "ON")?;

        Self::from_connection(conn)
    }

    /// In-memory database, mostly for tests
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().context("Failed to open in-memory db")?;
        conn.pragma_update(None, "foreign_keys", "ON")?;
        Self::from_connection(conn)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        let db = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        db.init_schema()?;
        Ok(db)
    }

    /// Lock the connection. A poisoned lock still holds a usable connection.
    pub(crate) fn conn(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn init_schema(&self) -> Result<()> {
        let conn = self.conn();
        conn.execute_batch(SCHEMA_SQL)
            .context("Failed to create tavern schema")?;
        drop(conn);
        self.run_migrations()
    }

    fn run_migrations(&self) -> Result<()> {
        let conn = self.conn();

        let version: i32 = conn
            .query_row("SELECT COALESCE(MAX(version), 0) FROM schema_version", [], |r| r.get(0))
            .unwrap_or(0);

        // Migration 2: case-insensitive display name lookup
        if version < 2 {
            let has_lower: bool = conn
                .prepare("SELECT COUNT(*) FROM pragma_table_info('users') WHERE name = 'display_name_lower'")
                .and_then(|mut s| s.query_row([], |r| r.get::<_, i32>(0)))
                .map(|c| c > 0)
                .unwrap_or(false);

            if !has_lower {
                conn.execute_batch(
                    r#"
                    ALTER TABLE users ADD COLUMN display_name_lower TEXT;
                    UPDATE users SET display_name_lower = LOWER(display_name);
                    CREATE INDEX IF NOT EXISTS idx_users_name_lower ON users(display_name_lower);
                    "#,
                )?;
            }

            conn.execute("INSERT OR REPLACE INTO schema_version VALUES (2)", [])?;
            tracing::debug!("Applied tavern db migration 2");
        }

        Ok(())
    }
}

/// Epoch milliseconds to a UTC instant
pub(crate) fn instant_from_ms(ms: i64) -> Result<DateTime<Utc>> {
    DateTime::<Utc>::from_timestamp_millis(ms)
        .with_context(|| format!("Timestamp out of range: {} ms", ms))
}

const SCHEMA_SQL: &str = r#"
-- Patrons
CREATE TABLE IF NOT EXISTS users (
    id TEXT PRIMARY KEY,
    display_name TEXT NOT NULL,
    role TEXT NOT NULL DEFAULT 'user',
    created_at INTEGER NOT NULL
);

-- Logged beverages (one row per drink)
CREATE TABLE IF NOT EXISTS beverages (
    id TEXT PRIMARY KEY,
    user_id TEXT NOT NULL,
    name TEXT NOT NULL,
    style TEXT NOT NULL,
    volume_ml TEXT,
    abv TEXT,
    created_at INTEGER NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_beverages_user ON beverages(user_id);
CREATE INDEX IF NOT EXISTS idx_beverages_created_at ON beverages(created_at);

-- Achievement catalog
CREATE TABLE IF NOT EXISTS achievement_definitions (
    id TEXT PRIMARY KEY,
    category TEXT NOT NULL,
    title TEXT NOT NULL,
    description TEXT NOT NULL DEFAULT '',
    icon TEXT NOT NULL DEFAULT '',
    target REAL NOT NULL,
    unit TEXT NOT NULL,
    position INTEGER NOT NULL DEFAULT 0
);

-- Unlocked achievements per user (never deleted by evaluation)
CREATE TABLE IF NOT EXISTS user_achievements (
    user_id TEXT NOT NULL,
    achievement_id TEXT NOT NULL,
    unlocked_at INTEGER NOT NULL,
    PRIMARY KEY (user_id, achievement_id)
);

-- Schema version
CREATE TABLE IF NOT EXISTS schema_version (version INTEGER PRIMARY KEY);
INSERT OR IGNORE INTO schema_version VALUES (1);
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_open_and_init() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("test_tavern.db");
        let db = TavernDb::open(&db_path).unwrap();

        let conn = db.conn();
        let mut stmt = conn
            .prepare("SELECT name FROM sqlite_master WHERE type='table'")
            .unwrap();
        let tables: Vec<String> = stmt
            .query_map([], |row| row.get(0))
            .unwrap()
            .filter_map(|r| r.ok())
            .collect();

        assert!(tables.contains(&"users".to_string()));
        assert!(tables.contains(&"beverages".to_string()));
        assert!(tables.contains(&"achievement_definitions".to_string()));
        assert!(tables.contains(&"user_achievements".to_string()));
    }

    #[test]
    fn test_reopen_keeps_schema_version() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("tavern.db");
        drop(TavernDb::open(&db_path).unwrap());

        let db = TavernDb::open(&db_path).unwrap();
        let version: i32 = db
            .conn()
            .query_row("SELECT MAX(version) FROM schema_version", [], |r| r.get(0))
            .unwrap();
        assert_eq!(version, 2);
    }

    #[test]
    fn test_instant_from_ms() {
        let instant = instant_from_ms(1_700_000_000_000).unwrap();
        assert_eq!(instant.timestamp(), 1_700_000_000);
        assert!(instant_from_ms(i64::MAX).is_err());
    }
}
