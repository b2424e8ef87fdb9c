//! Configuration file I/O operations

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use fs2::FileExt;

use super::Config;

impl Config {
    /// Get the global config directory path (~/.tavern/)
    pub fn global_config_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".tavern")
    }

    /// Get the global config file path (~/.tavern/config.toml)
    pub fn global_config_path() -> PathBuf {
        Self::global_config_dir().join("config.toml")
    }

    /// Default database location (~/.tavern/tavern.db)
    pub fn default_database_path() -> PathBuf {
        Self::global_config_dir().join("tavern.db")
    }

    /// Database path from settings, falling back to the default location
    pub fn database_path(&self) -> PathBuf {
        self.settings
            .database
            .clone()
            .unwrap_or_else(Self::default_database_path)
    }

    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Load `path`, or defaults when the file does not exist
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::from_file(path)
        } else {
            tracing::debug!("No config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Serialize and store through [`Config::write_locked`]
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Could not serialize tavern config")?;
        Self::write_locked(path, &content)
    }

    /// Replace the file at `path` with `content`.
    ///
    /// Writers hold an exclusive lock on `<path>.lock`; readers only ever see the old
    /// or the new file because the content is renamed into place.
    pub fn write_locked(path: &Path, content: &str) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Could not create {}", parent.display()))?;
        }

        let lock_path = path.with_extension("toml.lock");
        let guard = File::create(&lock_path)
            .with_context(|| format!("Could not open {}", lock_path.display()))?;
        guard
            .lock_exclusive()
            .with_context(|| format!("Could not lock {}", lock_path.display()))?;

        let staged = path.with_extension("toml.tmp");
        let result = stage_and_swap(&staged, path, content);
        if result.is_err() {
            let _ = std::fs::remove_file(&staged);
        }

        drop(guard);
        result
    }
}

fn stage_and_swap(staged: &Path, path: &Path, content: &str) -> Result<()> {
    let mut file =
        File::create(staged).with_context(|| format!("Could not create {}", staged.display()))?;
    file.write_all(content.as_bytes())
        .and_then(|()| file.sync_all())
        .with_context(|| format!("Could not write {}", staged.display()))?;
    std::fs::rename(staged, path)
        .with_context(|| format!("Could not move config into {}", path.display()))
}
