//! CLI command implementations

pub mod achievements;
pub mod add;
pub mod catalog;
pub mod check;
pub mod init;
pub mod leaderboard;
pub mod stats;
pub mod user;

use std::path::{Path, PathBuf};

use anyhow::{Result, bail};
use chrono::{DateTime, Local};

use tavern::store::UserDirectory;
use tavern::{Config, Tavern, TavernDb, User};

/// Everything a command needs: loaded config, open database, active user
pub struct Context {
    pub config: Config,
    pub config_path: PathBuf,
    pub tavern: Tavern<TavernDb>,
    user: Option<String>,
}

impl Context {
    pub fn load(config_path: Option<&Path>, user: Option<String>) -> Result<Self> {
        let config_path = config_path
            .map(Path::to_path_buf)
            .unwrap_or_else(Config::global_config_path);
        let config = Config::load_or_default(&config_path)?;
        let db = TavernDb::open(&config.database_path())?;
        let user = user.or_else(|| config.settings.default_user.clone());

        Ok(Self {
            config,
            config_path,
            tavern: Tavern::new(db),
            user,
        })
    }

    pub fn db(&self) -> &TavernDb {
        self.tavern.store()
    }

    /// The registered active user, selected by id or by display name
    pub fn current_user(&self) -> Result<User> {
        let Some(key) = self.user.as_deref() else {
            bail!("No user selected. Pass --user <id> or set settings.default_user");
        };
        if let Some(user) = self.db().get_user(key)? {
            return Ok(user);
        }
        match self.db().find_user_by_name(key)? {
            Some(user) => Ok(user),
            None => bail!("Unknown user '{}'. Register with: tavern user add {} --name <name>", key, key),
        }
    }

    /// Persist `user_id` as settings.default_user in the config file
    pub fn set_default_user(&self, user_id: &str) -> Result<()> {
        // Re-read so edits made since load are kept
        let mut config = Config::load_or_default(&self.config_path)?;
        config.settings.default_user = Some(user_id.to_string());
        config.save_to_file(&self.config_path)
    }

    /// Reference instant for every engine call; its zone is the local zone
    pub fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}
