//! Settings configuration types

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::leaderboard::TimeFilter;

/// General settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// SQLite database file. Defaults to `~/.tavern/tavern.db`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database: Option<PathBuf>,

    /// User id used when `--user` is not given
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_user: Option<String>,

    /// Default period of `tavern leaderboard`
    #[serde(default)]
    pub leaderboard_period: TimeFilter,
}
