//! Configuration loading and management

mod io;
mod settings;

pub use settings::Settings;

use serde::{Deserialize, Serialize};

/// Main configuration structure (`~/.tavern/config.toml`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// General settings
    #[serde(default)]
    pub settings: Settings,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::leaderboard::TimeFilter;

    #[test]
    fn test_empty_file_gives_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.settings.leaderboard_period, TimeFilter::Month);
        assert!(config.settings.database.is_none());
    }

    #[test]
    fn test_partial_settings() {
        let config: Config = toml::from_str(
            r#"
            [settings]
            default_user = "ghimbav"
            leaderboard_period = "week"
            "#,
        )
        .unwrap();
        assert_eq!(config.settings.default_user.as_deref(), Some("ghimbav"));
        assert_eq!(config.settings.leaderboard_period, TimeFilter::Week);
    }
}
