//! Init command implementation

use anyhow::{Result, bail};
use std::path::Path;
use tracing::info;

use tavern::{Config, TavernDb, default_catalog};

/// Default configuration content for tavern init
pub const DEFAULT_CONFIG: &str = r#"# Tavern Configuration
# ====================
#
# Available options:
#   database            - SQLite file with users, beers and achievements
#                         (default: ~/.tavern/tavern.db)
#   default_user        - User id used when --user is not given
#   leaderboard_period  - Default leaderboard period: "today", "week" or "month"

[settings]
# database = "/path/to/tavern.db"
# default_user = "ghimbav"
leaderboard_period = "month"
"#;

/// Write the config file and seed the default achievement catalog
pub fn init_command(config_path: Option<&Path>, force: bool) -> Result<()> {
    let config_path = config_path
        .map(Path::to_path_buf)
        .unwrap_or_else(Config::global_config_path);

    if config_path.exists() && !force {
        bail!(
            "Config file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    Config::write_locked(&config_path, DEFAULT_CONFIG)?;
    info!("Created configuration file: {}", config_path.display());

    let config = Config::from_file(&config_path)?;
    let db_path = config.database_path();
    let db = TavernDb::open(&db_path)?;
    let seeded = db.seed_definitions(&default_catalog())?;

    println!("Config:   {}", config_path.display());
    println!("Database: {}", db_path.display());
    println!("Seeded {} achievements", seeded);
    println!();
    println!("Next: tavern user add <id> --name <name>");

    Ok(())
}
