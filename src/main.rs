use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tavern::TimeFilter;

mod cli;

use cli::Context;

#[derive(Parser)]
#[command(name = "tavern")]
#[command(about = "Log your beers, unlock achievements, climb the leaderboard")]
#[command(version)]
struct Cli {
    /// Path to the config file (defaults to ~/.tavern/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Act as this user (defaults to settings.default_user)
    #[arg(short, long, global = true)]
    user: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the config file and seed the default achievement catalog
    Init {
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },

    /// Manage patrons
    #[command(subcommand)]
    User(cli::user::UserCommand),

    /// Log a beverage for the active user
    Add {
        /// Beer name
        #[arg(long)]
        name: String,

        /// Beer style (Blonde, Dark, IPA, Craft, Lager, Pilsner, Stout, Porter, Wheat, Sour, Other)
        #[arg(long)]
        style: String,

        /// Volume in milliliters, e.g. "500" or "330 ml"
        #[arg(long)]
        volume: Option<String>,

        /// Alcohol by volume in percent, e.g. "5.2"
        #[arg(long)]
        abv: Option<String>,
    },

    /// Show statistics of the active user
    Stats {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show achievement progress of the active user
    Achievements {
        /// Only locked achievements
        #[arg(long, conflicts_with = "unlocked")]
        locked: bool,

        /// Only unlocked achievements
        #[arg(long)]
        unlocked: bool,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Re-evaluate achievements without logging anything
    Check {
        /// Check every registered user
        #[arg(long)]
        all: bool,
    },

    /// Rank patrons by recent activity
    Leaderboard {
        /// today, week or month (defaults to settings.leaderboard_period)
        #[arg(long)]
        period: Option<TimeFilter>,
    },

    /// Inspect or extend the achievement catalog
    #[command(subcommand)]
    Catalog(cli::catalog::CatalogCommand),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with_target(false)
        .init();

    let config_path = cli.config.as_deref();
    let user = cli.user;
    let load = || Context::load(config_path, user.clone());

    match cli.command {
        Commands::Init { force } => cli::init::init_command(config_path, force)?,
        Commands::User(command) => cli::user::user_command(&load()?, command)?,
        Commands::Add {
            name,
            style,
            volume,
            abv,
        } => cli::add::add_command(&load()?, name, style, volume, abv)?,
        Commands::Stats { json } => cli::stats::stats_command(&load()?, json)?,
        Commands::Achievements {
            locked,
            unlocked,
            json,
        } => cli::achievements::achievements_command(&load()?, locked, unlocked, json)?,
        Commands::Check { all } => cli::check::check_command(&load()?, all)?,
        Commands::Leaderboard { period } => {
            cli::leaderboard::leaderboard_command(&load()?, period)?
        }
        Commands::Catalog(command) => cli::catalog::catalog_command(&load()?, command)?,
    }

    Ok(())
}
