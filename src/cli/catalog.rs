//! Catalog command implementation

use std::path::PathBuf;

use anyhow::{Context as _, Result};
use clap::Subcommand;

use tavern::AchievementDefinition;
use tavern::store::CatalogStore;

use super::Context;

#[derive(Subcommand)]
pub enum CatalogCommand {
    /// List stored achievement definitions
    List,

    /// Add definitions from a JSON array; existing ids are skipped
    Import {
        /// JSON file with an array of definitions
        file: PathBuf,
    },
}

pub fn catalog_command(ctx: &Context, command: CatalogCommand) -> Result<()> {
    match command {
        CatalogCommand::List => {
            let definitions = ctx.db().list_definitions()?;
            if definitions.is_empty() {
                println!("Catalog is empty. Run: tavern init");
                return Ok(());
            }
            println!("Achievements ({}):\n", definitions.len());
            for def in definitions {
                let note = if def.criterion().is_evaluable() && def.has_valid_target() {
                    ""
                } else {
                    "  (never unlocks)"
                };
                println!(
                    "  {:<20} {:<10} {} {} [{} {}]{}",
                    def.id, def.category, def.icon, def.title, def.criteria.target, def.criteria.unit, note
                );
            }
        }
        CatalogCommand::Import { file } => {
            let content = std::fs::read_to_string(&file)
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let definitions: Vec<AchievementDefinition> = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse {}", file.display()))?;
            let added = ctx.db().seed_definitions(&definitions)?;
            println!(
                "Imported {} of {} definitions ({} already present)",
                added,
                definitions.len(),
                definitions.len() - added
            );
        }
    }
    Ok(())
}
