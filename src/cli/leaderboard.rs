//! Leaderboard command implementation

use anyhow::Result;

use tavern::{TimeFilter, rank_of};

use super::Context;

pub fn leaderboard_command(ctx: &Context, period: Option<TimeFilter>) -> Result<()> {
    let filter = period.unwrap_or(ctx.config.settings.leaderboard_period);
    let entries = ctx.tavern.leaderboard(filter, &ctx.now())?;

    if entries.is_empty() {
        println!("No users registered.");
        return Ok(());
    }

    println!("Leaderboard - {}\n", filter.label());
    for entry in &entries {
        println!(
            "  {:>3}. {:<24} {}",
            entry.rank, entry.user.display_name, entry.count
        );
    }

    if let Ok(user) = ctx.current_user() {
        match rank_of(&entries, &user.id) {
            0 => {}
            rank => println!("\nYou are #{} of {}", rank, entries.len()),
        }
    }

    Ok(())
}
