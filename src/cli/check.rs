//! Check command implementation

use anyhow::Result;

use tavern::RefreshOutcome;

use super::Context;

/// Re-evaluate achievements of the active user, or of everyone with `--all`
pub fn check_command(ctx: &Context, all: bool) -> Result<()> {
    let now = ctx.now();
    let outcomes = if all {
        ctx.tavern.refresh_all(&now)?
    } else {
        let user = ctx.current_user()?;
        vec![ctx.tavern.refresh(&user.id, &now)?]
    };

    let mut total = 0;
    for outcome in &outcomes {
        total += print_outcome(outcome);
    }
    println!("\n{} users checked, {} achievements unlocked", outcomes.len(), total);
    Ok(())
}

fn print_outcome(outcome: &RefreshOutcome) -> usize {
    if outcome.unlocked.is_empty() {
        println!("{}: nothing new ({} beers)", outcome.user_id, outcome.snapshot.total_count);
    } else {
        println!("{}:", outcome.user_id);
        for unlocked in &outcome.unlocked {
            println!("  {} {}", unlocked.definition.icon, unlocked.definition.title);
        }
    }
    outcome.unlocked.len()
}
