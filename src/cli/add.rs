//! Add command implementation

use anyhow::Result;
use tracing::warn;

use tavern::{BeerStyle, NewBeverage};

use super::Context;

/// Log a beverage for the active user and announce new badges
pub fn add_command(
    ctx: &Context,
    name: String,
    style: String,
    volume: Option<String>,
    abv: Option<String>,
) -> Result<()> {
    let user = ctx.current_user()?;
    let beverage = NewBeverage {
        name,
        style,
        volume_ml: volume,
        abv,
    };

    let outcome = ctx.tavern.log_beverage(&user.id, &beverage, &ctx.now())?;
    if !BeerStyle::parse(&beverage.style).is_known() {
        warn!("'{}' is not a built-in style; it still counts toward variety", beverage.style.trim());
    }

    println!("Logged {} ({})", beverage.name.trim(), outcome.record_id);
    println!(
        "Total: {} beers, {:.2} L",
        outcome.snapshot.total_count, outcome.snapshot.total_volume_liters
    );

    for unlocked in outcome.unlocked() {
        let def = &unlocked.definition;
        println!("  {} Achievement unlocked: {} - {}", def.icon, def.title, def.description);
    }

    Ok(())
}
