//! Achievements command implementation

use std::collections::HashMap;

use anyhow::Result;
use chrono::Local;

use tavern::stats::achievements::{locked_only, unlocked_count, unlocked_only};

use super::Context;

pub fn achievements_command(ctx: &Context, locked: bool, unlocked: bool, json: bool) -> Result<()> {
    let user = ctx.current_user()?;
    let items = ctx.tavern.progress(&user.id, &ctx.now())?;

    let shown = if locked {
        locked_only(&items)
    } else if unlocked {
        unlocked_only(&items)
    } else {
        items.iter().collect()
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&shown)?);
        return Ok(());
    }

    let unlocked_at: HashMap<String, _> = ctx.db().list_unlocks(&user.id)?.into_iter().collect();

    let (done, total) = unlocked_count(&items);
    println!("Achievements of {} ({}/{})\n", user.display_name, done, total);

    let mut current_category = None;
    for item in shown {
        let def = &item.definition;
        if current_category != Some(&def.category) {
            println!("{}", def.category.label());
            current_category = Some(&def.category);
        }
        let mark = if item.unlocked { "x" } else { " " };
        let since = unlocked_at
            .get(&def.id)
            .map(|at| format!("  (since {})", at.with_timezone(&Local).format("%Y-%m-%d")))
            .unwrap_or_default();
        println!(
            "  [{}] {} {:<20} {:>6.1}/{:<6} {:>3.0}%  {}{}",
            mark,
            def.icon,
            def.title,
            item.current,
            def.criteria.target,
            item.percent(),
            def.description,
            since
        );
    }

    Ok(())
}
