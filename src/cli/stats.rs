//! Stats command implementation

use anyhow::Result;

use super::Context;

pub fn stats_command(ctx: &Context, json: bool) -> Result<()> {
    let user = ctx.current_user()?;
    let snapshot = ctx.tavern.snapshot(&user.id, &ctx.now())?;

    if json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
        return Ok(());
    }

    println!("Statistics for {}\n", user.display_name);
    println!("  Beers logged:       {}", snapshot.total_count);
    println!("  Total volume:       {:.2} L", snapshot.total_volume_liters);
    println!("  Average ABV:        {:.1} %", snapshot.average_abv);
    println!("  Pure alcohol:       {:.3} L", snapshot.total_pure_alcohol_liters);
    println!("  Favourite style:    {}", snapshot.dominant_category);
    println!("  Last 7 days:        {}", snapshot.count_in_trailing_week);
    println!("  Last 30 days:       {}", snapshot.count_in_trailing_month);
    println!("  Beers per week:     {:.1}", snapshot.mean_records_per_week);
    println!();
    for (label, value) in snapshot.counters() {
        if matches!(label, "trailing_week" | "trailing_month" | "total") {
            continue;
        }
        println!("  {:<28} {}", label, value);
    }

    Ok(())
}
