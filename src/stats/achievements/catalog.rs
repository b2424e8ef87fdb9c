//! Built-in tavern achievement catalog
//!
//! Seeded into the catalog store by `tavern init`. Stored catalogs may differ;
//! the engines only ever see what the store returns.

use super::definitions::{AchievementCategory, AchievementDefinition, Criteria};

struct Template {
    id: &'static str,
    category: &'static str,
    title: &'static str,
    description: &'static str,
    icon: &'static str,
    target: f64,
    unit: &'static str,
}

static DEFAULT_CATALOG: &[Template] = &[
    // === MILESTONE / COUNT ===
    Template {
        id: "first_beer",
        category: "milestone",
        title: "First Sip",
        description: "Log your first beer in the tavern",
        icon: "🍺",
        target: 1.0,
        unit: "beers",
    },
    Template {
        id: "beer_collector_10",
        category: "beer_count",
        title: "Beer Collector",
        description: "Log 10 different beers",
        icon: "📚",
        target: 10.0,
        unit: "beers",
    },
    Template {
        id: "beer_collector_50",
        category: "beer_count",
        title: "Beer Enthusiast",
        description: "Log 50 different beers",
        icon: "📖",
        target: 50.0,
        unit: "beers",
    },
    Template {
        id: "beer_collector_100",
        category: "beer_count",
        title: "Beer Master",
        description: "Log 100 different beers",
        icon: "👑",
        target: 100.0,
        unit: "beers",
    },
    // === TIME / VARIETY ===
    Template {
        id: "weekly_drinker",
        category: "time_based",
        title: "Weekly Regular",
        description: "Log beers for 4 consecutive weeks",
        icon: "📅",
        target: 4.0,
        unit: "weeks",
    },
    Template {
        id: "variety_seeker",
        category: "variety",
        title: "Variety Seeker",
        description: "Try 5 different beer types",
        icon: "🎨",
        target: 5.0,
        unit: "types",
    },
    Template {
        id: "beer_connoisseur",
        category: "variety",
        title: "Beer Connoisseur",
        description: "Try all 11 different beer types",
        icon: "🍷",
        target: 11.0,
        unit: "all_types",
    },
    // === STREAK ===
    Template {
        id: "streak_7",
        category: "streak",
        title: "Week Warrior",
        description: "Log beers for 7 consecutive days",
        icon: "🔥",
        target: 7.0,
        unit: "days",
    },
    Template {
        id: "streak_30",
        category: "streak",
        title: "Monthly Master",
        description: "Log beers for 30 consecutive days",
        icon: "⭐",
        target: 30.0,
        unit: "days",
    },
    Template {
        id: "night_owl",
        category: "streak",
        title: "Night Owl",
        description: "Log beers after 10 PM for 5 consecutive nights",
        icon: "🦉",
        target: 5.0,
        unit: "late_nights",
    },
    Template {
        id: "weekend_warrior",
        category: "streak",
        title: "Weekend Warrior",
        description: "Log beers every weekend for 2 months",
        icon: "🎉",
        target: 8.0,
        unit: "weekends",
    },
    Template {
        id: "secretary",
        category: "streak",
        title: "Secretary",
        description: "Log detailed beer info for 30 consecutive days",
        icon: "📋",
        target: 30.0,
        unit: "detailed_logs",
    },
    // === ALCOHOL ===
    Template {
        id: "drunken_sailor",
        category: "alcohol",
        title: "Drunken Sailor",
        description: "Drink 5 beers with 8%+ alcohol content",
        icon: "⚓",
        target: 5.0,
        unit: "high_alcohol",
    },
    Template {
        id: "alcohol_coma",
        category: "alcohol",
        title: "Alcohol Coma",
        description: "Consume 10 liters of pure alcohol total",
        icon: "💀",
        target: 10.0,
        unit: "pure_alcohol_liters",
    },
    Template {
        id: "lightweight",
        category: "alcohol",
        title: "Lightweight",
        description: "Stick to beers under 4% alcohol for 10 beers",
        icon: "🍃",
        target: 10.0,
        unit: "low_alcohol",
    },
    Template {
        id: "beer_sommelier",
        category: "alcohol",
        title: "Beer Sommelier",
        description: "Rate 50 beers with detailed alcohol content",
        icon: "📝",
        target: 50.0,
        unit: "rated_beers",
    },
    Template {
        id: "brewmaster",
        category: "alcohol",
        title: "Brewmaster",
        description: "Try 25 different beers with varying alcohol content",
        icon: "🏭",
        target: 25.0,
        unit: "varied_alcohol",
    },
    // === QUANTITY ===
    Template {
        id: "tank_engine",
        category: "quantity",
        title: "Tank Engine",
        description: "Drink 20 beers of 500ml or larger",
        icon: "🚂",
        target: 20.0,
        unit: "large_beers",
    },
    Template {
        id: "thirsty_giant",
        category: "quantity",
        title: "Thirsty Giant",
        description: "Consume 50 liters of beer total",
        icon: "🌊",
        target: 50.0,
        unit: "total_liters",
    },
    Template {
        id: "pint_master",
        category: "quantity",
        title: "Pint Master",
        description: "Drink 100 beers of exactly 330ml",
        icon: "🥃",
        target: 100.0,
        unit: "pint_sized",
    },
    Template {
        id: "mega_tank",
        category: "quantity",
        title: "Mega Tank",
        description: "Drink 10 beers of 1 liter or larger",
        icon: "🛢️",
        target: 10.0,
        unit: "mega_beers",
    },
    // === SPECIAL ===
    Template {
        id: "tavern_owner",
        category: "special",
        title: "Tavern Owner",
        description: "The legendary keeper of this fine establishment",
        icon: "🏰",
        target: 1.0,
        unit: "owner",
    },
    Template {
        id: "tavern_legend",
        category: "special",
        title: "Tavern Legend",
        description: "Achieve all other achievements - the ultimate tavern master",
        icon: "⚔️",
        target: 1.0,
        unit: "all_achievements",
    },
];

/// The built-in catalog, in display order
pub fn default_catalog() -> Vec<AchievementDefinition> {
    DEFAULT_CATALOG
        .iter()
        .map(|t| AchievementDefinition {
            id: t.id.to_string(),
            category: AchievementCategory::from_tag(t.category),
            title: t.title.to_string(),
            description: t.description.to_string(),
            icon: t.icon.to_string(),
            criteria: Criteria {
                target: t.target,
                unit: t.unit.to_string(),
            },
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::stats::achievements::Criterion;

    #[test]
    fn test_ids_unique_and_targets_positive() {
        let catalog = default_catalog();
        let ids: HashSet<&str> = catalog.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids.len(), catalog.len());
        assert!(catalog.iter().all(|d| d.has_valid_target()));
    }

    #[test]
    fn test_known_categories_only() {
        for d in default_catalog() {
            assert!(
                !matches!(d.category, AchievementCategory::Unknown(_)),
                "{} has unknown category",
                d.id
            );
        }
    }

    #[test]
    fn test_only_secretary_is_unsupported() {
        let unsupported: Vec<String> = default_catalog()
            .into_iter()
            .filter(|d| d.criterion() == Criterion::Unsupported)
            .map(|d| d.id)
            .collect();
        assert_eq!(unsupported, vec!["secretary".to_string()]);
    }
}
