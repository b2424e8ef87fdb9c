//! Achievement checking logic
//!
//! Compares a statistics snapshot against the catalog and returns the ids that
//! newly qualify. Already-unlocked ids are never returned again and never revoked.

use std::collections::HashSet;

use super::definitions::{AchievementDefinition, Criterion};
use crate::domain::UserRole;
use crate::stats::StatisticsSnapshot;

/// Ids of catalog definitions that qualify now and are not in `unlocked`.
///
/// Returned in catalog order. Definitions with an invalid target or an
/// unmapped category/unit are skipped.
pub fn check_achievements(
    snapshot: &StatisticsSnapshot,
    catalog: &[AchievementDefinition],
    unlocked: &[String],
    role: UserRole,
) -> Vec<String> {
    let already: HashSet<&str> = unlocked.iter().map(String::as_str).collect();
    let mut qualified: HashSet<&str> = HashSet::new();

    for def in catalog {
        if already.contains(def.id.as_str()) || !is_checkable(def) {
            continue;
        }
        if def.criterion().is_met(snapshot, role, def.criteria.target) {
            qualified.insert(def.id.as_str());
        }
    }

    // Catalog-wide badges see the result of the first pass
    for def in catalog {
        if already.contains(def.id.as_str()) || !is_checkable(def) {
            continue;
        }
        if def.criterion() == Criterion::AllOthers && all_others_unlocked(def, catalog, &already, &qualified) {
            qualified.insert(def.id.as_str());
        }
    }

    let newly: Vec<String> = catalog
        .iter()
        .filter(|d| qualified.contains(d.id.as_str()))
        .map(|d| d.id.clone())
        .collect();

    if !newly.is_empty() {
        tracing::debug!("Newly qualified achievements: {:?}", newly);
    }
    newly
}

fn is_checkable(def: &AchievementDefinition) -> bool {
    if !def.has_valid_target() {
        tracing::warn!(
            "Skipping achievement {} with invalid target {}",
            def.id,
            def.criteria.target
        );
        return false;
    }
    if !def.criterion().is_evaluable() {
        tracing::debug!(
            "Skipping achievement {} with unmapped criterion {}/{}",
            def.id,
            def.category,
            def.criteria.unit
        );
        return false;
    }
    true
}

/// Definitions a catalog-wide badge requires: evaluable, valid, not role-gated,
/// and not another catalog-wide badge.
pub(crate) fn counts_toward_all(def: &AchievementDefinition) -> bool {
    let criterion = def.criterion();
    def.has_valid_target()
        && criterion.is_evaluable()
        && !matches!(criterion, Criterion::Owner | Criterion::AllOthers)
}

fn all_others_unlocked(
    target: &AchievementDefinition,
    catalog: &[AchievementDefinition],
    already: &HashSet<&str>,
    qualified: &HashSet<&str>,
) -> bool {
    let mut required = catalog
        .iter()
        .filter(|d| d.id != target.id && counts_toward_all(d))
        .peekable();
    if required.peek().is_none() {
        return false;
    }
    required.all(|d| already.contains(d.id.as_str()) || qualified.contains(d.id.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::achievements::{AchievementCategory, Criteria, default_catalog};

    fn def(id: &str, category: &str, unit: &str, target: f64) -> AchievementDefinition {
        AchievementDefinition {
            id: id.to_string(),
            category: AchievementCategory::from_tag(category),
            title: id.to_string(),
            description: String::new(),
            icon: String::new(),
            criteria: Criteria {
                target,
                unit: unit.to_string(),
            },
        }
    }

    fn snapshot_with_total(total: u64) -> StatisticsSnapshot {
        StatisticsSnapshot {
            total_count: total,
            ..StatisticsSnapshot::default()
        }
    }

    #[test]
    fn test_first_sip_unlocks_with_one_record() {
        let catalog = vec![def("first_beer", "milestone", "beers", 1.0)];
        assert_eq!(
            check_achievements(&snapshot_with_total(1), &catalog, &[], UserRole::User),
            vec!["first_beer".to_string()]
        );
        assert!(check_achievements(&snapshot_with_total(0), &catalog, &[], UserRole::User).is_empty());
    }

    #[test]
    fn test_idempotent_second_run() {
        let catalog = default_catalog();
        let snapshot = snapshot_with_total(12);
        let first = check_achievements(&snapshot, &catalog, &[], UserRole::User);
        assert_eq!(first, vec!["first_beer".to_string(), "beer_collector_10".to_string()]);
        let second = check_achievements(&snapshot, &catalog, &first, UserRole::User);
        assert!(second.is_empty());
    }

    #[test]
    fn test_already_unlocked_never_returned() {
        let catalog = vec![def("first_beer", "milestone", "beers", 1.0)];
        let unlocked = vec!["first_beer".to_string()];
        // Even with zero records nothing is revoked or re-emitted
        assert!(check_achievements(&snapshot_with_total(0), &catalog, &unlocked, UserRole::User).is_empty());
    }

    #[test]
    fn test_streak_days_use_trailing_windows() {
        let catalog = vec![
            def("streak_7", "streak", "days", 7.0),
            def("streak_30", "streak", "days", 30.0),
        ];
        let snapshot = StatisticsSnapshot {
            total_count: 30,
            count_in_trailing_week: 7,
            count_in_trailing_month: 29,
            ..StatisticsSnapshot::default()
        };
        assert_eq!(
            check_achievements(&snapshot, &catalog, &[], UserRole::User),
            vec!["streak_7".to_string()]
        );
    }

    #[test]
    fn test_weeks_active_from_weekly_mean() {
        let catalog = vec![def("weekly_drinker", "time_based", "weeks", 4.0)];
        let snapshot = StatisticsSnapshot {
            total_count: 7,
            mean_records_per_week: 2.0,
            ..StatisticsSnapshot::default()
        };
        // ceil(7 / 2) = 4
        assert_eq!(check_achievements(&snapshot, &catalog, &[], UserRole::User).len(), 1);
    }

    #[test]
    fn test_alcohol_and_quantity_fields() {
        let catalog = vec![
            def("sailor", "alcohol", "high_alcohol", 5.0),
            def("coma", "alcohol", "pure_alcohol_liters", 10.0),
            def("giant", "quantity", "total_liters", 50.0),
            def("mega", "quantity", "mega_beers", 2.0),
        ];
        let snapshot = StatisticsSnapshot {
            total_count: 60,
            high_abv_count: 5,
            total_pure_alcohol_liters: 9.99,
            total_volume_liters: 50.0,
            mega_volume_count: 1,
            ..StatisticsSnapshot::default()
        };
        assert_eq!(
            check_achievements(&snapshot, &catalog, &[], UserRole::User),
            vec!["sailor".to_string(), "giant".to_string()]
        );
    }

    #[test]
    fn test_owner_badge_needs_role() {
        let catalog = vec![def("tavern_owner", "special", "owner", 1.0)];
        let snapshot = StatisticsSnapshot::default();
        assert!(check_achievements(&snapshot, &catalog, &[], UserRole::User).is_empty());
        assert_eq!(
            check_achievements(&snapshot, &catalog, &[], UserRole::Owner),
            vec!["tavern_owner".to_string()]
        );
    }

    #[test]
    fn test_unknown_and_invalid_definitions_skipped() {
        let catalog = vec![
            def("mystery", "seasonal", "beers", 1.0),
            def("odd_unit", "quantity", "barrels", 1.0),
            def("zero", "milestone", "beers", 0.0),
            def("negative", "milestone", "beers", -3.0),
        ];
        let snapshot = snapshot_with_total(100);
        assert!(check_achievements(&snapshot, &catalog, &[], UserRole::Owner).is_empty());
    }

    #[test]
    fn test_legend_requires_every_other_badge() {
        let catalog = vec![
            def("first_beer", "milestone", "beers", 1.0),
            def("collector", "beer_count", "beers", 10.0),
            def("tavern_owner", "special", "owner", 1.0),
            def("mystery", "seasonal", "x", 1.0),
            def("legend", "special", "all_achievements", 1.0),
        ];

        let partial = check_achievements(&snapshot_with_total(5), &catalog, &[], UserRole::User);
        assert_eq!(partial, vec!["first_beer".to_string()]);

        // Owner badge and unmapped entries are not required
        let full = check_achievements(&snapshot_with_total(10), &catalog, &partial, UserRole::User);
        assert_eq!(full, vec!["collector".to_string(), "legend".to_string()]);
    }

    #[test]
    fn test_legend_alone_never_unlocks() {
        let catalog = vec![def("legend", "special", "all_achievements", 1.0)];
        assert!(check_achievements(&snapshot_with_total(10), &catalog, &[], UserRole::Owner).is_empty());
    }
}
