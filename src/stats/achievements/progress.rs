//! Per-definition progress for display

use std::collections::HashSet;

use serde::Serialize;

use super::checker::counts_toward_all;
use super::definitions::{AchievementCategory, AchievementDefinition, Criterion};
use crate::domain::UserRole;
use crate::stats::StatisticsSnapshot;

/// Computed `(unlocked, current)` view of one definition for one user
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AchievementProgress {
    pub definition: AchievementDefinition,
    /// Clamped to `[0, target]`
    pub current: f64,
    pub unlocked: bool,
}

impl AchievementProgress {
    pub fn target(&self) -> f64 {
        self.definition.criteria.target
    }

    /// Completion in percent, capped at 100
    pub fn percent(&self) -> f64 {
        let target = self.target();
        if target > 0.0 && target.is_finite() {
            (self.current / target * 100.0).min(100.0)
        } else {
            0.0
        }
    }
}

/// Progress for every catalog entry, in catalog order.
///
/// Unlocked entries report their full target; locked ones report
/// `min(source, target)`, never negative.
pub fn progress(
    snapshot: &StatisticsSnapshot,
    catalog: &[AchievementDefinition],
    unlocked: &[String],
    role: UserRole,
) -> Vec<AchievementProgress> {
    let unlocked: HashSet<&str> = unlocked.iter().map(String::as_str).collect();

    catalog
        .iter()
        .map(|def| {
            let is_unlocked = unlocked.contains(def.id.as_str());
            let target = def.criteria.target;
            let current = if is_unlocked {
                target
            } else {
                locked_progress(def, snapshot, role, catalog, &unlocked)
            };
            AchievementProgress {
                definition: def.clone(),
                current: clamp(current, target),
                unlocked: is_unlocked,
            }
        })
        .collect()
}

fn locked_progress(
    def: &AchievementDefinition,
    snapshot: &StatisticsSnapshot,
    role: UserRole,
    catalog: &[AchievementDefinition],
    unlocked: &HashSet<&str>,
) -> f64 {
    let target = def.criteria.target;
    match def.criterion() {
        Criterion::Owner if role == UserRole::Owner => target,
        Criterion::Owner | Criterion::Unsupported => 0.0,
        Criterion::AllOthers => {
            let required: Vec<&AchievementDefinition> = catalog
                .iter()
                .filter(|d| d.id != def.id && counts_toward_all(d))
                .collect();
            if required.is_empty() {
                return 0.0;
            }
            let done = required
                .iter()
                .filter(|d| unlocked.contains(d.id.as_str()))
                .count();
            target * done as f64 / required.len() as f64
        }
        measured => measured.measure(snapshot).unwrap_or(0.0),
    }
}

fn clamp(value: f64, target: f64) -> f64 {
    if !value.is_finite() || value <= 0.0 || !target.is_finite() || target <= 0.0 {
        return 0.0;
    }
    value.min(target)
}

/// Entries of one category
pub fn by_category<'a>(
    items: &'a [AchievementProgress],
    category: &AchievementCategory,
) -> Vec<&'a AchievementProgress> {
    items
        .iter()
        .filter(|p| &p.definition.category == category)
        .collect()
}

pub fn unlocked_only(items: &[AchievementProgress]) -> Vec<&AchievementProgress> {
    items.iter().filter(|p| p.unlocked).collect()
}

pub fn locked_only(items: &[AchievementProgress]) -> Vec<&AchievementProgress> {
    items.iter().filter(|p| !p.unlocked).collect()
}

/// `(unlocked, total)`
pub fn unlocked_count(items: &[AchievementProgress]) -> (usize, usize) {
    (items.iter().filter(|p| p.unlocked).count(), items.len())
}
