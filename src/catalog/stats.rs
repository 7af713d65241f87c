//! Aggregates derived from a catalog for progress displays. Nothing here mutates the catalog.

use crate::catalog::classify::{MAX_TIER, MIN_TIER};
use crate::catalog::model::{Catalog, Category};
use crate::catalog::normalize::{Quest, QuestStatus};
use serde::Serialize;

const TIER_COUNT: usize = (MAX_TIER - MIN_TIER + 1) as usize;

/// Display label of a tier band.
pub fn tier_label(tier: u8) -> &'static str {
    match tier {
        1 => "Novice",
        2 => "Apprentice",
        3 => "Journeyman",
        4 => "Expert",
        5 => "Master",
        _ => "Unknown",
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusCounts {
    pub locked: usize,
    pub available: usize,
    pub in_progress: usize,
    pub completed: usize,
}

impl StatusCounts {
    fn record(&mut self, status: QuestStatus) {
        match status {
            QuestStatus::Locked => self.locked += 1,
            QuestStatus::Available => self.available += 1,
            QuestStatus::InProgress => self.in_progress += 1,
            QuestStatus::Completed => self.completed += 1,
        }
    }

    pub fn get(&self, status: QuestStatus) -> usize {
        match status {
            QuestStatus::Locked => self.locked,
            QuestStatus::Available => self.available,
            QuestStatus::InProgress => self.in_progress,
            QuestStatus::Completed => self.completed,
        }
    }

    pub fn total(&self) -> usize {
        self.locked + self.available + self.in_progress + self.completed
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TierProgress {
    pub tier: u8,
    pub total: usize,
    pub completed: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogStats {
    pub total: usize,
    pub by_status: StatusCounts,
    pub completion_percentage: f64,
    /// Always one entry per tier, lowest first.
    pub tiers: Vec<TierProgress>,
}

impl CatalogStats {
    pub fn from_quests<'a, I>(quests: I) -> Self
    where
        I: IntoIterator<Item = &'a Quest>,
    {
        let mut by_status = StatusCounts::default();
        let mut tiers: Vec<TierProgress> = (MIN_TIER..=MAX_TIER)
            .map(|tier| TierProgress {
                tier,
                total: 0,
                completed: 0,
            })
            .collect();

        for quest in quests {
            by_status.record(quest.status);
            if let Some(slot) = tier_index(quest.tier).and_then(|i| tiers.get_mut(i)) {
                slot.total += 1;
                if quest.status == QuestStatus::Completed {
                    slot.completed += 1;
                }
            }
        }

        let total = by_status.total();
        Self {
            total,
            by_status,
            completion_percentage: percentage(by_status.completed, total),
            tiers,
        }
    }

    pub fn for_catalog(catalog: &Catalog) -> Self {
        Self::from_quests(catalog.quests())
    }

    pub fn for_category(category: &Category) -> Self {
        Self::from_quests(category.quests())
    }
}

fn tier_index(tier: u8) -> Option<usize> {
    let index = tier.checked_sub(MIN_TIER)? as usize;
    (index < TIER_COUNT).then_some(index)
}

fn percentage(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}

/// Quests of one tier within a category, for the tiered node view.
#[derive(Debug, Clone, PartialEq)]
pub struct TierBucket<'a> {
    pub tier: u8,
    pub label: &'static str,
    pub quests: Vec<&'a Quest>,
    pub counts: StatusCounts,
}

/// A category's quests grouped by tier, tiers 1..=5 always present.
pub fn tier_buckets(category: &Category) -> Vec<TierBucket<'_>> {
    let mut buckets: Vec<TierBucket<'_>> = (MIN_TIER..=MAX_TIER)
        .map(|tier| TierBucket {
            tier,
            label: tier_label(tier),
            quests: Vec::new(),
            counts: StatusCounts::default(),
        })
        .collect();
    for quest in category.quests() {
        if let Some(bucket) = tier_index(quest.tier).and_then(|i| buckets.get_mut(i)) {
            bucket.counts.record(quest.status);
            bucket.quests.push(quest);
        }
    }
    buckets
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::category::category_from_directory_name;
    use crate::catalog::model::QuestType;
    use crate::catalog::normalize::normalize;
    use crate::catalog::raw::RawQuestRecord;

    fn quest(id: &str, tier: i64, status: QuestStatus) -> Quest {
        let record = RawQuestRecord::from_json(&format!(
            r#"{{"Tier": {tier}, "Title": "{id}", "RewardPool": [], "Conditions": []}}"#
        ))
        .unwrap();
        let mut quest = normalize(record, id);
        quest.status = status;
        quest
    }

    fn category() -> Category {
        let mut t = QuestType::for_directory("Bartender Fetch");
        t.quests = vec![
            quest("a", 1, QuestStatus::Completed),
            quest("b", 1, QuestStatus::Available),
            quest("c", 3, QuestStatus::Locked),
            quest("d", 5, QuestStatus::InProgress),
        ];
        Category::new(category_from_directory_name("Bartender Fetch"), vec![t])
    }

    #[test]
    fn counts_by_status_and_tier() {
        let stats = CatalogStats::for_category(&category());
        assert_eq!(stats.total, 4);
        assert_eq!(stats.by_status.completed, 1);
        assert_eq!(stats.by_status.available, 1);
        assert_eq!(stats.by_status.locked, 1);
        assert_eq!(stats.by_status.get(QuestStatus::InProgress), 1);
        assert_eq!(stats.completion_percentage, 25.0);
        assert_eq!(stats.tiers.len(), 5);
        assert_eq!(stats.tiers[0], TierProgress { tier: 1, total: 2, completed: 1 });
        assert_eq!(stats.tiers[1].total, 0);
        assert_eq!(stats.tiers[4].total, 1);
    }

    #[test]
    fn empty_catalog_has_zero_completion() {
        let stats = CatalogStats::for_catalog(&Catalog::default());
        assert_eq!(stats.total, 0);
        assert_eq!(stats.completion_percentage, 0.0);
        assert!(stats.tiers.iter().all(|t| t.total == 0));
    }

    #[test]
    fn buckets_group_quests_by_tier() {
        let category = category();
        let buckets = tier_buckets(&category);
        assert_eq!(buckets.len(), 5);
        assert_eq!(buckets[0].label, "Novice");
        assert_eq!(buckets[0].quests.len(), 2);
        assert_eq!(buckets[2].label, "Journeyman");
        assert_eq!(buckets[2].counts.locked, 1);
        assert_eq!(buckets[4].label, "Master");
        assert_eq!(buckets[4].quests[0].id, "d");
    }
}
