//! Raw record + file name → normalized [`Quest`].

use crate::catalog::classify::{aggregate_quest_type, clamp_tier, difficulty_from_tier, Difficulty, QuestKind};
use crate::catalog::extract::{extract_requirements, extract_rewards};
use crate::catalog::raw::RawQuestRecord;
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};
use std::path::Path;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuestStatus {
    Locked,
    #[default]
    Available,
    InProgress,
    Completed,
}

impl QuestStatus {
    pub const ALL: [QuestStatus; 4] = [
        QuestStatus::Locked,
        QuestStatus::Available,
        QuestStatus::InProgress,
        QuestStatus::Completed,
    ];
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quest {
    pub id: String,
    pub name: String,
    pub description: String,
    pub status: QuestStatus,
    pub tier: u8,
    pub npc: String,
    pub time_limit_hours: Number,
    pub requirements: Vec<String>,
    pub rewards: Vec<String>,
    pub difficulty: Difficulty,
    pub quest_type: QuestKind,
    /// The quest file's document, unchanged.
    pub raw_data: Value,
}

/// File name without its final extension; `"AR-1-Test.json"` → `"AR-1-Test"`.
pub fn strip_extension(filename: &str) -> &str {
    Path::new(filename)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(filename)
}

/// Build a quest from its record. Status always starts as `Available`, and
/// difficulty is classified from the clamped tier so the two never disagree.
pub fn normalize(record: RawQuestRecord, filename: &str) -> Quest {
    let raw_tier = record.tier_value();
    let tier = clamp_tier(raw_tier);
    if i64::from(tier) != raw_tier || record.tier.is_f64() {
        log::debug!(
            "{}: tier {} clamped to {}",
            filename,
            record.tier,
            tier
        );
    }
    Quest {
        id: strip_extension(filename).to_string(),
        name: record.title.clone(),
        description: record.description.clone(),
        status: QuestStatus::Available,
        tier,
        npc: record.associated_npc.clone(),
        time_limit_hours: record.time_limit_hours.clone(),
        requirements: extract_requirements(&record),
        rewards: extract_rewards(&record),
        difficulty: difficulty_from_tier(i64::from(tier)),
        quest_type: aggregate_quest_type(&record.conditions),
        raw_data: record.source,
    }
}
