//! Classification of raw records: tier clamping, difficulty and quest type.

use crate::catalog::raw::{ConditionEntry, FETCH, INTERACTION};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

pub const MIN_TIER: u8 = 1;
pub const MAX_TIER: u8 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    Extreme,
}

impl Difficulty {
    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
            Difficulty::Extreme => "Extreme",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Clamp a raw tier into `MIN_TIER..=MAX_TIER`. Out-of-range values are never rejected.
pub fn clamp_tier(raw: i64) -> u8 {
    raw.clamp(MIN_TIER as i64, MAX_TIER as i64) as u8
}

/// Map a tier to its difficulty band. Values outside 1..=5 fall back to `Medium`;
/// callers clamp first (see [`clamp_tier`]) so the fallback is not reached from a build.
pub fn difficulty_from_tier(tier: i64) -> Difficulty {
    match tier {
        1 => Difficulty::Easy,
        2 => Difficulty::Medium,
        3 => Difficulty::Hard,
        4 | 5 => Difficulty::Extreme,
        _ => Difficulty::Medium,
    }
}

/// Aggregate quest type derived from the set of condition types.
///
/// A single unrecognized condition type is carried through verbatim as `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum QuestKind {
    Fetch,
    Interaction,
    Mixed,
    Other(String),
}

impl QuestKind {
    pub fn as_str(&self) -> &str {
        match self {
            QuestKind::Fetch => FETCH,
            QuestKind::Interaction => INTERACTION,
            QuestKind::Mixed => "Mixed",
            QuestKind::Other(name) => name,
        }
    }
}

impl From<&str> for QuestKind {
    fn from(name: &str) -> Self {
        match name {
            FETCH => QuestKind::Fetch,
            INTERACTION => QuestKind::Interaction,
            "Mixed" => QuestKind::Mixed,
            other => QuestKind::Other(other.to_string()),
        }
    }
}

impl From<String> for QuestKind {
    fn from(name: String) -> Self {
        QuestKind::from(name.as_str())
    }
}

impl From<QuestKind> for String {
    fn from(kind: QuestKind) -> Self {
        kind.as_str().to_string()
    }
}

impl fmt::Display for QuestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `Mixed` when the conditions carry two or more distinct types, the sole type otherwise.
/// A record without conditions is also `Mixed`.
pub fn aggregate_quest_type(conditions: &[ConditionEntry]) -> QuestKind {
    let distinct: BTreeSet<&str> = conditions
        .iter()
        .map(|c| c.condition_type.as_str())
        .collect();
    let mut iter = distinct.iter();
    match (iter.next(), iter.next()) {
        (Some(only), None) => QuestKind::from(*only),
        _ => QuestKind::Mixed,
    }
}
