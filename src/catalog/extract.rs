//! Human-readable requirement and reward lines for a raw record.

use crate::catalog::raw::{display_number, ConditionKind, RawQuestRecord, RequiredItem, RewardGrant};

/// Turn an item identifier into a display name: underscores become spaces and
/// the first letter of every word is uppercased. Other letters are left alone.
///
/// `"12_gauge_birdshot_ammobox"` becomes `"12 Gauge Birdshot Ammobox"`.
pub fn title_case(identifier: &str) -> String {
    let mut out = String::with_capacity(identifier.len());
    let mut prev_word = false;
    for ch in identifier.chars() {
        let ch = if ch == '_' { ' ' } else { ch };
        let is_word = ch.is_ascii_alphanumeric();
        if is_word && !prev_word {
            out.push(ch.to_ascii_uppercase());
        } else {
            out.push(ch);
        }
        prev_word = is_word;
    }
    out
}

fn required_item_line(item: &RequiredItem) -> Option<String> {
    let first = item.accepted_items.first()?;
    let alternatives = if item.accepted_items.len() > 1 {
        " (or alternatives)"
    } else {
        ""
    };
    Some(format!(
        "{}x {}{}",
        display_number(&item.required_num),
        title_case(first),
        alternatives
    ))
}

/// One line per required item of each fetch condition and one line per
/// interaction condition, in condition order. No dedup.
pub fn extract_requirements(record: &RawQuestRecord) -> Vec<String> {
    let mut requirements = Vec::new();
    for condition in &record.conditions {
        match condition.kind() {
            ConditionKind::Fetch { required_items } => {
                for item in required_items {
                    match required_item_line(item) {
                        Some(line) => requirements.push(line),
                        None => log::debug!(
                            "Quest '{}': required item with no accepted items ignored",
                            record.title
                        ),
                    }
                }
            }
            ConditionKind::Interaction { caption, .. } => requirements.push(caption.to_string()),
            ConditionKind::Other { .. } => {}
        }
    }
    requirements
}

/// Reward lines in pool order; within an entry: currency, fame, trade deals, skills.
pub fn extract_rewards(record: &RawQuestRecord) -> Vec<String> {
    record
        .reward_pool
        .iter()
        .flat_map(|entry| entry.grants())
        .map(|grant| match grant {
            RewardGrant::Currency(amount) => format!("{} Credits", display_number(amount)),
            RewardGrant::Fame(amount) => format!("{} Fame", display_number(amount)),
            RewardGrant::TradeDeal(deal) => format!(
                "{}x {} ({} Credits each)",
                display_number(&deal.amount),
                title_case(&deal.item),
                display_number(&deal.price)
            ),
            RewardGrant::Skill(skill) => {
                format!("{} {} XP", display_number(&skill.experience), skill.skill)
            }
        })
        .collect()
}
