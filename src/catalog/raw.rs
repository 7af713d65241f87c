//! Raw quest records as they appear in the per-quest JSON files.
//!
//! A file is parsed once into a JSON value, which is kept untouched as the
//! quest's `rawData`. The serde structs below are read from that value and
//! model only the fields the catalog interprets. Code
//! that interprets a record goes through the typed views [`ConditionKind`]
//! and [`RewardGrant`] instead of probing the optional fields directly.

use crate::catalog::errors::{CatalogError, Result};
use serde::Deserialize;
use serde_json::{Number, Value};

/// One quest definition as read from its file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RawQuestRecord {
    #[serde(default)]
    pub associated_npc: String,
    /// Any JSON number; see [`RawQuestRecord::tier_value`].
    pub tier: Number,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "zero")]
    pub time_limit_hours: Number,
    pub reward_pool: Vec<RewardPoolEntry>,
    pub conditions: Vec<ConditionEntry>,
    /// The parsed document, key order and unmodelled fields included.
    #[serde(skip)]
    pub(crate) source: Value,
}

fn zero() -> Number {
    Number::from(0)
}

impl RawQuestRecord {
    /// Parse a record from JSON text. Missing `Title`, `Tier`, `Conditions`
    /// or `RewardPool` rejects the whole record.
    pub fn from_json(contents: &str) -> Result<Self> {
        Ok(Self::parse(contents)?)
    }

    /// Like [`RawQuestRecord::from_json`], labelling failures with the file they came from.
    pub fn from_file_contents(file: &str, contents: &str) -> Result<Self> {
        Self::parse(contents).map_err(|e| CatalogError::QuestFile {
            file: file.to_string(),
            message: e.to_string(),
        })
    }

    pub fn from_value(source: Value) -> Result<Self> {
        Ok(Self::with_source(source)?)
    }

    fn parse(contents: &str) -> serde_json::Result<Self> {
        Self::with_source(serde_json::from_str(contents)?)
    }

    fn with_source(source: Value) -> serde_json::Result<Self> {
        let mut record = Self::deserialize(&source)?;
        record.source = source;
        Ok(record)
    }

    /// The document this record was parsed from, unchanged.
    pub fn source(&self) -> &Value {
        &self.source
    }

    /// Tier as an integer. Fractions truncate toward zero and values beyond
    /// the `i64` range saturate, so any JSON number yields a clampable tier.
    pub fn tier_value(&self) -> i64 {
        saturating_i64(&self.tier)
    }
}

fn saturating_i64(n: &Number) -> i64 {
    if let Some(i) = n.as_i64() {
        i
    } else if n.as_u64().is_some() {
        i64::MAX
    } else {
        // `as` saturates on overflow
        n.as_f64().map(|f| f as i64).unwrap_or(0)
    }
}

/// One bundle of rewards. Every field is optional and independent.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RewardPoolEntry {
    #[serde(default)]
    pub currency_normal: Option<Number>,
    #[serde(default)]
    pub fame: Option<Number>,
    #[serde(default)]
    pub trade_deals: Option<Vec<TradeDeal>>,
    #[serde(default)]
    pub skills: Option<Vec<SkillReward>>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TradeDeal {
    pub item: String,
    pub price: Number,
    pub amount: Number,
    #[serde(default)]
    pub fame: Option<Number>,
    #[serde(default)]
    pub allow_excluded: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SkillReward {
    pub skill: String,
    pub experience: Number,
}

/// One completion condition of a quest.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ConditionEntry {
    #[serde(rename = "Type")]
    pub condition_type: String,
    #[serde(default)]
    pub tracking_caption: String,
    #[serde(default)]
    pub required_items: Option<Vec<RequiredItem>>,
    /// Only the presence of locations matters here, so their shape is kept opaque.
    #[serde(default)]
    pub locations: Option<Vec<Value>>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RequiredItem {
    pub accepted_items: Vec<String>,
    pub required_num: Number,
}

pub const FETCH: &str = "Fetch";
pub const INTERACTION: &str = "Interaction";

/// Typed view of a condition: what it asks of the player.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConditionKind<'a> {
    /// Deliver items. Carries the item list (empty when the file has none).
    Fetch { required_items: &'a [RequiredItem] },
    /// Reach or use one of the given locations.
    Interaction {
        caption: &'a str,
        locations: &'a [Value],
    },
    /// Anything else, including an interaction without locations.
    Other { condition_type: &'a str },
}

impl ConditionEntry {
    pub fn kind(&self) -> ConditionKind<'_> {
        match self.condition_type.as_str() {
            FETCH => ConditionKind::Fetch {
                required_items: self.required_items.as_deref().unwrap_or(&[]),
            },
            INTERACTION => match self.locations.as_deref() {
                Some(locations) if !locations.is_empty() => ConditionKind::Interaction {
                    caption: &self.tracking_caption,
                    locations,
                },
                _ => ConditionKind::Other {
                    condition_type: &self.condition_type,
                },
            },
            other => ConditionKind::Other {
                condition_type: other,
            },
        }
    }

    pub fn has_required_items(&self) -> bool {
        self.required_items.is_some()
    }

    pub fn has_locations(&self) -> bool {
        self.locations.as_ref().is_some_and(|l| !l.is_empty())
    }
}

/// One reward granted by a pool entry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RewardGrant<'a> {
    Currency(&'a Number),
    Fame(&'a Number),
    TradeDeal(&'a TradeDeal),
    Skill(&'a SkillReward),
}

impl RewardPoolEntry {
    /// Rewards of this entry in display order: currency, fame, trade deals, skills.
    /// Zero currency and zero fame grant nothing.
    pub fn grants(&self) -> Vec<RewardGrant<'_>> {
        let mut grants = Vec::new();
        if let Some(currency) = self.currency_normal.as_ref().filter(|n| is_nonzero(n)) {
            grants.push(RewardGrant::Currency(currency));
        }
        if let Some(fame) = self.fame.as_ref().filter(|n| is_nonzero(n)) {
            grants.push(RewardGrant::Fame(fame));
        }
        if let Some(deals) = &self.trade_deals {
            grants.extend(deals.iter().map(RewardGrant::TradeDeal));
        }
        if let Some(skills) = &self.skills {
            grants.extend(skills.iter().map(RewardGrant::Skill));
        }
        grants
    }
}

fn is_nonzero(n: &Number) -> bool {
    n.as_f64().is_some_and(|v| v != 0.0)
}

/// Render a JSON number without a trailing `.0` for whole values.
pub fn display_number(n: &Number) -> String {
    if let Some(i) = n.as_i64() {
        i.to_string()
    } else if let Some(u) = n.as_u64() {
        u.to_string()
    } else {
        n.as_f64().map(|f| f.to_string()).unwrap_or_else(|| n.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "AssociatedNpc": "Armorer",
        "Tier": 1,
        "Title": "Breakdown Ammoboxes for Gunpower",
        "Description": "Bring me any spare Ammobox",
        "TimeLimitHours": 24.0,
        "RewardPool": [{
            "TradeDeals": [{"Item": "Gun_Powder", "Price": 50, "Amount": 6, "Fame": 5, "AllowExcluded": true}]
        }],
        "Conditions": [{
            "TrackingCaption": "Bring me a Spare Ammobox",
            "SequenceIndex": 0,
            "CanBeAutoCompleted": false,
            "Type": "Fetch",
            "RequiredItems": [{"AcceptedItems": ["12_Gauge_Birdshot_Ammobox"], "RequiredNum": 1}]
        }]
    }"#;

    #[test]
    fn parses_known_fields_and_keeps_the_source() {
        let record = RawQuestRecord::from_json(SAMPLE).unwrap();
        assert_eq!(record.associated_npc, "Armorer");
        assert_eq!(record.tier_value(), 1);
        assert_eq!(record.conditions.len(), 1);
        let condition = &record.conditions[0];
        assert_eq!(condition.condition_type, "Fetch");
        assert_eq!(record.source()["Conditions"][0]["SequenceIndex"], 0);
        assert_eq!(record.source()["Conditions"][0]["CanBeAutoCompleted"], false);
        let expected: Value = serde_json::from_str(SAMPLE).unwrap();
        assert_eq!(record.source(), &expected);
    }

    #[test]
    fn source_is_not_padded_with_defaults() {
        let text = r#"{"Conditions":[{"RequiredItems":[{"AcceptedItems":["Rope"],"Note":"x","RequiredNum":1}],"Type":"Fetch"}],"RewardPool":[],"Tier":1,"Title":"T"}"#;
        let record = RawQuestRecord::from_json(text).unwrap();
        assert_eq!(record.description, "");
        let source = record.source().as_object().unwrap();
        assert!(!source.contains_key("Description"));
        assert!(!source.contains_key("AssociatedNpc"));
        assert!(!source.contains_key("TimeLimitHours"));
        assert_eq!(source["Conditions"][0]["RequiredItems"][0]["Note"], "x");
        assert!(source["Conditions"][0].get("TrackingCaption").is_none());
    }

    #[test]
    fn any_json_number_is_a_tier() {
        let tier = |raw: &str| {
            RawQuestRecord::from_json(&format!(
                r#"{{"Tier": {raw}, "Title": "T", "RewardPool": [], "Conditions": []}}"#
            ))
            .unwrap()
            .tier_value()
        };
        assert_eq!(tier("2.0"), 2);
        assert_eq!(tier("3.7"), 3);
        assert_eq!(tier("-4"), -4);
        assert_eq!(tier("18446744073709551615"), i64::MAX);
        assert_eq!(tier("1e300"), i64::MAX);
        assert_eq!(tier("-1e300"), i64::MIN);
    }

    #[test]
    fn fractional_required_num_is_accepted() {
        let condition: ConditionEntry = serde_json::from_str(
            r#"{"Type": "Fetch", "RequiredItems": [{"AcceptedItems": ["Gun_Powder"], "RequiredNum": 6.0}]}"#,
        )
        .unwrap();
        let items = condition.required_items.unwrap();
        assert_eq!(display_number(&items[0].required_num), "6");
    }

    #[test]
    fn missing_title_rejects_record() {
        let err = RawQuestRecord::from_file_contents(
            "broken.json",
            r#"{"Tier": 1, "RewardPool": [], "Conditions": []}"#,
        )
        .unwrap_err();
        match err {
            CatalogError::QuestFile { file, message } => {
                assert_eq!(file, "broken.json");
                assert!(message.contains("Title"), "unexpected message: {message}");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn interaction_without_locations_is_unclassified() {
        let condition: ConditionEntry = serde_json::from_str(
            r#"{"Type": "Interaction", "TrackingCaption": "Go somewhere", "Locations": []}"#,
        )
        .unwrap();
        assert!(!condition.has_locations());
        assert_eq!(
            condition.kind(),
            ConditionKind::Other {
                condition_type: "Interaction"
            }
        );
    }

    #[test]
    fn grants_follow_field_order_and_skip_zero_amounts() {
        let entry: RewardPoolEntry = serde_json::from_str(
            r#"{"Skills": [{"Skill": "Medical", "Experience": 300}], "Fame": 5, "CurrencyNormal": 0}"#,
        )
        .unwrap();
        let grants = entry.grants();
        assert_eq!(grants.len(), 2);
        assert!(matches!(grants[0], RewardGrant::Fame(_)));
        assert!(matches!(grants[1], RewardGrant::Skill(_)));
    }

    #[test]
    fn display_number_drops_whole_fraction() {
        assert_eq!(display_number(&Number::from(50)), "50");
        assert_eq!(display_number(&Number::from_f64(24.0).unwrap()), "24");
        assert_eq!(display_number(&Number::from_f64(2.5).unwrap()), "2.5");
    }
}
