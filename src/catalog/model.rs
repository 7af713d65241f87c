//! Category → quest type → quest tree and its read-only query surface.

use crate::catalog::category::{slugify, CategoryInfo};
use crate::catalog::errors::{CatalogError, Result};
use crate::catalog::normalize::Quest;
use serde::{Deserialize, Serialize};

/// Quests loaded from one source directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestType {
    pub id: String,
    pub name: String,
    pub description: String,
    pub quests: Vec<Quest>,
}

impl QuestType {
    /// Empty quest type named after its source directory.
    pub fn for_directory(directory: &str) -> Self {
        Self {
            id: slugify(directory),
            name: directory.to_string(),
            description: format!("Quests from {}", directory),
            quests: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.quests.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub description: String,
    pub icon: String,
    pub types: Vec<QuestType>,
}

impl Category {
    pub fn new(info: CategoryInfo, types: Vec<QuestType>) -> Self {
        Self {
            id: info.id,
            name: info.name,
            description: info.description,
            icon: info.icon,
            types,
        }
    }

    pub fn quest_type(&self, type_id: &str) -> Option<&QuestType> {
        self.types.iter().find(|t| t.id == type_id)
    }

    pub fn quests(&self) -> impl Iterator<Item = &Quest> {
        self.types.iter().flat_map(|t| t.quests.iter())
    }

    pub fn quest_count(&self) -> usize {
        self.types.iter().map(|t| t.quests.len()).sum()
    }
}

/// The finished, immutable catalog. Serializes as a bare array of categories.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    categories: Vec<Category>,
}

impl Catalog {
    pub fn new(categories: Vec<Category>) -> Self {
        Self { categories }
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn category(&self, category_id: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == category_id)
    }

    pub fn types_of(&self, category_id: &str) -> Result<&[QuestType]> {
        self.category(category_id)
            .map(|c| c.types.as_slice())
            .ok_or_else(|| CatalogError::UnknownCategory(category_id.to_string()))
    }

    pub fn quests_of(&self, category_id: &str, type_id: &str) -> Result<&[Quest]> {
        let category = self
            .category(category_id)
            .ok_or_else(|| CatalogError::UnknownCategory(category_id.to_string()))?;
        category
            .quest_type(type_id)
            .map(|t| t.quests.as_slice())
            .ok_or_else(|| CatalogError::UnknownQuestType {
                category_id: category_id.to_string(),
                type_id: type_id.to_string(),
            })
    }

    /// Every quest in catalog order.
    pub fn quests(&self) -> impl Iterator<Item = &Quest> {
        self.categories.iter().flat_map(|c| c.quests())
    }

    pub fn quest(&self, quest_id: &str) -> Option<&Quest> {
        self.quests().find(|q| q.id == quest_id)
    }

    pub fn quest_count(&self) -> usize {
        self.categories.iter().map(Category::quest_count).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn to_json(&self, pretty: bool) -> Result<String> {
        let json = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(json)
    }

    pub fn from_json(contents: &str) -> Result<Self> {
        Ok(serde_json::from_str(contents)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::normalize::normalize;
    use crate::catalog::raw::RawQuestRecord;

    fn quest(id: &str, tier: i64) -> Quest {
        let record = RawQuestRecord::from_json(&format!(
            r#"{{"Tier": {tier}, "Title": "{id}", "RewardPool": [], "Conditions": [{{"Type": "Fetch"}}]}}"#
        ))
        .unwrap();
        normalize(record, &format!("{id}.json"))
    }

    fn sample() -> Catalog {
        let mut fetch = QuestType::for_directory("Harbor Fetch");
        fetch.quests.push(quest("HA-1-Cheese_for_Bait", 1));
        fetch.quests.push(quest("HA-Catch_5_Tuna", 3));
        let mut interaction = QuestType::for_directory("Harbor Interaction");
        interaction.quests.push(quest("HA-Pick_Up_My_Package_From_Airport", 2));
        Catalog::new(vec![Category::new(
            crate::catalog::category::category_from_directory_name("Harbor Fetch"),
            vec![fetch, interaction],
        )])
    }

    #[test]
    fn quest_type_for_directory() {
        let t = QuestType::for_directory("General Goods Interations");
        assert_eq!(t.id, "general-goods-interations");
        assert_eq!(t.name, "General Goods Interations");
        assert_eq!(t.description, "Quests from General Goods Interations");
        assert!(t.is_empty());
    }

    #[test]
    fn lookups_walk_the_tree() {
        let catalog = sample();
        assert_eq!(catalog.categories().len(), 1);
        assert_eq!(catalog.types_of("harbor").unwrap().len(), 2);
        let quests = catalog.quests_of("harbor", "harbor-fetch").unwrap();
        assert_eq!(quests.len(), 2);
        assert_eq!(quests[1].id, "HA-Catch_5_Tuna");
        assert_eq!(catalog.quest_count(), 3);
        assert!(catalog.quest("HA-Pick_Up_My_Package_From_Airport").is_some());
    }

    #[test]
    fn unknown_ids_are_errors() {
        let catalog = sample();
        assert!(matches!(
            catalog.types_of("armory"),
            Err(CatalogError::UnknownCategory(_))
        ));
        assert!(matches!(
            catalog.quests_of("harbor", "harbor-boats"),
            Err(CatalogError::UnknownQuestType { .. })
        ));
    }

    #[test]
    fn serializes_as_array_and_reads_back() {
        let catalog = sample();
        let json = catalog.to_json(true).unwrap();
        assert!(json.starts_with('['));
        let back = Catalog::from_json(&json).unwrap();
        assert_eq!(back, catalog);
    }
}
