//! Directory → category classification.
//!
//! Two strategies sit behind [`CategoryResolver`]:
//!
//! - [`TableResolver`] - an explicit, curated table of category groups. Directories
//!   it does not name fall back to keyword matching.
//! - [`KeywordResolver`] - pure keyword matching on directory names.
//!
//! Both produce a plan (`Vec<CategoryGroup>`) that the builder walks without
//! knowing which strategy made it.

use serde::{Deserialize, Serialize};

/// Display metadata of a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryInfo {
    pub id: String,
    pub name: String,
    pub description: String,
    pub icon: String,
}

/// A category together with the source directories that feed it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryGroup {
    pub id: String,
    pub name: String,
    pub description: String,
    pub icon: String,
    #[serde(default)]
    pub directories: Vec<String>,
}

impl CategoryGroup {
    pub fn new(info: CategoryInfo, directories: Vec<String>) -> Self {
        Self {
            id: info.id,
            name: info.name,
            description: info.description,
            icon: info.icon,
            directories,
        }
    }

    pub fn info(&self) -> CategoryInfo {
        CategoryInfo {
            id: self.id.clone(),
            name: self.name.clone(),
            description: self.description.clone(),
            icon: self.icon.clone(),
        }
    }

    pub fn contains(&self, directory: &str) -> bool {
        self.directories.iter().any(|d| d == directory)
    }
}

struct KeywordRule {
    keywords: &'static [&'static str],
    id: &'static str,
    name: &'static str,
    description: &'static str,
    icon: &'static str,
}

impl KeywordRule {
    fn info(&self) -> CategoryInfo {
        CategoryInfo {
            id: self.id.to_string(),
            name: self.name.to_string(),
            description: self.description.to_string(),
            icon: self.icon.to_string(),
        }
    }
}

// Checked in order; first match wins.
const KEYWORD_RULES: &[KeywordRule] = &[
    KeywordRule {
        keywords: &["armory", "armor"],
        id: "armory",
        name: "Armory",
        description: "Weapon and armor related quests",
        icon: "🏹",
    },
    KeywordRule {
        keywords: &["bank"],
        id: "banking",
        name: "Banking",
        description: "Financial and trading quests",
        icon: "💰",
    },
    KeywordRule {
        keywords: &["bartender", "bar"],
        id: "hospitality",
        name: "Hospitality",
        description: "Food, drinks, and entertainment quests",
        icon: "🍺",
    },
    KeywordRule {
        keywords: &["doctor", "medical"],
        id: "medical",
        name: "Medical",
        description: "Health and medical supply quests",
        icon: "⚕️",
    },
    KeywordRule {
        keywords: &["general", "goods"],
        id: "general",
        name: "General Goods",
        description: "General trading and crafting quests",
        icon: "📦",
    },
    KeywordRule {
        keywords: &["harbor", "fishing"],
        id: "harbor",
        name: "Harbor",
        description: "Maritime and fishing related quests",
        icon: "⚓",
    },
    KeywordRule {
        keywords: &["mechanic", "vehicle", "car"],
        id: "mechanic",
        name: "Mechanic",
        description: "Vehicle maintenance and repair quests",
        icon: "🔧",
    },
];

const FALLBACK_ICON: &str = "❓";

/// Lowercase a name and turn each whitespace run into a single hyphen.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut in_space = false;
    for ch in name.chars() {
        if ch.is_whitespace() {
            if !in_space {
                slug.push('-');
            }
            in_space = true;
        } else {
            slug.extend(ch.to_lowercase());
            in_space = false;
        }
    }
    slug
}

/// Case-insensitive keyword classification of a directory name.
pub fn category_from_directory_name(name: &str) -> CategoryInfo {
    let lower = name.to_lowercase();
    KEYWORD_RULES
        .iter()
        .find(|rule| rule.keywords.iter().any(|k| lower.contains(k)))
        .map(KeywordRule::info)
        .unwrap_or_else(|| CategoryInfo {
            id: slugify(name),
            name: name.to_string(),
            description: format!("Quests from {}", name),
            icon: FALLBACK_ICON.to_string(),
        })
}

/// Turns discovered directory names into an ordered list of category groups.
pub trait CategoryResolver: Send + Sync {
    /// Category a single directory belongs to.
    fn resolve(&self, directory: &str) -> CategoryInfo;

    /// Ordered category groups to process. `discovered` holds the sub-directories
    /// that actually exist under the quest root, in scan order.
    fn plan(&self, discovered: &[String]) -> Vec<CategoryGroup>;
}

/// Append `directory` to the group with the same id, or start a new group.
fn merge_into(groups: &mut Vec<CategoryGroup>, info: CategoryInfo, directory: &str) {
    match groups.iter_mut().find(|g| g.id == info.id) {
        Some(group) => {
            if !group.contains(directory) {
                group.directories.push(directory.to_string());
            }
        }
        None => groups.push(CategoryGroup::new(info, vec![directory.to_string()])),
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordResolver;

impl CategoryResolver for KeywordResolver {
    fn resolve(&self, directory: &str) -> CategoryInfo {
        category_from_directory_name(directory)
    }

    fn plan(&self, discovered: &[String]) -> Vec<CategoryGroup> {
        let mut groups = Vec::new();
        for directory in discovered {
            merge_into(&mut groups, self.resolve(directory), directory);
        }
        groups
    }
}

#[derive(Debug, Clone)]
pub struct TableResolver {
    groups: Vec<CategoryGroup>,
}

impl TableResolver {
    pub fn new(groups: Vec<CategoryGroup>) -> Self {
        Self { groups }
    }

    /// The curated production table.
    pub fn production() -> Self {
        Self::new(production_table())
    }

    pub fn groups(&self) -> &[CategoryGroup] {
        &self.groups
    }
}

impl Default for TableResolver {
    fn default() -> Self {
        Self::production()
    }
}

impl CategoryResolver for TableResolver {
    fn resolve(&self, directory: &str) -> CategoryInfo {
        self.groups
            .iter()
            .find(|g| g.contains(directory))
            .map(CategoryGroup::info)
            .unwrap_or_else(|| category_from_directory_name(directory))
    }

    fn plan(&self, discovered: &[String]) -> Vec<CategoryGroup> {
        let mut groups = self.groups.clone();
        for directory in discovered {
            if self.groups.iter().any(|g| g.contains(directory)) {
                continue;
            }
            log::debug!("Directory '{}' is not in the category table, classifying by keyword", directory);
            merge_into(&mut groups, category_from_directory_name(directory), directory);
        }
        groups
    }
}

fn keyword_group(id: &str, directories: &[&str]) -> CategoryGroup {
    let info = KEYWORD_RULES
        .iter()
        .find(|rule| rule.id == id)
        .map(KeywordRule::info)
        .unwrap_or_else(|| category_from_directory_name(id));
    CategoryGroup::new(info, directories.iter().map(|d| d.to_string()).collect())
}

/// Explicit directory table used by production builds.
pub fn production_table() -> Vec<CategoryGroup> {
    vec![
        keyword_group("armory", &["Armory Fetch"]),
        keyword_group("banking", &["Banker Fetch"]),
        keyword_group("hospitality", &["Bartender Fetch"]),
        keyword_group("medical", &["Doctor Fetch"]),
        keyword_group("general", &["General Goods Fetch", "General Goods Interations"]),
        keyword_group("harbor", &["Harbor Fetch", "Harbor Interaction"]),
        keyword_group(
            "mechanic",
            &["Mechanic Car Quests", "Mechanic Fetch", "Mechanic Interaction"],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dirs(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn slugify_lowercases_and_hyphenates() {
        assert_eq!(slugify("Armory Fetch"), "armory-fetch");
        assert_eq!(slugify("General  Goods\tFetch"), "general-goods-fetch");
        assert_eq!(slugify("Odd"), "odd");
    }

    #[test]
    fn keyword_rules_match_case_insensitively() {
        assert_eq!(category_from_directory_name("ARMORY Fetch").id, "armory");
        assert_eq!(category_from_directory_name("Banker Fetch").id, "banking");
        assert_eq!(category_from_directory_name("Bartender Fetch").id, "hospitality");
        assert_eq!(category_from_directory_name("Doctor Fetch").id, "medical");
        assert_eq!(category_from_directory_name("General Goods Interations").id, "general");
        assert_eq!(category_from_directory_name("Fishing Trips").id, "harbor");
        assert_eq!(category_from_directory_name("Vehicle Repairs").id, "mechanic");
    }

    #[test]
    fn rule_order_decides_overlapping_keywords() {
        // "barbershop" contains "bar" before reaching later rules; "armor" wins over "car".
        assert_eq!(category_from_directory_name("Barbershop").id, "hospitality");
        assert_eq!(category_from_directory_name("Armored Car").id, "armory");
    }

    #[test]
    fn unmatched_directory_gets_fallback_category() {
        let info = category_from_directory_name("Night Watch");
        assert_eq!(info.id, "night-watch");
        assert_eq!(info.name, "Night Watch");
        assert_eq!(info.description, "Quests from Night Watch");
        assert_eq!(info.icon, FALLBACK_ICON);
    }

    #[test]
    fn keyword_plan_merges_directories_by_category() {
        let plan = KeywordResolver.plan(&dirs(&["Harbor Fetch", "Doctor Fetch", "Harbor Interaction"]));
        assert_eq!(plan.len(), 2);
        assert_eq!(plan[0].id, "harbor");
        assert_eq!(plan[0].directories, dirs(&["Harbor Fetch", "Harbor Interaction"]));
        assert_eq!(plan[1].id, "medical");
    }

    #[test]
    fn table_plan_keeps_declared_order_and_adds_unmapped() {
        let resolver = TableResolver::production();
        let plan = resolver.plan(&dirs(&["Armory Surplus", "Night Watch", "Doctor Fetch"]));
        let ids: Vec<&str> = plan.iter().map(|g| g.id.as_str()).collect();
        assert_eq!(
            ids,
            vec!["armory", "banking", "hospitality", "medical", "general", "harbor", "mechanic", "night-watch"]
        );
        assert_eq!(plan[0].directories, dirs(&["Armory Fetch", "Armory Surplus"]));
        assert_eq!(plan[3].directories, dirs(&["Doctor Fetch"]));
    }

    #[test]
    fn table_resolve_prefers_table_entry() {
        let resolver = TableResolver::new(vec![CategoryGroup::new(
            CategoryInfo {
                id: "special".into(),
                name: "Special".into(),
                description: "Hand picked".into(),
                icon: "*".into(),
            },
            dirs(&["Armory Specials"]),
        )]);
        assert_eq!(resolver.resolve("Armory Specials").id, "special");
        assert_eq!(resolver.resolve("Armory Fetch").id, "armory");
    }
}
