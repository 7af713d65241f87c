//! # Configuration Management Module
//!
//! Build settings for the catalog generator, read from a TOML file. Every
//! value has a default, so a missing file simply means "use the defaults".
//!
//! ## Configuration File Format
//!
//! ```toml
//! [paths]
//! quests_dir = "quests"
//! output = "src/data/processedQuests.json"
//!
//! [catalog]
//! strategy = "table"      # or "keyword"
//! extension = "json"
//! pretty = true
//!
//! # Optional: replaces the built-in category table
//! [[catalog.categories]]
//! id = "armory"
//! name = "Armory"
//! description = "Weapon and armor related quests"
//! icon = "🏹"
//! directories = ["Armory Fetch"]
//!
//! [logging]
//! level = "info"
//! file = "questcart.log"
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use questcart::config::Config;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load_or_default("questcart.toml").await?;
//!     println!("Scanning {}", config.paths.quests_dir);
//!     Ok(())
//! }
//! ```

use crate::catalog::builder::{CatalogBuilder, DEFAULT_EXTENSION};
use crate::catalog::category::{
    production_table, CategoryGroup, CategoryResolver, KeywordResolver, TableResolver,
};
use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use tokio::fs;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Root directory holding one sub-directory per quest type.
    pub quests_dir: String,
    /// Where the persisted catalog is written.
    pub output: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            quests_dir: "quests".to_string(),
            output: "src/data/processedQuests.json".to_string(),
        }
    }
}

/// How directories are grouped into categories.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Curated table first, keyword rules for directories the table does not name.
    #[default]
    Table,
    /// Keyword rules only.
    Keyword,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    #[serde(default)]
    pub strategy: Strategy,
    #[serde(default = "default_extension")]
    pub extension: String,
    #[serde(default = "default_pretty")]
    pub pretty: bool,
    /// Overrides the built-in category table when set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<CategoryGroup>>,
}

fn default_extension() -> String {
    DEFAULT_EXTENSION.to_string()
}

fn default_pretty() -> bool {
    true
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            strategy: Strategy::Table,
            extension: default_extension(),
            pretty: true,
            categories: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub async fn load(path: &str) -> Result<Self> {
        let content = fs::read_to_string(path)
            .await
            .map_err(|e| anyhow!("Failed to read config file {}: {}", path, e))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| anyhow!("Failed to parse config file {}: {}", path, e))?;

        config.validate()?;
        Ok(config)
    }

    /// Load `path` if it exists, otherwise fall back to the defaults.
    pub async fn load_or_default(path: &str) -> Result<Self> {
        if fs::try_exists(path).await.unwrap_or(false) {
            Self::load(path).await
        } else {
            Ok(Self::default())
        }
    }

    /// Create a default configuration file
    pub async fn create_default(path: &str) -> Result<()> {
        let mut config = Config::default();
        config.catalog.categories = Some(production_table());
        let content = toml::to_string_pretty(&config)
            .map_err(|e| anyhow!("Failed to serialize default config: {}", e))?;

        fs::write(path, content)
            .await
            .map_err(|e| anyhow!("Failed to write config file {}: {}", path, e))?;

        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.paths.quests_dir.trim().is_empty() {
            return Err(anyhow!("paths.quests_dir must not be empty"));
        }
        if self.paths.output.trim().is_empty() {
            return Err(anyhow!("paths.output must not be empty"));
        }
        if self.catalog.extension.trim_start_matches('.').is_empty() {
            return Err(anyhow!("catalog.extension must not be empty"));
        }
        if let Some(groups) = &self.catalog.categories {
            let mut seen = HashSet::new();
            for group in groups {
                if group.id.trim().is_empty() {
                    return Err(anyhow!("catalog.categories entries need an id"));
                }
                if !seen.insert(group.id.as_str()) {
                    return Err(anyhow!("duplicate category id '{}' in catalog.categories", group.id));
                }
            }
        }
        Ok(())
    }

    pub fn resolver(&self) -> Box<dyn CategoryResolver> {
        match self.catalog.strategy {
            Strategy::Keyword => Box::new(KeywordResolver),
            Strategy::Table => match &self.catalog.categories {
                Some(groups) => Box::new(TableResolver::new(groups.clone())),
                None => Box::new(TableResolver::production()),
            },
        }
    }

    pub fn builder(&self) -> CatalogBuilder {
        CatalogBuilder::new(Path::new(&self.paths.quests_dir))
            .with_resolver(self.resolver())
            .with_extension(&self.catalog.extension)
    }
}
