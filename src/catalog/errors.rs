use std::path::PathBuf;
use thiserror::Error;

/// Errors that can arise while building or reading the quest catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Wrapper around IO errors (directory listing, artifact writes, etc.).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Wrapper around serde_json serialization and deserialization errors.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// The root quest directory does not exist. Fatal for a build run.
    #[error("quests directory not found: {}", .0.display())]
    MissingRoot(PathBuf),

    /// A single quest file could not be read or parsed.
    #[error("failed to load quest file {file}: {message}")]
    QuestFile { file: String, message: String },

    /// Lookup of a category id that is not part of the catalog.
    #[error("unknown category: {0}")]
    UnknownCategory(String),

    /// Lookup of a quest type id that is not part of the category.
    #[error("unknown quest type {type_id} in category {category_id}")]
    UnknownQuestType {
        category_id: String,
        type_id: String,
    },
}

pub type Result<T> = std::result::Result<T, CatalogError>;
