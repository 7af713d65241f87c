//! Quest catalog pipeline: raw quest records in, category/type/quest tree out.
//! Classification and extraction are pure functions; the builder is the only
//! part that touches the filesystem, and the finished [`Catalog`] is read-only.

pub mod builder;
pub mod cache;
pub mod category;
pub mod classify;
pub mod errors;
pub mod extract;
pub mod model;
pub mod normalize;
pub mod raw;
pub mod stats;

pub use builder::{list_subdirectories, load_quest_file, BuildReport, CatalogBuilder, SkippedFile};
pub use cache::CatalogCache;
pub use category::{
    category_from_directory_name, production_table, slugify, CategoryGroup, CategoryInfo,
    CategoryResolver, KeywordResolver, TableResolver,
};
pub use classify::{aggregate_quest_type, clamp_tier, difficulty_from_tier, Difficulty, QuestKind};
pub use errors::{CatalogError, Result};
pub use extract::{extract_requirements, extract_rewards, title_case};
pub use model::{Catalog, Category, QuestType};
pub use normalize::{normalize, strip_extension, Quest, QuestStatus};
pub use raw::{ConditionEntry, ConditionKind, RawQuestRecord, RewardGrant, RewardPoolEntry};
pub use stats::{tier_buckets, tier_label, CatalogStats, StatusCounts, TierBucket, TierProgress};
