//! # Questcart - Quest Catalog Generator
//!
//! Questcart turns a folder of raw quest definitions (one JSON file per quest)
//! into a single catalog document that a quest viewer loads at startup. It runs
//! once, offline, as a build step.
//!
//! ## Features
//!
//! - **Hierarchy**: category → quest type → quest, built from the folder layout.
//! - **Classification**: difficulty from tier, aggregate quest type from conditions,
//!   categories from an explicit table with keyword matching as fallback.
//! - **Readable text**: requirement and reward lines derived from the nested
//!   condition and reward structures.
//! - **Tolerant builds**: malformed files and missing folders are logged and skipped;
//!   only a missing quest root aborts the run.
//! - **Atomic output**: the catalog is written under a file lock through a temp file.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use questcart::catalog::CatalogBuilder;
//! use questcart::storage::write_catalog;
//! use std::path::Path;
//!
//! fn main() -> anyhow::Result<()> {
//!     let (catalog, report) = CatalogBuilder::new("quests").build()?;
//!     write_catalog(Path::new("src/data/processedQuests.json"), &catalog, true)?;
//!     println!("{}", report);
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! - [`catalog`] - raw records, classification, extraction, normalization, tree building
//! - [`storage`] - persisted catalog write/read
//! - [`config`] - TOML build configuration
//! - [`logutil`] - log line sanitizing
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │  Directory scan │ ← CatalogBuilder + CategoryResolver
//! └─────────────────┘
//!          │
//! ┌─────────────────┐
//! │   Normalizer    │ ← classify + extract per quest file
//! └─────────────────┘
//!          │
//! ┌─────────────────┐
//! │ Persisted       │ ← storage::write_catalog
//! │ Catalog         │
//! └─────────────────┘
//! ```

pub mod catalog;
pub mod config;
pub mod logutil;
pub mod storage;
