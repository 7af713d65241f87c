//! Directory scan → category/type/quest tree.
//!
//! ```text
//! quests/                      ← root (must exist)
//! ├── Armory Fetch/            ← one QuestType, grouped into a Category by the resolver
//! │   ├── AR-1-Test.json       ← one Quest
//! │   └── ...
//! └── Harbor Interaction/
//! ```
//!
//! A missing root is fatal. A missing category directory or an unreadable
//! quest file is logged, recorded in the [`BuildReport`] and skipped.

use crate::catalog::category::{CategoryGroup, CategoryResolver, TableResolver};
use crate::catalog::errors::{CatalogError, Result};
use crate::catalog::model::{Catalog, Category, QuestType};
use crate::catalog::normalize::{normalize, Quest};
use crate::catalog::raw::RawQuestRecord;
use crate::logutil::escape_log;
use log::{debug, info, warn};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_EXTENSION: &str = "json";

/// A quest file that was left out of the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedFile {
    pub directory: String,
    pub file: String,
    pub reason: String,
}

/// What happened during a build, beyond the catalog itself.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildReport {
    pub quests_processed: usize,
    pub categories_produced: usize,
    pub directories_scanned: usize,
    pub missing_directories: Vec<String>,
    /// Directories that exist but could not be listed.
    pub unreadable_directories: Vec<String>,
    pub skipped_files: Vec<SkippedFile>,
}

impl fmt::Display for BuildReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Processed {} quests into {} categories",
            self.quests_processed, self.categories_produced
        )?;
        if !self.skipped_files.is_empty()
            || !self.missing_directories.is_empty()
            || !self.unreadable_directories.is_empty()
        {
            write!(
                f,
                " ({} files skipped, {} directories missing",
                self.skipped_files.len(),
                self.missing_directories.len()
            )?;
            if !self.unreadable_directories.is_empty() {
                write!(f, ", {} directories unreadable", self.unreadable_directories.len())?;
            }
            f.write_str(")")?;
        }
        Ok(())
    }
}

pub struct CatalogBuilder {
    root: PathBuf,
    extension: String,
    resolver: Box<dyn CategoryResolver>,
}

impl CatalogBuilder {
    /// Builder over `root` using the production category table.
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            extension: DEFAULT_EXTENSION.to_string(),
            resolver: Box::new(TableResolver::production()),
        }
    }

    pub fn with_resolver(mut self, resolver: Box<dyn CategoryResolver>) -> Self {
        self.resolver = resolver;
        self
    }

    pub fn with_extension(mut self, extension: &str) -> Self {
        self.extension = extension.trim_start_matches('.').to_string();
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Scan the root and assemble the catalog. Only a missing root (or an
    /// unreadable root listing) is returned as an error.
    pub fn build(&self) -> Result<(Catalog, BuildReport)> {
        if !self.root.is_dir() {
            return Err(CatalogError::MissingRoot(self.root.clone()));
        }

        info!("Scanning quest directories in {}", self.root.display());
        let discovered = list_subdirectories(&self.root)?;
        info!("Found {} quest directories", discovered.len());

        let mut report = BuildReport::default();
        let mut categories = Vec::new();
        for group in self.resolver.plan(&discovered) {
            if let Some(category) = self.build_category(&group, &mut report) {
                categories.push(category);
            } else {
                debug!("Category '{}' produced no quests, dropped", group.id);
            }
        }

        report.categories_produced = categories.len();
        report.quests_processed = categories.iter().map(Category::quest_count).sum();
        Ok((Catalog::new(categories), report))
    }

    fn build_category(&self, group: &CategoryGroup, report: &mut BuildReport) -> Option<Category> {
        let mut types = Vec::new();
        for directory in &group.directories {
            let path = self.root.join(directory);
            if !path.is_dir() {
                warn!("Quest directory not found, skipping: {}", escape_log(directory));
                report.missing_directories.push(directory.clone());
                continue;
            }
            report.directories_scanned += 1;
            let quest_type = self.build_quest_type(directory, &path, report);
            if quest_type.is_empty() {
                debug!("Directory '{}' produced no quests, dropped", directory);
            } else {
                info!(
                    "  Successfully processed {} quests",
                    quest_type.quests.len()
                );
                types.push(quest_type);
            }
        }
        if types.is_empty() {
            None
        } else {
            Some(Category::new(group.info(), types))
        }
    }

    fn build_quest_type(&self, directory: &str, path: &Path, report: &mut BuildReport) -> QuestType {
        info!("Processing directory: {}", escape_log(directory));
        let listing = self.list_quest_files(path);
        self.collect_quests(directory, path, listing, report)
    }

    fn collect_quests(
        &self,
        directory: &str,
        path: &Path,
        listing: Result<Vec<String>>,
        report: &mut BuildReport,
    ) -> QuestType {
        let mut quest_type = QuestType::for_directory(directory);
        let files = match listing {
            Ok(files) => files,
            Err(e) => {
                warn!("  Failed to list {}: {}", escape_log(directory), e);
                report.unreadable_directories.push(directory.to_string());
                return quest_type;
            }
        };
        info!("  Found {} quest files", files.len());

        for file in files {
            match load_quest_file(&path.join(&file)) {
                Ok(quest) => quest_type.quests.push(quest),
                Err(e) => {
                    let reason = match e {
                        CatalogError::QuestFile { message, .. } => message,
                        other => other.to_string(),
                    };
                    warn!("  Error processing {}: {}", escape_log(&file), escape_log(&reason));
                    report.skipped_files.push(SkippedFile {
                        directory: directory.to_string(),
                        file,
                        reason,
                    });
                }
            }
        }
        quest_type
    }

    /// Regular files with the configured extension, sorted by name.
    fn list_quest_files(&self, dir: &Path) -> Result<Vec<String>> {
        let mut files = Vec::new();
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            let path = entry.path();
            let matches = path
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| e == self.extension);
            if !matches {
                continue;
            }
            if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                files.push(name.to_string());
            } else {
                warn!("  Skipping file with non UTF-8 name: {}", path.display());
            }
        }
        files.sort();
        Ok(files)
    }
}

/// Sub-directory names of `root`, sorted so repeated scans see the same order.
pub fn list_subdirectories(root: &Path) -> Result<Vec<String>> {
    let mut dirs = Vec::new();
    for entry in fs::read_dir(root)? {
        let entry = entry?;
        if !entry.file_type()?.is_dir() {
            continue;
        }
        match entry.file_name().into_string() {
            Ok(name) => dirs.push(name),
            Err(name) => warn!("Skipping directory with non UTF-8 name: {:?}", name),
        }
    }
    dirs.sort();
    Ok(dirs)
}

/// Read, parse and normalize a single quest file.
pub fn load_quest_file(path: &Path) -> Result<Quest> {
    let file = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default()
        .to_string();
    let contents = fs::read_to_string(path).map_err(|e| CatalogError::QuestFile {
        file: file.clone(),
        message: e.to_string(),
    })?;
    let record = RawQuestRecord::from_file_contents(&file, &contents)?;
    Ok(normalize(record, &file))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_root_is_fatal() {
        let builder = CatalogBuilder::new("definitely/not/a/quest/dir");
        match builder.build() {
            Err(CatalogError::MissingRoot(path)) => {
                assert_eq!(path, PathBuf::from("definitely/not/a/quest/dir"))
            }
            other => panic!("expected MissingRoot, got {:?}", other.map(|(_, r)| r)),
        }
    }

    #[test]
    fn extension_is_normalized() {
        let builder = CatalogBuilder::new(".").with_extension(".quest");
        assert_eq!(builder.extension, "quest");
    }

    #[test]
    fn report_summary_mentions_skips_only_when_present() {
        let mut report = BuildReport {
            quests_processed: 3,
            categories_produced: 1,
            ..Default::default()
        };
        assert_eq!(report.to_string(), "Processed 3 quests into 1 categories");
        report.skipped_files.push(SkippedFile {
            directory: "Doctor Fetch".into(),
            file: "bad.json".into(),
            reason: "EOF".into(),
        });
        assert_eq!(
            report.to_string(),
            "Processed 3 quests into 1 categories (1 files skipped, 0 directories missing)"
        );
        report.unreadable_directories.push("Bank Fetch".into());
        assert_eq!(
            report.to_string(),
            "Processed 3 quests into 1 categories (1 files skipped, 0 directories missing, 1 directories unreadable)"
        );
    }

    #[test]
    fn unlistable_directory_is_reported_as_unreadable() {
        let builder = CatalogBuilder::new(".");
        let mut report = BuildReport::default();
        let denied = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let quest_type = builder.collect_quests(
            "Bank Fetch",
            Path::new("Bank Fetch"),
            Err(CatalogError::Io(denied)),
            &mut report,
        );
        assert!(quest_type.is_empty());
        assert_eq!(report.unreadable_directories, vec!["Bank Fetch".to_string()]);
        assert!(report.missing_directories.is_empty());
    }
}
