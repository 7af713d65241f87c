//! In-memory cache of a persisted catalog.
//!
//! Owned by whoever constructs it; there is no process-wide instance. The
//! cached catalog is shared as `Arc<Catalog>` and is never modified, only
//! replaced after [`CatalogCache::invalidate`].

use crate::catalog::errors::Result;
use crate::catalog::model::Catalog;
use crate::storage::read_catalog;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

pub struct CatalogCache {
    path: PathBuf,
    slot: Mutex<Option<Arc<Catalog>>>,
}

impl CatalogCache {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            slot: Mutex::new(None),
        }
    }

    /// Cache pre-filled with an already built catalog.
    pub fn with_catalog<P: AsRef<Path>>(path: P, catalog: Catalog) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            slot: Mutex::new(Some(Arc::new(catalog))),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock(&self) -> MutexGuard<'_, Option<Arc<Catalog>>> {
        self.slot.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// The cached catalog, loading it from disk on first use.
    /// A failed load leaves the cache empty so the next call retries.
    pub fn get(&self) -> Result<Arc<Catalog>> {
        let mut slot = self.lock();
        if let Some(catalog) = slot.as_ref() {
            return Ok(Arc::clone(catalog));
        }
        let catalog = Arc::new(read_catalog(&self.path)?);
        log::debug!("Loaded catalog from {}", self.path.display());
        *slot = Some(Arc::clone(&catalog));
        Ok(catalog)
    }

    pub fn is_loaded(&self) -> bool {
        self.lock().is_some()
    }

    /// Drop the cached catalog; the next [`CatalogCache::get`] reads the file again.
    pub fn invalidate(&self) {
        *self.lock() = None;
    }
}
