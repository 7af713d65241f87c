//! # Storage Module - Persisted Catalog
//!
//! Writes the finished catalog to its well-known location and reads it back
//! for consumers.
//!
//! ## Write path
//!
//! ```text
//! catalog ──serialize──▶ .<name>.tmp-<pid>-<n> ──rename──▶ <name>
//!                     (under an exclusive lock on .<name>.lock)
//! ```
//!
//! Readers never see a half-written artifact: content goes to a temp file in
//! the same directory which then atomically replaces the destination. The
//! SHA-256 digest of the written bytes is returned so repeated builds over the
//! same input can be compared.

use crate::catalog::errors::Result;
use crate::catalog::model::Catalog;
use fs2::FileExt;
use log::debug;
use sha2::{Digest, Sha256};
use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

/// Where and what was written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactInfo {
    pub path: PathBuf,
    pub bytes: usize,
    pub sha256: String,
}

/// Serialize and persist `catalog` at `path`, creating parent directories.
pub fn write_catalog(path: &Path, catalog: &Catalog, pretty: bool) -> Result<ArtifactInfo> {
    let content = catalog.to_json(pretty)?;
    write_file_locked(path, content.as_bytes())?;
    let info = ArtifactInfo {
        path: path.to_path_buf(),
        bytes: content.len(),
        sha256: sha256_hex(content.as_bytes()),
    };
    debug!("Wrote {} bytes to {}", info.bytes, path.display());
    Ok(info)
}

/// Load a previously persisted catalog.
pub fn read_catalog(path: &Path) -> Result<Catalog> {
    let content = fs::read_to_string(path)?;
    Catalog::from_json(&content)
}

pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}

/// Sidecar file that serializes writers of `path`. It outlives each write:
/// the destination itself is replaced by rename, so it cannot carry the lock.
pub fn lock_path_for(path: &Path) -> PathBuf {
    let base = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "catalog.json".to_string());
    path.with_file_name(format!(".{}.lock", base))
}

/// Replace `path` with `content` atomically. Concurrent writers queue on the
/// sidecar lock so the last rename always carries a complete document.
fn write_file_locked(path: &Path, content: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir)?;

    let lock = OpenOptions::new()
        .create(true)
        .truncate(false)
        .write(true)
        .open(lock_path_for(path))?;
    lock.lock_exclusive()?;

    let (tmp_path, mut tmp) = create_sibling_temp(dir, path)?;
    let written = tmp
        .write_all(content)
        .and_then(|_| tmp.sync_all())
        .and_then(|_| fs::rename(&tmp_path, path));
    if let Err(e) = written {
        let _ = fs::remove_file(&tmp_path);
        return Err(e.into());
    }
    // Persist the rename (best-effort)
    if let Ok(dir_file) = File::open(dir) {
        let _ = dir_file.sync_all();
    }
    lock.unlock()?;
    Ok(())
}

fn create_sibling_temp(dir: &Path, path: &Path) -> std::io::Result<(PathBuf, File)> {
    let base = path
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("catalog.json");
    for attempt in 0..u32::MAX {
        let candidate = dir.join(format!(".{}.tmp-{}-{}", base, std::process::id(), attempt));
        match OpenOptions::new().write(true).create_new(true).open(&candidate) {
            Ok(file) => return Ok((candidate, file)),
            Err(e) if e.kind() == ErrorKind::AlreadyExists => continue,
            Err(e) => return Err(e),
        }
    }
    Err(std::io::Error::new(ErrorKind::AlreadyExists, "no free temp file name"))
}
