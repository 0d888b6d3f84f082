//! Catalog persistence: load-or-empty, atomic persist, stable IDs
//!
//! The catalog is one JSON document. Loading never fails the pipeline: a
//! missing or corrupt file is replaced by an empty collection. Persisting
//! writes to a sibling temp file and renames it into place, so a concurrent
//! reader never observes a half-written catalog.

use crate::collection::Collection;
use chrono::Utc;
use sha2::{Digest, Sha256};
use std::io::Write;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur while persisting the catalog
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to write catalog: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize catalog: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Failed to replace catalog file: {0}")]
    Replace(String),
}

/// Result type for catalog persistence
pub type StoreResult<T> = Result<T, StoreError>;

/// Loads a collection from disk, substituting an empty one on any failure
///
/// Failure here is recoverable by design: a fresh install has no catalog
/// yet, and a corrupt catalog should cost its entries, not the run.
pub fn load(path: &Path) -> Collection {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            tracing::debug!(
                "No readable catalog at {} ({}), starting empty",
                path.display(),
                e
            );
            return Collection::new();
        }
    };

    match serde_json::from_str::<Collection>(&content) {
        Ok(mut collection) => {
            collection.rebuild_index();
            tracing::info!(
                "Loaded {} existing entries from {}",
                collection.len(),
                path.display()
            );
            collection
        }
        Err(e) => {
            tracing::warn!(
                "Catalog at {} is corrupt ({}), starting empty",
                path.display(),
                e
            );
            Collection::new()
        }
    }
}

/// Persists the collection, stamping `last_validated` with the current time
///
/// Uses write-then-replace: the JSON is written to a temp file in the target
/// directory, flushed, and atomically renamed over the destination.
pub fn persist(collection: &mut Collection, path: &Path) -> StoreResult<()> {
    collection.last_validated = Utc::now();

    let json = serde_json::to_string_pretty(collection)?;

    let parent = path.parent().filter(|p| !p.as_os_str().is_empty());
    if let Some(dir) = parent {
        std::fs::create_dir_all(dir)?;
    }

    let mut tmp = tempfile::NamedTempFile::new_in(parent.unwrap_or_else(|| Path::new(".")))?;
    tmp.write_all(json.as_bytes())?;
    tmp.flush()?;
    tmp.persist(path)
        .map_err(|e| StoreError::Replace(e.to_string()))?;

    tracing::info!(
        "Saved {} entries to {}",
        collection.len(),
        path.display()
    );
    Ok(())
}

/// Derives the stable entry ID for a URL
///
/// SHA-256 of the URL string, first 8 bytes folded into a u64 and reduced
/// modulo 10^7, rendered as `pdf` plus seven digits. The same URL maps to
/// the same ID across calls, runs, and processes, which is what makes
/// re-validation idempotent.
pub fn stable_id(url: &str) -> String {
    let digest = Sha256::digest(url.as_bytes());
    let mut prefix = [0u8; 8];
    prefix.copy_from_slice(&digest[..8]);
    let value = u64::from_be_bytes(prefix) % 10_000_000;
    format!("pdf{:07}", value)
}
