// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! On-disk page cache with an age-based validity window
//!
//! One JSON file per cached target, named by the SHA-256 digest of the
//! target URL. Entries are replaced wholesale on refresh; staleness is
//! judged purely by file age against the validity window, never by content.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};
use tracing::{debug, warn};

/// A single cache record as persisted on disk
#[derive(Debug, Serialize, Deserialize)]
struct CacheRecord {
    /// The cached document body
    content: String,
    /// When the entry was written (informational; staleness uses file mtime)
    timestamp: DateTime<Utc>,
}

/// Content-addressed on-disk store for fetched documents
pub struct PageCache {
    dir: PathBuf,
    validity: Duration,
}

impl PageCache {
    /// Open a cache rooted at `dir`, creating the directory if absent
    ///
    /// # Arguments
    /// * `dir` - Backing directory for entry files
    /// * `validity` - Maximum entry age before a stored record is treated
    ///   as a miss
    pub fn new(dir: impl Into<PathBuf>, validity: Duration) -> std::io::Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir, validity })
    }

    /// Compute the cache key for a fetch target
    ///
    /// The key is the hex-encoded SHA-256 digest of the URL string, so the
    /// same target always maps to the same entry file.
    pub fn key(target: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(target.as_bytes());
        hex::encode(hasher.finalize())
    }

    /// Get cached content for a key
    ///
    /// Returns `None` when no entry exists, the entry is older than the
    /// validity window, or the record is malformed. Malformed entries are a
    /// miss, never an error.
    pub fn get(&self, key: &str) -> Option<String> {
        let path = self.entry_path(key);
        let metadata = fs::metadata(&path).ok()?;
        let modified = metadata.modified().ok()?;
        let age = SystemTime::now()
            .duration_since(modified)
            .unwrap_or_default();

        if age >= self.validity {
            debug!(key, age_secs = age.as_secs(), "cache entry stale");
            return None;
        }

        let raw = fs::read_to_string(&path).ok()?;
        match serde_json::from_str::<CacheRecord>(&raw) {
            Ok(record) => Some(record.content),
            Err(e) => {
                debug!(key, error = %e, "malformed cache entry treated as miss");
                None
            }
        }
    }

    /// Persist content under a key, replacing any prior entry
    ///
    /// The record is written to a temporary file in the cache directory and
    /// atomically renamed over the entry, so a concurrent reader never
    /// observes a partially written record. Write failures are logged and
    /// swallowed — a cold cache is not an error.
    pub fn put(&self, key: &str, content: &str) {
        let record = CacheRecord {
            content: content.to_string(),
            timestamp: Utc::now(),
        };
        if let Err(e) = self.write_atomic(&self.entry_path(key), &record) {
            warn!(key, error = %e, "failed to write cache entry");
        }
    }

    /// Directory backing this cache
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }

    fn write_atomic(
        &self,
        path: &Path,
        record: &CacheRecord,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let mut tmp = tempfile::NamedTempFile::new_in(&self.dir)?;
        serde_json::to_writer(&mut tmp, record)?;
        tmp.flush()?;
        tmp.persist(path)?;
        Ok(())
    }
}
