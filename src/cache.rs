use crate::error::Result;
use crate::registry::VersionDateMap;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CACHE_FILE: &str = "cache.json";

/// Package name → cached registry answer.
pub type VersionCache = IndexMap<String, VersionCacheEntry>;

/// One package's cached version dates. `query_date` records the cutoff used
/// for the fetch that produced `versions`, never wall-clock time, so a run
/// asking for an earlier horizon can still be served from cache.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionCacheEntry {
    #[serde(rename = "queryDate")]
    pub query_date: String,
    pub versions: VersionDateMap,
}

/// Persistent version-date cache backed by a single JSON file. Concurrent
/// writers are not coordinated; the last save wins.
pub struct VersionDateCache {
    path: PathBuf,
}

impl VersionDateCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            path: dir.into().join(CACHE_FILE),
        }
    }

    pub fn default_dir() -> PathBuf {
        std::env::temp_dir().join("backdater")
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// A missing cache file is an empty cache, not an error.
    pub fn load(&self) -> Result<VersionCache> {
        if !self.path.exists() {
            return Ok(VersionCache::new());
        }

        let content = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn save(&self, cache: &VersionCache) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)?;
        }

        fs::write(&self.path, serde_json::to_string_pretty(cache)?)?;
        Ok(())
    }
}
