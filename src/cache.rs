//! Erasure caching to avoid re-scanning unchanged specification files
//!
//! Caches erasure results in a cache directory keyed by a hash of the source
//! content and the crate version.

use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{LemmaScanError, Result};
use crate::translator::{erase_with_report, Erasure};

/// Cache manager for erased sources
pub struct ErasureCache {
    cache_dir: PathBuf,
}

impl ErasureCache {
    /// Create a cache rooted at `cache_dir`, creating the directory if needed
    pub fn new(cache_dir: &Path) -> Result<Self> {
        fs::create_dir_all(cache_dir).map_err(|e| LemmaScanError::io(cache_dir, e))?;
        Ok(ErasureCache {
            cache_dir: cache_dir.to_path_buf(),
        })
    }

    /// Cache key for a source text
    pub fn cache_key(source: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(env!("CARGO_PKG_VERSION").as_bytes());
        hasher.update([0u8]);
        hasher.update(source.as_bytes());
        format!("{:x}", hasher.finalize())
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        self.cache_dir.join(format!("{}.json", key))
    }

    /// Load a cached erasure if available
    pub fn load(&self, key: &str) -> Result<Option<Erasure>> {
        let path = self.entry_path(key);
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(LemmaScanError::io(path, e)),
        };
        serde_json::from_str(&content)
            .map(Some)
            .map_err(|source| LemmaScanError::CorruptCache { path, source })
    }

    /// Save an erasure to the cache
    pub fn save(&self, key: &str, erasure: &Erasure) -> Result<()> {
        let path = self.entry_path(key);
        let content = serde_json::to_string(erasure)
            .map_err(|source| LemmaScanError::CorruptCache { path: path.clone(), source })?;
        fs::write(&path, content).map_err(|e| LemmaScanError::io(path, e))
    }

    /// Erase `source`, reusing a cached result when the content was seen before.
    ///
    /// A corrupt entry is recomputed and overwritten.
    pub fn erase(&self, source: &str) -> Result<Erasure> {
        let key = Self::cache_key(source);
        match self.load(&key) {
            Ok(Some(erasure)) => {
                log::debug!("erasure cache hit {}", key);
                return Ok(erasure);
            }
            Ok(None) => log::debug!("erasure cache miss {}", key),
            Err(LemmaScanError::CorruptCache { path, .. }) => {
                log::warn!("discarding corrupt cache entry {}", path.display());
            }
            Err(e) => return Err(e),
        }

        let erasure = erase_with_report(source);
        self.save(&key, &erasure)?;
        Ok(erasure)
    }
}
