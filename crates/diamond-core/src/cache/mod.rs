//! Local caching for standings payloads.
//!
//! Layers, from the bytes up:
//! - `Storage` tiers (`CookieJar`, `FileStore`, `MemoryStore`)
//! - `CacheStore`: primary/secondary tiers with size-aware fallback
//! - `StatsCache`: JSON entries stamped with write time and schema version
//!
//! The cache is an optimization. Every failure inside it degrades to a miss.

pub mod stats;
pub mod storage;
pub mod store;

use std::path::Path;
use std::sync::Arc;

pub use stats::{CacheEntry, StatsCache, CACHE_VERSION};
pub use storage::{CookieJar, FileStore, MemoryStore, Storage, StorageError, COOKIE_SIZE_LIMIT};
pub use store::CacheStore;

/// Cookie jar file name in the cache directory
const COOKIE_FILE: &str = "cookies.json";

/// Directory for the unlimited tier inside the cache directory
const STORE_DIR: &str = "store";

/// Open the on-disk stats cache rooted at `cache_dir`.
pub fn open(cache_dir: &Path) -> Result<StatsCache, StorageError> {
    std::fs::create_dir_all(cache_dir)?;
    let primary = Arc::new(CookieJar::open(cache_dir.join(COOKIE_FILE)));
    let secondary = Arc::new(FileStore::new(cache_dir.join(STORE_DIR))?);
    Ok(StatsCache::new(CacheStore::new(primary, secondary)))
}

/// A stats cache that lives only as long as the process.
pub fn in_memory() -> StatsCache {
    StatsCache::new(CacheStore::new(
        Arc::new(CookieJar::in_memory()),
        Arc::new(MemoryStore::new()),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let payload: Vec<u32> = (0..2000).collect();

        let cache = open(dir.path()).unwrap();
        cache.save(&payload, "numbers", 7);
        cache.save(&"tiny", "label", 7);
        drop(cache);

        let reopened = open(dir.path()).unwrap();
        assert_eq!(reopened.load::<Vec<u32>>("numbers", 7), Some(payload));
        assert_eq!(reopened.load::<String>("label", 7).as_deref(), Some("tiny"));
        assert!(dir.path().join(STORE_DIR).join("numbers_expires").exists());
    }
}
