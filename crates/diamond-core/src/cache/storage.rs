//! Key/value storage tiers backing the cache.
//!
//! Two on-disk implementations mirror the media a browser offers:
//!
//! - `CookieJar`: small per-entry ceiling (~4KB), expiry enforced natively.
//!   Oversized writes are dropped silently, the way browsers drop cookies.
//! - `FileStore`: one file per key, unlimited size, no notion of expiry.
//!
//! `MemoryStore` is an unlimited, non-persistent tier for tests and
//! throwaway runs.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

/// Per-entry size ceiling for the cookie jar (name + "=" + value).
pub const COOKIE_SIZE_LIMIT: usize = 4096;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to encode storage file: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("Storage lock poisoned")]
    Poisoned,
}

/// A string key/value medium.
///
/// `expires_at` is a hint: tiers without native expiry ignore it.
pub trait Storage: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn set(
        &self,
        key: &str,
        value: &str,
        expires_at: Option<DateTime<Utc>>,
    ) -> Result<(), StorageError>;

    fn remove(&self, key: &str) -> Result<(), StorageError>;

    fn clear(&self) -> Result<(), StorageError>;
}

// ============================================================================
// Cookie jar
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Cookie {
    value: String,
    expires_at: Option<DateTime<Utc>>,
}

impl Cookie {
    fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.map(|at| now > at).unwrap_or(false)
    }
}

/// Size-limited tier with native expiry, persisted as a single JSON file.
pub struct CookieJar {
    path: Option<PathBuf>,
    limit: usize,
    cookies: RwLock<HashMap<String, Cookie>>,
}

impl CookieJar {
    /// Open (or start) a jar persisted at `path`.
    ///
    /// An unreadable jar file is discarded rather than failing startup.
    pub fn open(path: PathBuf) -> Self {
        let cookies = match Self::read_file(&path) {
            Ok(cookies) => cookies,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Discarding unreadable cookie jar");
                HashMap::new()
            }
        };
        Self {
            path: Some(path),
            limit: COOKIE_SIZE_LIMIT,
            cookies: RwLock::new(cookies),
        }
    }

    pub fn in_memory() -> Self {
        Self {
            path: None,
            limit: COOKIE_SIZE_LIMIT,
            cookies: RwLock::new(HashMap::new()),
        }
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    fn read_file(path: &Path) -> Result<HashMap<String, Cookie>, StorageError> {
        if !path.exists() {
            return Ok(HashMap::new());
        }
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    fn persist(&self, cookies: &HashMap<String, Cookie>) -> Result<(), StorageError> {
        let Some(ref path) = self.path else {
            return Ok(());
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(cookies)?;
        std::fs::write(path, contents)?;
        Ok(())
    }
}

impl Storage for CookieJar {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let now = Utc::now();
        {
            let cookies = self.cookies.read().map_err(|_| StorageError::Poisoned)?;
            match cookies.get(key) {
                None => return Ok(None),
                Some(cookie) if !cookie.is_expired(now) => return Ok(Some(cookie.value.clone())),
                Some(_) => {}
            }
        }

        // Expired: drop it so the jar doesn't grow without bound
        let mut cookies = self.cookies.write().map_err(|_| StorageError::Poisoned)?;
        cookies.remove(key);
        self.persist(&cookies)?;
        Ok(None)
    }

    fn set(
        &self,
        key: &str,
        value: &str,
        expires_at: Option<DateTime<Utc>>,
    ) -> Result<(), StorageError> {
        let size = key.len() + 1 + value.len();
        if size > self.limit {
            debug!(key = key, size = size, limit = self.limit, "Cookie too large, dropped");
            return Ok(());
        }

        let mut cookies = self.cookies.write().map_err(|_| StorageError::Poisoned)?;
        let cookie = Cookie {
            value: value.to_string(),
            expires_at,
        };
        if cookie.is_expired(Utc::now()) {
            cookies.remove(key);
        } else {
            cookies.insert(key.to_string(), cookie);
        }
        self.persist(&cookies)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut cookies = self.cookies.write().map_err(|_| StorageError::Poisoned)?;
        if cookies.remove(key).is_some() {
            self.persist(&cookies)?;
        }
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        let mut cookies = self.cookies.write().map_err(|_| StorageError::Poisoned)?;
        cookies.clear();
        self.persist(&cookies)
    }
}

// ============================================================================
// File store
// ============================================================================

/// Unlimited tier: one file per key under a directory. Does not expire.
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: PathBuf) -> Result<Self, StorageError> {
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        let file_name: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '_' || c == '-' || c == '.' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.dir.join(file_name)
    }
}

impl Storage for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.entry_path(key);
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(std::fs::read_to_string(path)?))
    }

    fn set(
        &self,
        key: &str,
        value: &str,
        _expires_at: Option<DateTime<Utc>>,
    ) -> Result<(), StorageError> {
        std::fs::write(self.entry_path(key), value)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let path = self.entry_path(key);
        if path.exists() {
            std::fs::remove_file(path)?;
        }
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        for entry in std::fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.is_file() {
                std::fs::remove_file(path)?;
            }
        }
        Ok(())
    }
}

// ============================================================================
// Memory store
// ============================================================================

/// Unlimited, non-persistent tier without expiry.
#[derive(Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.read().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Storage for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let entries = self.entries.read().map_err(|_| StorageError::Poisoned)?;
        Ok(entries.get(key).cloned())
    }

    fn set(
        &self,
        key: &str,
        value: &str,
        _expires_at: Option<DateTime<Utc>>,
    ) -> Result<(), StorageError> {
        let mut entries = self.entries.write().map_err(|_| StorageError::Poisoned)?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.write().map_err(|_| StorageError::Poisoned)?;
        entries.remove(key);
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        let mut entries = self.entries.write().map_err(|_| StorageError::Poisoned)?;
        entries.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_cookie_jar_round_trip() {
        let jar = CookieJar::in_memory();
        jar.set("theme", "dark", Some(Utc::now() + Duration::days(1))).unwrap();
        assert_eq!(jar.get("theme").unwrap().as_deref(), Some("dark"));
    }

    #[test]
    fn test_cookie_jar_drops_oversized_values() {
        let jar = CookieJar::in_memory().with_limit(16);
        jar.set("k", "short", None).unwrap();
        jar.set("k", &"x".repeat(64), None).unwrap();
        // The oversized write is ignored; the old value survives
        assert_eq!(jar.get("k").unwrap().as_deref(), Some("short"));
    }

    #[test]
    fn test_cookie_jar_expires_natively() {
        let jar = CookieJar::in_memory();
        jar.set("old", "v", Some(Utc::now() + Duration::days(1))).unwrap();
        {
            let mut cookies = jar.cookies.write().unwrap();
            cookies.get_mut("old").unwrap().expires_at = Some(Utc::now() - Duration::seconds(1));
        }
        assert_eq!(jar.get("old").unwrap(), None);
        assert!(jar.cookies.read().unwrap().is_empty());
    }

    #[test]
    fn test_cookie_jar_persists_to_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cookies.json");

        let jar = CookieJar::open(path.clone());
        jar.set("team", "147", None).unwrap();
        drop(jar);

        let reopened = CookieJar::open(path);
        assert_eq!(reopened.get("team").unwrap().as_deref(), Some("147"));
    }

    #[test]
    fn test_cookie_jar_discards_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cookies.json");
        std::fs::write(&path, "{ not json").unwrap();

        let jar = CookieJar::open(path);
        assert_eq!(jar.get("anything").unwrap(), None);
    }

    #[test]
    fn test_file_store_round_trip_and_clear() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("store")).unwrap();

        store.set("standings_mlb_2020_2022", "{}", None).unwrap();
        store.set("standings_mlb_2020_2022_expires", "123", None).unwrap();
        assert_eq!(store.get("standings_mlb_2020_2022").unwrap().as_deref(), Some("{}"));

        store.remove("standings_mlb_2020_2022").unwrap();
        assert_eq!(store.get("standings_mlb_2020_2022").unwrap(), None);

        store.clear().unwrap();
        assert_eq!(store.get("standings_mlb_2020_2022_expires").unwrap(), None);
    }

    #[test]
    fn test_file_store_sanitizes_keys() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().to_path_buf()).unwrap();
        store.set("../escape/attempt", "v", None).unwrap();
        assert!(dir.path().join(".._escape_attempt").exists());
        assert_eq!(store.get("../escape/attempt").unwrap().as_deref(), Some("v"));
    }
}
