use chrono::Utc;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::debug;

use super::store::CacheStore;

/// Schema version written with every entry. Entries carrying any other
/// version are treated as missing.
pub const CACHE_VERSION: &str = "1.0";

const MS_PER_DAY: i64 = 86_400_000;

/// A cached payload wrapped with its write time (epoch milliseconds).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheEntry<T> {
    pub data: T,
    pub timestamp: i64,
    pub version: String,
}

impl<T> CacheEntry<T> {
    pub fn new(data: T) -> Self {
        Self {
            data,
            timestamp: Utc::now().timestamp_millis(),
            version: CACHE_VERSION.to_string(),
        }
    }

    pub fn age_ms(&self) -> i64 {
        Utc::now().timestamp_millis() - self.timestamp
    }

    pub fn age_minutes(&self) -> i64 {
        self.age_ms() / 60_000
    }

    pub fn is_expired(&self, expiry_days: u32) -> bool {
        self.age_ms() > i64::from(expiry_days) * MS_PER_DAY
    }

    pub fn age_display(&self) -> String {
        let minutes = self.age_minutes();
        if minutes < 1 {
            // Also covers clock skew
            "just now".to_string()
        } else if minutes < 60 {
            format!("{}m ago", minutes)
        } else if minutes < 1440 {
            let hours = minutes / 60;
            if minutes % 60 >= 30 {
                format!("{}h ago", hours + 1)
            } else {
                format!("{}h ago", hours)
            }
        } else {
            let days = minutes / 1440;
            if (minutes % 1440) / 60 >= 12 {
                format!("{}d ago", days + 1)
            } else {
                format!("{}d ago", days)
            }
        }
    }
}

/// JSON payload cache with age-based invalidation.
///
/// The embedded timestamp is checked on every load; it is the only expiry
/// check that applies when the store has fallen back to its secondary tier
/// without a usable marker.
#[derive(Clone)]
pub struct StatsCache {
    store: CacheStore,
}

impl StatsCache {
    pub fn new(store: CacheStore) -> Self {
        Self { store }
    }

    pub fn save<T: Serialize>(&self, payload: &T, key: &str, expiry_days: u32) {
        let entry = CacheEntry::new(payload);
        match serde_json::to_string(&entry) {
            Ok(json) => self.store.set(key, &json, expiry_days),
            Err(e) => debug!(key = key, error = %e, "Failed to serialize cache entry"),
        }
    }

    pub fn load<T: DeserializeOwned>(&self, key: &str, expiry_days: u32) -> Option<T> {
        let entry: CacheEntry<T> = self.load_entry(key)?;
        if entry.is_expired(expiry_days) {
            debug!(key = key, age_minutes = entry.age_minutes(), "Cache entry expired");
            return None;
        }
        Some(entry.data)
    }

    /// Human-readable age of a cached entry, regardless of expiry.
    pub fn age(&self, key: &str) -> Option<String> {
        self.load_entry::<serde::de::IgnoredAny>(key)
            .map(|entry| entry.age_display())
    }

    pub fn remove(&self, key: &str) {
        self.store.remove(key);
    }

    pub fn clear(&self) {
        self.store.clear();
    }

    fn load_entry<T: DeserializeOwned>(&self, key: &str) -> Option<CacheEntry<T>> {
        let raw = self.store.get(key)?;
        let entry: CacheEntry<T> = match serde_json::from_str(&raw) {
            Ok(entry) => entry,
            Err(e) => {
                debug!(key = key, error = %e, "Failed to parse cache entry");
                return None;
            }
        };
        if entry.version != CACHE_VERSION {
            debug!(key = key, version = %entry.version, "Ignoring cache entry with stale version");
            return None;
        }
        Some(entry)
    }
}
