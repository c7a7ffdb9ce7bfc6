//! Two-tier string cache with size-aware fallback.
//!
//! Writes go to the primary tier first. When the primary rejects or drops
//! the value (verified by reading it straight back), the value lands in the
//! secondary tier along with a `<key>_expires` marker, since the secondary
//! has no expiry of its own. Storage errors never escape: a failed read is a
//! miss and a failed write is a no-op.

use std::sync::Arc;

use chrono::{Duration, Utc};
use tracing::{debug, warn};

use super::storage::Storage;

const EXPIRES_SUFFIX: &str = "_expires";

#[derive(Clone)]
pub struct CacheStore {
    primary: Arc<dyn Storage>,
    secondary: Arc<dyn Storage>,
}

impl CacheStore {
    pub fn new(primary: Arc<dyn Storage>, secondary: Arc<dyn Storage>) -> Self {
        Self { primary, secondary }
    }

    fn marker_key(key: &str) -> String {
        format!("{}{}", key, EXPIRES_SUFFIX)
    }

    /// Store `value` under `key` for `expiry_days`.
    pub fn set(&self, key: &str, value: &str, expiry_days: u32) {
        let expires_at = Utc::now() + Duration::days(i64::from(expiry_days));

        let stored = match self.primary.set(key, value, Some(expires_at)) {
            Ok(()) => match self.primary.get(key) {
                Ok(Some(read_back)) => read_back == value,
                Ok(None) => false,
                Err(e) => {
                    debug!(key = key, error = %e, "Primary read-back failed");
                    false
                }
            },
            Err(e) => {
                warn!(key = key, error = %e, "Primary storage failed, falling back");
                false
            }
        };

        if stored {
            // An older oversized copy would resurface once the primary expires
            self.remove_secondary(key, &Self::marker_key(key));
            return;
        }

        debug!(key = key, bytes = value.len(), "Writing to secondary storage");
        // A stale primary copy would shadow the fallback on read
        if let Err(e) = self.primary.remove(key) {
            debug!(key = key, error = %e, "Failed to clear stale primary entry");
        }
        let marker = expires_at.timestamp_millis().to_string();
        let result = self
            .secondary
            .set(key, value, None)
            .and_then(|_| self.secondary.set(&Self::marker_key(key), &marker, None));
        if let Err(e) = result {
            warn!(key = key, error = %e, "Secondary storage failed, value not cached");
        }
    }

    /// Fetch `key`, honoring the expiry recorded at write time.
    pub fn get(&self, key: &str) -> Option<String> {
        match self.primary.get(key) {
            Ok(Some(value)) => return Some(value),
            Ok(None) => {}
            Err(e) => debug!(key = key, error = %e, "Primary read failed"),
        }

        let value = match self.secondary.get(key) {
            Ok(Some(value)) => value,
            Ok(None) => return None,
            Err(e) => {
                debug!(key = key, error = %e, "Secondary read failed");
                return None;
            }
        };

        let marker_key = Self::marker_key(key);
        let expires_at = self
            .secondary
            .get(&marker_key)
            .ok()
            .flatten()
            .and_then(|m| m.trim().parse::<i64>().ok());

        match expires_at {
            Some(at) if Utc::now().timestamp_millis() > at => {
                debug!(key = key, "Secondary entry expired, removing");
                self.remove_secondary(key, &marker_key);
                None
            }
            _ => Some(value),
        }
    }

    /// Remove `key` from both tiers.
    pub fn remove(&self, key: &str) {
        if let Err(e) = self.primary.remove(key) {
            debug!(key = key, error = %e, "Failed to remove primary entry");
        }
        self.remove_secondary(key, &Self::marker_key(key));
    }

    /// Drop every entry in both tiers.
    pub fn clear(&self) {
        if let Err(e) = self.primary.clear() {
            warn!(error = %e, "Failed to clear primary storage");
        }
        if let Err(e) = self.secondary.clear() {
            warn!(error = %e, "Failed to clear secondary storage");
        }
    }

    fn remove_secondary(&self, key: &str, marker_key: &str) {
        for k in [key, marker_key] {
            if let Err(e) = self.secondary.remove(k) {
                debug!(key = k, error = %e, "Failed to remove secondary entry");
            }
        }
    }
}
