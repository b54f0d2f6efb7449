// Cache store for reading and writing cached data.
// Handles JSON serialization, expiry checking, and key namespacing.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::error::CacheError;

use super::backend::StorageBackend;

/// Prefix carried by every key this store writes.
pub const CACHE_PREFIX: &str = "github-analytics-";

/// Default expiry window: 15 minutes.
pub const DEFAULT_TTL: Duration = Duration::from_secs(15 * 60);

/// Wrapper for cached data with the time it was stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CachedData<T> {
    /// The cached data.
    pub data: T,
    /// When the data was cached, epoch milliseconds.
    pub timestamp: i64,
}

impl<T> CachedData<T> {
    /// Create a new cached data entry stamped with the current time.
    pub fn new(data: T) -> Self {
        Self {
            data,
            timestamp: now_millis(),
        }
    }

    /// Check if this entry is older than `ttl` at `now` (epoch millis).
    pub fn is_expired_at(&self, ttl: Duration, now: i64) -> bool {
        let ttl_ms = i64::try_from(ttl.as_millis()).unwrap_or(i64::MAX);
        now.saturating_sub(self.timestamp) > ttl_ms
    }

    /// Check if this entry has expired based on TTL.
    pub fn is_expired(&self, ttl: Duration) -> bool {
        self.is_expired_at(ttl, now_millis())
    }
}

fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Expiring, namespaced key/value store.
///
/// Failures never leave this type through `get`, `set`, or `clear`: a read
/// failure is a miss and a write failure is logged. The `try_*` variants
/// expose the underlying errors.
#[derive(Clone)]
pub struct CacheStore {
    backend: Arc<dyn StorageBackend>,
    prefix: String,
    ttl: Duration,
}

impl CacheStore {
    /// Create a store with the default prefix and expiry window.
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        Self::with_ttl(backend, DEFAULT_TTL)
    }

    pub fn with_ttl(backend: Arc<dyn StorageBackend>, ttl: Duration) -> Self {
        Self {
            backend,
            prefix: CACHE_PREFIX.to_string(),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Full backend key for `key`.
    pub fn namespaced(&self, key: &str) -> String {
        format!("{}{}", self.prefix, key)
    }

    /// Fresh payload for `key`, or `None`.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        match self.try_get(key) {
            Ok(data) => data,
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "Failed to retrieve cache");
                None
            }
        }
    }

    /// Like `get`, but reports backend and decoding failures.
    ///
    /// An expired entry is removed from the backend.
    pub fn try_get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, CacheError> {
        let full_key = self.namespaced(key);
        let Some(raw) = self.backend.get_item(&full_key)? else {
            return Ok(None);
        };

        let cached: CachedData<T> = serde_json::from_str(&raw)?;
        if cached.is_expired(self.ttl) {
            tracing::debug!(key = %key, "Cache entry expired");
            self.backend.remove_item(&full_key)?;
            return Ok(None);
        }

        Ok(Some(cached.data))
    }

    /// Store `data` under `key`, overwriting any previous entry.
    pub fn set<T: Serialize>(&self, key: &str, data: &T) {
        if let Err(e) = self.try_set(key, data) {
            tracing::warn!(key = %key, error = %e, "Failed to cache data");
        }
    }

    pub fn try_set<T: Serialize>(&self, key: &str, data: &T) -> Result<(), CacheError> {
        let cached = CachedData::new(data);
        let json = serde_json::to_string(&cached)?;
        self.backend.set_item(&self.namespaced(key), &json)
    }

    /// Remove every entry written by this store. Returns how many were removed.
    pub fn clear(&self) -> usize {
        match self.try_clear() {
            Ok(removed) => removed,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to clear cache");
                0
            }
        }
    }

    pub fn try_clear(&self) -> Result<usize, CacheError> {
        let keys: Vec<String> = self
            .backend
            .keys()?
            .into_iter()
            .filter(|key| key.starts_with(&self.prefix))
            .collect();

        for key in &keys {
            self.backend.remove_item(key)?;
        }
        Ok(keys.len())
    }
}
