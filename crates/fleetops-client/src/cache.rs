//! Read-through response cache.
//!
//! Keyed by endpoint string with the configured TTL. Only successful
//! payloads are stored ("last successful fetch wins"); errors are never
//! cached. Values round-trip through JSON so one cache serves every record
//! type.

use std::future::Future;
use std::time::Duration;

use moka::future::Cache;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::error::ApiError;

/// TTL cache over JSON payloads.
pub struct ResponseCache {
    cache: Cache<String, Value>,
}

impl ResponseCache {
    pub fn new(max_entries: u64, ttl: Duration) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_entries)
            .time_to_live(ttl)
            .build();
        Self { cache }
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self::new(1024, ttl)
    }

    /// Return the cached payload for `key`, or run `fetch` and store its
    /// result.
    pub async fn get_or_fetch<T, F, Fut>(&self, key: &str, fetch: F) -> Result<T, ApiError>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, ApiError>>,
    {
        if let Some(hit) = self.cache.get(key).await {
            tracing::debug!(key, "response cache hit");
            return serde_json::from_value(hit).map_err(|e| ApiError::Decode(e.to_string()));
        }

        let fresh = fetch().await?;
        let value = serde_json::to_value(&fresh).map_err(|e| ApiError::Decode(e.to_string()))?;
        self.cache.insert(key.to_string(), value).await;
        Ok(fresh)
    }

    /// Drop one entry (after a mutation invalidates it).
    pub async fn invalidate(&self, key: &str) {
        self.cache.invalidate(key).await;
    }

    pub fn invalidate_all(&self) {
        self.cache.invalidate_all();
    }

    pub fn entry_count(&self) -> u64 {
        self.cache.entry_count()
    }
}
