//! Read-through cache with per-key single flight
//!
//! A fresh entry is returned without running the producer. On a miss the
//! first caller for a key takes that key's lock, runs the producer and stores
//! the result; callers queued behind it re-read the store once they get the
//! lock and normally find the value just written.

use dashmap::DashMap;
use serde::{de::DeserializeOwned, Serialize};
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use super::clock::{Clock, SystemClock};
use super::store::{CacheEntry, CacheStore, InMemoryCacheStore};
use crate::shared::errors::{AppError, AppResult};

/// Cache statistics for monitoring
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub entries_count: usize,
}

impl CacheStats {
    pub fn hit_rate(&self) -> f64 {
        if self.hits + self.misses == 0 {
            0.0
        } else {
            self.hits as f64 / (self.hits + self.misses) as f64
        }
    }
}

pub struct CacheLayer {
    store: Arc<dyn CacheStore>,
    clock: Arc<dyn Clock>,
    in_flight: DashMap<String, Arc<Mutex<()>>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl CacheLayer {
    pub fn new(store: Arc<dyn CacheStore>, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            clock,
            in_flight: DashMap::new(),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// In-memory store on the system clock
    pub fn in_memory(max_entries: usize) -> Self {
        Self::new(
            Arc::new(InMemoryCacheStore::new(max_entries)),
            Arc::new(SystemClock),
        )
    }

    /// Return the fresh value under `key`, or run `producer` and store its result for `ttl`
    pub async fn with_cache<T, F, Fut>(&self, key: &str, ttl: Duration, producer: F) -> AppResult<T>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = AppResult<T>>,
    {
        self.with_cache_when(key, ttl, |_| true, producer).await
    }

    /// Like [`Self::with_cache`], but only results accepted by `should_store` are kept
    pub async fn with_cache_when<T, F, Fut, P>(
        &self,
        key: &str,
        ttl: Duration,
        should_store: P,
        producer: F,
    ) -> AppResult<T>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = AppResult<T>>,
        P: FnOnce(&T) -> bool,
    {
        if let Some(value) = self.lookup(key).await {
            self.hits.fetch_add(1, Ordering::Relaxed);
            debug!("Cache hit for key: {}", key);
            return Ok(value);
        }

        let lock = self
            .in_flight
            .entry(key.to_string())
            .or_default()
            .value()
            .clone();
        let _guard = lock.lock().await;

        // Another caller may have filled the key while we waited
        if let Some(value) = self.lookup(key).await {
            self.hits.fetch_add(1, Ordering::Relaxed);
            debug!("Cache hit for key: {} (after in-flight wait)", key);
            return Ok(value);
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        debug!("Cache miss for key: {}", key);

        let result = match producer().await {
            Ok(value) => {
                if should_store(&value) {
                    self.store_value(key, ttl, &value).await.map(|_| value)
                } else {
                    debug!("Result for key {} not cached", key);
                    Ok(value)
                }
            }
            Err(e) => Err(e),
        };

        self.in_flight
            .remove_if(key, |_, lock| Arc::strong_count(lock) <= 2);
        result
    }

    async fn lookup<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let entry = self.store.get(key).await?;
        if !entry.is_fresh(self.clock.now()) {
            debug!("Cache entry for key {} is stale", key);
            return None;
        }

        match serde_json::from_value(entry.value) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("Discarding unreadable cache entry for key {}: {}", key, e);
                None
            }
        }
    }

    async fn store_value<T: Serialize>(&self, key: &str, ttl: Duration, value: &T) -> AppResult<()> {
        let ttl = chrono::Duration::from_std(ttl)
            .map_err(|e| AppError::CacheError(format!("Invalid TTL for key {}: {}", key, e)))?;
        let now = self.clock.now();

        self.store
            .put(CacheEntry {
                key: key.to_string(),
                value: serde_json::to_value(value)?,
                created_at: now,
                expires_at: now + ttl,
            })
            .await;

        debug!("Cached value for key: {} with TTL: {}s", key, ttl.num_seconds());
        Ok(())
    }

    pub async fn invalidate(&self, key: &str) {
        self.store.remove(key).await;
    }

    /// Clear all cached entries
    pub async fn clear(&self) {
        self.store.clear().await;
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
        info!("Cache cleared");
    }

    pub async fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries_count: self.store.len().await,
        }
    }
}
