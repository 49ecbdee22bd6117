use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde_json::Value;
use tracing::debug;

/// One cached aggregation result. Replaced wholesale, never patched.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheEntry {
    pub key: String,
    pub value: Value,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl CacheEntry {
    /// Fresh until `expires_at`; stale from that instant on
    pub fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }
}

/// Key-value storage behind the cache layer
#[async_trait]
pub trait CacheStore: Send + Sync {
    async fn get(&self, key: &str) -> Option<CacheEntry>;
    async fn put(&self, entry: CacheEntry);
    async fn remove(&self, key: &str);
    async fn clear(&self);
    async fn len(&self) -> usize;
}

/// In-process store bounded by entry count
#[derive(Debug)]
pub struct InMemoryCacheStore {
    entries: DashMap<String, CacheEntry>,
    max_entries: usize,
}

impl InMemoryCacheStore {
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: DashMap::new(),
            max_entries: max_entries.max(1),
        }
    }

    /// Drop the oldest entries until the store is back to 90% of capacity
    fn evict_oldest_entries(&self) {
        let current_size = self.entries.len();
        if current_size < self.max_entries {
            return;
        }

        let mut by_age: Vec<(String, DateTime<Utc>)> = self
            .entries
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().created_at))
            .collect();
        by_age.sort_by_key(|(_, created_at)| *created_at);

        let target_size = (self.max_entries * 9) / 10;
        let to_evict = current_size.saturating_sub(target_size).max(1);
        for (key, _) in by_age.into_iter().take(to_evict) {
            self.entries.remove(&key);
        }

        debug!(
            "Evicted {} old cache entries (was {}, now {})",
            to_evict,
            current_size,
            self.entries.len()
        );
    }
}

impl Default for InMemoryCacheStore {
    fn default() -> Self {
        Self::new(2000)
    }
}

#[async_trait]
impl CacheStore for InMemoryCacheStore {
    async fn get(&self, key: &str) -> Option<CacheEntry> {
        self.entries.get(key).map(|entry| entry.value().clone())
    }

    async fn put(&self, entry: CacheEntry) {
        if !self.entries.contains_key(&entry.key) {
            self.evict_oldest_entries();
        }
        self.entries.insert(entry.key.clone(), entry);
    }

    async fn remove(&self, key: &str) {
        self.entries.remove(key);
    }

    async fn clear(&self) {
        self.entries.clear();
    }

    async fn len(&self) -> usize {
        self.entries.len()
    }
}
