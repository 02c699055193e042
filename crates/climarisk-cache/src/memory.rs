//! Process-local TTL cache on a sharded concurrent map.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use chrono::Utc;
use dashmap::DashMap;
use serde_json::Value;
use tracing::debug;

use climarisk_core::errors::ClimaResult;
use climarisk_core::models::CacheStats;
use climarisk_core::traits::ICacheBackend;

use crate::entry::CacheEntry;

const BACKEND: &str = "memory";

/// In-memory TTL cache. Expired entries are evicted when read or swept.
pub struct InMemoryCache {
    entries: DashMap<String, CacheEntry>,
    default_ttl: Duration,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl InMemoryCache {
    pub fn new(default_ttl_secs: u64) -> Self {
        Self {
            entries: DashMap::new(),
            default_ttl: Duration::from_secs(default_ttl_secs),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Snapshot of an entry's metadata without counting a hit.
    pub fn peek(&self, key: &str) -> Option<CacheEntry> {
        self.entries.get(key).map(|e| e.value().clone())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for InMemoryCache {
    fn default() -> Self {
        Self::new(climarisk_core::config::defaults::DEFAULT_CACHE_TTL_SECS)
    }
}

impl ICacheBackend for InMemoryCache {
    fn get(&self, key: &str) -> ClimaResult<Option<Value>> {
        let now = Utc::now();
        {
            let Some(mut entry) = self.entries.get_mut(key) else {
                self.misses.fetch_add(1, Ordering::Relaxed);
                return Ok(None);
            };
            if !entry.is_expired(now) {
                entry.hit_count += 1;
                self.hits.fetch_add(1, Ordering::Relaxed);
                return Ok(Some(entry.value.clone()));
            }
        }
        // Shard guard released above; evict only if still expired.
        self.entries.remove_if(key, |_, e| e.is_expired(now));
        self.misses.fetch_add(1, Ordering::Relaxed);
        debug!(key, backend = BACKEND, "cache entry expired on read");
        Ok(None)
    }

    fn set(&self, key: &str, value: Value, ttl: Option<Duration>, source: &str) -> ClimaResult<()> {
        let entry = CacheEntry::new(key, value, ttl.unwrap_or(self.default_ttl), source);
        self.entries.insert(key.to_string(), entry);
        Ok(())
    }

    fn delete(&self, key: &str) -> ClimaResult<bool> {
        Ok(self.entries.remove(key).is_some())
    }

    fn clear(&self) -> ClimaResult<usize> {
        let count = self.entries.len();
        self.entries.clear();
        Ok(count)
    }

    fn cleanup_expired(&self) -> ClimaResult<usize> {
        let now = Utc::now();
        let before = self.entries.len();
        self.entries.retain(|_, e| !e.is_expired(now));
        Ok(before.saturating_sub(self.entries.len()))
    }

    fn stats(&self) -> ClimaResult<CacheStats> {
        Ok(CacheStats::new(
            BACKEND,
            self.entries.len(),
            self.hits.load(Ordering::Relaxed),
            self.misses.load(Ordering::Relaxed),
        ))
    }

    fn name(&self) -> &str {
        BACKEND
    }
}
