use std::time::Duration;

use serde_json::Value;

use crate::errors::ClimaResult;
use crate::models::CacheStats;

/// TTL key-value store. Every backend exposes identical observable semantics.
pub trait ICacheBackend: Send + Sync {
    /// Fetch a live entry. An expired entry is evicted and reported as a miss.
    fn get(&self, key: &str) -> ClimaResult<Option<Value>>;

    /// Store a value. `ttl = None` uses the backend's default TTL.
    fn set(&self, key: &str, value: Value, ttl: Option<Duration>, source: &str) -> ClimaResult<()>;

    /// Remove one entry. Returns whether it existed.
    fn delete(&self, key: &str) -> ClimaResult<bool>;

    /// Remove everything. Returns the number of entries removed.
    fn clear(&self) -> ClimaResult<usize>;

    /// Sweep expired entries. Returns the number removed.
    fn cleanup_expired(&self) -> ClimaResult<usize>;

    fn stats(&self) -> ClimaResult<CacheStats>;

    /// Backend name for logs and stats.
    fn name(&self) -> &str;
}
