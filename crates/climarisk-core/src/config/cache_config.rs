use serde::{Deserialize, Serialize};

use super::defaults;

/// Which cache backend to construct.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheBackendKind {
    /// Process-local map.
    #[default]
    Memory,
    /// SQLite file shared by every instance pointed at the same path.
    Sqlite,
}

/// Cache subsystem configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    pub backend: CacheBackendKind,
    /// Database file for the sqlite backend.
    pub sqlite_path: String,
    /// TTL used when `set` is called without one.
    pub default_ttl_secs: u64,
    /// TTL for memoized provider signals.
    pub provider_ttl_secs: u64,
    /// TTL for memoized `LocationRisk` results.
    pub result_ttl_secs: u64,
    /// Decimal places coordinates are rounded to in cache keys.
    pub key_precision: u32,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            backend: CacheBackendKind::default(),
            sqlite_path: defaults::DEFAULT_SQLITE_CACHE_FILENAME.to_string(),
            default_ttl_secs: defaults::DEFAULT_CACHE_TTL_SECS,
            provider_ttl_secs: defaults::DEFAULT_PROVIDER_TTL_SECS,
            result_ttl_secs: defaults::DEFAULT_RESULT_TTL_SECS,
            key_precision: defaults::DEFAULT_CACHE_KEY_PRECISION,
        }
    }
}
