use serde::{Deserialize, Serialize};

/// Cache counters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CacheStats {
    pub backend: String,
    pub entries: usize,
    pub hits: u64,
    pub misses: u64,
    /// hits / (hits + misses), 0.0 when nothing was requested yet.
    pub hit_rate: f64,
}

impl CacheStats {
    pub fn new(backend: &str, entries: usize, hits: u64, misses: u64) -> Self {
        let total = hits + misses;
        let hit_rate = if total == 0 {
            0.0
        } else {
            hits as f64 / total as f64
        };
        Self {
            backend: backend.to_string(),
            entries,
            hits,
            misses,
            hit_rate,
        }
    }

    pub fn total_requests(&self) -> u64 {
        self.hits + self.misses
    }
}
