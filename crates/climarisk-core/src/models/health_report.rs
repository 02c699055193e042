use serde::{Deserialize, Serialize};

use super::{CacheStats, DegradationEvent, ProviderHealth};

/// A provider that is currently falling back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentDegradation {
    pub component: String,
    /// Seconds since the oldest unrecovered failure.
    pub degraded_for_secs: i64,
    /// Failures recorded within the report window.
    pub recent_failures: usize,
}

/// Aggregated runtime health.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthReport {
    pub providers: Vec<ProviderHealth>,
    pub cache: CacheStats,
    pub active_degradations: usize,
    pub degraded_components: Vec<ComponentDegradation>,
    pub recent_degradations: Vec<DegradationEvent>,
}

impl HealthReport {
    /// True when no provider circuit is open and nothing is degraded.
    pub fn is_healthy(&self) -> bool {
        self.active_degradations == 0
            && self
                .providers
                .iter()
                .all(|p| p.state != super::CircuitState::Open)
    }
}
