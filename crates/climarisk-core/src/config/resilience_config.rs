use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::defaults;

/// Retry and circuit breaker configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ResilienceConfig {
    pub max_attempts: u32,
    pub initial_delay_ms: u64,
    pub exponential_base: f64,
    pub max_delay_ms: u64,
    /// Apply ±25% jitter to backoff delays.
    pub jitter: bool,
    pub failure_threshold: u32,
    pub recovery_timeout_secs: u64,
    /// Timeout of a single provider call.
    pub call_timeout_ms: u64,
    /// Overall request deadline. `None` = unbounded.
    pub request_timeout_ms: Option<u64>,
}

impl Default for ResilienceConfig {
    fn default() -> Self {
        Self {
            max_attempts: defaults::DEFAULT_MAX_ATTEMPTS,
            initial_delay_ms: defaults::DEFAULT_INITIAL_DELAY_MS,
            exponential_base: defaults::DEFAULT_EXPONENTIAL_BASE,
            max_delay_ms: defaults::DEFAULT_MAX_DELAY_MS,
            jitter: defaults::DEFAULT_JITTER,
            failure_threshold: defaults::DEFAULT_FAILURE_THRESHOLD,
            recovery_timeout_secs: defaults::DEFAULT_RECOVERY_TIMEOUT_SECS,
            call_timeout_ms: defaults::DEFAULT_CALL_TIMEOUT_MS,
            request_timeout_ms: None,
        }
    }
}

impl ResilienceConfig {
    pub fn call_timeout(&self) -> Duration {
        Duration::from_millis(self.call_timeout_ms)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_ms.map(Duration::from_millis)
    }

    pub fn recovery_timeout(&self) -> Duration {
        Duration::from_secs(self.recovery_timeout_secs)
    }
}
