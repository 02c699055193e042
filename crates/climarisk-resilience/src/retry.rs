//! Retry with exponential backoff.
//!
//! delay(attempt) = min(initial * base^attempt, max), then ±25% jitter, floored at zero.
//! Only `ProviderError::Transient` is retried. The request deadline is checked
//! before every attempt and before every sleep.

use std::time::Duration;

use rand::Rng;

use climarisk_core::config::{defaults, ResilienceConfig};
use climarisk_core::errors::ProviderError;
use climarisk_core::CallContext;
use climarisk_observability::tracing_setup::events;

/// Backoff parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub initial_delay: Duration,
    pub exponential_base: f64,
    pub max_delay: Duration,
    pub jitter: bool,
    pub jitter_fraction: f64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from_config(&ResilienceConfig::default())
    }
}

impl RetryPolicy {
    pub fn from_config(config: &ResilienceConfig) -> Self {
        Self {
            max_attempts: config.max_attempts.max(1),
            initial_delay: Duration::from_millis(config.initial_delay_ms),
            exponential_base: config.exponential_base,
            max_delay: Duration::from_millis(config.max_delay_ms),
            jitter: config.jitter,
            jitter_fraction: defaults::DEFAULT_JITTER_FRACTION,
        }
    }

    /// Retry immediately, without sleeping.
    pub fn immediate(max_attempts: u32) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            initial_delay: Duration::ZERO,
            exponential_base: 1.0,
            max_delay: Duration::ZERO,
            jitter: false,
            jitter_fraction: 0.0,
        }
    }

    /// Un-jittered delay after the zero-indexed `attempt` failed.
    pub fn base_delay(&self, attempt: u32) -> Duration {
        let initial = self.initial_delay.as_secs_f64();
        let grown = initial * self.exponential_base.powi(attempt.min(i32::MAX as u32) as i32);
        let capped = grown.min(self.max_delay.as_secs_f64());
        if capped.is_finite() && capped > 0.0 {
            Duration::from_secs_f64(capped)
        } else if capped.is_infinite() {
            self.max_delay
        } else {
            Duration::ZERO
        }
    }

    /// Delay with jitter applied using `rng`.
    pub fn delay_with<R: Rng + ?Sized>(&self, attempt: u32, rng: &mut R) -> Duration {
        let base = self.base_delay(attempt);
        if !self.jitter || base.is_zero() || self.jitter_fraction <= 0.0 {
            return base;
        }
        let secs = base.as_secs_f64();
        let range = secs * self.jitter_fraction;
        let jittered = secs + rng.gen_range(-range..=range);
        Duration::from_secs_f64(jittered.max(0.0))
    }

    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        self.delay_with(attempt, &mut rand::thread_rng())
    }
}

/// Run `op` until it succeeds, fails permanently, runs out of attempts, or the
/// deadline in `ctx` would be crossed. `op` receives the zero-indexed attempt.
pub fn retry<T, F>(
    policy: &RetryPolicy,
    ctx: &CallContext,
    provider: &str,
    mut op: F,
) -> Result<T, ProviderError>
where
    F: FnMut(u32) -> Result<T, ProviderError>,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt = 0;
    loop {
        if ctx.is_expired() {
            return Err(ProviderError::DeadlineExceeded {
                provider: provider.to_string(),
            });
        }

        let err = match op(attempt) {
            Ok(value) => {
                if attempt > 0 {
                    tracing::info!(provider, attempts = attempt + 1, "provider call succeeded after retry");
                }
                return Ok(value);
            }
            Err(err) => err,
        };

        events::provider_call_failed(provider, err.kind(), attempt + 1, &err.to_string());

        if !err.is_retriable() || attempt + 1 >= max_attempts {
            return Err(err);
        }

        let delay = policy.delay_for_attempt(attempt);
        if ctx.deadline.would_exceed(delay) {
            tracing::debug!(provider, ?delay, "backoff would cross request deadline");
            return Err(ProviderError::DeadlineExceeded {
                provider: provider.to_string(),
            });
        }
        events::retry_scheduled(provider, attempt + 1, max_attempts, delay);
        if !delay.is_zero() {
            std::thread::sleep(delay);
        }
        attempt += 1;
    }
}
