//! Per-provider circuit breaker.
//!
//! CLOSED: calls pass; `failure_threshold` consecutive failures open the circuit.
//! OPEN: calls fail fast with `CircuitOpen` carrying the remaining cool-down.
//! HALF_OPEN: entered lazily once `recovery_timeout` has elapsed since the last
//! failure; exactly one trial call is admitted. Success closes the circuit,
//! failure re-opens it.
//!
//! State lives behind a mutex; the wrapped call runs without holding it.

use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use climarisk_core::config::{ProviderSettings, ResilienceConfig};
use climarisk_core::errors::ProviderError;
use climarisk_core::models::{CircuitState, ProviderHealth};
use climarisk_observability::tracing_setup::events;

/// Breaker thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BreakerSettings {
    pub failure_threshold: u32,
    pub recovery_timeout: Duration,
}

impl BreakerSettings {
    /// Global resilience settings with per-provider overrides applied.
    pub fn resolve(global: &ResilienceConfig, provider: &ProviderSettings) -> Self {
        Self {
            failure_threshold: provider
                .failure_threshold
                .unwrap_or(global.failure_threshold)
                .max(1),
            recovery_timeout: provider
                .recovery_timeout_secs
                .map(Duration::from_secs)
                .unwrap_or_else(|| global.recovery_timeout()),
        }
    }
}

impl Default for BreakerSettings {
    fn default() -> Self {
        let global = ResilienceConfig::default();
        Self {
            failure_threshold: global.failure_threshold,
            recovery_timeout: global.recovery_timeout(),
        }
    }
}

#[derive(Debug)]
struct BreakerState {
    state: CircuitState,
    consecutive_failures: u32,
    last_failure: Option<Instant>,
    trial_in_flight: bool,
}

/// Circuit breaker guarding one provider.
#[derive(Debug)]
pub struct CircuitBreaker {
    name: String,
    settings: BreakerSettings,
    inner: Mutex<BreakerState>,
}

/// Clears the half-open trial flag if the wrapped call unwinds.
struct TrialGuard<'a> {
    breaker: &'a CircuitBreaker,
    armed: bool,
}

impl Drop for TrialGuard<'_> {
    fn drop(&mut self) {
        if self.armed {
            self.breaker.lock().trial_in_flight = false;
        }
    }
}

impl CircuitBreaker {
    pub fn new(name: impl Into<String>, settings: BreakerSettings) -> Self {
        let name = name.into();
        tracing::debug!(
            provider = %name,
            threshold = settings.failure_threshold,
            recovery_secs = settings.recovery_timeout.as_secs_f64(),
            "circuit breaker initialized"
        );
        Self {
            name,
            settings,
            inner: Mutex::new(BreakerState {
                state: CircuitState::Closed,
                consecutive_failures: 0,
                last_failure: None,
                trial_in_flight: false,
            }),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn settings(&self) -> BreakerSettings {
        self.settings
    }

    fn lock(&self) -> MutexGuard<'_, BreakerState> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn transition(&self, inner: &mut BreakerState, to: CircuitState) {
        if inner.state != to {
            events::circuit_state_changed(
                &self.name,
                &inner.state.to_string(),
                &to.to_string(),
                inner.consecutive_failures,
            );
            inner.state = to;
        }
    }

    /// OPEN → HALF_OPEN once the cool-down has elapsed.
    fn refresh(&self, inner: &mut BreakerState, now: Instant) {
        if inner.state == CircuitState::Open {
            let cooled = inner
                .last_failure
                .map_or(true, |t| now.duration_since(t) >= self.settings.recovery_timeout);
            if cooled {
                self.transition(inner, CircuitState::HalfOpen);
            }
        }
    }

    fn remaining_cooldown(&self, inner: &BreakerState, now: Instant) -> Duration {
        inner
            .last_failure
            .map(|t| self.settings.recovery_timeout.saturating_sub(now.duration_since(t)))
            .unwrap_or(Duration::ZERO)
    }

    /// Current state, applying the lazy OPEN → HALF_OPEN transition.
    pub fn state(&self) -> CircuitState {
        let mut inner = self.lock();
        self.refresh(&mut inner, Instant::now());
        inner.state
    }

    pub fn consecutive_failures(&self) -> u32 {
        self.lock().consecutive_failures
    }

    pub fn health(&self) -> ProviderHealth {
        let mut inner = self.lock();
        self.refresh(&mut inner, Instant::now());
        ProviderHealth {
            provider: self.name.clone(),
            state: inner.state,
            consecutive_failures: inner.consecutive_failures,
        }
    }

    /// Admit a call or reject it with `CircuitOpen`. Returns whether it is the half-open trial.
    fn acquire(&self) -> Result<bool, ProviderError> {
        let now = Instant::now();
        let mut inner = self.lock();
        self.refresh(&mut inner, now);
        match inner.state {
            CircuitState::Closed => Ok(false),
            CircuitState::Open => Err(ProviderError::CircuitOpen {
                provider: self.name.clone(),
                retry_after: self.remaining_cooldown(&inner, now),
            }),
            CircuitState::HalfOpen if inner.trial_in_flight => Err(ProviderError::CircuitOpen {
                provider: self.name.clone(),
                retry_after: Duration::ZERO,
            }),
            CircuitState::HalfOpen => {
                inner.trial_in_flight = true;
                Ok(true)
            }
        }
    }

    /// Record a successful (or non-failure) outcome.
    pub fn record_success(&self) {
        let mut inner = self.lock();
        inner.consecutive_failures = 0;
        inner.trial_in_flight = false;
        self.transition(&mut inner, CircuitState::Closed);
    }

    /// Record a failed outcome.
    pub fn record_failure(&self) {
        let mut inner = self.lock();
        inner.consecutive_failures = inner.consecutive_failures.saturating_add(1);
        inner.last_failure = Some(Instant::now());
        inner.trial_in_flight = false;
        if inner.state == CircuitState::HalfOpen
            || inner.consecutive_failures >= self.settings.failure_threshold
        {
            self.transition(&mut inner, CircuitState::Open);
        }
    }

    /// Run `op` through the breaker. While OPEN, `op` is not invoked.
    /// `NoData`/`Unsupported` outcomes count as successes: the service answered.
    pub fn call<T, F>(&self, op: F) -> Result<T, ProviderError>
    where
        F: FnOnce() -> Result<T, ProviderError>,
    {
        let trial = self.acquire()?;
        let mut guard = TrialGuard {
            breaker: self,
            armed: trial,
        };
        let result = op();
        guard.armed = false;
        match &result {
            Err(e) if e.is_failure() => self.record_failure(),
            _ => self.record_success(),
        }
        result
    }

    /// Force the breaker back to CLOSED with zero failures.
    pub fn reset(&self) {
        let mut inner = self.lock();
        inner.consecutive_failures = 0;
        inner.last_failure = None;
        inner.trial_in_flight = false;
        self.transition(&mut inner, CircuitState::Closed);
    }
}
