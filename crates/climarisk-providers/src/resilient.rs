//! Wraps any provider with signal caching, retry, and a circuit breaker.
//!
//! Call order: cache lookup, then retry around the breaker-guarded call.
//! Each retry attempt passes through the breaker, so an opening circuit
//! stops the retry loop with `CircuitOpen`. Only successes are cached.

use std::sync::Arc;
use std::time::Duration;

use climarisk_cache::{get_typed, set_typed, CacheKey};
use climarisk_core::errors::ProviderError;
use climarisk_core::models::{HazardType, ProviderHealth, ProviderRole, ProviderSignal, SignalQuery};
use climarisk_core::traits::{ICacheBackend, IHazardProvider};
use climarisk_core::CallContext;
use climarisk_resilience::{retry, BreakerSettings, CircuitBreaker, RetryPolicy};

/// Signal cache settings for a [`ResilientProvider`].
#[derive(Clone)]
pub struct SignalCache {
    pub backend: Arc<dyn ICacheBackend>,
    pub ttl: Duration,
    pub key_precision: u32,
}

pub struct ResilientProvider {
    inner: Arc<dyn IHazardProvider>,
    breaker: CircuitBreaker,
    policy: RetryPolicy,
    cache: Option<SignalCache>,
}

impl ResilientProvider {
    pub fn new(inner: Arc<dyn IHazardProvider>, policy: RetryPolicy, breaker: BreakerSettings) -> Self {
        let breaker = CircuitBreaker::new(inner.name(), breaker);
        Self {
            inner,
            breaker,
            policy,
            cache: None,
        }
    }

    pub fn with_cache(mut self, cache: SignalCache) -> Self {
        self.cache = Some(cache);
        self
    }

    pub fn breaker(&self) -> &CircuitBreaker {
        &self.breaker
    }

    fn cache_key(&self, query: &SignalQuery, precision: u32) -> String {
        CacheKey::provider_signal(
            self.inner.name(),
            query.hazard,
            query.latitude,
            query.longitude,
            query.scenario,
            query.year,
            precision,
        )
    }
}

impl IHazardProvider for ResilientProvider {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn role(&self) -> ProviderRole {
        self.inner.role()
    }

    fn supports(&self, hazard: HazardType) -> bool {
        self.inner.supports(hazard)
    }

    fn signal(&self, query: &SignalQuery, ctx: &CallContext) -> Result<ProviderSignal, ProviderError> {
        let _span = climarisk_observability::provider_span!(self.name(), query.hazard).entered();

        if !self.inner.supports(query.hazard) {
            return Err(ProviderError::Unsupported {
                provider: self.name().to_string(),
                hazard: query.hazard.to_string(),
            });
        }

        let key = self
            .cache
            .as_ref()
            .map(|c| self.cache_key(query, c.key_precision));
        if let (Some(cache), Some(key)) = (&self.cache, &key) {
            if let Some(hit) = get_typed::<ProviderSignal>(cache.backend.as_ref(), key) {
                tracing::debug!(provider = self.name(), "signal served from cache");
                return Ok(hit);
            }
        }

        let result = retry(&self.policy, ctx, self.name(), |_attempt| {
            self.breaker.call(|| self.inner.signal(query, ctx))
        });

        if let (Ok(signal), Some(cache), Some(key)) = (&result, &self.cache, &key) {
            set_typed(cache.backend.as_ref(), key, signal, Some(cache.ttl), self.name());
        }
        result
    }

    fn health(&self) -> ProviderHealth {
        self.breaker.health()
    }
}
