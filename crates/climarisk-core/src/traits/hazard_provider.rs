use crate::context::CallContext;
use crate::errors::ProviderError;
use crate::models::{
    CircuitState, HazardType, ProviderHealth, ProviderRole, ProviderSignal, SignalQuery,
};

/// A source of hazard signals (climate projections, telemetry, occurrence history).
pub trait IHazardProvider: Send + Sync {
    /// Human-readable provider name. Also the circuit breaker and cache identity.
    fn name(&self) -> &str;

    /// How the calculator consumes this provider's signals.
    fn role(&self) -> ProviderRole;

    /// Whether the provider has anything to say about `hazard`.
    fn supports(&self, hazard: HazardType) -> bool;

    /// Fetch a signal. Must honour `ctx.effective_timeout()` for any blocking I/O.
    fn signal(&self, query: &SignalQuery, ctx: &CallContext)
        -> Result<ProviderSignal, ProviderError>;

    /// Current health. Providers without a breaker report closed.
    fn health(&self) -> ProviderHealth {
        ProviderHealth {
            provider: self.name().to_string(),
            state: CircuitState::Closed,
            consecutive_failures: 0,
        }
    }
}
