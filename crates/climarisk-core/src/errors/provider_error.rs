use std::time::Duration;

/// Hazard provider errors.
///
/// Only `Transient` is retried. `NoData` and `Unsupported` describe coverage,
/// not health, and never count toward a circuit breaker.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ProviderError {
    #[error("transient failure from {provider}: {reason}")]
    Transient { provider: String, reason: String },

    #[error("permanent failure from {provider}: {reason}")]
    Permanent { provider: String, reason: String },

    #[error("service unavailable: circuit open for {provider}, retry in {retry_after:?}")]
    CircuitOpen {
        provider: String,
        retry_after: Duration,
    },

    #[error("deadline exceeded calling {provider}")]
    DeadlineExceeded { provider: String },

    #[error("{provider} has no data for this location")]
    NoData { provider: String },

    #[error("{provider} does not serve hazard {hazard}")]
    Unsupported { provider: String, hazard: String },
}

impl ProviderError {
    /// Whether the retry policy should attempt the call again.
    pub fn is_retriable(&self) -> bool {
        matches!(self, Self::Transient { .. })
    }

    /// Whether this outcome counts as a provider failure (breaker, degradation).
    pub fn is_failure(&self) -> bool {
        !matches!(self, Self::NoData { .. } | Self::Unsupported { .. })
    }

    /// Name of the provider that produced the error.
    pub fn provider(&self) -> &str {
        match self {
            Self::Transient { provider, .. }
            | Self::Permanent { provider, .. }
            | Self::CircuitOpen { provider, .. }
            | Self::DeadlineExceeded { provider }
            | Self::NoData { provider }
            | Self::Unsupported { provider, .. } => provider,
        }
    }

    /// Short label used in degradation logs and result annotations.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Transient { .. } => "transient",
            Self::Permanent { .. } => "permanent",
            Self::CircuitOpen { .. } => "circuit_open",
            Self::DeadlineExceeded { .. } => "deadline_exceeded",
            Self::NoData { .. } => "no_data",
            Self::Unsupported { .. } => "unsupported",
        }
    }
}
