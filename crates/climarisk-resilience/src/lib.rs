//! # climarisk-resilience
//!
//! Guards around unreliable provider calls:
//! - [`retry`]: exponential backoff with ±25% jitter, bounded by the request deadline.
//! - [`CircuitBreaker`]: CLOSED → OPEN → HALF_OPEN state machine, one per provider.

pub mod circuit_breaker;
pub mod retry;

pub use circuit_breaker::{BreakerSettings, CircuitBreaker};
pub use retry::{retry, RetryPolicy};
