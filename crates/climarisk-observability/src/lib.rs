//! # climarisk-observability
//!
//! Tracing subscriber setup, structured events, span macros, and the
//! degradation tracker that records every provider fallback.

pub mod degradation;
pub mod tracing_setup;

pub use degradation::{DegradationTracker, RecoveryStatus, TrackedDegradation};
pub use tracing_setup::init_tracing;
