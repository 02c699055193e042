//! Structured log events for key system operations.
//!
//! Each function emits a `tracing` event with structured fields.

use std::time::Duration;

/// Log a failed provider attempt.
pub fn provider_call_failed(provider: &str, error_kind: &str, attempt: u32, error: &str) {
    tracing::warn!(
        event = "provider_call_failed",
        provider = %provider,
        error_kind = %error_kind,
        attempt = attempt,
        error = %error,
        "provider call failed"
    );
}

/// Log a scheduled retry.
pub fn retry_scheduled(provider: &str, attempt: u32, max_attempts: u32, delay: Duration) {
    tracing::debug!(
        event = "retry_scheduled",
        provider = %provider,
        attempt = attempt,
        max_attempts = max_attempts,
        delay_ms = delay.as_millis() as u64,
        "retrying provider call"
    );
}

/// Log a circuit breaker transition.
pub fn circuit_state_changed(provider: &str, from: &str, to: &str, failures: u32) {
    tracing::info!(
        event = "circuit_state_changed",
        provider = %provider,
        from = %from,
        to = %to,
        consecutive_failures = failures,
        "circuit breaker state changed"
    );
}

/// Log a degradation trigger event.
pub fn degradation_triggered(component: &str, failure: &str, fallback: &str) {
    tracing::warn!(
        event = "degradation_triggered",
        component = %component,
        failure = %failure,
        fallback = %fallback,
        "degradation triggered"
    );
}

/// Log a component recovering from degradation.
pub fn degradation_recovered(component: &str) {
    tracing::info!(
        event = "degradation_recovered",
        component = %component,
        "component recovered"
    );
}

/// Log a completed location risk calculation.
pub fn risk_calculated(latitude: f64, longitude: f64, scenario: &str, overall: f64, degraded: bool) {
    tracing::info!(
        event = "risk_calculated",
        latitude = latitude,
        longitude = longitude,
        scenario = %scenario,
        overall_risk_score = overall,
        degraded = degraded,
        "location risk calculated"
    );
}

/// Log a completed grid generation.
pub fn grid_generated(mode: &str, resolution: u8, cells: usize) {
    tracing::info!(
        event = "grid_generated",
        mode = %mode,
        resolution = resolution,
        cells = cells,
        "risk grid generated"
    );
}

/// Log an expired-entry sweep.
pub fn cache_swept(backend: &str, removed: usize) {
    tracing::debug!(
        event = "cache_swept",
        backend = %backend,
        removed = removed,
        "expired cache entries removed"
    );
}
