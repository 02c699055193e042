use chrono::Utc;
use climarisk_core::config::ObservabilityConfig;
use climarisk_core::models::DegradationEvent;
use climarisk_observability::tracing_setup::{events, spans};
use climarisk_observability::{init_tracing, DegradationTracker, RecoveryStatus};

fn event(component: &str) -> DegradationEvent {
    DegradationEvent {
        component: component.to_string(),
        failure: "transient: timeout".to_string(),
        fallback_used: "scenario-multiplier".to_string(),
        timestamp: Utc::now(),
    }
}

// ── Tracker ───────────────────────────────────────────────────────────────

#[test]
fn record_and_recover() {
    let mut tracker = DegradationTracker::new();
    tracker.record(event("climate_projection"));
    tracker.record(event("climate_projection"));
    tracker.record(event("hydrological"));

    assert_eq!(tracker.active_degradations().len(), 3);
    assert!(tracker.is_degraded("climate_projection"));

    assert_eq!(tracker.mark_recovered("climate_projection"), 2);
    assert!(!tracker.is_degraded("climate_projection"));
    assert_eq!(tracker.active_degradations().len(), 1);
    assert_eq!(tracker.mark_recovered("climate_projection"), 0);

    let recovered: Vec<_> = tracker
        .events()
        .filter(|t| t.recovery_status == RecoveryStatus::Recovered)
        .collect();
    assert_eq!(recovered.len(), 2);
    assert!(recovered.iter().all(|t| t.recovered_at.is_some()));
}

#[test]
fn capacity_drops_oldest() {
    let mut tracker = DegradationTracker::with_capacity(2);
    tracker.record(event("a"));
    tracker.record(event("b"));
    tracker.record(event("c"));
    assert_eq!(tracker.len(), 2);
    let recent = tracker.recent(10);
    assert_eq!(recent[0].component, "c");
    assert_eq!(recent[1].component, "b");
}

#[test]
fn counts_and_durations() {
    let mut tracker = DegradationTracker::new();
    tracker.record(event("occurrence_history"));
    assert_eq!(tracker.count_recent("occurrence_history", 60), 1);
    assert_eq!(tracker.count_recent("other", 60), 0);
    assert!(tracker.degraded_duration("occurrence_history").is_some());
    assert!(tracker.degraded_duration("other").is_none());

    let drained = tracker.drain();
    assert_eq!(drained.len(), 1);
    assert!(tracker.is_empty());
}

#[test]
fn tracked_degradation_serializes() {
    let mut tracker = DegradationTracker::new();
    tracker.record(event("x"));
    let json = serde_json::to_value(tracker.active_degradations()[0]).unwrap();
    assert_eq!(json["recovery_status"], "active");
    assert_eq!(json["event"]["component"], "x");
}

// ── Tracing ───────────────────────────────────────────────────────────────

#[test]
fn init_is_idempotent_and_events_do_not_panic() {
    let config = ObservabilityConfig {
        log_level: "debug".into(),
        json: false,
    };
    let _ = init_tracing(&config);
    assert!(!init_tracing(&config), "second install must be refused");

    events::provider_call_failed("climate", "transient", 1, "timeout");
    events::circuit_state_changed("climate", "closed", "open", 3);
    events::risk_calculated(-23.55, -46.63, "moderate", 0.41, true);
    events::grid_generated("decay", 7, 19);

    let span = climarisk_observability::risk_span!(-23.55, -46.63, "moderate");
    let _guard = span.enter();
    assert_eq!(spans::names::RISK, "climarisk.risk");
}
