//! End-to-end calculator behaviour with scripted, failing and reference providers.

use std::sync::Arc;
use std::time::{Duration, Instant};

use climarisk_cache::InMemoryCache;
use climarisk_calculator::RiskCalculator;
use climarisk_core::config::ClimaConfig;
use climarisk_core::constants::{SOURCE_GEOGRAPHIC, SOURCE_SCENARIO_MULTIPLIER};
use climarisk_core::errors::{ClimaError, ProviderError};
use climarisk_core::models::{CircuitState, HazardType, ProviderRole, RiskScenario};
use climarisk_core::traits::IHazardProvider;
use climarisk_core::Deadline;
use climarisk_providers::{MunicipalityRegistry, ResilientProvider};
use climarisk_resilience::{BreakerSettings, RetryPolicy};
use test_fixtures::{all_failing_provider_set, as_dyn, golden_baselines, Script, ScriptedProvider};

const SP: (f64, f64) = (-23.5505, -46.6333);

fn calculator(providers: Vec<Arc<dyn IHazardProvider>>) -> RiskCalculator {
    RiskCalculator::new(&test_fixtures::test_config(), providers).unwrap()
}

fn resilient(inner: Arc<ScriptedProvider>) -> Arc<dyn IHazardProvider> {
    Arc::new(ResilientProvider::new(
        inner,
        RetryPolicy::immediate(2),
        BreakerSettings {
            failure_threshold: 3,
            recovery_timeout: Duration::from_secs(60),
        },
    ))
}

// ── Baseline only ────────────────────────────────────────────────────────

#[test]
fn golden_baselines_without_providers() {
    let calc = calculator(Vec::new());
    for loc in golden_baselines().locations {
        let risk = calc
            .calculate_location_risk(loc.latitude, loc.longitude, RiskScenario::Moderate, None, None)
            .unwrap();
        let regions = calc.baseline().regions_for(loc.latitude, loc.longitude);
        assert_eq!(regions, loc.regions, "{}", loc.name);
        for (hazard, expected) in &loc.baseline {
            let h = risk.hazard(*hazard).unwrap();
            assert!((h.current_risk - expected).abs() < 1e-9, "{} {hazard}: {}", loc.name, h.current_risk);
            assert_eq!(h.data_source, format!("{SOURCE_GEOGRAPHIC}+{SOURCE_SCENARIO_MULTIPLIER}"));
        }
        assert!(!risk.degraded);
    }
}

#[test]
fn confidence_is_base_without_providers() {
    let calc = calculator(Vec::new());
    let risk = calc
        .calculate_location_risk(SP.0, SP.1, RiskScenario::Low, None, None)
        .unwrap();
    let base = ClimaConfig::default().calculator.confidence;
    for h in &risk.hazards {
        assert!((h.confidence - base.base_for(h.hazard_type)).abs() < 1e-12);
    }
}

// ── Everything failing ───────────────────────────────────────────────────

#[test]
fn sao_paulo_with_every_provider_failing() {
    let failing = all_failing_provider_set();
    let calc = calculator(as_dyn(&failing));
    let base = ClimaConfig::default().calculator.confidence;
    let expected = golden_baselines().locations[0]
        .overall_all_failing_moderate
        .unwrap();

    let first = calc
        .calculate_location_risk(SP.0, SP.1, RiskScenario::Moderate, None, None)
        .unwrap();
    assert_eq!(first.hazards.len(), HazardType::ALL.len());
    for h in &first.hazards {
        assert!(h.has_source(SOURCE_GEOGRAPHIC));
        assert!(h.has_source(SOURCE_SCENARIO_MULTIPLIER));
        assert!(h.confidence <= base.base_for(h.hazard_type));
    }
    assert!(first.degraded);
    assert!((first.overall_risk_score - expected).abs() < 1e-9);

    let second = calc
        .calculate_location_risk(SP.0, SP.1, RiskScenario::Moderate, None, None)
        .unwrap();
    assert_eq!(first.overall_risk_score, second.overall_risk_score);
    assert_eq!(first.hazards, second.hazards);

    assert!(calc.active_degradations() > 0);
    for p in &failing {
        assert!(p.calls() > 0);
    }
}

#[test]
fn open_breakers_stop_calling_providers() {
    let failing = all_failing_provider_set();
    let providers: Vec<_> = failing.iter().cloned().map(resilient).collect();
    let calc = calculator(providers);

    calc.calculate_location_risk(SP.0, SP.1, RiskScenario::High, None, None)
        .unwrap();
    for health in calc.provider_health() {
        assert_eq!(health.state, CircuitState::Open, "{}", health.provider);
    }
    let counts: Vec<_> = failing.iter().map(|p| p.calls()).collect();

    let risk = calc
        .calculate_location_risk(SP.0, SP.1, RiskScenario::High, None, None)
        .unwrap();
    assert!(risk.degraded);
    assert_eq!(failing.iter().map(|p| p.calls()).collect::<Vec<_>>(), counts);
}

#[test]
fn expired_deadline_skips_provider_calls() {
    let history = Arc::new(ScriptedProvider::observation("history", &HazardType::ALL, 0.5, 0.7));
    let calc = calculator(vec![resilient(history.clone())]);
    let risk = calc
        .calculate_with_deadline(SP.0, SP.1, RiskScenario::Moderate, None, None, Deadline::at(Instant::now()))
        .unwrap();
    assert_eq!(history.calls(), 0);
    assert!(risk.degraded);
    assert!(risk.hazards.iter().all(|h| !h.has_source("history")));
}

#[test]
fn no_data_is_not_degradation() {
    let empty = Arc::new(ScriptedProvider::new(
        "history",
        ProviderRole::Observation,
        &HazardType::ALL,
        Script::Fail(ProviderError::NoData {
            provider: "history".into(),
        }),
    ));
    let calc = calculator(vec![empty]);
    let risk = calc
        .calculate_location_risk(SP.0, SP.1, RiskScenario::Moderate, None, None)
        .unwrap();
    assert!(!risk.degraded);
    assert_eq!(calc.active_degradations(), 0);
}

// ── Provider data contributing ───────────────────────────────────────────

#[test]
fn observations_blend_and_projection_applies() {
    let history = Arc::new(ScriptedProvider::observation("history", &[HazardType::Flood], 0.75, 0.75));
    let projection = Arc::new(ScriptedProvider::warming("projection", 2.0));
    let calc = calculator(as_dyn(&[history, projection]));

    let risk = calc
        .calculate_location_risk(SP.0, SP.1, RiskScenario::Moderate, None, None)
        .unwrap();

    let flood = risk.hazard(HazardType::Flood).unwrap();
    assert!((flood.current_risk - 0.51).abs() < 1e-12);
    // Warming does not move flood risk.
    assert!((flood.projected_2030 - 0.51).abs() < 1e-12);
    assert!((flood.confidence - 0.70).abs() < 1e-12);
    assert_eq!(flood.data_source, "geographic-heuristic+history+projection");
    assert_eq!(flood.raw_value, Some(2.0));
    assert_eq!(flood.unit.as_deref(), Some("degC"));

    let heat = risk.hazard(HazardType::HeatStress).unwrap();
    assert!((heat.current_risk - 0.164495).abs() < 1e-9);
    assert!((heat.projected_2050 - 0.164495 * 1.3).abs() < 1e-9);
    assert!(!heat.has_source(SOURCE_SCENARIO_MULTIPLIER));
    assert!(!risk.degraded);
}

#[test]
fn drain_clears_tracked_degradations() {
    let failing = all_failing_provider_set();
    let calc = calculator(as_dyn(&failing[1..2]));
    calc.calculate_location_risk(SP.0, SP.1, RiskScenario::Moderate, None, None)
        .unwrap();
    assert!(calc.active_degradations() > 0);
    let components = calc.degraded_components(60);
    assert_eq!(components.len(), 1);
    assert_eq!(components[0].component, "hydrological");
    assert_eq!(components[0].recent_failures, HazardType::ALL.len());
    let drained = calc.drain_degradation_events();
    assert!(drained.iter().all(|t| t.event.component == "hydrological"));
    assert_eq!(calc.active_degradations(), 0);
    assert!(calc.degraded_components(60).is_empty());
}

// ── Memoization ──────────────────────────────────────────────────────────

#[test]
fn healthy_results_are_memoized() {
    let history = Arc::new(ScriptedProvider::observation("history", &HazardType::ALL, 0.3, 0.7));
    let calc = calculator(as_dyn(&[history.clone()])).with_cache(Arc::new(InMemoryCache::new(60)));

    let a = calc
        .calculate_location_risk(SP.0, SP.1, RiskScenario::Moderate, Some("a"), None)
        .unwrap();
    let calls = history.calls();
    let b = calc
        .calculate_location_risk(SP.0, SP.1, RiskScenario::Moderate, Some("b"), Some("B"))
        .unwrap();
    assert_eq!(history.calls(), calls);
    assert_eq!(a.hazards, b.hazards);
    assert_eq!(b.location_id.as_deref(), Some("b"));
    assert_eq!(b.location_name.as_deref(), Some("B"));
}

#[test]
fn degraded_results_are_not_memoized() {
    let failing = all_failing_provider_set();
    let calc = calculator(as_dyn(&failing)).with_cache(Arc::new(InMemoryCache::new(60)));
    calc.calculate_location_risk(SP.0, SP.1, RiskScenario::Moderate, None, None)
        .unwrap();
    let calls = failing[0].calls();
    calc.calculate_location_risk(SP.0, SP.1, RiskScenario::Moderate, None, None)
        .unwrap();
    assert!(failing[0].calls() > calls);
}

// ── Municipalities and validation ────────────────────────────────────────

#[test]
fn municipality_risk_resolves_identifier() {
    let calc = calculator(Vec::new()).with_resolver(Arc::new(MunicipalityRegistry::builtin()));
    let risk = calc
        .calculate_municipality_risk("3550308", RiskScenario::Moderate)
        .unwrap();
    assert_eq!(risk.location_name.as_deref(), Some("São Paulo"));
    assert_eq!(risk.latitude, SP.0);

    let err = calc
        .calculate_municipality_risk("0000000", RiskScenario::Moderate)
        .unwrap_err();
    assert!(err.is_not_found());
}

#[test]
fn municipality_vulnerability_is_reported_apart_from_score() {
    let calc = calculator(Vec::new()).with_resolver(Arc::new(MunicipalityRegistry::builtin()));
    let municipal = calc
        .calculate_municipality_risk("3550308", RiskScenario::Moderate)
        .unwrap();
    let v = municipal.vulnerability.as_ref().unwrap();
    assert_eq!(v.critical_infrastructure_count, 450);
    assert_eq!(v.vulnerable_population_pct, 0.28);
    assert!(v.population_exposed > 0);
    assert!((0.0..=1.0).contains(&v.adaptive_capacity_score));

    let plain = calc
        .calculate_location_risk(SP.0, SP.1, RiskScenario::Moderate, None, None)
        .unwrap();
    assert!(plain.vulnerability.is_none());
    assert_eq!(plain.overall_risk_score, municipal.overall_risk_score);
}

#[test]
fn municipality_risk_without_resolver_is_config_error() {
    let calc = calculator(Vec::new());
    let err = calc
        .calculate_municipality_risk("3550308", RiskScenario::Moderate)
        .unwrap_err();
    assert!(matches!(err, ClimaError::Config { .. }));
}

#[test]
fn invalid_coordinates_are_rejected() {
    let calc = calculator(Vec::new());
    for (lat, lon) in [(91.0, 0.0), (0.0, -180.5), (f64::NAN, 0.0)] {
        let err = calc
            .calculate_location_risk(lat, lon, RiskScenario::Moderate, None, None)
            .unwrap_err();
        assert!(err.is_validation());
    }
}

#[test]
fn reference_providers_enrich_sao_paulo() {
    let config = test_fixtures::test_config();
    let cache = Arc::new(InMemoryCache::new(60));
    let resolver = Arc::new(MunicipalityRegistry::builtin());
    let providers = climarisk_providers::build_providers(&config, cache, resolver).unwrap();
    let calc = RiskCalculator::new(&config, providers).unwrap();

    let risk = calc
        .calculate_location_risk(SP.0, SP.1, RiskScenario::Moderate, None, None)
        .unwrap();
    let flood = risk.hazard(HazardType::Flood).unwrap();
    assert!(flood.has_source("hydrological"));
    assert!(flood.has_source("occurrence_history"));
    assert!(flood.has_source("climate_projection"));
    let heat = risk.hazard(HazardType::HeatStress).unwrap();
    assert!(!heat.has_source("occurrence_history"));
    assert!(!risk.degraded);
}

// ── Projection horizons ──────────────────────────────────────────────────

#[test]
fn failed_near_horizon_skips_mid_horizon_call() {
    let projection = Arc::new(test_fixtures::failing_provider("projection", ProviderRole::Projection));
    let mut config = test_fixtures::test_config();
    config.calculator.hazards = vec![HazardType::Flood];
    let calc = RiskCalculator::new(&config, vec![projection.clone() as Arc<dyn IHazardProvider>]).unwrap();
    let risk = calc
        .calculate_location_risk(SP.0, SP.1, RiskScenario::Moderate, None, None)
        .unwrap();
    assert_eq!(projection.calls(), 1);
    assert!(risk.hazard(HazardType::Flood).unwrap().has_source(SOURCE_SCENARIO_MULTIPLIER));
}
