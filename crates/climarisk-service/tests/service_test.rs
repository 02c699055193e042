//! End-to-end tests through the bootstrapped service.

use std::sync::Arc;

use climarisk_cache::InMemoryCache;
use climarisk_core::config::{CacheBackendKind, ClimaConfig};
use climarisk_core::models::{HazardType, RiskScenario};
use climarisk_providers::MunicipalityRegistry;
use climarisk_service::{GridExport, GridFormat, GridMode, GridRequest, RiskService, ServiceOptions};

const SP: (f64, f64) = (-23.5505, -46.6333);

fn service() -> RiskService {
    RiskService::bootstrap(test_fixtures::test_config()).unwrap()
}

// ── Location and municipality queries ────────────────────────────────────

#[test]
fn location_risk_with_reference_providers() {
    let svc = service();
    let risk = svc.get_location_risk(SP.0, SP.1, RiskScenario::Moderate).unwrap();
    assert_eq!(risk.hazards.len(), HazardType::ALL.len());
    assert!(!risk.degraded);
    assert!((0.0..=1.0).contains(&risk.overall_risk_score));
    let flood = risk.hazard(HazardType::Flood).unwrap();
    assert!(flood.has_source("history"));
    assert!(flood.has_source("projection"));
}

#[test]
fn municipal_risk_resolves_registry() {
    let svc = service();
    let risk = svc.get_municipal_risk("3106200", RiskScenario::High).unwrap();
    assert_eq!(risk.location_id.as_deref(), Some("3106200"));
    assert_eq!(risk.location_name.as_deref(), Some("Belo Horizonte"));
    assert_eq!(risk.scenario, RiskScenario::High);
    assert!(risk.vulnerability.is_none());
}

#[test]
fn municipal_risk_includes_vulnerability_profile() {
    let risk = service().get_municipal_risk("1501402", RiskScenario::Moderate).unwrap();
    let json = serde_json::to_value(&risk).unwrap();
    assert_eq!(json["vulnerability"]["critical_infrastructure_count"], 120);
    assert_eq!(json["vulnerability"]["vulnerable_population_pct"], 0.48);
}

#[test]
fn unknown_municipality_is_not_found() {
    let err = service().get_municipal_risk("0000000", RiskScenario::Moderate).unwrap_err();
    assert!(err.is_not_found());
}

#[test]
fn invalid_coordinates_rejected() {
    let err = service().get_location_risk(91.0, 0.0, RiskScenario::Low).unwrap_err();
    assert!(err.is_validation());
}

// ── Grid queries ─────────────────────────────────────────────────────────

#[test]
fn full_grid_as_geojson() {
    let svc = service();
    let export = svc.get_risk_grid(&GridRequest::new(SP.0, SP.1, 3.0)).unwrap();
    let GridExport::GeoJson(fc) = export else {
        panic!("expected GeoJSON");
    };
    assert!(!fc.features.is_empty());
    for feature in &fc.features {
        let ring = &feature.geometry.coordinates[0];
        assert_eq!(ring.first(), ring.last());
        assert!(feature.properties.contains_key("risk_score"));
        assert!(feature.properties.contains_key("area_km2"));
        assert!(feature.properties.contains_key("flood"));
    }
}

#[test]
fn decay_grid_as_heatmap() {
    let svc = service();
    let request = GridRequest::new(SP.0, SP.1, 5.0)
        .resolution(8)
        .mode(GridMode::Decay)
        .format(GridFormat::Heatmap { hazard: Some(HazardType::Flood) });
    let center = svc.get_location_risk(SP.0, SP.1, RiskScenario::Moderate).unwrap();
    let flood_2030 = center.hazard(HazardType::Flood).unwrap().projected_2030;

    let GridExport::Heatmap(map) = svc.get_risk_grid(&request).unwrap() else {
        panic!("expected heatmap");
    };
    assert!(map.len() > 1);
    for (index, score) in &map {
        assert_eq!(index.len(), 15);
        assert!(*score <= flood_2030 + 1e-3);
    }
}

#[test]
fn grid_resolution_out_of_range() {
    let err = service()
        .get_risk_grid(&GridRequest::new(SP.0, SP.1, 2.0).resolution(15))
        .unwrap_err();
    assert!(err.is_validation());
}

// ── Health and cache ─────────────────────────────────────────────────────

#[test]
fn healthy_after_reference_queries() {
    let svc = service();
    svc.get_location_risk(SP.0, SP.1, RiskScenario::Moderate).unwrap();
    let health = svc.health().unwrap();
    assert_eq!(health.providers.len(), 3);
    assert!(health.is_healthy());
    assert!(health.degraded_components.is_empty());
    assert_eq!(health.cache.backend, "memory");
    assert!(health.cache.entries > 0);
}

#[cfg(not(feature = "live"))]
#[test]
fn live_mode_without_transport_degrades() {
    let toml = r#"
        [resilience]
        max_attempts = 1
        initial_delay_ms = 0
        jitter = false
        failure_threshold = 1

        [providers.climate_projection]
        mode = "live"
        [providers.hydrological]
        mode = "live"
        [providers.occurrence_history]
        mode = "live"
    "#;
    let svc = RiskService::from_options(ServiceOptions {
        config_toml: Some(toml.to_string()),
        ..ServiceOptions::default()
    })
    .unwrap();

    let risk = svc.get_location_risk(SP.0, SP.1, RiskScenario::Moderate).unwrap();
    assert!(risk.degraded);
    assert!(risk.hazards.iter().all(|h| !h.has_source("history")));

    let health = svc.health().unwrap();
    assert!(!health.is_healthy());
    assert!(health.active_degradations > 0);
    assert!(!health.recent_degradations.is_empty());
    assert_eq!(health.degraded_components.len(), 3);
    for component in &health.degraded_components {
        assert!(component.recent_failures >= 1, "{}", component.component);
        assert!(component.degraded_for_secs >= 0);
    }
}

#[test]
fn sqlite_backend_shares_results() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = test_fixtures::test_config();
    config.cache.backend = CacheBackendKind::Sqlite;
    config.cache.sqlite_path = dir.path().join("cache.db").to_string_lossy().into_owned();

    let first = RiskService::bootstrap(config.clone()).unwrap();
    let a = first.get_location_risk(SP.0, SP.1, RiskScenario::Low).unwrap();

    let second = RiskService::bootstrap(config).unwrap();
    assert!(second.health().unwrap().cache.entries > 0);
    let b = second.get_location_risk(SP.0, SP.1, RiskScenario::Low).unwrap();
    assert_eq!(a.overall_risk_score, b.overall_risk_score);
    assert_eq!(second.health().unwrap().cache.backend, "sqlite");
}

#[test]
fn from_parts_with_scripted_providers() {
    let config = test_fixtures::test_config();
    let cache = Arc::new(InMemoryCache::new(config.cache.default_ttl_secs));
    let resolver = Arc::new(MunicipalityRegistry::builtin());
    let failing = test_fixtures::all_failing_provider_set();
    let svc = RiskService::from_parts(config, cache, resolver, test_fixtures::as_dyn(&failing)).unwrap();

    let risk = svc.get_location_risk(SP.0, SP.1, RiskScenario::Moderate).unwrap();
    assert!(risk.degraded);
    assert!(failing.iter().all(|p| p.calls() > 0));
    assert_eq!(svc.sweep_cache().unwrap(), 0);
}

#[test]
fn invalid_toml_rejected() {
    let err = RiskService::from_options(ServiceOptions {
        config_toml: Some("[calculator]\nworker_threads = 0".to_string()),
        ..ServiceOptions::default()
    })
    .err()
    .unwrap();
    assert!(err.to_string().contains("worker_threads"));
}

#[test]
fn default_config_is_valid() {
    assert!(ClimaConfig::default().validate().is_ok());
}
