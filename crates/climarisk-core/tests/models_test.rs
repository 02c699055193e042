use std::collections::BTreeMap;

use climarisk_core::models::*;

fn result(hazard: HazardType, p2030: f64, source: &str) -> HazardResult {
    HazardResult {
        hazard_type: hazard,
        current_risk: p2030,
        projected_2030: p2030,
        projected_2050: p2030,
        confidence: 0.5,
        data_source: source.to_string(),
        raw_value: None,
        unit: None,
    }
}

#[test]
fn hazard_type_parses_aliases_and_round_trips_display() {
    for hazard in HazardType::ALL {
        assert_eq!(hazard.as_str().parse::<HazardType>().unwrap(), hazard);
    }
    assert_eq!("heat".parse::<HazardType>().unwrap(), HazardType::HeatStress);
    assert!("volcano".parse::<HazardType>().is_err());
}

#[test]
fn scenario_parsing_and_ordering() {
    assert_eq!("RCP8.5".parse::<RiskScenario>().unwrap(), RiskScenario::High);
    assert_eq!("ssp1-2.6".parse::<RiskScenario>().unwrap(), RiskScenario::Low);
    assert_eq!(" Moderate ".parse::<RiskScenario>().unwrap(), RiskScenario::Moderate);
    let err = "extreme".parse::<RiskScenario>().unwrap_err();
    assert!(err.is_validation());
    assert!(RiskScenario::Low < RiskScenario::Moderate);
    assert!(RiskScenario::Moderate < RiskScenario::High);
    assert_eq!(RiskScenario::default(), RiskScenario::Moderate);
}

#[test]
fn hazard_result_source_tags() {
    let r = result(HazardType::Flood, 0.4, "geographic-heuristic+scenario-multiplier");
    assert!(r.has_source("geographic-heuristic"));
    assert!(r.has_source("scenario-multiplier"));
    assert!(!r.has_source("geographic"));
}

#[test]
fn location_risk_lookup_and_mean() {
    let risk = LocationRisk {
        latitude: -23.5505,
        longitude: -46.6333,
        location_id: Some("3550308".into()),
        location_name: Some("São Paulo".into()),
        scenario: RiskScenario::Moderate,
        hazards: vec![
            result(HazardType::Flood, 0.4, "a"),
            result(HazardType::Drought, 0.6, "a"),
        ],
        overall_risk_score: 0.48,
        degraded: false,
        vulnerability: None,
    };
    assert_eq!(risk.hazard(HazardType::Drought).unwrap().projected_2030, 0.6);
    assert!(risk.hazard(HazardType::Landslide).is_none());
    assert!((risk.mean_projected_2030().unwrap() - 0.5).abs() < 1e-12);
}

#[test]
fn location_risk_serializes_snake_case() {
    let risk = LocationRisk {
        latitude: 0.0,
        longitude: 0.0,
        location_id: None,
        location_name: None,
        scenario: RiskScenario::High,
        hazards: vec![result(HazardType::CoastalInundation, 0.1, "a")],
        overall_risk_score: 0.1,
        degraded: true,
        vulnerability: None,
    };
    let json = serde_json::to_value(&risk).unwrap();
    assert_eq!(json["scenario"], "high");
    assert_eq!(json["hazards"][0]["hazard_type"], "coastal_inundation");
    assert!(json.get("location_id").is_none());
    assert!(json.get("vulnerability").is_none());
}

#[test]
fn cell_breakdown_keys_serialize_as_names() {
    let mut breakdown = BTreeMap::new();
    breakdown.insert(HazardType::HeatStress, 0.7);
    let cell = H3Cell {
        cell_index: "87a8100c6ffffff".into(),
        resolution: 7,
        center_lat: -23.5,
        center_lng: -46.6,
        risk_score: 0.7,
        hazard_breakdown: breakdown,
        area_km2: 5.16,
    };
    let json = serde_json::to_value(&cell).unwrap();
    assert_eq!(json["hazard_breakdown"]["heat_stress"], 0.7);
}

#[test]
fn cache_stats_hit_rate() {
    let stats = CacheStats::new("memory", 3, 3, 1);
    assert_eq!(stats.total_requests(), 4);
    assert!((stats.hit_rate - 0.75).abs() < 1e-12);
    assert_eq!(CacheStats::new("memory", 0, 0, 0).hit_rate, 0.0);
}

#[test]
fn health_report_flags_open_circuits() {
    let report = HealthReport {
        providers: vec![ProviderHealth {
            provider: "climate".into(),
            state: CircuitState::Open,
            consecutive_failures: 3,
        }],
        cache: CacheStats::default(),
        active_degradations: 0,
        degraded_components: vec![],
        recent_degradations: vec![],
    };
    assert!(!report.is_healthy());
}
