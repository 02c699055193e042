//! Property tests: unit-range outputs and the weighted-average invariant.

use std::sync::{Arc, OnceLock};

use proptest::prelude::*;

use climarisk_cache::InMemoryCache;
use climarisk_calculator::RiskCalculator;
use climarisk_core::config::{ClimaConfig, NoiseMode};
use climarisk_core::models::{HazardType, RiskScenario};
use climarisk_providers::{build_providers, MunicipalityRegistry};

fn reference_calculator() -> &'static RiskCalculator {
    static CALC: OnceLock<RiskCalculator> = OnceLock::new();
    CALC.get_or_init(|| {
        let mut config: ClimaConfig = test_fixtures::test_config();
        config.calculator.noise.mode = NoiseMode::LocationSeeded;
        let providers = build_providers(
            &config,
            Arc::new(InMemoryCache::new(60)),
            Arc::new(MunicipalityRegistry::builtin()),
        )
        .unwrap();
        RiskCalculator::new(&config, providers).unwrap()
    })
}

fn calculator_for(hazards: Vec<HazardType>) -> RiskCalculator {
    let mut config: ClimaConfig = test_fixtures::test_config();
    config.calculator.hazards = hazards;
    config.calculator.worker_threads = 2;
    let providers = build_providers(
        &config,
        Arc::new(InMemoryCache::new(60)),
        Arc::new(MunicipalityRegistry::builtin()),
    )
    .unwrap();
    RiskCalculator::new(&config, providers).unwrap()
}

fn hazard_subset() -> impl Strategy<Value = Vec<HazardType>> {
    proptest::sample::subsequence(HazardType::ALL.to_vec(), 1..=HazardType::ALL.len())
}

fn scenario() -> impl Strategy<Value = RiskScenario> {
    prop_oneof![
        Just(RiskScenario::Low),
        Just(RiskScenario::Moderate),
        Just(RiskScenario::High),
    ]
}

proptest! {
    #[test]
    fn every_value_in_unit_range(lat in -90.0f64..=90.0, lon in -180.0f64..=180.0, s in scenario()) {
        let risk = reference_calculator().calculate_location_risk(lat, lon, s, None, None).unwrap();
        prop_assert!((0.0..=1.0).contains(&risk.overall_risk_score));
        for h in &risk.hazards {
            for v in [h.current_risk, h.projected_2030, h.projected_2050, h.confidence] {
                prop_assert!((0.0..=1.0).contains(&v), "{:?}", h);
            }
        }
    }

    #[test]
    fn overall_is_weighted_average_of_2030(lat in -35.0f64..=5.0, lon in -75.0f64..=-30.0, s in scenario()) {
        let calc = reference_calculator();
        let risk = calc.calculate_location_risk(lat, lon, s, None, None).unwrap();
        let (sum, total) = risk.hazards.iter().fold((0.0, 0.0), |(sum, total), h| {
            let w = calc.config().weight_for(h.hazard_type);
            (sum + w * h.projected_2030, total + w)
        });
        prop_assert!((risk.overall_risk_score - sum / total).abs() < 1e-12);
    }

    #[test]
    fn identical_inputs_identical_outputs(lat in -35.0f64..=5.0, lon in -75.0f64..=-30.0, s in scenario()) {
        let calc = reference_calculator();
        let a = calc.calculate_location_risk(lat, lon, s, None, None).unwrap();
        let b = calc.calculate_location_risk(lat, lon, s, None, None).unwrap();
        prop_assert_eq!(a, b);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn weighted_average_holds_for_any_hazard_subset(
        hazards in hazard_subset(),
        lat in -35.0f64..=5.0,
        lon in -75.0f64..=-30.0,
        s in scenario(),
    ) {
        let calc = calculator_for(hazards.clone());
        let risk = calc.calculate_location_risk(lat, lon, s, None, None).unwrap();
        let present: Vec<HazardType> = risk.hazards.iter().map(|h| h.hazard_type).collect();
        prop_assert_eq!(&present, &hazards);
        let (sum, total) = risk.hazards.iter().fold((0.0, 0.0), |(sum, total), h| {
            let w = calc.config().weight_for(h.hazard_type);
            (sum + w * h.projected_2030, total + w)
        });
        prop_assert!(total > 0.0);
        prop_assert!((risk.overall_risk_score - sum / total).abs() < 1e-12);
    }
}
