use climarisk_cache::{CacheKey, InMemoryCache};
use climarisk_core::models::{HazardType, RiskScenario};
use climarisk_core::traits::ICacheBackend;
use proptest::prelude::*;
use serde_json::json;

// ── Key determinism ──────────────────────────────────────────────────────

proptest! {
    #[test]
    fn key_is_deterministic(lat in -90.0f64..90.0, lon in -180.0f64..180.0, year in 2020u16..2100) {
        let a = CacheKey::provider_signal("p", HazardType::Flood, lat, lon, RiskScenario::Low, year, 4);
        let b = CacheKey::provider_signal("p", HazardType::Flood, lat, lon, RiskScenario::Low, year, 4);
        prop_assert_eq!(a, b);
    }

    #[test]
    fn sub_precision_jitter_shares_key(lat in -80.0f64..80.0, lon in -170.0f64..170.0) {
        // Snap to the grid centre so a tiny offset cannot cross a rounding boundary.
        let lat = (lat * 1e4).round() / 1e4;
        let lon = (lon * 1e4).round() / 1e4;
        let a = CacheKey::location_risk(lat, lon, RiskScenario::High, &HazardType::ALL, 4);
        let b = CacheKey::location_risk(lat + 1e-6, lon - 1e-6, RiskScenario::High, &HazardType::ALL, 4);
        prop_assert_eq!(a, b);
    }
}

// ── Backend contract ─────────────────────────────────────────────────────

proptest! {
    #[test]
    fn last_write_wins(values in proptest::collection::vec(0i64..1000, 1..20)) {
        let cache = InMemoryCache::new(60);
        for v in &values {
            cache.set("k", json!(v), None, "t").unwrap();
        }
        let last = values.last().copied().unwrap();
        prop_assert_eq!(cache.get("k").unwrap(), Some(json!(last)));
        prop_assert_eq!(cache.stats().unwrap().entries, 1);
    }
}
