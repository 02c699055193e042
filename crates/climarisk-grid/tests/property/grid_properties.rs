//! Property tests: decay monotonicity and the radius bound.

use proptest::prelude::*;

use climarisk_core::config::GridConfig;
use climarisk_core::geo::haversine_km;
use climarisk_grid::decay::decayed_risk;
use climarisk_grid::hex::{cells_within_radius, resolution};

proptest! {
    #[test]
    fn decay_non_increasing_in_distance(
        base in 0.0f64..=1.0,
        radius in 0.5f64..50.0,
        a in 0.0f64..=1.0,
        b in 0.0f64..=1.0,
        coefficient in 0.0f64..=1.0,
    ) {
        let (near, far) = if a <= b { (a, b) } else { (b, a) };
        let r_near = decayed_risk(base, near * radius, radius, coefficient);
        let r_far = decayed_risk(base, far * radius, radius, coefficient);
        prop_assert!(r_near >= r_far);
        prop_assert!((0.0..=1.0).contains(&r_far));
    }

    #[test]
    fn radius_cells_within_bound(
        lat in -60.0f64..60.0,
        lng in -179.0f64..179.0,
        radius in 0.5f64..8.0,
        res in 6u8..=8,
    ) {
        let config = GridConfig::default();
        let r = resolution(res, &config).unwrap();
        let cells = cells_within_radius(lat, lng, radius, r, &config).unwrap();
        for c in &cells {
            prop_assert!(haversine_km(lat, lng, c.center_lat, c.center_lng) <= radius);
        }
    }
}
