//! Coordinate validation and great-circle helpers.

use crate::constants::{EARTH_RADIUS_KM, LATITUDE_RANGE, LONGITUDE_RANGE};
use crate::errors::{ClimaError, ClimaResult};

/// Reject NaN and out-of-range coordinates.
pub fn validate_coordinates(latitude: f64, longitude: f64) -> ClimaResult<()> {
    let lat_ok = (LATITUDE_RANGE.0..=LATITUDE_RANGE.1).contains(&latitude);
    let lon_ok = (LONGITUDE_RANGE.0..=LONGITUDE_RANGE.1).contains(&longitude);
    if lat_ok && lon_ok {
        Ok(())
    } else {
        Err(ClimaError::InvalidCoordinates {
            latitude,
            longitude,
        })
    }
}

/// Great-circle distance between two points (km).
pub fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let phi1 = lat1.to_radians();
    let phi2 = lat2.to_radians();
    let d_phi = (lat2 - lat1).to_radians();
    let d_lambda = (lon2 - lon1).to_radians();

    let a = (d_phi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_KM * c
}

/// Round to `places` decimals.
pub fn round_to(value: f64, places: u32) -> f64 {
    let factor = 10f64.powi(places as i32);
    (value * factor).round() / factor
}

/// Clamp into [0, 1], mapping NaN to 0.
pub fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}
