/// climarisk system version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Mean Earth radius used by the haversine formula (km).
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Near-term projection horizon.
pub const HORIZON_NEAR: u16 = 2030;

/// Mid-century projection horizon.
pub const HORIZON_MID: u16 = 2050;

/// Reference year projection deltas are measured against.
pub const PROJECTION_REFERENCE_YEAR: u16 = 2020;

/// Valid latitude range (degrees).
pub const LATITUDE_RANGE: (f64, f64) = (-90.0, 90.0);

/// Valid longitude range (degrees).
pub const LONGITUDE_RANGE: (f64, f64) = (-180.0, 180.0);

/// Tag recorded on every result derived from the regional baseline.
pub const SOURCE_GEOGRAPHIC: &str = "geographic-heuristic";

/// Tag recorded when projections fall back to the static multiplier table.
pub const SOURCE_SCENARIO_MULTIPLIER: &str = "scenario-multiplier";
