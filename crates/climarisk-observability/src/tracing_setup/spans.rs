//! Span definitions per operation: risk calculation, grid generation, provider calls.

/// Create a location risk span.
#[macro_export]
macro_rules! risk_span {
    ($lat:expr, $lon:expr, $scenario:expr) => {
        tracing::info_span!("climarisk.risk", latitude = $lat, longitude = $lon, scenario = %$scenario)
    };
}

/// Create a grid generation span.
#[macro_export]
macro_rules! grid_span {
    ($mode:expr, $resolution:expr) => {
        tracing::info_span!("climarisk.grid", mode = %$mode, resolution = $resolution)
    };
}

/// Create a provider call span.
#[macro_export]
macro_rules! provider_span {
    ($provider:expr, $hazard:expr) => {
        tracing::debug_span!("climarisk.provider", provider = %$provider, hazard = %$hazard)
    };
}

/// Span names as constants for programmatic use.
pub mod names {
    pub const RISK: &str = "climarisk.risk";
    pub const GRID: &str = "climarisk.grid";
    pub const PROVIDER: &str = "climarisk.provider";
}
