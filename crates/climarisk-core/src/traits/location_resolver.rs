use crate::errors::ClimaResult;
use crate::models::ResolvedLocation;

/// Resolves location identifiers (e.g. municipality codes) to coordinates.
pub trait ILocationResolver: Send + Sync {
    /// Resolve an identifier. Unknown ids fail with `ClimaError::LocationNotFound`.
    fn resolve(&self, location_id: &str) -> ClimaResult<ResolvedLocation>;

    /// Nearest known location within `max_km`, if any.
    fn nearest(&self, _latitude: f64, _longitude: f64, _max_km: f64) -> Option<ResolvedLocation> {
        None
    }
}
