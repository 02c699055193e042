//! H3 primitives: resolution validation, ring sizing, and the
//! haversine-filtered disk used for radius coverage.

use h3o::{CellIndex, LatLng, Resolution};

use climarisk_core::config::GridConfig;
use climarisk_core::errors::{ClimaError, ClimaResult};
use climarisk_core::geo::{haversine_km, validate_coordinates};

/// A cell selected for a grid, with its centroid and distance from the center.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridCell {
    pub cell: CellIndex,
    pub center_lat: f64,
    pub center_lng: f64,
    pub distance_km: f64,
}

/// Validate `resolution` against the configured bounds.
pub fn resolution(value: u8, config: &GridConfig) -> ClimaResult<Resolution> {
    let invalid = || ClimaError::InvalidResolution {
        resolution: value,
        min: config.min_resolution,
        max: config.max_resolution,
    };
    if !(config.min_resolution..=config.max_resolution).contains(&value) {
        return Err(invalid());
    }
    Resolution::try_from(value).map_err(|_| invalid())
}

pub fn center_cell(latitude: f64, longitude: f64, resolution: Resolution) -> ClimaResult<CellIndex> {
    validate_coordinates(latitude, longitude)?;
    let ll = LatLng::new(latitude, longitude).map_err(|e| ClimaError::Grid {
        reason: format!("invalid center: {e}"),
    })?;
    Ok(ll.to_cell(resolution))
}

pub fn centroid(cell: CellIndex) -> (f64, f64) {
    let ll = LatLng::from(cell);
    (ll.lat(), ll.lng())
}

/// Minimum ring count whose span covers `radius_km`: `ceil(r / (2 * edge))`, at least 1.
pub fn rings_for_radius(radius_km: f64, edge_length_km: f64) -> u32 {
    if edge_length_km <= 0.0 || !radius_km.is_finite() {
        return 1;
    }
    let rings = (radius_km / (edge_length_km * 2.0)).ceil();
    (rings as u32).max(1)
}

/// Number of cells in a disk of `rings` rings, `None` on overflow.
pub fn disk_size(rings: u32) -> Option<usize> {
    let k = usize::try_from(rings).ok()?;
    k.checked_add(1)?
        .checked_mul(k)?
        .checked_mul(3)?
        .checked_add(1)
}

/// Reject disks larger than `config.max_cells`.
pub fn check_disk_size(rings: u32, config: &GridConfig) -> ClimaResult<()> {
    match disk_size(rings) {
        Some(size) if size <= config.max_cells => Ok(()),
        Some(size) => Err(ClimaError::invalid_parameter(
            "rings",
            format!("{rings} rings would produce {size} cells, limit is {}", config.max_cells),
        )),
        None => Err(ClimaError::invalid_parameter(
            "rings",
            format!("{rings} rings exceed the cell limit of {}", config.max_cells),
        )),
    }
}

/// Every cell within `rings` of the center, center first.
pub fn disk(center: CellIndex, rings: u32, origin: (f64, f64)) -> Vec<GridCell> {
    center
        .grid_disk::<Vec<_>>(rings)
        .into_iter()
        .map(|cell| {
            let (lat, lng) = centroid(cell);
            GridCell {
                cell,
                center_lat: lat,
                center_lng: lng,
                distance_km: haversine_km(origin.0, origin.1, lat, lng),
            }
        })
        .collect()
}

/// Cells whose centroid lies within `radius_km` of the point (great-circle).
pub fn cells_within_radius(
    latitude: f64,
    longitude: f64,
    radius_km: f64,
    resolution: Resolution,
    config: &GridConfig,
) -> ClimaResult<Vec<GridCell>> {
    if !(radius_km.is_finite() && radius_km > 0.0) {
        return Err(ClimaError::invalid_parameter("radius_km", "must be a positive number"));
    }
    let center = center_cell(latitude, longitude, resolution)?;
    let rings = rings_for_radius(radius_km, config.edge_length_km(u8::from(resolution)));
    check_disk_size(rings, config)?;
    Ok(disk(center, rings, (latitude, longitude))
        .into_iter()
        .filter(|c| c.distance_km <= radius_km)
        .collect())
}
