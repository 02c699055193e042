//! # climarisk-grid
//!
//! Projects location risk onto H3 hexagonal cells.
//!
//! Two ways to fill a grid:
//! - full: run the risk calculator at every cell centroid (`create_*_grid`);
//! - decay: take one base risk and decay it with distance from the center
//!   (`generate_grid_from_hazard_data`, `create_decay_grid`).
//!
//! Radius coverage always filters the ring disk by true great-circle distance.

pub mod decay;
pub mod export;
pub mod hex;
pub mod mapper;

pub use decay::decayed_risk;
pub use export::{
    cells_by_risk_level, get_geojson_features, get_risk_heatmap_data, grid_stats, Feature,
    FeatureCollection, Geometry, GridStats,
};
pub use mapper::GridMapper;
