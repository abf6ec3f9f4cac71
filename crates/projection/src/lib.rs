//! Coordinate transformations for the MODIS sinusoidal tile grid.
//!
//! Implements the projection from scratch without external dependencies.

pub mod sinusoidal;

pub use sinusoidal::{
    geographic_to_sinusoidal, pixel_size_meters, pixel_to_sinusoidal, sinusoidal_to_geographic,
    sinusoidal_to_geographic_with_precision, tile_origin, SinusoidalPoint, TileProjector,
    GRID_X_MIN, GRID_Y_MAX, SINUSOIDAL_WKT2, SPHERE_RADIUS, TILE_METERS,
};
