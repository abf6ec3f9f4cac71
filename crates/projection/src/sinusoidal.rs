//! MODIS sinusoidal grid projection.
//!
//! The MODIS land products are tiled on an equal-area sinusoidal projection
//! of a sphere. The projected plane is cut into 36 x 18 square tiles of
//! `TILE_METERS` on a side, indexed (h, v) from the northwest corner.
//!
//! Grid parameters come from Appendix 2, Section 13.1 of the MODIS Burned
//! Area Collection 5.1 User Guide, given to 12 significant digits so that
//! tile corners keep millimetre precision at the grid extremities.
//!
//! The inverse projection is closed form:
//!
//! ```text
//! lat = y / R
//! lon = x / (R * cos(lat))
//! ```
//!
//! It loses precision towards the poles where `cos(lat)` approaches zero.
//! MODIS tiles never reach the poles, so this is accepted.

use modis_common::{
    round_coordinate, GeoPoint, SpatialReference, TilePosition, TileResolution, PRECISION,
};

/// Radius of the projection sphere (meters).
pub const SPHERE_RADIUS: f64 = 6371007.18100;

/// Edge length of one tile (meters).
pub const TILE_METERS: f64 = 1111950.51977;

/// X coordinate of the grid's western edge (meters).
pub const GRID_X_MIN: f64 = -20015109.3558;

/// Y coordinate of the grid's northern edge (meters).
pub const GRID_Y_MAX: f64 = 10007554.6779;

/// WKT2 description of the MODIS sinusoidal CRS.
pub const SINUSOIDAL_WKT2: &str = concat!(
    r#"PROJCRS["MODIS Sinusoidal","#,
    r#"BASEGEOGCRS["Unknown datum based upon the custom spheroid","#,
    r#"DATUM["Not specified (based on custom spheroid)","#,
    r#"ELLIPSOID["Custom spheroid",6371007.181,0,LENGTHUNIT["metre",1]]],"#,
    r#"PRIMEM["Greenwich",0,ANGLEUNIT["degree",0.0174532925199433]]],"#,
    r#"CONVERSION["unnamed",METHOD["Sinusoidal"],"#,
    r#"PARAMETER["Longitude of natural origin",0,ANGLEUNIT["degree",0.0174532925199433]],"#,
    r#"PARAMETER["False easting",0,LENGTHUNIT["metre",1]],"#,
    r#"PARAMETER["False northing",0,LENGTHUNIT["metre",1]]],"#,
    r#"CS[Cartesian,2],"#,
    r#"AXIS["easting",east,ORDER[1],LENGTHUNIT["metre",1]],"#,
    r#"AXIS["northing",north,ORDER[2],LENGTHUNIT["metre",1]]]"#,
);

/// A point on the sinusoidal plane in meters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SinusoidalPoint {
    pub x: f64,
    pub y: f64,
}

impl SinusoidalPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Northwest corner of a tile.
///
/// Indices are not checked against the grid extent; positions outside it
/// yield points off the projected globe.
#[inline]
pub fn tile_origin(tile: TilePosition) -> SinusoidalPoint {
    SinusoidalPoint {
        x: GRID_X_MIN + tile.h as f64 * TILE_METERS,
        y: GRID_Y_MAX - tile.v as f64 * TILE_METERS,
    }
}

/// Size of one pixel in meters for the given resolution.
#[inline]
pub fn pixel_size_meters(resolution: TileResolution) -> f64 {
    TILE_METERS / resolution.pixels() as f64
}

/// Offset a tile origin by (row, col) pixels. Rows run south, columns east.
#[inline]
pub fn pixel_to_sinusoidal(
    tile_origin: SinusoidalPoint,
    row: f64,
    col: f64,
    pixel_size_meters: f64,
) -> SinusoidalPoint {
    SinusoidalPoint {
        x: tile_origin.x + col * pixel_size_meters,
        y: tile_origin.y - row * pixel_size_meters,
    }
}

/// Inverse projection to degrees, rounded to [`PRECISION`] decimals.
pub fn sinusoidal_to_geographic(point: SinusoidalPoint) -> GeoPoint {
    sinusoidal_to_geographic_with_precision(point, PRECISION)
}

/// Inverse projection rounded to `precision` decimals.
pub fn sinusoidal_to_geographic_with_precision(point: SinusoidalPoint, precision: u32) -> GeoPoint {
    let lat = point.y / SPHERE_RADIUS;
    let lon = point.x / (SPHERE_RADIUS * lat.cos());
    GeoPoint {
        lon: round_coordinate(lon.to_degrees(), precision),
        lat: round_coordinate(lat.to_degrees(), precision),
    }
}

/// Forward projection from degrees to the sinusoidal plane.
pub fn geographic_to_sinusoidal(point: GeoPoint) -> SinusoidalPoint {
    let lat = point.lat.to_radians();
    let lon = point.lon.to_radians();
    SinusoidalPoint {
        x: SPHERE_RADIUS * lon * lat.cos(),
        y: SPHERE_RADIUS * lat,
    }
}

/// Projector bound to one tile at one resolution.
#[derive(Debug, Clone, Copy)]
pub struct TileProjector {
    tile: TilePosition,
    resolution: TileResolution,
    origin: SinusoidalPoint,
    pixel_size: f64,
    precision: u32,
}

impl TileProjector {
    pub fn new(tile: TilePosition, resolution: TileResolution) -> Self {
        Self {
            tile,
            resolution,
            origin: tile_origin(tile),
            pixel_size: pixel_size_meters(resolution),
            precision: PRECISION,
        }
    }

    /// Override the output precision (decimal digits).
    pub fn with_precision(mut self, precision: u32) -> Self {
        self.precision = precision;
        self
    }

    pub fn tile(&self) -> TilePosition {
        self.tile
    }

    pub fn resolution(&self) -> TileResolution {
        self.resolution
    }

    pub fn origin(&self) -> SinusoidalPoint {
        self.origin
    }

    pub fn pixel_size(&self) -> f64 {
        self.pixel_size
    }

    #[inline]
    pub fn pixel_to_sinusoidal(&self, row: f64, col: f64) -> SinusoidalPoint {
        pixel_to_sinusoidal(self.origin, row, col, self.pixel_size)
    }

    /// Geographic position of a pixel corner.
    #[inline]
    pub fn pixel_to_geographic(&self, row: f64, col: f64) -> GeoPoint {
        sinusoidal_to_geographic_with_precision(self.pixel_to_sinusoidal(row, col), self.precision)
    }

    /// Tile corners in NW, NE, SE, SW order.
    pub fn corners(&self) -> [GeoPoint; 4] {
        let n = self.resolution.pixels() as f64;
        [
            self.pixel_to_geographic(0.0, 0.0),
            self.pixel_to_geographic(0.0, n),
            self.pixel_to_geographic(n, n),
            self.pixel_to_geographic(n, 0.0),
        ]
    }

    /// GDAL-ordered affine transform `[px, 0, x0, 0, -px, y0]`.
    pub fn affine_transform(&self) -> [f64; 6] {
        [
            self.pixel_size,
            0.0,
            self.origin.x,
            0.0,
            -self.pixel_size,
            self.origin.y,
        ]
    }

    /// Projection fields for an item derived from this tile.
    pub fn spatial_reference(&self) -> SpatialReference {
        let n = self.resolution.pixels();
        SpatialReference {
            shape: [n, n],
            transform: self.affine_transform(),
            wkt2: SINUSOIDAL_WKT2.to_string(),
        }
    }
}
