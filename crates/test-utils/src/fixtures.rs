//! Common test fixtures for footprint tests.
//!
//! Expected coordinates were computed independently from the closed-form
//! sinusoidal inverse and rounded to 6 decimals.

/// Well-known tile positions as (h, v).
pub mod tiles {
    /// Southern United States, 30-40°N and roughly 104-81°W
    pub const H10V05: (u32, u32) = (10, 5);

    /// Touches the equator and the prime meridian at its NW corner
    pub const H18V09: (u32, u32) = (18, 9);

    /// Northwest corner of the grid
    pub const H00V00: (u32, u32) = (0, 0);

    /// Southeast corner of the grid
    pub const H35V17: (u32, u32) = (35, 17);

    /// Just outside the grid
    pub const OUT_OF_GRID: (u32, u32) = (36, 18);
}

/// Expected corners of tile h10v05 as (lon, lat), NW, NE, SE, SW.
///
/// Independent of resolution since corners sit on the tile edges.
pub const H10V05_CORNERS: [(f64, f64); 4] = [
    (-104.432583, 40.0),
    (-91.37851, 40.0),
    (-80.829038, 30.0),
    (-92.376043, 30.0),
];

/// Outer corners of the 2x2 pixel block at row 100, col 200 of h10v05 at
/// 1200 pixels, as (lon, lat) in NW, NE, SE, SW order.
pub const H10V05_BLOCK_100_200: [(f64, f64); 4] = [
    (-101.034587, 39.166667),
    (-101.01309, 39.166667),
    (-100.989164, 39.15),
    (-101.010655, 39.15),
];

/// Typical MODIS fill values.
pub mod fill {
    /// 16-bit vegetation index fill
    pub const NDVI_I16: i16 = -3000;

    /// 16-bit LST fill
    pub const LST_U16: u16 = 0;

    /// 8-bit QA / snow fill
    pub const SNOW_U8: u8 = 255;
}
