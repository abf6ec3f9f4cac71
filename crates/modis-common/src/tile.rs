//! MODIS sinusoidal tile grid positions and resolutions.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{FootprintError, FootprintResult};

/// Number of tile columns in the global sinusoidal grid.
pub const GRID_TILES_H: u32 = 36;

/// Number of tile rows in the global sinusoidal grid.
pub const GRID_TILES_V: u32 = 18;

/// A tile position (h, v) in the MODIS sinusoidal grid.
///
/// Both indices are zero-based from the northwest origin; `h` grows
/// eastward and `v` grows southward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TilePosition {
    /// Horizontal tile index
    pub h: u32,
    /// Vertical tile index
    pub v: u32,
}

impl TilePosition {
    pub fn new(h: u32, v: u32) -> Self {
        Self { h, v }
    }

    /// Whether the position lies within the 36 x 18 grid.
    pub fn is_within_grid(&self) -> bool {
        self.h < GRID_TILES_H && self.v < GRID_TILES_V
    }

    /// Fail with `InvalidGridPosition` if outside the grid.
    pub fn validate(self) -> FootprintResult<Self> {
        if self.is_within_grid() {
            Ok(self)
        } else {
            Err(FootprintError::InvalidGridPosition {
                h: self.h,
                v: self.v,
            })
        }
    }

    /// The MODIS tile id, e.g. `h10v05`.
    pub fn tile_id(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for TilePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "h{:02}v{:02}", self.h, self.v)
    }
}

impl FromStr for TilePosition {
    type Err = TileIdParseError;

    /// Parse a tile id such as `h10v05` (case-insensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        let rest = lower
            .strip_prefix('h')
            .ok_or_else(|| TileIdParseError::InvalidFormat(s.to_string()))?;
        let (h, v) = rest
            .split_once('v')
            .ok_or_else(|| TileIdParseError::InvalidFormat(s.to_string()))?;

        let h = h
            .parse()
            .map_err(|_| TileIdParseError::InvalidNumber(h.to_string()))?;
        let v = v
            .parse()
            .map_err(|_| TileIdParseError::InvalidNumber(v.to_string()))?;

        Ok(Self { h, v })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TileIdParseError {
    #[error("Invalid tile id format: {0}. Expected 'hHHvVV'")]
    InvalidFormat(String),

    #[error("Invalid number in tile id: {0}")]
    InvalidNumber(String),
}

/// Pixels per tile edge for a MODIS product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum TileResolution {
    /// 1200 pixels, ~926 m
    Km1,
    /// 2400 pixels, ~463 m
    M500,
    /// 4800 pixels, ~232 m
    M250,
}

impl TileResolution {
    pub fn from_pixels(pixels: u32) -> FootprintResult<Self> {
        match pixels {
            1200 => Ok(Self::Km1),
            2400 => Ok(Self::M500),
            4800 => Ok(Self::M250),
            other => Err(FootprintError::InvalidResolution(other)),
        }
    }

    /// Pixels along one tile edge.
    pub fn pixels(&self) -> u32 {
        match self {
            Self::Km1 => 1200,
            Self::M500 => 2400,
            Self::M250 => 4800,
        }
    }

    /// Nominal pixel size in degrees; a tile spans 10 degrees of latitude.
    ///
    /// Conventionally used as the footprint simplification tolerance; see
    /// `FootprintConfig::with_pixel_tolerance` in the footprint crate.
    pub fn pixel_degree_size(&self) -> f64 {
        10.0 / self.pixels() as f64
    }
}

impl TryFrom<u32> for TileResolution {
    type Error = FootprintError;

    fn try_from(pixels: u32) -> Result<Self, Self::Error> {
        Self::from_pixels(pixels)
    }
}

impl From<TileResolution> for u32 {
    fn from(res: TileResolution) -> Self {
        res.pixels()
    }
}
