//! Error types for footprint computation.

use thiserror::Error;

/// Result type alias using FootprintError.
pub type FootprintResult<T> = Result<T, FootprintError>;

/// Errors raised while deriving a tile footprint.
///
/// No variant ever accompanies a partial geometry: a computation either
/// yields a complete ring or one of these.
#[derive(Debug, Error)]
pub enum FootprintError {
    /// Tile indices outside the 36 x 18 sinusoidal grid.
    #[error("invalid grid position h={h} v={v}")]
    InvalidGridPosition { h: u32, v: u32 },

    /// Pixels per tile edge not one of 1200, 2400, 4800.
    #[error("unsupported tile resolution: {0} pixels per edge")]
    InvalidResolution(u32),

    #[error("unknown product: {0}")]
    UnknownProduct(String),

    /// I/O or decode error reading pixel data. Not retried.
    #[error("failed to read raster data: {0}")]
    RasterReadFailure(String),

    /// I/O or encode error writing pixel data.
    #[error("failed to write raster data: {0}")]
    RasterWriteFailure(String),

    /// The valid-data mask has no set pixels.
    #[error("raster contains no valid (non-fill) pixels")]
    EmptyFootprint,

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The computed ring violates the polygon invariants.
    #[error("degenerate footprint geometry: {0}")]
    DegenerateGeometry(String),
}

impl FootprintError {
    /// Create a RasterReadFailure error.
    pub fn read_failure(msg: impl Into<String>) -> Self {
        Self::RasterReadFailure(msg.into())
    }

    /// Create a RasterWriteFailure error.
    pub fn write_failure(msg: impl Into<String>) -> Self {
        Self::RasterWriteFailure(msg.into())
    }

    /// Create an InvalidConfig error.
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Create a DegenerateGeometry error.
    pub fn degenerate(msg: impl Into<String>) -> Self {
        Self::DegenerateGeometry(msg.into())
    }

    /// True when the raster had no usable imagery, as opposed to a bad file.
    pub fn is_empty_footprint(&self) -> bool {
        matches!(self, Self::EmptyFootprint)
    }

    pub fn is_read_failure(&self) -> bool {
        matches!(self, Self::RasterReadFailure(_))
    }
}

impl From<std::io::Error> for FootprintError {
    fn from(err: std::io::Error) -> Self {
        Self::RasterReadFailure(err.to_string())
    }
}

impl From<serde_json::Error> for FootprintError {
    fn from(err: serde_json::Error) -> Self {
        Self::RasterReadFailure(format!("JSON error: {}", err))
    }
}
