//! Configuration for footprint computation.

use crate::mask::MaskPolicy;
use modis_common::{FootprintError, FootprintResult, TileResolution, PRECISION};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Largest precision accepted; beyond this rounding is below f64 resolution
/// for MODIS coordinates.
const MAX_PRECISION: u32 = 12;

/// Configuration for the footprint builder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FootprintConfig {
    /// Decimal digits kept in output coordinates.
    pub precision: u32,

    /// Douglas-Peucker tolerance in degrees. `None` disables simplification.
    pub simplify_tolerance: Option<f64>,

    /// Reject tile positions outside the 36 x 18 grid.
    pub validate_grid: bool,

    /// How masks from several bands are merged in raster mode.
    pub mask_policy: MaskPolicy,
}

impl Default for FootprintConfig {
    fn default() -> Self {
        Self {
            precision: PRECISION,
            simplify_tolerance: None,
            validate_grid: false,
            mask_policy: MaskPolicy::Representative,
        }
    }
}

impl FootprintConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(val) = std::env::var("FOOTPRINT_PRECISION") {
            if let Ok(precision) = val.parse() {
                config.precision = precision;
            }
        }

        if let Ok(val) = std::env::var("FOOTPRINT_SIMPLIFY_TOLERANCE") {
            if let Ok(tolerance) = val.parse() {
                config.simplify_tolerance = Some(tolerance);
            }
        }

        if let Ok(val) = std::env::var("FOOTPRINT_VALIDATE_GRID") {
            config.validate_grid = val.to_lowercase() == "true" || val == "1";
        }

        if let Ok(val) = std::env::var("FOOTPRINT_MASK_POLICY") {
            match MaskPolicy::parse(&val) {
                Some(policy) => config.mask_policy = policy,
                None => warn!(
                    value = %val,
                    default = %config.mask_policy,
                    "Unrecognised FOOTPRINT_MASK_POLICY, keeping default"
                ),
            }
        }

        config
    }

    /// Validate the configuration.
    pub fn validate(&self) -> FootprintResult<()> {
        if self.precision > MAX_PRECISION {
            return Err(FootprintError::invalid_config(format!(
                "precision must be 0-{}",
                MAX_PRECISION
            )));
        }

        if let Some(tolerance) = self.simplify_tolerance {
            if !tolerance.is_finite() || tolerance <= 0.0 {
                return Err(FootprintError::invalid_config(
                    "simplify_tolerance must be a positive number",
                ));
            }
        }

        Ok(())
    }

    pub fn with_precision(mut self, precision: u32) -> Self {
        self.precision = precision;
        self
    }

    pub fn with_simplify_tolerance(mut self, tolerance: f64) -> Self {
        self.simplify_tolerance = Some(tolerance);
        self
    }

    /// Simplify with a tolerance of one pixel's angular size at `resolution`,
    /// the conventional tolerance for MODIS footprints.
    pub fn with_pixel_tolerance(self, resolution: TileResolution) -> Self {
        self.with_simplify_tolerance(resolution.pixel_degree_size())
    }

    pub fn with_validate_grid(mut self, validate: bool) -> Self {
        self.validate_grid = validate;
        self
    }

    pub fn with_mask_policy(mut self, policy: MaskPolicy) -> Self {
        self.mask_policy = policy;
        self
    }
}
