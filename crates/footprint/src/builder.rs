//! Footprint computation for sinusoidal tiles.

use crate::config::FootprintConfig;
use crate::hull::{convex_hull, PixelCorner};
use crate::mask::{MaskPolicy, ValidDataMask};
use crate::raster::RasterSource;
use crate::simplify::simplify_ring;
use modis_common::{
    Footprint, FootprintError, FootprintResult, GeoPoint, ItemRecord, Product, TilePosition,
    TileResolution,
};
use projection::TileProjector;
use rayon::prelude::*;
use tracing::{debug, info, warn};

/// Which bands define the valid-data mask in raster mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BandSelection {
    /// Explicit band names, in priority order.
    Named(Vec<String>),
    /// The product's footprint bands.
    ProductDefault(Product),
}

impl BandSelection {
    pub fn named<I, S>(bands: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Named(bands.into_iter().map(Into::into).collect())
    }

    /// Band names to read under `policy`.
    ///
    /// `Representative` needs only the first band, so only that one is read.
    pub fn resolve(&self, policy: MaskPolicy) -> FootprintResult<Vec<String>> {
        let mut bands: Vec<String> = match self {
            Self::Named(names) => {
                if names.is_empty() {
                    return Err(FootprintError::invalid_config("no bands selected"));
                }
                names.clone()
            }
            Self::ProductDefault(product) => {
                if !product.supports_raster_footprint() {
                    return Err(FootprintError::UnknownProduct(format!(
                        "{} has no footprint bands",
                        product.id
                    )));
                }
                product.footprint_bands.iter().map(|b| b.to_string()).collect()
            }
        };
        if policy == MaskPolicy::Representative {
            bands.truncate(1);
        }
        Ok(bands)
    }
}

/// Computes tile footprints. Holds only configuration, so one builder can be
/// shared across threads.
#[derive(Debug, Clone, Default)]
pub struct FootprintBuilder {
    config: FootprintConfig,
}

impl FootprintBuilder {
    /// Create a builder, rejecting an invalid configuration.
    pub fn new(config: FootprintConfig) -> FootprintResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &FootprintConfig {
        &self.config
    }

    fn projector(
        &self,
        tile: TilePosition,
        resolution: TileResolution,
    ) -> FootprintResult<TileProjector> {
        let tile = if self.config.validate_grid {
            tile.validate()?
        } else {
            tile
        };
        Ok(TileProjector::new(tile, resolution).with_precision(self.config.precision))
    }

    /// Footprint covering the whole tile: its four projected corners.
    pub fn full_tile(
        &self,
        tile: TilePosition,
        resolution: TileResolution,
    ) -> FootprintResult<Footprint> {
        let projector = self.projector(tile, resolution)?;
        let footprint = Footprint::from_ring(projector.corners().to_vec())?;

        debug!(
            tile = %tile,
            pixels = resolution.pixels(),
            bbox = ?footprint.bbox().to_array(),
            "Computed full-tile footprint"
        );

        Ok(footprint)
    }

    /// Full-tile footprints for many tiles, computed in parallel.
    ///
    /// Results are in input order; each tile succeeds or fails on its own.
    pub fn full_tile_batch(
        &self,
        tiles: &[TilePosition],
        resolution: TileResolution,
    ) -> Vec<FootprintResult<Footprint>> {
        tiles
            .par_iter()
            .map(|&tile| self.full_tile(tile, resolution))
            .collect()
    }

    /// Footprint of the pixels that actually hold data.
    ///
    /// Reads the selected bands from `source`, builds the valid-data mask and
    /// returns the projected convex hull of the valid pixels. Fails with
    /// [`FootprintError::EmptyFootprint`] when no pixel is valid.
    pub fn raster_footprint<S: RasterSource + ?Sized>(
        &self,
        tile: TilePosition,
        resolution: TileResolution,
        source: &S,
        selection: &BandSelection,
    ) -> FootprintResult<Footprint> {
        let projector = self.projector(tile, resolution)?;
        let policy = self.config.mask_policy;
        let n = resolution.pixels() as usize;

        let mut masks = Vec::new();
        for name in selection.resolve(policy)? {
            let band = source.read_band(&name)?;
            if band.width != n || band.height != n {
                return Err(FootprintError::read_failure(format!(
                    "band '{}' is {}x{}, tile {} at this resolution is {}x{}",
                    band.name, band.width, band.height, tile, n, n
                )));
            }
            masks.push(ValidDataMask::from_raster(&band)?);
        }

        let mask = policy
            .combine(masks)?
            .ok_or_else(|| FootprintError::invalid_config("no bands selected"))?;

        if mask.is_empty() {
            warn!(tile = %tile, policy = %policy, "No valid pixels in raster");
            return Err(FootprintError::EmptyFootprint);
        }

        let footprint = self.hull_footprint(&projector, &mask)?;

        debug!(
            tile = %tile,
            valid_pixels = mask.valid_count(),
            vertices = footprint.vertex_count(),
            "Computed raster footprint"
        );

        Ok(footprint)
    }

    /// Project the convex hull of a mask's valid pixels.
    pub fn hull_footprint(
        &self,
        projector: &TileProjector,
        mask: &ValidDataMask,
    ) -> FootprintResult<Footprint> {
        let hull = convex_hull(&mask.boundary_corners());
        if hull.len() < 3 {
            warn!(vertices = hull.len(), "Degenerate hull");
            return Err(FootprintError::degenerate(format!(
                "hull has {} vertices",
                hull.len()
            )));
        }

        let ring: Vec<GeoPoint> = hull
            .iter()
            .map(|&PixelCorner { row, col }| projector.pixel_to_geographic(row as f64, col as f64))
            .collect();

        let footprint = Footprint::from_ring(ring).map_err(|e| {
            warn!(tile = %projector.tile(), error = %e, "Projected hull is degenerate");
            e
        })?;

        match self.config.simplify_tolerance {
            Some(tolerance) => Footprint::from_ring(simplify_ring(footprint.ring(), tolerance)),
            None => Ok(footprint),
        }
    }

    /// Replace an item's geometry, bbox and projection properties.
    pub fn update_item(
        &self,
        item: &mut ItemRecord,
        footprint: Footprint,
        tile: TilePosition,
        resolution: TileResolution,
    ) {
        let reference = TileProjector::new(tile, resolution).spatial_reference();
        info!(
            item = %item.id,
            tile = %tile,
            vertices = footprint.vertex_count(),
            "Updated item footprint"
        );
        item.set_footprint(footprint);
        item.set_spatial_reference(&reference);
    }

    /// Compute the full-tile footprint and attach it to `item`.
    pub fn apply_full_tile(
        &self,
        item: &mut ItemRecord,
        tile: TilePosition,
        resolution: TileResolution,
    ) -> FootprintResult<()> {
        let footprint = self.full_tile(tile, resolution)?;
        self.update_item(item, footprint, tile, resolution);
        Ok(())
    }

    /// Compute the raster footprint and attach it to `item`.
    ///
    /// On error the item is left as it was.
    pub fn apply_raster_footprint<S: RasterSource + ?Sized>(
        &self,
        item: &mut ItemRecord,
        tile: TilePosition,
        resolution: TileResolution,
        source: &S,
        selection: &BandSelection,
    ) -> FootprintResult<()> {
        let footprint = self.raster_footprint(tile, resolution, source, selection)?;
        self.update_item(item, footprint, tile, resolution);
        Ok(())
    }
}
