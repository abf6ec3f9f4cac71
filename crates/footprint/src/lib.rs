//! Geographic footprints for MODIS sinusoidal tiles.
//!
//! A footprint is the polygon a tile's imagery covers on the globe. Two
//! modes are supported:
//!
//! - **Full tile**: the tile's four projected corners.
//! - **Raster**: the convex hull of pixels holding real data, for tiles
//!   that are only partly covered by a granule.
//!
//! # Architecture
//!
//! ```text
//! FootprintBuilder::raster_footprint(tile, resolution, source, selection)
//!      │
//!      ├─► BandSelection::resolve(policy) ─► band names
//!      │
//!      ├─► RasterSource::read_band(name) for each band
//!      │
//!      ├─► ValidDataMask per band, merged by MaskPolicy
//!      │         │
//!      │         └─► empty: EmptyFootprint
//!      │
//!      ├─► boundary_corners() ─► convex_hull()
//!      │
//!      ├─► TileProjector::pixel_to_geographic for each hull vertex
//!      │
//!      └─► Footprint::from_ring (+ optional simplification)
//! ```
//!
//! # Example
//!
//! ```ignore
//! use footprint::{BandSelection, FootprintBuilder, FootprintConfig, RawBandDirectory};
//! use modis_common::{ItemRecord, Product, TilePosition};
//!
//! let product = Product::parse("MOD13Q1")?;
//! let builder = FootprintBuilder::new(FootprintConfig::from_env())?;
//! let source = RawBandDirectory::new("/data/MOD13Q1.A2020001.h10v05");
//!
//! let mut item = ItemRecord::new("MOD13Q1.A2020001.h10v05");
//! builder.apply_raster_footprint(
//!     &mut item,
//!     TilePosition::new(10, 5),
//!     product.resolution,
//!     &source,
//!     &BandSelection::ProductDefault(product.clone()),
//! )?;
//! ```

pub mod builder;
pub mod config;
pub mod hull;
pub mod mask;
pub mod raster;
pub mod simplify;

// Re-export commonly used types at crate root
pub use builder::{BandSelection, FootprintBuilder};
pub use config::FootprintConfig;
pub use hull::{convex_hull, polygon_area, PixelCorner};
pub use mask::{MaskPolicy, ValidDataMask};
pub use raster::{
    BandData, MemorySource, RasterBand, RasterSource, RawBandDirectory, RawBandHeader, SampleType,
};
pub use simplify::simplify_ring;
