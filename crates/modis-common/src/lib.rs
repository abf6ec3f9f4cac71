//! Common types shared across the MODIS footprint crates.

pub mod bbox;
pub mod error;
pub mod geometry;
pub mod item;
pub mod product;
pub mod tile;

pub use bbox::BoundingBox;
pub use error::{FootprintError, FootprintResult};
pub use geometry::{round_coordinate, Footprint, GeoPoint, PolygonGeometry, PRECISION};
pub use item::{ItemRecord, SpatialReference};
pub use product::Product;
pub use tile::{TileIdParseError, TilePosition, TileResolution};
