//! MODIS product table: tile resolution and footprint bands per collection.

use crate::error::{FootprintError, FootprintResult};
use crate::tile::TileResolution;

/// Static description of one MODIS collection.
#[derive(Debug)]
struct CollectionSpec {
    key: &'static str,
    pixels: u32,
    footprint_bands: &'static [&'static str],
}

const fn collection_spec(
    key: &'static str,
    pixels: u32,
    footprint_bands: &'static [&'static str],
) -> CollectionSpec {
    CollectionSpec {
        key,
        pixels,
        footprint_bands,
    }
}

const SURFACE_REFLECTANCE_7: &[&str] = &[
    "sur_refl_b01",
    "sur_refl_b02",
    "sur_refl_b03",
    "sur_refl_b04",
    "sur_refl_b05",
    "sur_refl_b06",
    "sur_refl_b07",
];
const SURFACE_REFLECTANCE_2: &[&str] = &["sur_refl_b01", "sur_refl_b02"];
const LAND_SURFACE_TEMPERATURE: &[&str] = &["LST_Day_1km", "LST_Night_1km", "Emis_31", "Emis_32"];
const NADIR_REFLECTANCE: &[&str] = &[
    "Nadir_Reflectance_Band1",
    "Nadir_Reflectance_Band2",
    "Nadir_Reflectance_Band3",
    "Nadir_Reflectance_Band4",
    "Nadir_Reflectance_Band5",
    "Nadir_Reflectance_Band6",
    "Nadir_Reflectance_Band7",
];

const COLLECTIONS: &[CollectionSpec] = &[
    collection_spec("09A1", 2400, SURFACE_REFLECTANCE_7),
    collection_spec("09GA", 2400, SURFACE_REFLECTANCE_7),
    collection_spec("09GQ", 4800, SURFACE_REFLECTANCE_2),
    collection_spec("09Q1", 4800, SURFACE_REFLECTANCE_2),
    collection_spec("10A1", 2400, &["NDSI_Snow_Cover", "Snow_Albedo_Daily_Tile"]),
    collection_spec("10A2", 2400, &["Maximum_Snow_Extent"]),
    collection_spec("11A1", 1200, LAND_SURFACE_TEMPERATURE),
    collection_spec("11A2", 1200, LAND_SURFACE_TEMPERATURE),
    collection_spec("12Q1", 2400, &[]),
    collection_spec("13A1", 2400, &["500m_16_days_NDVI"]),
    collection_spec("13A2", 1200, &["1km_16_days_NDVI"]),
    collection_spec("13A3", 1200, &["1km_monthly_NDVI"]),
    collection_spec("13Q1", 4800, &["250m_16_days_NDVI"]),
    collection_spec("14A1", 1200, &["FireMask"]),
    collection_spec("14A2", 1200, &["FireMask"]),
    collection_spec("15A2H", 2400, &["Fpar_500m"]),
    collection_spec("15A3H", 2400, &["Fpar_500m"]),
    collection_spec("16A3GF", 2400, &["ET_500m"]),
    collection_spec("17A2H", 2400, &["Gpp_500m"]),
    collection_spec("17A2HGF", 2400, &["Gpp_500m"]),
    collection_spec("17A3HGF", 2400, &["Gpp_500m"]),
    collection_spec("21A2", 1200, LAND_SURFACE_TEMPERATURE),
    collection_spec("43A4", 2400, NADIR_REFLECTANCE),
    collection_spec("44B", 4800, &[]),
    collection_spec("44W", 2400, &[]),
    collection_spec("64A1", 2400, &["Burn_Date"]),
];

/// A MODIS product such as `MOD13Q1` or `MCD43A4`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    /// Full product id as given, e.g. `MOD13Q1`.
    pub id: String,
    /// Collection key with the platform prefix removed, e.g. `13Q1`.
    pub collection: String,
    pub resolution: TileResolution,
    /// Bands scanned for valid data in raster-footprint mode, in priority order.
    pub footprint_bands: &'static [&'static str],
}

impl Product {
    /// Look up a product id in the collection table.
    ///
    /// The first three characters (`MOD`, `MYD`, `MCD`, ...) name the
    /// platform and are ignored.
    pub fn parse(id: &str) -> FootprintResult<Self> {
        let id = id.trim();
        let collection = id
            .get(3..)
            .filter(|c| !c.is_empty())
            .ok_or_else(|| FootprintError::UnknownProduct(id.to_string()))?;

        let spec = COLLECTIONS
            .iter()
            .find(|spec| spec.key.eq_ignore_ascii_case(collection))
            .ok_or_else(|| FootprintError::UnknownProduct(id.to_string()))?;

        Ok(Self {
            id: id.to_string(),
            collection: spec.key.to_string(),
            resolution: TileResolution::from_pixels(spec.pixels)?,
            footprint_bands: spec.footprint_bands,
        })
    }

    /// Whether raster-footprint mode has any band to scan for this product.
    pub fn supports_raster_footprint(&self) -> bool {
        !self.footprint_bands.is_empty()
    }

    /// All collection keys known to the table.
    pub fn known_collections() -> impl Iterator<Item = &'static str> {
        COLLECTIONS.iter().map(|spec| spec.key)
    }
}
