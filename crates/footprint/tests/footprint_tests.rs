//! End-to-end footprint tests against known tile geometry.

use footprint::{
    BandSelection, FootprintBuilder, FootprintConfig, MaskPolicy, MemorySource, RasterBand,
    RasterSource, RawBandDirectory,
};
use modis_common::{
    Footprint, FootprintError, FootprintResult, ItemRecord, Product, TilePosition, TileResolution,
};
use test_utils::{
    assert_coords_approx_eq, create_block_band, create_fill_band, create_sparse_band,
    create_triangle_band, create_valid_band, fill, fixtures, init_test_tracing, temp_band_dir,
    to_le_bytes_i16,
};

const N: usize = 1200;
const NDVI: &str = "1km_16_days_NDVI";

fn h10v05() -> TilePosition {
    let (h, v) = fixtures::tiles::H10V05;
    TilePosition::new(h, v)
}

fn ndvi_source(data: Vec<i16>) -> MemorySource {
    let band = RasterBand::new(NDVI, N, N, Some(fill::NDVI_I16 as f64), data).unwrap();
    MemorySource::new().with_band(band)
}

fn ndvi_footprint(builder: &FootprintBuilder, data: Vec<i16>) -> FootprintResult<Footprint> {
    builder.raster_footprint(
        h10v05(),
        TileResolution::Km1,
        &ndvi_source(data),
        &BandSelection::named([NDVI]),
    )
}

#[test]
fn test_full_tile_matches_analytic_corners() {
    init_test_tracing();
    let footprint = FootprintBuilder::default()
        .full_tile(h10v05(), TileResolution::Km1)
        .unwrap();

    let ring = footprint.ring();
    assert_eq!(ring.len(), 5);
    assert_eq!(ring[0], ring[4]);
    for (point, (lon, lat)) in ring.iter().zip(fixtures::H10V05_CORNERS) {
        assert_coords_approx_eq!((point.lon, point.lat), (lon, lat), 1e-9);
    }

    let bbox = footprint.bbox();
    assert_eq!(bbox.min_lon, -104.432583);
    assert_eq!(bbox.max_lon, -80.829038);
    assert_eq!(bbox.min_lat, 30.0);
    assert_eq!(bbox.max_lat, 40.0);
}

#[test]
fn test_all_valid_raster_equals_full_tile() {
    init_test_tracing();
    let builder = FootprintBuilder::default();
    let full = builder.full_tile(h10v05(), TileResolution::Km1).unwrap();
    let raster = ndvi_footprint(&builder, create_valid_band(N, 4200i16)).unwrap();
    assert_eq!(raster, full);
}

#[test]
fn test_all_fill_raster_is_empty_and_item_untouched() {
    init_test_tracing();
    let builder = FootprintBuilder::default();
    let source = ndvi_source(create_fill_band(N, fill::NDVI_I16));

    let mut item = ItemRecord::new("MOD13A2.A2020001.h10v05.061");
    item.set_property("datetime", serde_json::json!("2020-01-01T00:00:00Z"));
    let before = item.clone();

    let err = builder
        .apply_raster_footprint(
            &mut item,
            h10v05(),
            TileResolution::Km1,
            &source,
            &BandSelection::named([NDVI]),
        )
        .unwrap_err();

    assert!(matches!(err, FootprintError::EmptyFootprint));
    assert!(!err.is_read_failure());
    assert_eq!(item, before);
}

#[test]
fn test_single_block_is_projected_quadrilateral() {
    init_test_tracing();
    let data = create_block_band(N, fill::NDVI_I16, 1500, 100, 200, 2, 2);
    let footprint = ndvi_footprint(&FootprintBuilder::default(), data).unwrap();

    assert_eq!(footprint.vertex_count(), 4);
    for (point, (lon, lat)) in footprint.ring().iter().zip(fixtures::H10V05_BLOCK_100_200) {
        assert_coords_approx_eq!((point.lon, point.lat), (lon, lat), 1e-9);
    }
}

#[test]
fn test_swath_edge_triangle() {
    init_test_tracing();
    let builder = FootprintBuilder::default();
    let full = builder.full_tile(h10v05(), TileResolution::Km1).unwrap();
    let data = create_triangle_band(N, fill::NDVI_I16, 1500);
    let footprint = ndvi_footprint(&builder, data).unwrap();

    // NE, SE and SW tile corners plus the two ends of the diagonal edge
    assert_eq!(footprint.vertex_count(), 5);
    let full_ring = full.ring();
    for corner in &full_ring[1..4] {
        assert!(footprint.ring().contains(corner), "missing {:?}", corner);
    }
    assert!(!footprint.ring().contains(&full_ring[0]));

    let ratio = footprint.area() / full.area();
    assert!(ratio > 0.4 && ratio < 0.55, "area ratio {}", ratio);
}

#[test]
fn test_hull_never_exceeds_full_tile() {
    init_test_tracing();
    let builder = FootprintBuilder::default();
    let full = builder.full_tile(h10v05(), TileResolution::Km1).unwrap();
    let full_bbox = full.bbox();

    let layouts: Vec<Vec<(usize, usize)>> = vec![
        vec![(0, 0)],
        vec![(N - 1, N - 1), (0, N - 1)],
        vec![(5, 900), (700, 13), (1100, 1100), (600, 600)],
        (0..N).step_by(97).map(|i| (i, (i * 7) % N)).collect(),
    ];

    for positions in layouts {
        let data = create_sparse_band(N, fill::NDVI_I16, 1500, &positions);
        let footprint = ndvi_footprint(&builder, data).unwrap();
        assert!(footprint.area() <= full.area());
        let bbox = footprint.bbox();
        assert!(bbox.min_lon >= full_bbox.min_lon && bbox.max_lon <= full_bbox.max_lon);
        assert!(bbox.min_lat >= full_bbox.min_lat && bbox.max_lat <= full_bbox.max_lat);
    }
}

#[test]
fn test_product_default_band_selection() {
    init_test_tracing();
    let product = Product::parse("MOD13A2").unwrap();
    assert_eq!(product.footprint_bands, &[NDVI]);

    let source = ndvi_source(create_block_band(N, fill::NDVI_I16, 1500, 0, 0, N, N / 2));
    let footprint = FootprintBuilder::default()
        .raster_footprint(
            h10v05(),
            product.resolution,
            &source,
            &BandSelection::ProductDefault(product.clone()),
        )
        .unwrap();
    assert_eq!(footprint.vertex_count(), 4);

    let landcover = Product::parse("MCD12Q1").unwrap();
    let err = FootprintBuilder::default()
        .raster_footprint(
            h10v05(),
            landcover.resolution,
            &source,
            &BandSelection::ProductDefault(landcover),
        )
        .unwrap_err();
    assert!(matches!(err, FootprintError::UnknownProduct(_)));
}

#[test]
fn test_any_valid_policy_reads_every_band() {
    init_test_tracing();
    let lst_fill = fill::LST_U16 as f64;
    let day = RasterBand::new(
        "LST_Day_1km",
        N,
        N,
        Some(lst_fill),
        create_block_band(N, fill::LST_U16, 14500u16, 0, 0, N / 2, N),
    )
    .unwrap();
    let night = RasterBand::new(
        "LST_Night_1km",
        N,
        N,
        Some(lst_fill),
        create_block_band(N, fill::LST_U16, 13900u16, N / 2, 0, N / 2, N),
    )
    .unwrap();
    let source = MemorySource::new().with_band(day).with_band(night);
    let selection = BandSelection::named(["LST_Day_1km", "LST_Night_1km"]);

    let union = FootprintBuilder::new(
        FootprintConfig::default().with_mask_policy(MaskPolicy::AnyValid),
    )
    .unwrap()
    .raster_footprint(h10v05(), TileResolution::Km1, &source, &selection)
    .unwrap();
    let full = FootprintBuilder::default()
        .full_tile(h10v05(), TileResolution::Km1)
        .unwrap();
    assert_eq!(union, full);

    // A band missing from the source is a read failure, not an empty footprint
    let missing = BandSelection::named(["LST_Day_1km", "Emis_31"]);
    let err = FootprintBuilder::new(
        FootprintConfig::default().with_mask_policy(MaskPolicy::AllValid),
    )
    .unwrap()
    .raster_footprint(h10v05(), TileResolution::Km1, &source, &missing)
    .unwrap_err();
    assert!(err.is_read_failure());
}

#[test]
fn test_float_band_nan_is_invalid() {
    init_test_tracing();
    let mut data = vec![f32::NAN; N * N];
    data[600 * N + 600] = 0.42;
    let band = RasterBand::new("Fpar", N, N, Some(f64::NAN), data).unwrap();
    let source = MemorySource::new().with_band(band);

    let footprint = FootprintBuilder::default()
        .raster_footprint(
            h10v05(),
            TileResolution::Km1,
            &source,
            &BandSelection::named(["Fpar"]),
        )
        .unwrap();
    assert_eq!(footprint.vertex_count(), 4);
}

#[test]
fn test_raw_band_directory_read() {
    init_test_tracing();
    let dir = temp_band_dir();
    let data = create_block_band(N, fill::NDVI_I16, 1500, 100, 200, 2, 2);
    std::fs::write(
        dir.path().join(format!("{}.json", NDVI)),
        r#"{"width": 1200, "height": 1200, "dtype": "int16", "fill_value": -3000}"#,
    )
    .unwrap();
    std::fs::write(dir.path().join(format!("{}.bin", NDVI)), to_le_bytes_i16(&data)).unwrap();

    let source = RawBandDirectory::new(dir.path());
    let band = source.read_band(NDVI).unwrap();
    assert_eq!(band.width, N);
    assert_eq!(band.fill_value, Some(-3000.0));

    let mut item = ItemRecord::new("MOD13A2.A2020001.h10v05.061");
    FootprintBuilder::default()
        .apply_raster_footprint(
            &mut item,
            h10v05(),
            TileResolution::Km1,
            &source,
            &BandSelection::named([NDVI]),
        )
        .unwrap();

    let geometry = item.geometry.as_ref().unwrap();
    for (point, (lon, lat)) in geometry.ring().iter().zip(fixtures::H10V05_BLOCK_100_200) {
        assert_coords_approx_eq!((point.lon, point.lat), (lon, lat), 1e-9);
    }
    assert_eq!(item.bbox, Some(geometry.bbox()));
    assert!(item.property("proj:wkt2").is_some());
}

#[test]
fn test_raw_band_directory_write_then_read() {
    let dir = temp_band_dir();
    let source = RawBandDirectory::new(dir.path());
    let band = RasterBand::new(
        "Maximum_Snow_Extent",
        4,
        2,
        Some(fill::SNOW_U8 as f64),
        vec![255u8, 1, 2, 255, 255, 255, 3, 4],
    )
    .unwrap();

    source.write_band(&band).unwrap();
    assert_eq!(source.read_band("Maximum_Snow_Extent").unwrap(), band);
}

#[test]
fn test_raw_band_directory_missing_file() {
    let dir = temp_band_dir();
    let source = RawBandDirectory::new(dir.path());

    let err = FootprintBuilder::default()
        .raster_footprint(
            h10v05(),
            TileResolution::Km1,
            &source,
            &BandSelection::named([NDVI]),
        )
        .unwrap_err();
    assert!(err.is_read_failure());
    assert!(err.to_string().contains(NDVI));

    // Header present, data missing
    std::fs::write(
        source.header_path(NDVI),
        r#"{"width": 1200, "height": 1200, "dtype": "int16"}"#,
    )
    .unwrap();
    assert!(source.read_band(NDVI).unwrap_err().is_read_failure());
}

#[test]
fn test_raw_band_directory_short_data() {
    let dir = temp_band_dir();
    let source = RawBandDirectory::new(dir.path());
    std::fs::write(
        source.header_path(NDVI),
        r#"{"width": 1200, "height": 1200, "dtype": "int16", "fill_value": -3000}"#,
    )
    .unwrap();
    std::fs::write(source.data_path(NDVI), vec![0u8; 1000]).unwrap();

    let err = source.read_band(NDVI).unwrap_err();
    assert!(err.is_read_failure());
    assert!(err.to_string().contains("expected 2880000 bytes"));
}

#[test]
fn test_raw_band_directory_bad_header() {
    let dir = temp_band_dir();
    let source = RawBandDirectory::new(dir.path());
    std::fs::write(source.header_path(NDVI), r#"{"width": 1200, "dtype": "int128"}"#).unwrap();
    std::fs::write(source.data_path(NDVI), vec![0u8; 4]).unwrap();

    assert!(source.read_band(NDVI).unwrap_err().is_read_failure());
}

#[test]
fn test_raw_band_directory_oversized_header() {
    let dir = temp_band_dir();
    let source = RawBandDirectory::new(dir.path());
    std::fs::write(
        source.header_path(NDVI),
        r#"{"width": 8589934592, "height": 8589934592, "dtype": "int16"}"#,
    )
    .unwrap();
    std::fs::write(source.data_path(NDVI), vec![0u8; 16]).unwrap();

    let err = source.read_band(NDVI).unwrap_err();
    assert!(err.is_read_failure());
    assert!(err.to_string().contains("too large"));

    // Same dimensions through the in-memory constructor
    let err = RasterBand::new("b", usize::MAX, 2, None, vec![0u8; 4]).unwrap_err();
    assert!(err.is_read_failure());
}

#[test]
fn test_batch_matches_individual() {
    let builder = FootprintBuilder::default();
    let tiles: Vec<TilePosition> = [
        (0, 8),
        fixtures::tiles::H10V05,
        fixtures::tiles::H18V09,
        (31, 12),
    ]
    .iter()
    .map(|&(h, v)| TilePosition::new(h, v))
    .collect();

    let batch = builder.full_tile_batch(&tiles, TileResolution::M500);
    assert_eq!(batch.len(), tiles.len());
    for (tile, result) in tiles.iter().zip(batch) {
        let single = builder.full_tile(*tile, TileResolution::M500).unwrap();
        assert_eq!(result.unwrap(), single);
    }
}

#[test]
fn test_batch_with_grid_validation() {
    let builder =
        FootprintBuilder::new(FootprintConfig::default().with_validate_grid(true)).unwrap();
    let (h, v) = fixtures::tiles::OUT_OF_GRID;
    let tiles = [h10v05(), TilePosition::new(h, v)];

    let batch = builder.full_tile_batch(&tiles, TileResolution::Km1);
    assert!(batch[0].is_ok());
    assert!(matches!(
        batch[1],
        Err(FootprintError::InvalidGridPosition { h: 36, v: 18 })
    ));
}
