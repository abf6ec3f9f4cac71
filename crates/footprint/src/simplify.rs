//! Douglas-Peucker ring simplification in degree space.

use geo::{Coord, LineString, Simplify};
use modis_common::GeoPoint;

/// Simplify a closed ring, dropping vertices within `tolerance` degrees of
/// the retained outline.
///
/// The result is closed. If simplification would leave fewer than three
/// distinct vertices the input is returned unchanged.
pub fn simplify_ring(ring: &[GeoPoint], tolerance: f64) -> Vec<GeoPoint> {
    if ring.len() < 5 || tolerance <= 0.0 {
        return ring.to_vec();
    }

    let mut line: LineString<f64> = ring.iter().map(|&p| Coord::from(p)).collect();
    line.close();

    let simplified = line.simplify(&tolerance);
    if simplified.0.len() < 4 {
        return ring.to_vec();
    }
    simplified.coords().map(|c| GeoPoint::new(c.x, c.y)).collect()
}
