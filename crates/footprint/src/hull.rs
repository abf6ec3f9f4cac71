//! Convex hull of pixel-corner sets.
//!
//! Pixel corners are integer lattice points, exactly representable as `f64`,
//! so the hull from `geo` drops collinear boundary runs (every straight tile
//! edge) deterministically.

use geo::{coord, Area, ConvexHull, Coord, LineString, MultiPoint, Point, Polygon};

/// A pixel corner in tile space. Pixel (r, c) spans corners (r, c) to (r+1, c+1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PixelCorner {
    pub row: i64,
    pub col: i64,
}

impl PixelCorner {
    pub fn new(row: i64, col: i64) -> Self {
        Self { row, col }
    }
}

impl From<PixelCorner> for Coord<f64> {
    fn from(p: PixelCorner) -> Self {
        coord! { x: p.col as f64, y: p.row as f64 }
    }
}

impl From<Coord<f64>> for PixelCorner {
    fn from(c: Coord<f64>) -> Self {
        // Hull vertices are input points, so the values are already integral
        Self::new(c.y.round() as i64, c.x.round() as i64)
    }
}

/// Convex hull of a point set.
///
/// Returns the hull vertices counter-clockwise in (col, row) axes without a
/// repeated closing point, starting from the lowest (col, row) vertex.
/// Collinear points are excluded. Degenerate input (fewer than three
/// distinct points, or all collinear) yields fewer than three vertices, so
/// callers must check the length.
pub fn convex_hull(points: &[PixelCorner]) -> Vec<PixelCorner> {
    let mut distinct = points.to_vec();
    distinct.sort_unstable_by_key(|p| (p.col, p.row));
    distinct.dedup();
    if distinct.len() < 3 {
        return distinct;
    }

    let multi: MultiPoint<f64> = distinct
        .iter()
        .map(|&p| Point::from(Coord::from(p)))
        .collect();
    let hull = multi.convex_hull();

    let mut vertices: Vec<PixelCorner> = hull
        .exterior()
        .coords()
        .map(|&c| PixelCorner::from(c))
        .collect();
    if vertices.len() > 1 && vertices.first() == vertices.last() {
        vertices.pop();
    }
    let start = vertices
        .iter()
        .enumerate()
        .min_by_key(|(_, p)| (p.col, p.row))
        .map_or(0, |(i, _)| i);
    vertices.rotate_left(start);
    vertices
}

fn polygon(vertices: &[PixelCorner]) -> Polygon<f64> {
    let ring: LineString<f64> = vertices.iter().map(|&p| Coord::from(p)).collect();
    Polygon::new(ring, vec![])
}

/// Signed polygon area in square pixels.
///
/// Positive for counter-clockwise order in (col, row) axes.
pub fn signed_area(vertices: &[PixelCorner]) -> f64 {
    polygon(vertices).signed_area()
}

/// Unsigned polygon area in square pixels.
pub fn polygon_area(vertices: &[PixelCorner]) -> f64 {
    polygon(vertices).unsigned_area()
}
