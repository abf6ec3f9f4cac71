//! Geographic points and footprint polygons.

use geo::{coord, Area, Coord, LineString, Polygon};
use serde::{Deserialize, Serialize};

use crate::bbox::BoundingBox;
use crate::error::{FootprintError, FootprintResult};

/// Decimal digits kept in output coordinates.
pub const PRECISION: u32 = 6;

/// Areas below this (square degrees) are treated as zero.
const MIN_RING_AREA: f64 = 1e-12;

/// Round a coordinate to `precision` decimal digits.
pub fn round_coordinate(value: f64, precision: u32) -> f64 {
    let scale = 10f64.powi(precision as i32);
    let rounded = (value * scale).round() / scale;
    // Avoid emitting -0.0
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// A (longitude, latitude) pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lon: f64,
    pub lat: f64,
}

impl GeoPoint {
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    /// Copy of this point with both coordinates rounded.
    pub fn rounded(&self, precision: u32) -> Self {
        Self {
            lon: round_coordinate(self.lon, precision),
            lat: round_coordinate(self.lat, precision),
        }
    }
}

impl From<GeoPoint> for Coord<f64> {
    fn from(p: GeoPoint) -> Self {
        coord! { x: p.lon, y: p.lat }
    }
}

impl From<GeoPoint> for [f64; 2] {
    fn from(p: GeoPoint) -> Self {
        [p.lon, p.lat]
    }
}

/// A closed polygon ring with its bounding box.
///
/// Invariants: at least four points, first equals last, non-zero area, and
/// clockwise winding when viewed north-up (the NW, NE, SE, SW order of a
/// full tile). Construct through [`Footprint::from_ring`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "PolygonGeometry", try_from = "PolygonGeometry")]
pub struct Footprint {
    ring: Vec<GeoPoint>,
    bbox: BoundingBox,
}

impl Footprint {
    /// Build a footprint from ring vertices, closing and normalising it.
    ///
    /// Consecutive duplicate vertices are dropped and the ring is closed if
    /// it is not already. Counter-clockwise rings are reversed. Non-finite
    /// coordinates are rejected.
    pub fn from_ring(points: Vec<GeoPoint>) -> FootprintResult<Self> {
        if let Some(p) = points
            .iter()
            .find(|p| !p.lon.is_finite() || !p.lat.is_finite())
        {
            return Err(FootprintError::degenerate(format!(
                "non-finite vertex ({}, {})",
                p.lon, p.lat
            )));
        }

        let mut ring: Vec<GeoPoint> = Vec::with_capacity(points.len() + 1);
        for p in points {
            if ring.last() != Some(&p) {
                ring.push(p);
            }
        }
        while ring.len() > 1 && ring.first() == ring.last() {
            ring.pop();
        }
        if ring.len() < 3 {
            return Err(FootprintError::degenerate(format!(
                "ring has {} distinct vertices, need at least 3",
                ring.len()
            )));
        }
        ring.push(ring[0]);

        let area = signed_area(&ring);
        if !area.is_finite() {
            return Err(FootprintError::degenerate("ring area is not finite"));
        }
        if area.abs() < MIN_RING_AREA {
            return Err(FootprintError::degenerate("ring encloses zero area"));
        }
        if area > 0.0 {
            ring.reverse();
        }

        let bbox = BoundingBox::from_points(&ring)
            .ok_or_else(|| FootprintError::degenerate("empty ring"))?;

        Ok(Self { ring, bbox })
    }

    /// Closed ring, first point repeated at the end.
    pub fn ring(&self) -> &[GeoPoint] {
        &self.ring
    }

    pub fn bbox(&self) -> BoundingBox {
        self.bbox
    }

    /// Number of distinct vertices (ring length minus the closing point).
    pub fn vertex_count(&self) -> usize {
        self.ring.len() - 1
    }

    /// Unsigned area in square degrees.
    pub fn area(&self) -> f64 {
        signed_area(&self.ring).abs()
    }

    /// GeoJSON geometry object.
    pub fn to_geojson(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "Polygon",
            "coordinates": [self.ring.iter().map(|p| [p.lon, p.lat]).collect::<Vec<_>>()],
        })
    }
}

/// Signed area of a ring in square degrees; positive for counter-clockwise.
pub fn signed_area(ring: &[GeoPoint]) -> f64 {
    let exterior: LineString<f64> = ring.iter().map(|&p| Coord::from(p)).collect();
    Polygon::new(exterior, vec![]).signed_area()
}

/// GeoJSON Polygon wire form.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PolygonGeometry {
    /// Type identifier (always "Polygon").
    #[serde(rename = "type")]
    pub type_: String,

    /// Rings of [longitude, latitude] pairs; only the exterior is used.
    pub coordinates: Vec<Vec<[f64; 2]>>,
}

impl From<Footprint> for PolygonGeometry {
    fn from(footprint: Footprint) -> Self {
        Self {
            type_: "Polygon".to_string(),
            coordinates: vec![footprint.ring.into_iter().map(Into::into).collect()],
        }
    }
}

impl TryFrom<PolygonGeometry> for Footprint {
    type Error = FootprintError;

    fn try_from(geometry: PolygonGeometry) -> Result<Self, Self::Error> {
        if geometry.type_ != "Polygon" {
            return Err(FootprintError::degenerate(format!(
                "expected Polygon geometry, got {}",
                geometry.type_
            )));
        }
        let exterior = geometry
            .coordinates
            .into_iter()
            .next()
            .ok_or_else(|| FootprintError::degenerate("polygon has no exterior ring"))?;
        Footprint::from_ring(
            exterior
                .into_iter()
                .map(|[lon, lat]| GeoPoint::new(lon, lat))
                .collect(),
        )
    }
}
