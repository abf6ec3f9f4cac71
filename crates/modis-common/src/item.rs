//! Caller-owned item records that footprints are attached to.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::bbox::BoundingBox;
use crate::geometry::Footprint;

/// Projection fields describing the raster grid an item was derived from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpatialReference {
    /// Raster shape as `[rows, cols]`.
    pub shape: [u32; 2],
    /// Affine transform `[a, b, c, d, e, f]` mapping (col, row) to projected x, y.
    pub transform: [f64; 6],
    /// WKT2 description of the projected CRS.
    pub wkt2: String,
}

/// A catalog item record.
///
/// The footprint code never constructs these; callers own them and the
/// builder only replaces `geometry`, `bbox` and the `proj:*` properties.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemRecord {
    pub id: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub geometry: Option<Footprint>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub bbox: Option<BoundingBox>,

    #[serde(default)]
    pub properties: Map<String, Value>,
}

impl ItemRecord {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            geometry: None,
            bbox: None,
            properties: Map::new(),
        }
    }

    /// Replace geometry and bounding box with the footprint's.
    pub fn set_footprint(&mut self, footprint: Footprint) {
        self.bbox = Some(footprint.bbox());
        self.geometry = Some(footprint);
    }

    /// Write the `proj:shape`, `proj:transform` and `proj:wkt2` properties.
    pub fn set_spatial_reference(&mut self, reference: &SpatialReference) {
        self.properties.insert(
            "proj:shape".to_string(),
            serde_json::json!(reference.shape),
        );
        self.properties.insert(
            "proj:transform".to_string(),
            serde_json::json!(reference.transform),
        );
        self.properties.insert(
            "proj:wkt2".to_string(),
            Value::String(reference.wkt2.clone()),
        );
    }

    pub fn set_property(&mut self, key: impl Into<String>, value: Value) {
        self.properties.insert(key.into(), value);
    }

    pub fn property(&self, key: &str) -> Option<&Value> {
        self.properties.get(key)
    }
}
