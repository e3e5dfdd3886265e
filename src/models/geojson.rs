//! GeoJSON-shaped input types.
//!
//! Upstream geocoding stages hand us loosely shaped GeoJSON: the input point
//! may be a bare coordinate array or a Point geometry, and feature geometry
//! is frequently a GeometryCollection mixing address points with the street
//! line. These types pin that down once at the boundary.

use geo::{Coord, LineString};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// GeoJSON position: `[lon, lat]` with an optional altitude
pub type Position = Vec<f64>;

/// Errors raised while converting GeoJSON positions into `geo` types
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeometryError {
    #[error("position {index} has {len} component(s), expected at least 2")]
    InvalidPosition { index: usize, len: usize },
}

/// Convert a single position into a coordinate
pub fn position_to_coord(index: usize, position: &[f64]) -> Result<Coord<f64>, GeometryError> {
    match position {
        [lon, lat, ..] => Ok(Coord { x: *lon, y: *lat }),
        _ => Err(GeometryError::InvalidPosition {
            index,
            len: position.len(),
        }),
    }
}

/// Convert a list of positions into a `LineString`
pub fn positions_to_line_string(positions: &[Position]) -> Result<LineString<f64>, GeometryError> {
    positions
        .iter()
        .enumerate()
        .map(|(index, position)| position_to_coord(index, position))
        .collect::<Result<Vec<_>, _>>()
        .map(LineString::new)
}

/// Feature geometry, tagged by its GeoJSON `type`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Geometry {
    Point {
        #[serde(default)]
        coordinates: Position,
    },
    MultiPoint {
        #[serde(default)]
        coordinates: Vec<Position>,
    },
    LineString {
        #[serde(default)]
        coordinates: Vec<Position>,
    },
    MultiLineString {
        #[serde(default)]
        coordinates: Vec<Vec<Position>>,
    },
    Polygon {
        #[serde(default)]
        coordinates: Vec<Vec<Position>>,
    },
    MultiPolygon {
        #[serde(default)]
        coordinates: Vec<Vec<Vec<Position>>>,
    },
    GeometryCollection {
        #[serde(default)]
        geometries: Vec<Geometry>,
    },
    /// Any geometry type we have no use for
    #[serde(other)]
    Other,
}

/// GeoJSON-like feature.
///
/// Only `geometry` is interpreted. Every other member (`type`, `id`,
/// `properties`, ...) is kept as-is so the feature can be echoed back.
/// An explicit `"geometry": null` stays in `members`, so such a feature is
/// not empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Map<String, Value>")]
pub struct Feature {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub geometry: Option<Geometry>,

    #[serde(flatten)]
    pub members: Map<String, Value>,
}

impl TryFrom<Map<String, Value>> for Feature {
    type Error = serde_json::Error;

    fn try_from(mut members: Map<String, Value>) -> Result<Self, Self::Error> {
        let geometry = match members.remove("geometry") {
            Some(Value::Null) => {
                members.insert("geometry".to_string(), Value::Null);
                None
            }
            Some(value) => Some(serde_json::from_value(value)?),
            None => None,
        };
        Ok(Self { geometry, members })
    }
}

impl Feature {
    /// Create a feature holding only a geometry
    pub fn from_geometry(geometry: Geometry) -> Self {
        let mut members = Map::new();
        members.insert("type".to_string(), Value::String("Feature".to_string()));
        Self {
            geometry: Some(geometry),
            members,
        }
    }

    /// A feature with no geometry and no other members carries nothing to evaluate
    pub fn is_empty(&self) -> bool {
        self.geometry.is_none() && self.members.is_empty()
    }

    /// Embed a serialized value under the `routable_points` member
    pub fn attach_routable_points<T: Serialize>(&mut self, points: &T) -> serde_json::Result<()> {
        let value = serde_json::to_value(points)?;
        self.members.insert("routable_points".to_string(), value);
        Ok(())
    }
}

/// Point-geometry-like object, as produced by address matching
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PointGeometry {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub geo_type: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub coordinates: Position,

    /// Set when the coordinate was synthesized along an address range
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub interpolated: bool,
}

/// Input point: either `[lon, lat]` or a Point geometry object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PointInput {
    Coordinates(Position),
    Geometry(PointGeometry),
}

impl PointInput {
    pub fn new(lon: f64, lat: f64) -> Self {
        PointInput::Coordinates(vec![lon, lat])
    }

    pub fn interpolated(lon: f64, lat: f64) -> Self {
        PointInput::Geometry(PointGeometry {
            geo_type: Some("Point".to_string()),
            coordinates: vec![lon, lat],
            interpolated: true,
        })
    }

    /// True for `[]`, `{}` and objects carrying nothing we recognise
    pub fn is_empty(&self) -> bool {
        match self {
            PointInput::Coordinates(coords) => coords.is_empty(),
            PointInput::Geometry(geom) => {
                geom.geo_type.is_none() && geom.coordinates.is_empty() && !geom.interpolated
            }
        }
    }

    pub fn is_interpolated(&self) -> bool {
        matches!(self, PointInput::Geometry(geom) if geom.interpolated)
    }

    pub fn coordinates(&self) -> &[f64] {
        match self {
            PointInput::Coordinates(coords) => coords,
            PointInput::Geometry(geom) => &geom.coordinates,
        }
    }

    /// The `(lon, lat)` coordinate, if the point has at least two components
    pub fn coord(&self) -> Option<Coord<f64>> {
        position_to_coord(0, self.coordinates()).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_point_from_array() {
        let point: PointInput = serde_json::from_value(json!([-77.03, 38.9])).unwrap();
        assert!(!point.is_empty());
        assert!(!point.is_interpolated());
        assert_eq!(point.coord(), Some(Coord { x: -77.03, y: 38.9 }));
    }

    #[test]
    fn test_point_from_geometry_object() {
        let point: PointInput = serde_json::from_value(json!({
            "type": "Point",
            "coordinates": [1.5, 2.5],
            "interpolated": true
        }))
        .unwrap();
        assert!(point.is_interpolated());
        assert_eq!(point.coord(), Some(Coord { x: 1.5, y: 2.5 }));
    }

    #[test]
    fn test_empty_points() {
        let empty_array: PointInput = serde_json::from_value(json!([])).unwrap();
        let empty_object: PointInput = serde_json::from_value(json!({})).unwrap();
        assert!(empty_array.is_empty());
        assert!(empty_object.is_empty());
    }

    #[test]
    fn test_point_with_altitude() {
        let point = PointInput::Coordinates(vec![3.0, 4.0, 120.0]);
        assert_eq!(point.coord(), Some(Coord { x: 3.0, y: 4.0 }));
    }

    #[test]
    fn test_short_point_has_no_coord() {
        let point = PointInput::Coordinates(vec![3.0]);
        assert!(!point.is_empty());
        assert_eq!(point.coord(), None);
    }

    #[test]
    fn test_geometry_collection_parse() {
        let geometry: Geometry = serde_json::from_value(json!({
            "type": "GeometryCollection",
            "geometries": [
                { "type": "MultiPoint", "coordinates": [[1.0, 1.0]] },
                { "type": "LineString", "coordinates": [[0.0, 0.0], [2.0, 2.0]] }
            ]
        }))
        .unwrap();

        match geometry {
            Geometry::GeometryCollection { geometries } => {
                assert_eq!(geometries.len(), 2);
                assert!(matches!(geometries[1], Geometry::LineString { .. }));
            }
            other => panic!("unexpected geometry {:?}", other),
        }
    }

    #[test]
    fn test_unknown_geometry_type() {
        let geometry: Geometry = serde_json::from_value(json!({
            "type": "Curve",
            "coordinates": [[0.0, 0.0]]
        }))
        .unwrap();
        assert_eq!(geometry, Geometry::Other);
    }

    #[test]
    fn test_feature_keeps_members() {
        let feature: Feature = serde_json::from_value(json!({
            "type": "Feature",
            "id": "address.123",
            "properties": { "carmen:text": "Main St" },
            "geometry": { "type": "Point", "coordinates": [0.0, 0.0] }
        }))
        .unwrap();

        assert!(!feature.is_empty());
        assert_eq!(feature.members["id"], json!("address.123"));

        let round_trip = serde_json::to_value(&feature).unwrap();
        assert_eq!(round_trip["properties"]["carmen:text"], json!("Main St"));
    }

    #[test]
    fn test_empty_feature() {
        let feature: Feature = serde_json::from_value(json!({})).unwrap();
        assert!(feature.is_empty());

        let null_geometry: Feature = serde_json::from_value(json!({ "geometry": null })).unwrap();
        assert!(!null_geometry.is_empty());
        assert_eq!(null_geometry.geometry, None);
        assert_eq!(
            serde_json::to_value(&null_geometry).unwrap(),
            json!({ "geometry": null })
        );
    }

    #[test]
    fn test_invalid_feature_geometry() {
        let result: Result<Feature, _> =
            serde_json::from_value(json!({ "geometry": { "type": "LineString", "coordinates": 7 } }));
        assert!(result.is_err());
    }

    #[test]
    fn test_attach_routable_points() {
        let mut feature = Feature::from_geometry(Geometry::Other);
        feature
            .attach_routable_points(&json!({ "points": null }))
            .unwrap();
        assert_eq!(feature.members["routable_points"], json!({ "points": null }));
    }

    #[test]
    fn test_line_string_conversion_error() {
        let positions = vec![vec![0.0, 0.0], vec![1.0]];
        assert_eq!(
            positions_to_line_string(&positions),
            Err(GeometryError::InvalidPosition { index: 1, len: 1 })
        );
    }
}
