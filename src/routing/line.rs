//! Line geometry lookup inside a feature.

use geo::MultiLineString;

use crate::models::geojson::positions_to_line_string;
use crate::models::{Feature, Geometry, GeometryError, Position};

/// A line geometry borrowed from a feature
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LineGeometry<'a> {
    LineString(&'a [Position]),
    MultiLineString(&'a [Vec<Position>]),
}

impl<'a> LineGeometry<'a> {
    /// Borrow `geometry` if it is a line type. Collections are not descended into.
    pub fn from_geometry(geometry: &'a Geometry) -> Option<Self> {
        match geometry {
            Geometry::LineString { coordinates } => Some(LineGeometry::LineString(coordinates)),
            Geometry::MultiLineString { coordinates } => {
                Some(LineGeometry::MultiLineString(coordinates))
            }
            _ => None,
        }
    }

    /// Convert to a `MultiLineString`; a single line becomes a one-member collection
    pub fn to_multi_line_string(&self) -> Result<MultiLineString<f64>, GeometryError> {
        let lines = match self {
            LineGeometry::LineString(positions) => vec![positions_to_line_string(positions)?],
            LineGeometry::MultiLineString(parts) => parts
                .iter()
                .map(|positions| positions_to_line_string(positions))
                .collect::<Result<Vec<_>, _>>()?,
        };
        Ok(MultiLineString::new(lines))
    }
}

/// Find the line geometry of a feature.
///
/// For a GeometryCollection the first `LineString` or `MultiLineString`
/// member in collection order wins.
pub fn find_line(feature: &Feature) -> Option<LineGeometry<'_>> {
    match feature.geometry.as_ref()? {
        Geometry::GeometryCollection { geometries } => {
            geometries.iter().find_map(LineGeometry::from_geometry)
        }
        geometry => LineGeometry::from_geometry(geometry),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn feature(geometry: serde_json::Value) -> Feature {
        serde_json::from_value(json!({ "type": "Feature", "geometry": geometry })).unwrap()
    }

    #[test]
    fn test_no_geometry() {
        let feature: Feature = serde_json::from_value(json!({ "type": "Feature" })).unwrap();
        assert_eq!(find_line(&feature), None);
    }

    #[test]
    fn test_direct_line_string() {
        let feature = feature(json!({ "type": "LineString", "coordinates": [[0, 0], [1, 1]] }));
        assert!(matches!(find_line(&feature), Some(LineGeometry::LineString(c)) if c.len() == 2));
    }

    #[test]
    fn test_direct_multi_line_string() {
        let feature = feature(json!({
            "type": "MultiLineString",
            "coordinates": [[[0, 0], [1, 1]], [[2, 2], [3, 3]]]
        }));
        assert!(matches!(
            find_line(&feature),
            Some(LineGeometry::MultiLineString(parts)) if parts.len() == 2
        ));
    }

    #[test]
    fn test_collection_first_line_wins() {
        let feature = feature(json!({
            "type": "GeometryCollection",
            "geometries": [
                { "type": "MultiPoint", "coordinates": [[1, 1]] },
                { "type": "MultiLineString", "coordinates": [[[5, 5], [6, 6]]] },
                { "type": "LineString", "coordinates": [[0, 0], [2, 2]] }
            ]
        }));
        assert!(matches!(
            find_line(&feature),
            Some(LineGeometry::MultiLineString(parts)) if parts[0][0] == vec![5.0, 5.0]
        ));
    }

    #[test]
    fn test_collection_without_line() {
        let feature = feature(json!({
            "type": "GeometryCollection",
            "geometries": [
                { "type": "MultiPoint", "coordinates": [[1, 1]] },
                { "type": "Point", "coordinates": [1, 1] }
            ]
        }));
        assert_eq!(find_line(&feature), None);
    }

    #[test]
    fn test_nested_collection_is_not_searched() {
        let feature = feature(json!({
            "type": "GeometryCollection",
            "geometries": [{
                "type": "GeometryCollection",
                "geometries": [{ "type": "LineString", "coordinates": [[0, 0], [1, 1]] }]
            }]
        }));
        assert_eq!(find_line(&feature), None);
    }

    #[test]
    fn test_other_geometry_types() {
        let point = feature(json!({ "type": "Point", "coordinates": [1, 1] }));
        let polygon = feature(json!({
            "type": "Polygon",
            "coordinates": [[[0, 0], [1, 0], [1, 1], [0, 0]]]
        }));
        assert_eq!(find_line(&point), None);
        assert_eq!(find_line(&polygon), None);
    }

    #[test]
    fn test_to_multi_line_string() {
        let parts = vec![
            vec![vec![0.0, 0.0], vec![1.0, 0.0]],
            vec![vec![2.0, 0.0], vec![3.0, 0.0, 10.0]],
        ];
        let lines = LineGeometry::MultiLineString(&parts)
            .to_multi_line_string()
            .unwrap();
        assert_eq!(lines.0.len(), 2);
        assert_eq!(lines.0[1].0[1], geo::Coord { x: 3.0, y: 0.0 });
    }
}
