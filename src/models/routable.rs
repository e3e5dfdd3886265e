//! Routable point types returned to the result-assembly stage.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{Feature, PointInput};

/// Name reserved for the primary (index 0) routable point
pub const DEFAULT_ROUTABLE_POINT: &str = "default_routable_point";

/// A named candidate point handed to the routing engine.
///
/// Used both for caller-supplied overrides and for resolved output. Members
/// other than `name` and `coordinates` are passed through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutablePoint {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// `[lon, lat]`
    pub coordinates: [f64; 2],

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RoutablePoint {
    pub fn new(name: Option<&str>, coordinates: [f64; 2]) -> Self {
        Self {
            name: name.map(String::from),
            coordinates,
            extra: Map::new(),
        }
    }

    /// The canonical default point at the given coordinates
    pub fn default_at(coordinates: [f64; 2]) -> Self {
        Self::new(Some(DEFAULT_ROUTABLE_POINT), coordinates)
    }

    pub fn is_default(&self) -> bool {
        self.name.as_deref() == Some(DEFAULT_ROUTABLE_POINT)
    }

    /// Absent and empty names both count as unnamed
    pub fn is_unnamed(&self) -> bool {
        self.name.as_deref().map_or(true, str::is_empty)
    }
}

/// Outcome of a resolution that could be evaluated.
///
/// `points: None` serializes as `{"points": null}` and means no routable
/// point could be found. When present the list is non-empty and index 0 is
/// the default routable point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutablePoints {
    pub points: Option<Vec<RoutablePoint>>,
}

impl RoutablePoints {
    pub fn found(points: Vec<RoutablePoint>) -> Self {
        Self {
            points: Some(points),
        }
    }

    pub fn not_found() -> Self {
        Self { points: None }
    }

    /// The index 0 entry, if any
    pub fn default_point(&self) -> Option<&RoutablePoint> {
        self.points.as_ref().and_then(|points| points.first())
    }
}

/// A single resolution request as accepted by the CLI and HTTP service
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoutableRequest {
    #[serde(default)]
    pub point: Option<PointInput>,

    #[serde(default)]
    pub feature: Option<Feature>,

    #[serde(default, alias = "overrides", skip_serializing_if = "Option::is_none")]
    pub routable_override: Option<Vec<RoutablePoint>>,
}
