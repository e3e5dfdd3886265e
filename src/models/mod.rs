//! Core data models for routable point resolution.

pub mod geojson;
pub mod routable;

pub use geojson::{Feature, Geometry, GeometryError, PointGeometry, PointInput, Position};
pub use routable::{RoutablePoint, RoutablePoints, RoutableRequest, DEFAULT_ROUTABLE_POINT};
