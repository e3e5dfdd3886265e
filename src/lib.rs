//! Routable - routable point resolution for geocoded address features
//!
//! This library provides the shared types and resolver used by the resolve
//! and query binaries.

pub mod config;
pub mod models;
pub mod routing;

pub use models::{Feature, Geometry, PointInput, RoutablePoint, RoutablePoints, RoutableRequest};
pub use routing::{resolve, resolve_batch, resolve_with, ResolverOptions};
