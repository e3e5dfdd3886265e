//! Routable point resolver.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::{find_line, project};
use crate::models::{
    Feature, PointInput, RoutablePoint, RoutablePoints, RoutableRequest, DEFAULT_ROUTABLE_POINT,
};

/// Largest precision that still rounds meaningfully in an `f64`
pub const MAX_PRECISION: u32 = 15;

/// Tunables for resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverOptions {
    /// Decimal places kept on projected coordinates, capped at `MAX_PRECISION`
    pub precision: u32,
}

impl Default for ResolverOptions {
    fn default() -> Self {
        Self { precision: 6 }
    }
}

/// Resolve routable points for a matched address with default options.
///
/// Returns `None` when `point` or `feature` is missing or empty, and
/// `Some` with `points: None` when the feature has no line to project onto.
pub fn resolve(
    point: Option<&PointInput>,
    feature: Option<&Feature>,
    overrides: Option<&[RoutablePoint]>,
) -> Option<RoutablePoints> {
    resolve_with(point, feature, overrides, &ResolverOptions::default())
}

/// Resolve routable points for a matched address.
///
/// Precedence: a default or unnamed override short-circuits everything,
/// then interpolated points are returned as-is, otherwise the point is
/// projected onto the feature's line and any overrides follow it.
pub fn resolve_with(
    point: Option<&PointInput>,
    feature: Option<&Feature>,
    overrides: Option<&[RoutablePoint]>,
    options: &ResolverOptions,
) -> Option<RoutablePoints> {
    let point = point.filter(|p| !p.is_empty())?;
    let feature = feature.filter(|f| !f.is_empty())?;
    let overrides = overrides.unwrap_or_default();

    if let Some(points) = promote_default_override(overrides) {
        debug!("Using {} override point(s)", points.len());
        return Some(RoutablePoints::found(points));
    }

    if point.is_interpolated() {
        let points = point
            .coord()
            .map(|coord| vec![RoutablePoint::default_at([coord.x, coord.y])]);
        return Some(RoutablePoints { points });
    }

    let Some(line) = find_line(feature) else {
        debug!("Feature has no line geometry");
        return Some(RoutablePoints::not_found());
    };

    let line = match line.to_multi_line_string() {
        Ok(line) => line,
        Err(e) => {
            warn!("Skipping malformed line geometry: {}", e);
            return Some(RoutablePoints::not_found());
        }
    };

    let nearest = point.coord().and_then(|origin| project(&line, origin));
    let Some(nearest) = nearest else {
        debug!("No projection onto line with {} member(s)", line.0.len());
        return Some(RoutablePoints::not_found());
    };

    let coordinates = [
        round_to(nearest.x, options.precision),
        round_to(nearest.y, options.precision),
    ];

    // Overrides reaching this point are all named and none is the default
    let mut points = Vec::with_capacity(overrides.len() + 1);
    points.push(RoutablePoint::default_at(coordinates));
    points.extend(overrides.iter().cloned());

    Some(RoutablePoints::found(points))
}

/// Resolve many requests in parallel, preserving input order
pub fn resolve_batch(
    requests: &[RoutableRequest],
    options: &ResolverOptions,
) -> Vec<Option<RoutablePoints>> {
    requests
        .par_iter()
        .map(|request| request.resolve(options))
        .collect()
}

impl RoutableRequest {
    pub fn resolve(&self, options: &ResolverOptions) -> Option<RoutablePoints> {
        resolve_with(
            self.point.as_ref(),
            self.feature.as_ref(),
            self.routable_override.as_deref(),
            options,
        )
    }
}

/// Promote the first default-named or unnamed override to index 0.
///
/// Other overrides literally named as the default are dropped; further
/// unnamed overrides pass through unchanged.
fn promote_default_override(overrides: &[RoutablePoint]) -> Option<Vec<RoutablePoint>> {
    let index = overrides
        .iter()
        .position(|o| o.is_default() || o.is_unnamed())?;

    let mut promoted = overrides[index].clone();
    promoted.name = Some(DEFAULT_ROUTABLE_POINT.to_string());

    let mut points = vec![promoted];
    points.extend(
        overrides
            .iter()
            .enumerate()
            .filter(|(i, o)| *i != index && !o.is_default())
            .map(|(_, o)| o.clone()),
    );
    Some(points)
}

/// Round half away from zero at `precision` decimal places
fn round_to(value: f64, precision: u32) -> f64 {
    let factor = 10f64.powi(precision.min(MAX_PRECISION) as i32);
    (value * factor).round() / factor
}
