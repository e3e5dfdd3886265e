//! Nearest point on a line.

use geo::{Closest, ClosestPoint, Coord, MultiLineString, MultiPoint, Point};

/// Project `point` onto the closest segment of `line`.
///
/// Each segment projection is clamped to the segment endpoints, and the
/// candidate with the smallest planar distance across every member line is
/// kept. Zero-length segments clamp to their shared vertex. Returns `None`
/// when no member has at least two vertices. The result is not rounded.
pub fn project(line: &MultiLineString<f64>, point: Coord<f64>) -> Option<Coord<f64>> {
    let point = Point::from(point);
    match line.closest_point(&point) {
        Closest::Intersection(nearest) | Closest::SinglePoint(nearest) => Some(nearest.0),
        Closest::Indeterminate => nearest_vertex(line, &point),
    }
}

/// Nearest vertex of the members with at least two vertices.
///
/// `geo` gives no answer for zero-length segments, so a line made only of
/// repeated vertices lands here.
fn nearest_vertex(line: &MultiLineString<f64>, point: &Point<f64>) -> Option<Coord<f64>> {
    let vertices: MultiPoint<f64> = line
        .iter()
        .filter(|member| member.0.len() >= 2)
        .flat_map(|member| member.points())
        .collect();

    match vertices.closest_point(point) {
        Closest::Intersection(nearest) | Closest::SinglePoint(nearest) => Some(nearest.0),
        Closest::Indeterminate => None,
    }
}
