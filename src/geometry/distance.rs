//! Nearest-coast distance.
//!
//! The vertex search measures to the closest coastline point and relies on the
//! coastline being densely sampled. The segment search also measures to the
//! interior of each segment and converges to the same answer as sampling gets
//! denser.

use super::projection::Projector;
use super::sphere::haversine_distance;
use crate::domain::GeoPoint;
use crate::error::{GeoError, Result};

/// Closest coastline vertex to a query point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NearestCoastPoint {
    pub index: usize,
    pub point: GeoPoint,
    pub distance_m: f64,
}

/// Minimum great-circle distance in meters from `query` to any coastline vertex.
///
/// An empty coastline is an error, never an infinite distance.
pub fn distance_to_coast(query: &GeoPoint, coastline: &[GeoPoint]) -> Result<f64> {
    nearest_coast_point(query, coastline).map(|nearest| nearest.distance_m)
}

/// The closest coastline vertex and its distance. Ties go to the lower index.
pub fn nearest_coast_point(query: &GeoPoint, coastline: &[GeoPoint]) -> Result<NearestCoastPoint> {
    let mut best: Option<NearestCoastPoint> = None;

    for (index, point) in coastline.iter().enumerate() {
        let distance_m = haversine_distance(query, point);
        if best.is_none_or(|b| distance_m < b.distance_m) {
            best = Some(NearestCoastPoint {
                index,
                point: *point,
                distance_m,
            });
        }
    }

    best.ok_or(GeoError::EmptyCoastline)
}

/// Minimum distance in meters from `query` to the coastline polyline.
///
/// Each open segment is projected into a plane centred on the query, the
/// closest point on it is found there and measured back on the sphere. The
/// result never exceeds [`distance_to_coast`] for the same input.
pub fn distance_to_coast_segments(query: &GeoPoint, coastline: &[GeoPoint]) -> Result<f64> {
    segment_distance(query, coastline, false)
}

/// Like [`distance_to_coast_segments`] for a closed ring, including the edge
/// from the last point back to the first.
pub fn distance_to_ring_segments(query: &GeoPoint, ring: &[GeoPoint]) -> Result<f64> {
    segment_distance(query, ring, true)
}

fn segment_distance(query: &GeoPoint, points: &[GeoPoint], closed: bool) -> Result<f64> {
    let mut best = distance_to_coast(query, points)?;
    let projector = Projector::new(query);

    let closing = match (closed, points.first(), points.last()) {
        (true, Some(first), Some(last)) if points.len() > 2 => Some((last, first)),
        _ => None,
    };
    let segments = points
        .windows(2)
        .map(|pair| (&pair[0], &pair[1]))
        .chain(closing);

    for (start, end) in segments {
        let (a, b) = projector.project_segment(start, end);
        let (x, y) = closest_on_segment(a, b);
        let foot = projector.unproject(x, y);
        best = best.min(haversine_distance(query, &foot));
    }

    Ok(best)
}

/// Closest point to the origin on segment a-b in the plane
fn closest_on_segment(a: (f64, f64), b: (f64, f64)) -> (f64, f64) {
    let (dx, dy) = (b.0 - a.0, b.1 - a.1);
    let len_sq = dx * dx + dy * dy;
    if len_sq == 0.0 {
        return a;
    }
    let t = (-(a.0 * dx + a.1 * dy) / len_sq).clamp(0.0, 1.0);
    (a.0 + t * dx, a.1 + t * dy)
}
