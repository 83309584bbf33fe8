use geo::{LineString, Simplify};

use crate::domain::{GeoPoint, PolygonRing};

/// Ramer-Douglas-Peucker thinning of a lon/lat polyline.
///
/// `epsilon` is in degrees. Inputs shorter than 4 points are returned as is.
pub fn simplify_polyline(points: &[GeoPoint], epsilon: f64) -> Vec<GeoPoint> {
    if points.len() < 4 || epsilon <= 0.0 {
        return points.to_vec();
    }

    let line: LineString<f64> = points
        .iter()
        .map(|p| geo::coord! { x: p.longitude(), y: p.latitude() })
        .collect();

    let simplified = line.simplify(&epsilon);

    simplified
        .0
        .into_iter()
        .map(|c| GeoPoint::new_unchecked(c.y, c.x))
        .collect()
}

/// Thin a land ring, keeping the original when simplification would
/// collapse it below a triangle.
pub fn simplify_ring(ring: &PolygonRing, epsilon: f64) -> PolygonRing {
    if ring.len() < 5 || epsilon <= 0.0 {
        return ring.clone();
    }

    // close the ring so RDP keeps the seam vertex
    let mut closed = ring.points().to_vec();
    closed.push(ring.points()[0]);

    let simplified = simplify_polyline(&closed, epsilon);
    PolygonRing::new(simplified).unwrap_or_else(|_| ring.clone())
}
