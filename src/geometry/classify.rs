//! Land/sea classification by ray casting.
//!
//! The ray runs north from the query point (increasing latitude) and each
//! ring edge that straddles the query's longitude and lies north of it
//! toggles the result. Edges are half-open in longitude and the latitude test
//! is strict, so a point lying exactly on a ring's boundary is classified as
//! if it had been nudged an infinitesimal distance north-east: southern and
//! western edges count as inside, northern and eastern edges as outside.

use crate::domain::{GeoPoint, PolygonRing};
use crate::error::{GeoError, Result};

/// Whether `query` lies inside `ring`. The ring closes implicitly.
///
/// Rings with fewer than 3 points are rejected.
pub fn is_inside_polygon(query: &GeoPoint, ring: &[GeoPoint]) -> Result<bool> {
    if ring.len() < 3 {
        return Err(GeoError::DegenerateGeometry(format!(
            "ring has {} points, need at least 3",
            ring.len()
        )));
    }

    let lat = query.latitude();
    let lon = query.longitude();
    let mut inside = false;
    let mut j = ring.len() - 1;

    for i in 0..ring.len() {
        let (lat_i, lon_i) = (ring[i].latitude(), ring[i].longitude());
        let (lat_j, lon_j) = (ring[j].latitude(), ring[j].longitude());

        if (lon_i > lon) != (lon_j > lon) {
            let edge_lat = (lat_j - lat_i) * (lon - lon_i) / (lon_j - lon_i) + lat_i;
            if lat < edge_lat {
                inside = !inside;
            }
        }
        j = i;
    }

    Ok(inside)
}

/// Whether `query` lies inside any of the land rings.
pub fn is_on_land(query: &GeoPoint, rings: &[PolygonRing]) -> bool {
    rings.iter().any(|ring| {
        // PolygonRing guarantees at least 3 points
        is_inside_polygon(query, ring.points()).unwrap_or(false)
    })
}
