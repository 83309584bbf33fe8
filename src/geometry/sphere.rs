//! Great-circle primitives on a spherical Earth.
//!
//! All functions take and return degrees; trigonometry runs in radians.

use crate::domain::GeoPoint;

/// Earth's mean radius in meters. Fixed so results are reproducible.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Initial bearing from `from` to `to` along the great circle, in `[0, 360)`.
///
/// Returns 0 when the points coincide, where the bearing is undefined.
pub fn bearing_degrees(from: &GeoPoint, to: &GeoPoint) -> f64 {
    if from == to {
        return 0.0;
    }

    let (lat1, lon1) = from.to_radians();
    let (lat2, lon2) = to.to_radians();
    let d_lon = lon2 - lon1;

    let x = d_lon.sin() * lat2.cos();
    let y = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * d_lon.cos();

    normalize_bearing(x.atan2(y).to_degrees())
}

/// Project a point `distance_m` meters from `origin` along `bearing_deg`.
///
/// The resulting longitude is normalized into `[-180, 180)`.
pub fn destination_point(origin: &GeoPoint, bearing_deg: f64, distance_m: f64) -> GeoPoint {
    let (lat1, lon1) = origin.to_radians();
    let theta = bearing_deg.to_radians();
    let delta = distance_m / EARTH_RADIUS_M;

    let lat2 = (lat1.sin() * delta.cos() + lat1.cos() * delta.sin() * theta.cos()).asin();
    let lon2 = lon1
        + (theta.sin() * delta.sin() * lat1.cos()).atan2(delta.cos() - lat1.sin() * lat2.sin());

    GeoPoint::new_unchecked(
        lat2.to_degrees().clamp(-90.0, 90.0),
        normalize_longitude(lon2.to_degrees()),
    )
}

/// Great-circle distance in meters using the haversine formula.
#[inline]
pub fn haversine_distance(a: &GeoPoint, b: &GeoPoint) -> f64 {
    let (lat1, lon1) = a.to_radians();
    let (lat2, lon2) = b.to_radians();

    let d_lat = lat2 - lat1;
    let d_lon = lon2 - lon1;

    let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);

    2.0 * EARTH_RADIUS_M * h.sqrt().atan2((1.0 - h).sqrt())
}

fn normalize_bearing(deg: f64) -> f64 {
    let b = deg.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if b >= 360.0 { 0.0 } else { b }
}

fn normalize_longitude(deg: f64) -> f64 {
    let lon = (deg + 180.0).rem_euclid(360.0) - 180.0;
    if lon >= 180.0 { -180.0 } else { lon }
}
