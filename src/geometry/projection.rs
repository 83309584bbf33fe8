use std::f64::consts::PI;

use super::sphere::EARTH_RADIUS_M;
use crate::domain::GeoPoint;

/// Meters per degree of latitude on the reference sphere
const METERS_PER_DEGREE: f64 = EARTH_RADIUS_M * PI / 180.0;

/// Local equirectangular projection from WGS84 to meters around an origin
///
/// - x = (lon - origin_lon) * cos(origin_lat) * METERS_PER_DEGREE
/// - y = (lat - origin_lat) * METERS_PER_DEGREE
///
/// Accurate to well under a percent within a few hundred kilometers of the
/// origin, which is the scale of a nearest-coast search.
#[derive(Debug, Clone)]
pub struct Projector {
    origin_lat: f64,
    origin_lon: f64,
    cos_lat: f64,
}

impl Projector {
    pub fn new(origin: &GeoPoint) -> Self {
        Self {
            origin_lat: origin.latitude(),
            origin_lon: origin.longitude(),
            // keep the inverse finite at the poles
            cos_lat: origin.latitude().to_radians().cos().max(1e-9),
        }
    }

    /// Project to (x, y) meters relative to the origin
    pub fn project(&self, point: &GeoPoint) -> (f64, f64) {
        let d_lon = wrap_degrees(point.longitude() - self.origin_lon);
        let x = d_lon * self.cos_lat * METERS_PER_DEGREE;
        let y = (point.latitude() - self.origin_lat) * METERS_PER_DEGREE;
        (x, y)
    }

    /// Project both ends of a segment, unwrapping `b` relative to `a` so a
    /// segment crossing the antimeridian stays short in the plane
    pub fn project_segment(&self, a: &GeoPoint, b: &GeoPoint) -> ((f64, f64), (f64, f64)) {
        let d_lon_a = wrap_degrees(a.longitude() - self.origin_lon);
        let d_lon_b = d_lon_a + wrap_degrees(b.longitude() - a.longitude());

        let scale_x = self.cos_lat * METERS_PER_DEGREE;
        (
            (
                d_lon_a * scale_x,
                (a.latitude() - self.origin_lat) * METERS_PER_DEGREE,
            ),
            (
                d_lon_b * scale_x,
                (b.latitude() - self.origin_lat) * METERS_PER_DEGREE,
            ),
        )
    }

    /// Inverse of [`Projector::project`]
    pub fn unproject(&self, x: f64, y: f64) -> GeoPoint {
        let lat = (self.origin_lat + y / METERS_PER_DEGREE).clamp(-90.0, 90.0);
        let lon = wrap_degrees(self.origin_lon + x / (self.cos_lat * METERS_PER_DEGREE));
        GeoPoint::new_unchecked(lat, lon)
    }
}

/// Wrap a longitude or longitude difference into [-180, 180)
fn wrap_degrees(deg: f64) -> f64 {
    (deg + 180.0).rem_euclid(360.0) - 180.0
}
