use geo::{LineString, Winding};

use super::GeoPoint;
use crate::error::{GeoError, Result};

/// Hand-sampled Norwegian coastline, north to south and round the Skagerrak.
pub const NORWAY_COASTLINE: [GeoPoint; 19] = [
    GeoPoint::new_unchecked(71.1856, 25.7843), // Northern Norway
    GeoPoint::new_unchecked(70.6632, 23.6815),
    GeoPoint::new_unchecked(69.9496, 23.2717),
    GeoPoint::new_unchecked(69.0575, 20.2182),
    GeoPoint::new_unchecked(68.8908, 16.0304),
    GeoPoint::new_unchecked(68.5089, 14.6370),
    GeoPoint::new_unchecked(67.2804, 14.3656),
    GeoPoint::new_unchecked(66.3142, 12.4442),
    GeoPoint::new_unchecked(65.8470, 11.2280),
    GeoPoint::new_unchecked(64.4734, 11.3849),
    GeoPoint::new_unchecked(63.4305, 10.3951), // Trondheim
    GeoPoint::new_unchecked(62.4722, 6.1495),
    GeoPoint::new_unchecked(61.1217, 5.0218),
    GeoPoint::new_unchecked(60.3913, 5.3221), // Bergen
    GeoPoint::new_unchecked(59.9139, 10.7522), // Oslo
    GeoPoint::new_unchecked(58.9700, 9.2300),
    GeoPoint::new_unchecked(58.1467, 8.0014), // Kristiansand
    GeoPoint::new_unchecked(58.9667, 5.7333), // Stavanger
    GeoPoint::new_unchecked(59.2181, 5.0408),
];

/// An ordered shoreline polyline. Treated as a ring (wrapping index) when
/// generating offshore boundaries.
#[derive(Debug, Clone, PartialEq)]
pub struct Coastline {
    points: Vec<GeoPoint>,
}

impl Coastline {
    /// Requires at least 2 points.
    pub fn new(points: Vec<GeoPoint>) -> Result<Self> {
        match points.len() {
            0 => Err(GeoError::EmptyCoastline),
            1 => Err(GeoError::DegenerateGeometry(
                "coastline needs at least 2 points".to_string(),
            )),
            _ => Ok(Self { points }),
        }
    }

    pub fn norway() -> Self {
        Self {
            points: NORWAY_COASTLINE.to_vec(),
        }
    }

    pub fn points(&self) -> &[GeoPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Same shoreline traversed the other way, which flips the offshore side.
    pub fn reversed(&self) -> Self {
        let mut points = self.points.clone();
        points.reverse();
        Self { points }
    }
}

/// A closed polygon boundary. The closing point is implicit.
#[derive(Debug, Clone, PartialEq)]
pub struct PolygonRing {
    points: Vec<GeoPoint>,
}

impl PolygonRing {
    /// Build a ring, dropping consecutive duplicates and a literal closing
    /// point. Fewer than 3 distinct points is degenerate.
    pub fn new(points: Vec<GeoPoint>) -> Result<Self> {
        let mut cleaned: Vec<GeoPoint> = Vec::with_capacity(points.len());
        for p in points {
            if cleaned.last() != Some(&p) {
                cleaned.push(p);
            }
        }
        while cleaned.len() > 1 && cleaned.first() == cleaned.last() {
            cleaned.pop();
        }

        if cleaned.len() < 3 {
            return Err(GeoError::DegenerateGeometry(format!(
                "ring has {} distinct points, need at least 3",
                cleaned.len()
            )));
        }

        Ok(Self { points: cleaned })
    }

    pub fn points(&self) -> &[GeoPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Orientation in the lon/lat plane (x = longitude, y = latitude).
    pub fn is_counter_clockwise(&self) -> bool {
        let mut line: LineString<f64> = self
            .points
            .iter()
            .map(|p| geo::coord! { x: p.longitude(), y: p.latitude() })
            .collect();
        line.close();
        line.is_ccw()
    }

    /// The ring as a coastline ordered so that the right-hand side of travel
    /// (bearing + 90°) faces away from the enclosed land.
    pub fn to_seaward_coastline(&self) -> Coastline {
        let mut points = self.points.clone();
        if !self.is_counter_clockwise() {
            points.reverse();
        }
        Coastline { points }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pt(lat: f64, lon: f64) -> GeoPoint {
        GeoPoint::new(lat, lon).unwrap()
    }

    #[test]
    fn test_coastline_requires_two_points() {
        assert_eq!(Coastline::new(vec![]), Err(GeoError::EmptyCoastline));
        assert!(matches!(
            Coastline::new(vec![pt(60.0, 5.0)]),
            Err(GeoError::DegenerateGeometry(_))
        ));
        assert_eq!(
            Coastline::new(vec![pt(60.0, 5.0), pt(61.0, 5.0)])
                .unwrap()
                .len(),
            2
        );
    }

    #[test]
    fn test_norway_coastline() {
        let coast = Coastline::norway();
        assert_eq!(coast.len(), 19);
        assert_eq!(coast.points()[14], pt(59.9139, 10.7522));
    }

    #[test]
    fn test_ring_drops_closing_point() {
        let ring = PolygonRing::new(vec![
            pt(0.0, 0.0),
            pt(0.0, 1.0),
            pt(1.0, 1.0),
            pt(1.0, 0.0),
            pt(0.0, 0.0),
        ])
        .unwrap();
        assert_eq!(ring.len(), 4);
    }

    #[test]
    fn test_ring_drops_consecutive_duplicates() {
        let ring = PolygonRing::new(vec![
            pt(0.0, 0.0),
            pt(0.0, 1.0),
            pt(0.0, 1.0),
            pt(1.0, 1.0),
        ])
        .unwrap();
        assert_eq!(ring.len(), 3);
    }

    #[test]
    fn test_ring_degenerate() {
        let result = PolygonRing::new(vec![pt(0.0, 0.0), pt(0.0, 1.0), pt(0.0, 0.0)]);
        assert!(matches!(result, Err(GeoError::DegenerateGeometry(_))));
    }

    #[test]
    fn test_ring_orientation() {
        // lon/lat plane: (0,0) -> (1,0) -> (1,1) -> (0,1) is counter-clockwise
        let ccw = PolygonRing::new(vec![
            pt(0.0, 0.0),
            pt(0.0, 1.0),
            pt(1.0, 1.0),
            pt(1.0, 0.0),
        ])
        .unwrap();
        assert!(ccw.is_counter_clockwise());

        let cw = PolygonRing::new(vec![
            pt(0.0, 0.0),
            pt(1.0, 0.0),
            pt(1.0, 1.0),
            pt(0.0, 1.0),
        ])
        .unwrap();
        assert!(!cw.is_counter_clockwise());
        assert_eq!(cw.to_seaward_coastline().points()[0], pt(0.0, 1.0));
    }
}
