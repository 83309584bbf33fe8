use super::sphere::{bearing_degrees, destination_point};
use crate::domain::GeoPoint;
use crate::error::{GeoError, Result};

/// Offset every coastline vertex `distance_m` meters to the right of the
/// direction of travel, producing one boundary point per input point.
///
/// The coastline is treated as a ring: the last vertex pairs with the first.
/// With vertices ordered so that the sea lies on the right-hand side (for
/// example north to south along a west-facing coast, or counter-clockwise
/// round a land mass) the boundary lies offshore.
///
/// This approximates a buffer; corners are neither mitred nor bevelled and
/// sharp bends can make the boundary overlap itself. Fine for drawing, not
/// for area computations.
pub fn offshore_boundary(coastline: &[GeoPoint], distance_m: f64) -> Result<Vec<GeoPoint>> {
    if coastline.is_empty() {
        return Err(GeoError::EmptyCoastline);
    }
    if coastline.len() < 2 {
        return Err(GeoError::DegenerateGeometry(
            "offshore boundary needs at least 2 points".to_string(),
        ));
    }

    let n = coastline.len();
    let mut boundary = Vec::with_capacity(n);

    for i in 0..n {
        let point = &coastline[i];
        let next = &coastline[(i + 1) % n];
        if point == next {
            return Err(GeoError::DegenerateGeometry(format!(
                "zero-length segment at index {}",
                i
            )));
        }

        let bearing = bearing_degrees(point, next);
        let perpendicular = (bearing + 90.0) % 360.0;
        boundary.push(destination_point(point, perpendicular, distance_m));
    }

    Ok(boundary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Coastline, NORWAY_COASTLINE};
    use crate::geometry::{distance_to_coast, haversine_distance};

    fn pt(lat: f64, lon: f64) -> GeoPoint {
        GeoPoint::new(lat, lon).unwrap()
    }

    #[test]
    fn test_same_length() {
        let boundary = offshore_boundary(&NORWAY_COASTLINE, 12_000.0).unwrap();
        assert_eq!(boundary.len(), NORWAY_COASTLINE.len());
    }

    #[test]
    fn test_offset_distance() {
        let boundary = offshore_boundary(&NORWAY_COASTLINE, 12_000.0).unwrap();
        for (coast, offset) in NORWAY_COASTLINE.iter().zip(&boundary) {
            let d = haversine_distance(coast, offset);
            assert!((d - 12_000.0).abs() < 1.0, "offset distance {}", d);
        }
    }

    #[test]
    fn test_west_facing_coast_north_to_south_offsets_west() {
        // Bergen-like coast traversed southwards: right-hand side is west
        let coast = [pt(61.0, 5.0), pt(60.0, 5.0)];
        let boundary = offshore_boundary(&coast, 12_000.0).unwrap();
        assert!(boundary[0].longitude() < 5.0);
        assert!((boundary[0].latitude() - 61.0).abs() < 0.01);
    }

    #[test]
    fn test_reversed_order_flips_side() {
        let southward = Coastline::new(vec![pt(61.0, 5.0), pt(60.0, 5.0)]).unwrap();
        let northward = southward.reversed();

        let west = offshore_boundary(southward.points(), 12_000.0).unwrap();
        let east = offshore_boundary(northward.points(), 12_000.0).unwrap();
        assert!(west[0].longitude() < 5.0);
        assert!(east[0].longitude() > 5.0);
        assert!((east[0].latitude() - 60.0).abs() < 0.01);
    }

    #[test]
    fn test_norway_west_coast_offsets_to_sea() {
        // Trondheim -> Aalesund leg heads south-west, offset goes north-west
        let boundary = offshore_boundary(&NORWAY_COASTLINE, 12_000.0).unwrap();
        let trondheim_offset = boundary[10];
        assert!(trondheim_offset.latitude() > NORWAY_COASTLINE[10].latitude());
        assert!(trondheim_offset.longitude() < NORWAY_COASTLINE[10].longitude());
    }

    #[test]
    fn test_boundary_point_is_threshold_from_coast() {
        let coast = [pt(60.1, 5.0), pt(60.0, 5.0)];
        let boundary = offshore_boundary(&coast, 12_000.0).unwrap();
        let d = distance_to_coast(&boundary[0], &coast).unwrap();
        assert!((d - 12_000.0).abs() < 1e-3, "distance {}", d);
    }

    #[test]
    fn test_empty_and_degenerate_input() {
        assert_eq!(
            offshore_boundary(&[], 12_000.0),
            Err(GeoError::EmptyCoastline)
        );
        assert!(matches!(
            offshore_boundary(&[pt(60.0, 5.0)], 12_000.0),
            Err(GeoError::DegenerateGeometry(_))
        ));
        assert!(matches!(
            offshore_boundary(&[pt(60.0, 5.0), pt(60.0, 5.0), pt(61.0, 5.0)], 12_000.0),
            Err(GeoError::DegenerateGeometry(_))
        ));
    }
}
