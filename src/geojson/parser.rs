use serde_json::Value;
use tracing::debug;

use crate::api::LandGeoJson;
use crate::domain::{GeoPoint, PolygonRing};

/// Polygon coordinates: rings of `[lon, lat, ...]` positions
type PolygonCoords = Vec<Vec<Vec<f64>>>;

/// Flatten a GeoJSON land dataset into polygon rings
///
/// # Algorithm
/// 1. For each feature with a `Polygon` geometry take its outer ring
/// 2. For `MultiPolygon` take the outer ring of every member polygon
/// 3. Swap `[lon, lat]` positions into `GeoPoint`s, skipping invalid ones
/// 4. Drop rings that end up with fewer than 3 distinct points
///
/// Holes and other geometry types are ignored.
pub fn parse_land_rings(data: &LandGeoJson) -> Vec<PolygonRing> {
    let mut rings = Vec::new();

    for feature in &data.features {
        let geometry = match &feature.geometry {
            Some(g) => g,
            None => continue,
        };

        let polygons: Vec<PolygonCoords> = match geometry.type_.as_str() {
            "Polygon" => match polygon_coords(&geometry.coordinates) {
                Some(p) => vec![p],
                None => continue,
            },
            "MultiPolygon" => {
                match serde_json::from_value::<Vec<PolygonCoords>>(geometry.coordinates.clone()) {
                    Ok(p) => p,
                    Err(e) => {
                        debug!("Skipping malformed MultiPolygon: {}", e);
                        continue;
                    }
                }
            }
            other => {
                debug!("Skipping unsupported geometry type {}", other);
                continue;
            }
        };

        for polygon in polygons {
            let outer = match polygon.first() {
                Some(o) => o,
                None => continue,
            };

            match PolygonRing::new(positions_to_points(outer)) {
                Ok(ring) => rings.push(ring),
                Err(e) => debug!("Skipping land ring: {}", e),
            }
        }
    }

    rings
}

/// Convert `[lon, lat]` positions to points, dropping malformed entries
pub fn positions_to_points(positions: &[Vec<f64>]) -> Vec<GeoPoint> {
    positions
        .iter()
        .filter_map(|pos| match pos.as_slice() {
            [lon, lat, ..] => GeoPoint::new(*lat, *lon).ok(),
            _ => None,
        })
        .collect()
}

fn polygon_coords(value: &Value) -> Option<PolygonCoords> {
    match serde_json::from_value(value.clone()) {
        Ok(p) => Some(p),
        Err(e) => {
            debug!("Skipping malformed Polygon: {}", e);
            None
        }
    }
}
