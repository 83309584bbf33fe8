use serde_json::{Value, json};

use crate::domain::GeoPoint;

/// Offshore boundaries as a GeoJSON `FeatureCollection` of closed
/// `LineString`s in `[lon, lat]` order.
pub fn boundaries_to_geojson(boundaries: &[Vec<GeoPoint>], distance_m: f64) -> Value {
    let features: Vec<Value> = boundaries
        .iter()
        .filter(|boundary| !boundary.is_empty())
        .enumerate()
        .map(|(index, boundary)| {
            let mut coordinates: Vec<[f64; 2]> =
                boundary.iter().map(GeoPoint::to_lon_lat).collect();
            coordinates.push(boundary[0].to_lon_lat());

            json!({
                "type": "Feature",
                "properties": {
                    "index": index,
                    "distance_m": distance_m,
                },
                "geometry": {
                    "type": "LineString",
                    "coordinates": coordinates,
                },
            })
        })
        .collect();

    json!({
        "type": "FeatureCollection",
        "features": features,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundary_feature_is_closed() {
        let boundary = vec![
            GeoPoint::new(60.0, 4.0).unwrap(),
            GeoPoint::new(61.0, 4.0).unwrap(),
            GeoPoint::new(61.0, 5.0).unwrap(),
        ];
        let value = boundaries_to_geojson(&[boundary, Vec::new()], 12_000.0);

        let features = value["features"].as_array().unwrap();
        assert_eq!(features.len(), 1);
        let coords = features[0]["geometry"]["coordinates"].as_array().unwrap();
        assert_eq!(coords.len(), 4);
        assert_eq!(coords[0], coords[3]);
        assert_eq!(coords[1], json!([4.0, 61.0]));
        assert_eq!(features[0]["properties"]["distance_m"], 12_000.0);
    }
}
