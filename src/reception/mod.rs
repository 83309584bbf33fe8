//! Reception decision: combines coastal distance and land/sea classification
//! against the offshore threshold.

use serde::Deserialize;
use tracing::debug;

use crate::domain::{CoastalDataset, GeoPoint, ReceptionVerdict};
use crate::error::Result;
use crate::geometry::{
    distance_to_coast, distance_to_coast_segments, distance_to_ring_segments, is_on_land,
};

/// Minimum distance from shore for maritime LTE coverage, in meters
pub const RECEPTION_THRESHOLD_M: f64 = 12_000.0;

/// Slack on the `distance >= threshold` comparison for floating point error
const THRESHOLD_TOLERANCE_M: f64 = 1e-6;

/// How the distance to the coast is measured
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DistanceMode {
    /// Nearest coastline vertex
    #[default]
    Vertex,
    /// Nearest point on any coastline segment
    Segment,
}

#[derive(Debug, Clone, Copy)]
pub struct ReceptionOptions {
    pub threshold_m: f64,
    pub mode: DistanceMode,
}

impl Default for ReceptionOptions {
    fn default() -> Self {
        Self {
            threshold_m: RECEPTION_THRESHOLD_M,
            mode: DistanceMode::Vertex,
        }
    }
}

impl ReceptionOptions {
    pub fn with_threshold(mut self, threshold_m: f64) -> Self {
        self.threshold_m = threshold_m;
        self
    }

    pub fn with_mode(mut self, mode: DistanceMode) -> Self {
        self.mode = mode;
        self
    }
}

/// Evaluate reception at `query` with vertex distance.
pub fn evaluate_reception(
    query: &GeoPoint,
    dataset: &CoastalDataset,
    threshold_m: f64,
) -> Result<ReceptionVerdict> {
    evaluate_reception_with(
        query,
        dataset,
        &ReceptionOptions::default().with_threshold(threshold_m),
    )
}

/// Evaluate reception at `query`.
///
/// Points inside a land ring are never in the zone. Land classification is
/// skipped when the dataset carries no rings.
pub fn evaluate_reception_with(
    query: &GeoPoint,
    dataset: &CoastalDataset,
    options: &ReceptionOptions,
) -> Result<ReceptionVerdict> {
    let distance = match options.mode {
        DistanceMode::Vertex => distance_to_coast(query, dataset.coastline())?,
        DistanceMode::Segment => segment_distance(query, dataset)?,
    };
    let on_land = dataset.has_land() && is_on_land(query, dataset.land());
    let in_zone = !on_land && distance + THRESHOLD_TOLERANCE_M >= options.threshold_m;

    debug!(
        lat = query.latitude(),
        lon = query.longitude(),
        distance_m = distance,
        on_land,
        in_zone,
        "Evaluated reception"
    );

    Ok(ReceptionVerdict {
        in_zone,
        distance_to_coast: distance,
        on_land,
        message: reception_message(in_zone, on_land, distance, options.threshold_m),
    })
}

/// Segment distance measured per shoreline, so no segment ever joins two
/// separate land masses.
fn segment_distance(query: &GeoPoint, dataset: &CoastalDataset) -> Result<f64> {
    let mut best = distance_to_coast(query, dataset.coastline())?;
    if let Some(shoreline) = dataset.shoreline() {
        best = best.min(distance_to_coast_segments(query, shoreline.points())?);
    }
    for ring in dataset.land() {
        best = best.min(distance_to_ring_segments(query, ring.points())?);
    }
    Ok(best)
}

/// Remaining distance to the threshold in meters, never negative
pub fn shortfall_m(distance_m: f64, threshold_m: f64) -> f64 {
    (threshold_m - distance_m).max(0.0)
}

/// Meters to kilometers rounded to 2 decimal places
pub fn round_km(meters: f64) -> f64 {
    (meters / 1000.0 * 100.0).round() / 100.0
}

fn reception_message(in_zone: bool, on_land: bool, distance_m: f64, threshold_m: f64) -> String {
    if on_land {
        "You are on land - no maritime LTE coverage".to_string()
    } else if in_zone {
        "You are in the Telenor Maritime LTE reception zone".to_string()
    } else {
        format!(
            "You need to be {:.2}km further offshore for LTE reception",
            round_km(shortfall_m(distance_m, threshold_m))
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Coastline, PolygonRing};

    fn pt(lat: f64, lon: f64) -> GeoPoint {
        GeoPoint::new(lat, lon).unwrap()
    }

    #[test]
    fn test_round_km() {
        assert_eq!(round_km(12_000.0), 12.0);
        assert_eq!(round_km(1_234.0), 1.23);
        assert_eq!(round_km(1_236.0), 1.24);
        assert_eq!(round_km(0.0), 0.0);
    }

    #[test]
    fn test_shortfall_clamped() {
        assert_eq!(shortfall_m(5_000.0, 12_000.0), 7_000.0);
        assert_eq!(shortfall_m(12_000.000_001, 12_000.0), 0.0);
    }

    #[test]
    fn test_far_at_sea_in_zone() {
        let verdict =
            evaluate_reception(&pt(65.0, 0.0), &CoastalDataset::norway(), RECEPTION_THRESHOLD_M)
                .unwrap();
        assert!(verdict.in_zone);
        assert!(!verdict.on_land);
        assert_eq!(
            verdict.message,
            "You are in the Telenor Maritime LTE reception zone"
        );
    }

    #[test]
    fn test_on_coast_point_not_in_zone() {
        let verdict = evaluate_reception(
            &pt(59.9139, 10.7522),
            &CoastalDataset::norway(),
            RECEPTION_THRESHOLD_M,
        )
        .unwrap();
        assert!(!verdict.in_zone);
        assert!(verdict.distance_to_coast < 1.0);
        assert_eq!(
            verdict.message,
            "You need to be 12.00km further offshore for LTE reception"
        );
    }

    #[test]
    fn test_on_land_never_in_zone() {
        let island = PolygonRing::new(vec![
            pt(60.0, 0.0),
            pt(60.0, 2.0),
            pt(62.0, 2.0),
            pt(62.0, 0.0),
        ])
        .unwrap();
        let dataset = CoastalDataset::from_rings(vec![island]).unwrap();

        // centre of a 2x2 degree island is far more than 12 km from its vertices
        let verdict = evaluate_reception(&pt(61.0, 1.0), &dataset, RECEPTION_THRESHOLD_M).unwrap();
        assert!(verdict.distance_to_coast > 12_000.0);
        assert!(verdict.on_land);
        assert!(!verdict.in_zone);
    }

    #[test]
    fn test_segment_mode_is_stricter() {
        let coast = Coastline::new(vec![pt(60.0, 5.0), pt(61.0, 5.0)]).unwrap();
        let dataset = CoastalDataset::from_coastline(coast);
        let query = pt(60.5, 5.1);

        let vertex = evaluate_reception_with(&query, &dataset, &ReceptionOptions::default())
            .unwrap();
        let segment = evaluate_reception_with(
            &query,
            &dataset,
            &ReceptionOptions::default().with_mode(DistanceMode::Segment),
        )
        .unwrap();

        assert!(vertex.in_zone);
        assert!(!segment.in_zone);
    }

    #[test]
    fn test_segment_mode_keeps_islands_apart() {
        let square = |lat: f64, lon: f64| {
            PolygonRing::new(vec![
                pt(lat, lon),
                pt(lat, lon + 1.0),
                pt(lat + 1.0, lon + 1.0),
                pt(lat + 1.0, lon),
            ])
            .unwrap()
        };
        let dataset =
            CoastalDataset::from_rings(vec![square(0.0, 0.0), square(10.0, 10.0)]).unwrap();

        // open water halfway between the islands
        let query = pt(5.5, 5.0);
        let vertex = evaluate_reception_with(&query, &dataset, &ReceptionOptions::default())
            .unwrap();
        let segment = evaluate_reception_with(
            &query,
            &dataset,
            &ReceptionOptions::default().with_mode(DistanceMode::Segment),
        )
        .unwrap();

        assert!(segment.distance_to_coast > 400_000.0);
        assert!(segment.distance_to_coast <= vertex.distance_to_coast);
        assert!(segment.in_zone);
        assert!(!segment.on_land);
    }

    #[test]
    fn test_segment_mode_empty_dataset_errors() {
        let result = evaluate_reception_with(
            &pt(60.0, 5.0),
            &CoastalDataset::empty(),
            &ReceptionOptions::default().with_mode(DistanceMode::Segment),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_dataset_errors() {
        let dataset = CoastalDataset::from_rings(vec![]);
        assert!(dataset.is_err());
    }
}
