use serde::Serialize;

/// Outcome of a single reception check. Recomputed per query.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceptionVerdict {
    pub in_zone: bool,
    /// Meters to the nearest coastline reference point
    pub distance_to_coast: f64,
    pub on_land: bool,
    pub message: String,
}

impl ReceptionVerdict {
    pub fn distance_km(&self) -> f64 {
        crate::reception::round_km(self.distance_to_coast)
    }
}
