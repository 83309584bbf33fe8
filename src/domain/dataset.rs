use super::{Coastline, GeoPoint, PolygonRing};
use crate::error::{GeoError, Result};
use crate::geometry::offshore_boundary;

/// Read-only reference data shared by every reception check.
///
/// `coastline` holds the vertices used for distance measurement, `land` the
/// rings used for land/sea classification. The built-in fallback has no land
/// rings, so classification is skipped for it.
#[derive(Debug, Clone, PartialEq)]
pub struct CoastalDataset {
    coastline: Vec<GeoPoint>,
    land: Vec<PolygonRing>,
    shoreline: Option<Coastline>,
}

impl CoastalDataset {
    /// The hand-sampled Norwegian coastline, used when no land dataset loads.
    pub fn norway() -> Self {
        Self::from_coastline(Coastline::norway())
    }

    /// No coastline data loaded yet. Every reception check on it fails.
    pub fn empty() -> Self {
        Self {
            coastline: Vec::new(),
            land: Vec::new(),
            shoreline: None,
        }
    }

    pub fn from_coastline(coastline: Coastline) -> Self {
        Self {
            coastline: coastline.points().to_vec(),
            land: Vec::new(),
            shoreline: Some(coastline),
        }
    }

    /// Land-mass rings; every ring vertex becomes a coastline vertex.
    pub fn from_rings(rings: Vec<PolygonRing>) -> Result<Self> {
        if rings.is_empty() {
            return Err(GeoError::EmptyCoastline);
        }
        let coastline = rings
            .iter()
            .flat_map(|ring| ring.points().iter().copied())
            .collect();
        Ok(Self {
            coastline,
            land: rings,
            shoreline: None,
        })
    }

    pub fn coastline(&self) -> &[GeoPoint] {
        &self.coastline
    }

    /// The open shoreline polyline, when built from one
    pub fn shoreline(&self) -> Option<&Coastline> {
        self.shoreline.as_ref()
    }

    pub fn land(&self) -> &[PolygonRing] {
        &self.land
    }

    pub fn has_land(&self) -> bool {
        !self.land.is_empty()
    }

    /// One boundary ring per shoreline, `distance_m` seaward.
    ///
    /// Land rings are reoriented counter-clockwise first so the offset side
    /// faces the sea.
    pub fn offshore_boundaries(&self, distance_m: f64) -> Result<Vec<Vec<GeoPoint>>> {
        if let Some(shoreline) = &self.shoreline {
            return Ok(vec![offshore_boundary(shoreline.points(), distance_m)?]);
        }

        self.land
            .iter()
            .map(|ring| offshore_boundary(ring.to_seaward_coastline().points(), distance_m))
            .collect()
    }
}
