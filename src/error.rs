//! Error types for the geometry core.

use thiserror::Error;

/// Result type alias for geometry operations.
pub type Result<T> = std::result::Result<T, GeoError>;

/// Errors reported by the geometry core.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeoError {
    /// Latitude/longitude out of range or not a finite number
    #[error("Invalid coordinate: {0}")]
    InvalidCoordinate(String),

    /// No coastline reference points were supplied
    #[error("No coastline data available")]
    EmptyCoastline,

    /// Geometry that cannot be used for the requested operation
    #[error("Degenerate geometry: {0}")]
    DegenerateGeometry(String),
}

/// Stable numeric codes for geometry errors.
/// Range: 10xxx.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeoErrorCode {
    InvalidCoordinate = 10001,
    EmptyCoastline = 10002,
    DegenerateGeometry = 10003,
}

impl GeoError {
    /// Returns the error code for this error.
    pub fn code(&self) -> GeoErrorCode {
        match self {
            GeoError::InvalidCoordinate(_) => GeoErrorCode::InvalidCoordinate,
            GeoError::EmptyCoastline => GeoErrorCode::EmptyCoastline,
            GeoError::DegenerateGeometry(_) => GeoErrorCode::DegenerateGeometry,
        }
    }
}
