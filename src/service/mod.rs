//! HTTP-style request handling, independent of any web framework.
//!
//! A request body `{"latitude": .., "longitude": ..}` goes in, a status code
//! and JSON body come out. Coordinates may be JSON numbers or numeric strings.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::domain::{CoastalDataset, GeoPoint};
use crate::reception::{ReceptionOptions, evaluate_reception_with};

const STATUS_UNAVAILABLE_MESSAGE: &str = "Unable to determine reception status";

#[derive(Debug, Default, Deserialize)]
pub struct ReceptionRequest {
    #[serde(default)]
    pub latitude: Option<Value>,
    #[serde(default)]
    pub longitude: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceptionResponse {
    pub in_reception_zone: bool,
    /// Rounded to whole meters
    pub distance_to_coast: i64,
    pub distance_to_coast_km: f64,
    pub on_land: bool,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    MissingCoordinates,
    InvalidCoordinate,
    CoordinateOutOfRange,
    MalformedRequest,
    StatusUnavailable,
}

impl ErrorCode {
    pub fn status(&self) -> u16 {
        match self {
            ErrorCode::MissingCoordinates
            | ErrorCode::InvalidCoordinate
            | ErrorCode::MalformedRequest => 400,
            ErrorCode::CoordinateOutOfRange => 422,
            ErrorCode::StatusUnavailable => 503,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: ErrorCode,
    pub status: u16,
}

impl ErrorResponse {
    fn new(code: ErrorCode, error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            code,
            status: code.status(),
        }
    }
}

/// Status code and serialized JSON body
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceReply {
    pub status: u16,
    pub body: String,
}

/// Handle a raw JSON request body.
pub fn handle_request(
    body: &str,
    dataset: &CoastalDataset,
    options: &ReceptionOptions,
) -> ServiceReply {
    let result = serde_json::from_str::<ReceptionRequest>(body)
        .map_err(|e| ErrorResponse::new(ErrorCode::MalformedRequest, e.to_string()))
        .and_then(|request| check_reception(&request, dataset, options));

    match result {
        Ok(response) => ServiceReply {
            status: 200,
            body: to_json(&response),
        },
        Err(error) => ServiceReply {
            status: error.status,
            body: to_json(&error),
        },
    }
}

/// Validate a request and evaluate reception for it.
pub fn check_reception(
    request: &ReceptionRequest,
    dataset: &CoastalDataset,
    options: &ReceptionOptions,
) -> Result<ReceptionResponse, ErrorResponse> {
    let (latitude, longitude) = match (&request.latitude, &request.longitude) {
        (Some(lat), Some(lon)) if !lat.is_null() && !lon.is_null() => (lat, lon),
        _ => {
            return Err(ErrorResponse::new(
                ErrorCode::MissingCoordinates,
                "Latitude and longitude required",
            ));
        }
    };

    let latitude = parse_coordinate("latitude", latitude)?;
    let longitude = parse_coordinate("longitude", longitude)?;

    let query = GeoPoint::new(latitude, longitude)
        .map_err(|e| ErrorResponse::new(ErrorCode::CoordinateOutOfRange, e.to_string()))?;

    let verdict = evaluate_reception_with(&query, dataset, options).map_err(|e| {
        warn!(code = e.code() as u32, "Reception check failed: {}", e);
        ErrorResponse::new(ErrorCode::StatusUnavailable, STATUS_UNAVAILABLE_MESSAGE)
    })?;

    Ok(ReceptionResponse {
        in_reception_zone: verdict.in_zone,
        distance_to_coast: verdict.distance_to_coast.round() as i64,
        distance_to_coast_km: verdict.distance_km(),
        on_land: verdict.on_land,
        message: verdict.message,
    })
}

fn parse_coordinate(name: &str, value: &Value) -> Result<f64, ErrorResponse> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    match parsed {
        Some(v) if v.is_finite() => Ok(v),
        _ => Err(ErrorResponse::new(
            ErrorCode::InvalidCoordinate,
            format!("{} must be a number", name),
        )),
    }
}

fn to_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value)
        .unwrap_or_else(|e| format!(r#"{{"error":"serialization failed: {}"}}"#, e))
}
