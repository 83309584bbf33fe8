use anyhow::{Context, Result, bail};
use serde::Deserialize;
use serde_json::Value;
use std::path::Path;
use std::time::Duration;
use tracing::{info, warn};

use crate::config::DatasetConfig;

const USER_AGENT: &str = "maritime-lte/0.1.0";

/// Land-mass GeoJSON as published by Natural Earth (`ne_*_land.geojson`)
#[derive(Debug, Deserialize)]
pub struct LandGeoJson {
    #[serde(default)]
    pub features: Vec<Feature>,
}

#[derive(Debug, Deserialize)]
pub struct Feature {
    #[serde(default)]
    pub geometry: Option<Geometry>,
}

/// Geometry with its coordinates left untyped until the parser knows the type
#[derive(Debug, Deserialize)]
pub struct Geometry {
    #[serde(rename = "type")]
    pub type_: String,
    #[serde(default)]
    pub coordinates: Value,
}

/// Read a land GeoJSON file from disk
pub fn load_dataset_file(path: &Path) -> Result<LandGeoJson> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read land dataset {:?}", path))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse land dataset {:?}", path))
}

/// Download the land GeoJSON, trying each configured mirror in turn.
///
/// Returns the URL that answered along with the data.
pub fn fetch_land_geojson(config: &DatasetConfig) -> Result<(String, LandGeoJson)> {
    if config.urls.is_empty() {
        bail!("No dataset URLs configured");
    }

    let client = reqwest::blocking::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(Duration::from_secs(config.timeout_secs))
        .build()
        .context("Failed to create HTTP client")?;

    let mut last_error = None;
    for url in &config.urls {
        match fetch_from_mirror(&client, url, config.max_retries) {
            Ok(data) => {
                info!(url = %url, features = data.features.len(), "Fetched land dataset");
                return Ok((url.clone(), data));
            }
            Err(e) => {
                warn!(url = %url, "Land dataset mirror failed: {:#}", e);
                last_error = Some(e);
            }
        }
    }

    let err = last_error.unwrap_or_else(|| anyhow::anyhow!("Unknown error"));
    Err(err.context("All land dataset mirrors failed"))
}

/// Fetch from one mirror, retrying on 429 and 5xx
fn fetch_from_mirror(
    client: &reqwest::blocking::Client,
    url: &str,
    max_retries: u32,
) -> Result<LandGeoJson> {
    let attempts = max_retries.max(1);
    let mut last_error = None;

    for attempt in 0..attempts {
        if attempt > 0 {
            let wait_secs = 2 * attempt as u64;
            warn!(
                "Land dataset request failed, retrying in {} seconds (attempt {}/{})",
                wait_secs,
                attempt + 1,
                attempts
            );
            std::thread::sleep(Duration::from_secs(wait_secs));
        }

        let response = match client.get(url).send() {
            Ok(response) => response,
            Err(e) => {
                last_error = Some(format!(
                    "Failed to send request to {} (attempt {}): {}",
                    url,
                    attempt + 1,
                    e
                ));
                continue;
            }
        };

        let status = response.status();
        if status.is_success() {
            return response
                .json()
                .context("Failed to parse land dataset JSON response");
        }
        if status.as_u16() == 429 || status.is_server_error() {
            last_error = Some(format!(
                "{} returned status {} (attempt {})",
                url,
                status,
                attempt + 1
            ));
            continue;
        }
        bail!("{} returned error status: {}", url, status);
    }

    bail!(
        "Land dataset request failed after {} attempts: {}",
        attempts,
        last_error.unwrap_or_else(|| "Unknown error".to_string())
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_parse_land_geojson() {
        let json = r#"{
            "type": "FeatureCollection",
            "features": [
                {"type": "Feature", "properties": {"featurecla": "Land"},
                 "geometry": {"type": "Polygon", "coordinates": [[[0,0],[1,0],[1,1],[0,0]]]}}
            ]
        }"#;

        let data: LandGeoJson = serde_json::from_str(json).unwrap();
        assert_eq!(data.features.len(), 1);
        let geometry = data.features[0].geometry.as_ref().unwrap();
        assert_eq!(geometry.type_, "Polygon");
        assert!(geometry.coordinates.is_array());
    }

    #[test]
    fn test_load_dataset_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("land.geojson");
        fs::write(&path, r#"{"type":"FeatureCollection","features":[]}"#).unwrap();

        let data = load_dataset_file(&path).unwrap();
        assert!(data.features.is_empty());
    }

    #[test]
    fn test_load_dataset_file_missing() {
        let dir = tempdir().unwrap();
        assert!(load_dataset_file(&dir.path().join("absent.geojson")).is_err());
    }

    #[test]
    fn test_fetch_without_urls() {
        let config = DatasetConfig {
            urls: Vec::new(),
            ..DatasetConfig::default()
        };
        assert!(fetch_land_geojson(&config).is_err());
    }

    #[test]
    fn test_transport_errors_are_retried() {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(2))
            .build()
            .unwrap();

        // nothing listens on the discard port, so every attempt is refused
        let err = fetch_from_mirror(&client, "http://127.0.0.1:9/land.geojson", 2).unwrap_err();
        let message = format!("{:#}", err);
        assert!(message.contains("after 2 attempts"), "{}", message);
        assert!(message.contains("Failed to send request"), "{}", message);
    }
}
