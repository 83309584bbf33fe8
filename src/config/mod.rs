use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::reception::{DistanceMode, RECEPTION_THRESHOLD_M};

fn default_threshold_m() -> f64 {
    RECEPTION_THRESHOLD_M
}
fn default_boundary_distance_m() -> f64 {
    RECEPTION_THRESHOLD_M
}
fn default_distance_mode() -> DistanceMode {
    DistanceMode::Vertex
}
fn default_verbose() -> bool {
    false
}

#[derive(Debug, Deserialize)]
pub struct FileConfig {
    #[serde(default = "default_threshold_m")]
    pub threshold_m: f64,
    #[serde(default = "default_boundary_distance_m")]
    pub boundary_distance_m: f64,
    #[serde(default = "default_distance_mode")]
    pub distance_mode: DistanceMode,
    #[serde(default = "default_verbose")]
    pub verbose: bool,
    #[serde(default)]
    pub dataset: Option<DatasetConfig>,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            threshold_m: default_threshold_m(),
            boundary_distance_m: default_boundary_distance_m(),
            distance_mode: default_distance_mode(),
            verbose: default_verbose(),
            dataset: None,
        }
    }
}

fn default_dataset_urls() -> Vec<String> {
    vec![
        "https://raw.githubusercontent.com/nvkelso/natural-earth-vector/master/geojson/ne_110m_land.geojson".to_string(),
        "https://cdn.jsdelivr.net/gh/nvkelso/natural-earth-vector@master/geojson/ne_110m_land.geojson".to_string(),
    ]
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_max_retries() -> u32 {
    3
}

/// Where the land-mass dataset comes from
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct DatasetConfig {
    /// Local GeoJSON file, tried first
    #[serde(default)]
    pub path: Option<PathBuf>,
    /// Download from `urls` when no file is usable
    #[serde(default)]
    pub fetch: bool,
    #[serde(default = "default_dataset_urls")]
    pub urls: Vec<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    /// RDP tolerance in degrees, 0 disables
    #[serde(default)]
    pub simplify_tolerance: f64,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            path: None,
            fetch: false,
            urls: default_dataset_urls(),
            timeout_secs: default_timeout_secs(),
            max_retries: default_max_retries(),
            simplify_tolerance: 0.0,
        }
    }
}

impl FileConfig {
    /// First parseable config file from the search paths
    pub fn load() -> Option<Self> {
        for path in get_config_paths() {
            if path.exists()
                && let Ok(contents) = std::fs::read_to_string(&path)
            {
                match Self::parse(&contents) {
                    Ok(config) => return Some(config),
                    Err(e) => {
                        warn!("Failed to parse config file {:?}: {:#}", path, e);
                    }
                }
            }
        }
        None
    }

    /// Load an explicitly requested config file. Missing is an error.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            bail!("Config file not found: {:?}", path);
        }
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        Self::parse(&contents).with_context(|| format!("Failed to parse config file: {:?}", path))
    }

    pub fn parse(contents: &str) -> Result<Self> {
        let config: Self = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if !self.threshold_m.is_finite() || self.threshold_m < 0.0 {
            bail!("threshold_m must be a non-negative number");
        }
        if !self.boundary_distance_m.is_finite() || self.boundary_distance_m < 0.0 {
            bail!("boundary_distance_m must be a non-negative number");
        }
        Ok(())
    }
}

fn get_config_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    paths.push(PathBuf::from("maritime-lte.toml"));
    paths.push(PathBuf::from(".maritime-lte.toml"));

    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join("maritime-lte").join("config.toml"));
        paths.push(config_dir.join("maritime-lte.toml"));
    }

    if let Some(home) = dirs::home_dir() {
        paths.push(home.join(".maritime-lte.toml"));
        paths.push(home.join(".config").join("maritime-lte").join("config.toml"));
    }

    paths
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_defaults_from_empty_file() {
        let config = FileConfig::parse("").unwrap();
        assert_eq!(config.threshold_m, 12_000.0);
        assert_eq!(config.boundary_distance_m, 12_000.0);
        assert_eq!(config.distance_mode, DistanceMode::Vertex);
        assert!(config.dataset.is_none());
    }

    #[test]
    fn test_dataset_table() {
        let config = FileConfig::parse(
            r#"
            threshold_m = 15000
            distance_mode = "segment"

            [dataset]
            path = "ne_110m_land.geojson"
            fetch = true
            simplify_tolerance = 0.05
            "#,
        )
        .unwrap();

        assert_eq!(config.threshold_m, 15_000.0);
        assert_eq!(config.distance_mode, DistanceMode::Segment);
        let dataset = config.dataset.unwrap();
        assert_eq!(dataset.path, Some(PathBuf::from("ne_110m_land.geojson")));
        assert!(dataset.fetch);
        assert_eq!(dataset.urls, default_dataset_urls());
        assert_eq!(dataset.max_retries, 3);
        assert_eq!(dataset.simplify_tolerance, 0.05);
    }

    #[test]
    fn test_negative_threshold_rejected() {
        assert!(FileConfig::parse("threshold_m = -1.0").is_err());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("maritime-lte.toml");
        fs::write(&path, "verbose = true\n").unwrap();

        let config = FileConfig::load_from(&path).unwrap();
        assert!(config.verbose);
        assert!(FileConfig::load_from(&dir.path().join("missing.toml")).is_err());
    }
}
