//! Dataset acquisition with fallback.
//!
//! The geometry core only ever sees an already-loaded [`CoastalDataset`].
//! Everything that can fail here (missing file, unreachable mirror, empty
//! dataset) degrades to the built-in Norwegian coastline.

use anyhow::{Result, bail};
use std::fmt;
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;
use tracing::{info, warn};

use super::natural_earth::{LandGeoJson, fetch_land_geojson, load_dataset_file};
use crate::config::DatasetConfig;
use crate::domain::CoastalDataset;
use crate::geojson::parse_land_rings;
use crate::geometry::simplify_ring;

/// Where the active dataset came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatasetSource {
    File(PathBuf),
    Remote(String),
    BuiltIn,
}

impl fmt::Display for DatasetSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatasetSource::File(path) => write!(f, "file {}", path.display()),
            DatasetSource::Remote(url) => write!(f, "remote {}", url),
            DatasetSource::BuiltIn => write!(f, "built-in Norway coastline"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct LoadedDataset {
    pub dataset: CoastalDataset,
    pub source: DatasetSource,
}

impl LoadedDataset {
    fn built_in() -> Self {
        Self {
            dataset: CoastalDataset::norway(),
            source: DatasetSource::BuiltIn,
        }
    }
}

/// Resolve the dataset: explicit file, then remote fetch if enabled, then
/// the built-in coastline.
pub fn acquire_dataset(config: &DatasetConfig) -> LoadedDataset {
    if let Some(path) = &config.path {
        match load_dataset_file(path).and_then(|data| build_dataset(&data, config)) {
            Ok(dataset) => {
                info!(path = ?path, rings = dataset.land().len(), "Loaded land dataset");
                return LoadedDataset {
                    dataset,
                    source: DatasetSource::File(path.clone()),
                };
            }
            Err(e) => warn!("Land dataset file unusable, falling back: {:#}", e),
        }
    }

    if config.fetch {
        let fetched = fetch_land_geojson(config)
            .and_then(|(url, data)| build_dataset(&data, config).map(|dataset| (url, dataset)));
        match fetched {
            Ok((url, dataset)) => {
                info!(url = %url, rings = dataset.land().len(), "Loaded land dataset");
                return LoadedDataset {
                    dataset,
                    source: DatasetSource::Remote(url),
                };
            }
            Err(e) => warn!("Land dataset download failed, falling back: {:#}", e),
        }
    }

    info!("Using built-in Norway coastline");
    LoadedDataset::built_in()
}

fn build_dataset(data: &LandGeoJson, config: &DatasetConfig) -> Result<CoastalDataset> {
    let mut rings = parse_land_rings(data);
    if rings.is_empty() {
        bail!("Land dataset contains no usable polygon rings");
    }
    if config.simplify_tolerance > 0.0 {
        rings = rings
            .iter()
            .map(|ring| simplify_ring(ring, config.simplify_tolerance))
            .collect();
    }
    Ok(CoastalDataset::from_rings(rings)?)
}

/// One-shot readiness handle for a dataset loading in the background.
///
/// The loader thread delivers exactly once; [`DatasetLoader::wait`] consumes
/// the handle.
pub struct DatasetLoader {
    receiver: mpsc::Receiver<LoadedDataset>,
}

impl DatasetLoader {
    pub fn spawn(config: DatasetConfig) -> Self {
        let (sender, receiver) = mpsc::sync_channel(1);
        thread::spawn(move || {
            // receiver dropped means nobody is waiting any more
            let _ = sender.send(acquire_dataset(&config));
        });
        Self { receiver }
    }

    /// Block until the dataset is ready.
    pub fn wait(self) -> LoadedDataset {
        match self.receiver.recv() {
            Ok(loaded) => loaded,
            Err(_) => {
                warn!("Dataset loader exited without a result, using built-in coastline");
                LoadedDataset::built_in()
            }
        }
    }
}
