pub mod loader;
pub mod natural_earth;

pub use loader::{DatasetLoader, DatasetSource, LoadedDataset, acquire_dataset};
pub use natural_earth::{LandGeoJson, fetch_land_geojson, load_dataset_file};
