pub mod coastline;
pub mod dataset;
pub mod point;
pub mod verdict;

pub use coastline::{Coastline, NORWAY_COASTLINE, PolygonRing};
pub use dataset::CoastalDataset;
pub use point::GeoPoint;
pub use verdict::ReceptionVerdict;
