pub mod parser;
pub mod writer;

pub use parser::{parse_land_rings, positions_to_points};
pub use writer::boundaries_to_geojson;
