pub mod classify;
pub mod distance;
pub mod offset;
pub mod projection;
pub mod simplify;
pub mod sphere;

pub use classify::{is_inside_polygon, is_on_land};
pub use distance::{
    NearestCoastPoint, distance_to_coast, distance_to_coast_segments, distance_to_ring_segments,
    nearest_coast_point,
};
pub use offset::offshore_boundary;
pub use projection::Projector;
pub use simplify::{simplify_polyline, simplify_ring};
pub use sphere::{EARTH_RADIUS_M, bearing_degrees, destination_point, haversine_distance};
