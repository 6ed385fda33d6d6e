//! Spatial indexing and query utilities.

pub mod index;
pub mod queries;

pub use index::{PointNode, SegmentNode};
pub use queries::{
    haversine_distance, haversine_distance_to_line, prefilter_radius_degrees, METERS_PER_DEGREE,
};
