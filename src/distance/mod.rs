//! Distance computations for the nearest-polyline narrow phase

pub mod segment;

pub use segment::{point_polyline_distance, point_segment_distance, point_segment_distance_squared};
