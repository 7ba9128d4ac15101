//! Exact geometric predicates used by the narrow phase

pub mod containment;

pub use crate::types::spatial::box_intersects;
pub use containment::{point_in_polygon, point_in_ring, Ring};
