//! Quadtree index: Morton keys, quadrant geometry and the flattened node table

pub mod morton;
pub mod quadrant;
pub mod quadtree;

pub use quadrant::{QuadrantResolver, MAX_DEPTH_LIMIT};
pub use quadtree::{QuadNode, Quadtree};
