//! Coordinate scalars, spatial primitives and borrowed input columns

pub mod spatial;
mod columns;
mod coord;

pub use columns::{PointColumns, PolygonColumns, PolylineColumns};
pub use coord::{CoordColumn, CoordFloat};
pub use spatial::{BoundingBox, Point};
