//! Quadtree spatial join
//!
//! # Module Structure
//! - `core`: QuadtreeJoinExecutor and the work-splitting helper
//! - `bbox_join`: broad phase, shape boxes against quadtree leaves
//! - `point_in_polygon`: narrow phase, exact containment per candidate pair
//! - `nearest_polyline`: narrow phase, closest polyline per point
//! - `columnar`: runtime-typed (`f32`/`f64`) entry points
//! - `tables`: candidate-pair and result tables
//!
//! The free functions below run with the default
//! [`ExecutionConfig`](crate::config::ExecutionConfig) (parallel from 1024 work
//! items up). Use [`QuadtreeJoinExecutor`] to change it.

pub mod bbox_join;
pub mod columnar;
pub mod core;
pub mod nearest_polyline;
pub mod point_in_polygon;
pub mod tables;

pub use bbox_join::{BroadPhaseStats, WaveStats};
pub use columnar::{DistanceColumn, NearestPolylineTable};
pub use self::core::QuadtreeJoinExecutor;
pub use tables::{CandidatePairs, NearestPolylineResult, PointInPolygonResult};

use crate::config::IndexParams;
use crate::index::Quadtree;
use crate::types::{BoundingBox, CoordFloat, PointColumns, PolygonColumns, PolylineColumns};
use crate::Result;

/// Broad phase: `(shape_offset, quad_offset)` for every shape box and quadtree
/// leaf whose boxes intersect inside the area of interest
pub fn quad_bbox_join(
    quadtree: &Quadtree,
    shape_boxes: &[BoundingBox],
    area_of_interest: BoundingBox,
    scale: f64,
    max_depth: u8,
) -> Result<CandidatePairs> {
    let params = IndexParams::new(area_of_interest, scale, max_depth);
    QuadtreeJoinExecutor::default().bbox_join(quadtree, shape_boxes, &params)
}

/// [`quad_bbox_join`] plus per-wave traversal statistics
pub fn quad_bbox_join_with_stats(
    quadtree: &Quadtree,
    shape_boxes: &[BoundingBox],
    area_of_interest: BoundingBox,
    scale: f64,
    max_depth: u8,
) -> Result<(CandidatePairs, BroadPhaseStats)> {
    let params = IndexParams::new(area_of_interest, scale, max_depth);
    QuadtreeJoinExecutor::default().bbox_join_with_stats(quadtree, shape_boxes, &params)
}

/// Narrow phase: `(polygon_index, point_index)` for every candidate point
/// inside its paired polygon
#[allow(clippy::too_many_arguments)]
pub fn quadtree_point_in_polygon<T: CoordFloat>(
    pairs: &CandidatePairs,
    quadtree: &Quadtree,
    point_indices: &[u32],
    point_x: &[T],
    point_y: &[T],
    poly_offsets: &[u32],
    ring_offsets: &[u32],
    poly_points_x: &[T],
    poly_points_y: &[T],
) -> Result<PointInPolygonResult> {
    QuadtreeJoinExecutor::default().point_in_polygon(
        pairs,
        quadtree,
        &PointColumns::new(point_indices, point_x, point_y),
        &PolygonColumns::new(poly_offsets, ring_offsets, poly_points_x, poly_points_y),
    )
}

/// Narrow phase: `(point_index, polyline_index, distance)` with the nearest
/// candidate polyline of each point, ordered by point
#[allow(clippy::too_many_arguments)]
pub fn quadtree_point_to_nearest_polyline<T: CoordFloat>(
    pairs: &CandidatePairs,
    quadtree: &Quadtree,
    point_indices: &[u32],
    point_x: &[T],
    point_y: &[T],
    poly_offsets: &[u32],
    poly_points_x: &[T],
    poly_points_y: &[T],
) -> Result<NearestPolylineResult<T>> {
    QuadtreeJoinExecutor::default().nearest_polyline(
        pairs,
        quadtree,
        &PointColumns::new(point_indices, point_x, point_y),
        &PolylineColumns::new(poly_offsets, poly_points_x, poly_points_y),
    )
}
