//! Entry points over type-erased coordinate columns
//!
//! Callers holding `f32` or `f64` columns chosen at runtime go through these;
//! mixed coordinate types fail with [`JoinError::TypeMismatch`].

use serde::{Deserialize, Serialize};

use crate::index::Quadtree;
use crate::join::core::QuadtreeJoinExecutor;
use crate::join::tables::{CandidatePairs, NearestPolylineResult, PointInPolygonResult};
use crate::types::{CoordColumn, PointColumns, PolygonColumns, PolylineColumns};
use crate::{JoinError, Result};

/// Distances in the coordinate type of the inputs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DistanceColumn {
    Float32(Vec<f32>),
    Float64(Vec<f64>),
}

impl DistanceColumn {
    pub fn len(&self) -> usize {
        match self {
            DistanceColumn::Float32(values) => values.len(),
            DistanceColumn::Float64(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Value at `row` widened to `f64`
    pub fn get(&self, row: usize) -> Option<f64> {
        match self {
            DistanceColumn::Float32(values) => values.get(row).map(|&v| v as f64),
            DistanceColumn::Float64(values) => values.get(row).copied(),
        }
    }
}

/// Nearest-polyline rows with a runtime-typed distance column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NearestPolylineTable {
    pub point_indices: Vec<u32>,
    pub polyline_indices: Vec<u32>,
    pub distances: DistanceColumn,
}

impl From<NearestPolylineResult<f32>> for NearestPolylineTable {
    fn from(result: NearestPolylineResult<f32>) -> Self {
        Self {
            point_indices: result.point_indices,
            polyline_indices: result.polyline_indices,
            distances: DistanceColumn::Float32(result.distances),
        }
    }
}

impl From<NearestPolylineResult<f64>> for NearestPolylineTable {
    fn from(result: NearestPolylineResult<f64>) -> Self {
        Self {
            point_indices: result.point_indices,
            polyline_indices: result.polyline_indices,
            distances: DistanceColumn::Float64(result.distances),
        }
    }
}

/// Names the first column whose type differs from the point x column
fn type_mismatch(columns: [CoordColumn<'_>; 4]) -> JoinError {
    let expected = columns[0].type_name();
    let found = columns
        .iter()
        .map(CoordColumn::type_name)
        .find(|&name| name != expected)
        .unwrap_or(expected);
    JoinError::TypeMismatch { expected, found }
}

impl QuadtreeJoinExecutor {
    /// [`point_in_polygon`](Self::point_in_polygon) over runtime-typed columns
    #[allow(clippy::too_many_arguments)]
    pub fn point_in_polygon_columns(
        &self,
        pairs: &CandidatePairs,
        quadtree: &Quadtree,
        point_indices: &[u32],
        point_x: CoordColumn<'_>,
        point_y: CoordColumn<'_>,
        poly_offsets: &[u32],
        ring_offsets: &[u32],
        poly_points_x: CoordColumn<'_>,
        poly_points_y: CoordColumn<'_>,
    ) -> Result<PointInPolygonResult> {
        match (point_x, point_y, poly_points_x, poly_points_y) {
            (
                CoordColumn::Float32(px),
                CoordColumn::Float32(py),
                CoordColumn::Float32(vx),
                CoordColumn::Float32(vy),
            ) => self.point_in_polygon(
                pairs,
                quadtree,
                &PointColumns::new(point_indices, px, py),
                &PolygonColumns::new(poly_offsets, ring_offsets, vx, vy),
            ),
            (
                CoordColumn::Float64(px),
                CoordColumn::Float64(py),
                CoordColumn::Float64(vx),
                CoordColumn::Float64(vy),
            ) => self.point_in_polygon(
                pairs,
                quadtree,
                &PointColumns::new(point_indices, px, py),
                &PolygonColumns::new(poly_offsets, ring_offsets, vx, vy),
            ),
            _ => Err(type_mismatch([point_x, point_y, poly_points_x, poly_points_y])),
        }
    }

    /// [`nearest_polyline`](Self::nearest_polyline) over runtime-typed columns
    #[allow(clippy::too_many_arguments)]
    pub fn nearest_polyline_columns(
        &self,
        pairs: &CandidatePairs,
        quadtree: &Quadtree,
        point_indices: &[u32],
        point_x: CoordColumn<'_>,
        point_y: CoordColumn<'_>,
        poly_offsets: &[u32],
        poly_points_x: CoordColumn<'_>,
        poly_points_y: CoordColumn<'_>,
    ) -> Result<NearestPolylineTable> {
        match (point_x, point_y, poly_points_x, poly_points_y) {
            (
                CoordColumn::Float32(px),
                CoordColumn::Float32(py),
                CoordColumn::Float32(vx),
                CoordColumn::Float32(vy),
            ) => self
                .nearest_polyline(
                    pairs,
                    quadtree,
                    &PointColumns::new(point_indices, px, py),
                    &PolylineColumns::new(poly_offsets, vx, vy),
                )
                .map(NearestPolylineTable::from),
            (
                CoordColumn::Float64(px),
                CoordColumn::Float64(py),
                CoordColumn::Float64(vx),
                CoordColumn::Float64(vy),
            ) => self
                .nearest_polyline(
                    pairs,
                    quadtree,
                    &PointColumns::new(point_indices, px, py),
                    &PolylineColumns::new(poly_offsets, vx, vy),
                )
                .map(NearestPolylineTable::from),
            _ => Err(type_mismatch([point_x, point_y, poly_points_x, poly_points_y])),
        }
    }
}
