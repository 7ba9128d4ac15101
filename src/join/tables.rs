//! Columnar join tables: candidate pairs and narrow-phase results

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::index::Quadtree;
use crate::types::CoordFloat;
use crate::{JoinError, Result};

/// Broad-phase output: `(shape_offset, quad_offset)` rows.
///
/// `quad_offset` is a row of the quadtree node table and always names a leaf.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidatePairs {
    shape_offsets: Vec<u32>,
    quad_offsets: Vec<u32>,
}

impl CandidatePairs {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            shape_offsets: Vec::with_capacity(capacity),
            quad_offsets: Vec::with_capacity(capacity),
        }
    }

    pub fn from_columns(shape_offsets: Vec<u32>, quad_offsets: Vec<u32>) -> Result<Self> {
        if shape_offsets.len() != quad_offsets.len() {
            return Err(JoinError::structural(format!(
                "candidate pair columns differ in length (shape={}, quad={})",
                shape_offsets.len(),
                quad_offsets.len()
            )));
        }
        Ok(Self { shape_offsets, quad_offsets })
    }

    pub fn push(&mut self, shape_offset: u32, quad_offset: u32) {
        self.shape_offsets.push(shape_offset);
        self.quad_offsets.push(quad_offset);
    }

    pub fn len(&self) -> usize {
        self.shape_offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shape_offsets.is_empty()
    }

    #[inline]
    pub fn get(&self, i: usize) -> (u32, u32) {
        (self.shape_offsets[i], self.quad_offsets[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        self.shape_offsets.iter().copied().zip(self.quad_offsets.iter().copied())
    }

    pub fn shape_offsets(&self) -> &[u32] {
        &self.shape_offsets
    }

    pub fn quad_offsets(&self) -> &[u32] {
        &self.quad_offsets
    }

    pub fn into_columns(self) -> (Vec<u32>, Vec<u32>) {
        (self.shape_offsets, self.quad_offsets)
    }

    /// Every row names an existing shape and a leaf of `quadtree`
    pub fn validate(&self, quadtree: &Quadtree, num_shapes: usize) -> Result<()> {
        for (row, (shape, quad)) in self.iter().enumerate() {
            if shape as usize >= num_shapes {
                return Err(JoinError::structural(format!(
                    "pair {} references shape {} but only {} shapes exist",
                    row, shape, num_shapes
                )));
            }
            let quad = quad as usize;
            if quad >= quadtree.len() {
                return Err(JoinError::structural(format!(
                    "pair {} references quadrant {} beyond {} rows",
                    row,
                    quad,
                    quadtree.len()
                )));
            }
            if !quadtree.node(quad).is_leaf() {
                return Err(JoinError::structural(format!(
                    "pair {} references quadrant {} which is not a leaf",
                    row, quad
                )));
            }
        }
        Ok(())
    }
}

impl FromIterator<(u32, u32)> for CandidatePairs {
    fn from_iter<I: IntoIterator<Item = (u32, u32)>>(iter: I) -> Self {
        let (shape_offsets, quad_offsets) = iter.into_iter().unzip();
        Self { shape_offsets, quad_offsets }
    }
}

impl fmt::Display for CandidatePairs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "shape_offset  quad_offset")?;
        for (shape, quad) in self.iter() {
            writeln!(f, "{:>12}  {:>11}", shape, quad)?;
        }
        Ok(())
    }
}

/// `(polygon_index, point_index)` containment rows
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointInPolygonResult {
    pub polygon_indices: Vec<u32>,
    pub point_indices: Vec<u32>,
}

impl PointInPolygonResult {
    pub fn len(&self) -> usize {
        self.point_indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.point_indices.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        self.polygon_indices.iter().copied().zip(self.point_indices.iter().copied())
    }

    /// Rows sorted by `(polygon, point)`; narrow-phase order follows the pairs
    pub fn sorted(&self) -> Vec<(u32, u32)> {
        let mut rows: Vec<_> = self.iter().collect();
        rows.sort_unstable();
        rows
    }
}

impl FromIterator<(u32, u32)> for PointInPolygonResult {
    fn from_iter<I: IntoIterator<Item = (u32, u32)>>(iter: I) -> Self {
        let (polygon_indices, point_indices) = iter.into_iter().unzip();
        Self { polygon_indices, point_indices }
    }
}

/// `(point_index, polyline_index, distance)` rows, one per point, ordered by point
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NearestPolylineResult<T> {
    pub point_indices: Vec<u32>,
    pub polyline_indices: Vec<u32>,
    pub distances: Vec<T>,
}

impl<T: CoordFloat> NearestPolylineResult<T> {
    pub fn len(&self) -> usize {
        self.point_indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.point_indices.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, u32, T)> + '_ {
        self.point_indices
            .iter()
            .zip(self.polyline_indices.iter())
            .zip(self.distances.iter())
            .map(|((&point, &line), &dist)| (point, line, dist))
    }

    /// Nearest `(polyline, distance)` for a point, if it had any candidate
    pub fn nearest(&self, point_index: u32) -> Option<(u32, T)> {
        let row = self.point_indices.binary_search(&point_index).ok()?;
        Some((self.polyline_indices[row], self.distances[row]))
    }
}

impl<T> FromIterator<(u32, u32, T)> for NearestPolylineResult<T> {
    fn from_iter<I: IntoIterator<Item = (u32, u32, T)>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let (lower, _) = iter.size_hint();
        let mut result = NearestPolylineResult {
            point_indices: Vec::with_capacity(lower),
            polyline_indices: Vec::with_capacity(lower),
            distances: Vec::with_capacity(lower),
        };
        for (point, line, dist) in iter {
            result.point_indices.push(point);
            result.polyline_indices.push(line);
            result.distances.push(dist);
        }
        result
    }
}
