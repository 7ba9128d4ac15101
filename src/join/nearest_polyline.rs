//! Narrow phase: nearest polyline per point
//!
//! Every `(point, polyline)` candidate produced by the pairs is scored, then
//! the rows are sorted by `(point, distance, polyline)` and reduced to the
//! first row of each point. Sorting makes the result independent of pair
//! order; equal distances resolve to the lowest polyline index.

use std::cmp::Ordering;

use rayon::prelude::*;

use crate::distance::point_polyline_distance;
use crate::index::Quadtree;
use crate::join::core::{collect_indexed, QuadtreeJoinExecutor};
use crate::join::tables::{CandidatePairs, NearestPolylineResult};
use crate::types::{CoordFloat, PointColumns, PolylineColumns};
use crate::Result;

/// NaN distances order after every number
#[inline]
fn cmp_distance<T: CoordFloat>(a: T, b: T) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
    }
}

#[inline]
fn cmp_rows<T: CoordFloat>(a: &(u32, u32, T), b: &(u32, u32, T)) -> Ordering {
    a.0.cmp(&b.0)
        .then_with(|| cmp_distance(a.2, b.2))
        .then_with(|| a.1.cmp(&b.1))
}

impl QuadtreeJoinExecutor {
    /// `(point_index, polyline_index, distance)` with the closest candidate
    /// polyline of each point that appears in at least one pair.
    ///
    /// Output rows are ordered by `point_index`, the original point ordinal.
    pub fn nearest_polyline<T: CoordFloat>(
        &self,
        pairs: &CandidatePairs,
        quadtree: &Quadtree,
        points: &PointColumns<'_, T>,
        polylines: &PolylineColumns<'_, T>,
    ) -> Result<NearestPolylineResult<T>> {
        points.validate()?;
        polylines.validate()?;
        quadtree.validate(None)?;
        quadtree.validate_point_ranges(points.len())?;
        pairs.validate(quadtree, polylines.num_polylines())?;

        let mut rows = collect_indexed(&self.execution, pairs.len(), |i, out| {
            let (line, quad) = pairs.get(i);
            let (xs, ys) = polylines.vertices(line as usize);
            for pos in quadtree.node(quad as usize).range() {
                let (px, py) = points.coords(pos);
                if let Some(dist) = point_polyline_distance(px, py, xs, ys) {
                    out.push((points.ordinal(pos), line, dist));
                }
            }
        });
        log::debug!(
            "nearest polyline: {} pairs produced {} candidate distances",
            pairs.len(),
            rows.len()
        );

        if self.execution.should_parallelize(rows.len()) {
            rows.par_sort_unstable_by(cmp_rows);
        } else {
            rows.sort_unstable_by(cmp_rows);
        }
        rows.dedup_by_key(|row| row.0);

        log::debug!("nearest polyline: {} points matched", rows.len());
        Ok(rows.into_iter().collect())
    }
}
