//! Borrowed columnar inputs for the narrow-phase engines
//!
//! All offset columns follow the prefix-sum convention: `n + 1` entries for `n`
//! elements, element `i` spanning `offsets[i]..offsets[i + 1]`.

use std::ops::Range;

use crate::geometry::Ring;
use crate::types::CoordFloat;
use crate::{JoinError, Result};

/// Quadtree-ordered points: `indices[pos]` is the ordinal of the point at sorted
/// position `pos`, its coordinates are `xs[indices[pos]]`, `ys[indices[pos]]`.
#[derive(Debug, Clone, Copy)]
pub struct PointColumns<'a, T> {
    pub indices: &'a [u32],
    pub xs: &'a [T],
    pub ys: &'a [T],
}

impl<'a, T: CoordFloat> PointColumns<'a, T> {
    pub fn new(indices: &'a [u32], xs: &'a [T], ys: &'a [T]) -> Self {
        Self { indices, xs, ys }
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn validate(&self) -> Result<()> {
        if self.xs.len() != self.ys.len() {
            return Err(JoinError::invalid(format!(
                "point_x has {} values but point_y has {}",
                self.xs.len(),
                self.ys.len()
            )));
        }
        if self.indices.len() != self.xs.len() {
            return Err(JoinError::invalid(format!(
                "{} point indices for {} points",
                self.indices.len(),
                self.xs.len()
            )));
        }
        if let Some(pos) = self.indices.iter().position(|&i| i as usize >= self.xs.len()) {
            return Err(JoinError::structural(format!(
                "point index {} at position {} is out of range ({} points)",
                self.indices[pos],
                pos,
                self.xs.len()
            )));
        }
        Ok(())
    }

    /// Original ordinal of the point at sorted position `pos`
    #[inline]
    pub fn ordinal(&self, pos: usize) -> u32 {
        self.indices[pos]
    }

    #[inline]
    pub fn coords(&self, pos: usize) -> (T, T) {
        let i = self.indices[pos] as usize;
        (self.xs[i], self.ys[i])
    }
}

/// Polygons as `poly_offsets -> ring_offsets -> vertices`
#[derive(Debug, Clone, Copy)]
pub struct PolygonColumns<'a, T> {
    pub poly_offsets: &'a [u32],
    pub ring_offsets: &'a [u32],
    pub xs: &'a [T],
    pub ys: &'a [T],
}

impl<'a, T: CoordFloat> PolygonColumns<'a, T> {
    pub fn new(
        poly_offsets: &'a [u32],
        ring_offsets: &'a [u32],
        xs: &'a [T],
        ys: &'a [T],
    ) -> Self {
        Self { poly_offsets, ring_offsets, xs, ys }
    }

    pub fn num_polygons(&self) -> usize {
        self.poly_offsets.len().saturating_sub(1)
    }

    pub fn num_rings(&self) -> usize {
        self.ring_offsets.len().saturating_sub(1)
    }

    pub fn validate(&self) -> Result<()> {
        if self.xs.len() != self.ys.len() {
            return Err(JoinError::structural(format!(
                "poly_points_x has {} values but poly_points_y has {}",
                self.xs.len(),
                self.ys.len()
            )));
        }
        check_offsets("poly_offsets", self.poly_offsets, self.num_rings())?;
        check_offsets("ring_offsets", self.ring_offsets, self.xs.len())?;

        if self.num_rings() < self.num_polygons() {
            return Err(JoinError::structural(format!(
                "{} rings for {} polygons",
                self.num_rings(),
                self.num_polygons()
            )));
        }
        if let Some(poly) = (0..self.num_polygons()).find(|&p| self.rings(p).is_empty()) {
            return Err(JoinError::structural(format!("polygon {} has no rings", poly)));
        }
        if let Some(ring) = (0..self.num_rings()).find(|&r| self.ring_range(r).len() < 3) {
            return Err(JoinError::invalid(format!(
                "ring {} has {} vertices, at least 3 required",
                ring,
                self.ring_range(ring).len()
            )));
        }
        Ok(())
    }

    /// Ring indices of polygon `poly`; the first is the exterior
    #[inline]
    pub fn rings(&self, poly: usize) -> Range<usize> {
        self.poly_offsets[poly] as usize..self.poly_offsets[poly + 1] as usize
    }

    #[inline]
    fn ring_range(&self, ring: usize) -> Range<usize> {
        self.ring_offsets[ring] as usize..self.ring_offsets[ring + 1] as usize
    }

    #[inline]
    pub fn ring(&self, ring: usize) -> Ring<'a, T> {
        let range = self.ring_range(ring);
        Ring::new(&self.xs[range.clone()], &self.ys[range])
    }

    pub fn polygon_rings(&self, poly: usize) -> impl Iterator<Item = Ring<'a, T>> + '_ {
        self.rings(poly).map(move |r| self.ring(r))
    }
}

/// Polylines as `poly_offsets -> vertices`
#[derive(Debug, Clone, Copy)]
pub struct PolylineColumns<'a, T> {
    pub offsets: &'a [u32],
    pub xs: &'a [T],
    pub ys: &'a [T],
}

impl<'a, T: CoordFloat> PolylineColumns<'a, T> {
    pub fn new(offsets: &'a [u32], xs: &'a [T], ys: &'a [T]) -> Self {
        Self { offsets, xs, ys }
    }

    pub fn num_polylines(&self) -> usize {
        self.offsets.len().saturating_sub(1)
    }

    pub fn validate(&self) -> Result<()> {
        if self.xs.len() != self.ys.len() {
            return Err(JoinError::structural(format!(
                "poly_points_x has {} values but poly_points_y has {}",
                self.xs.len(),
                self.ys.len()
            )));
        }
        check_offsets("poly_offsets", self.offsets, self.xs.len())?;
        if let Some(line) = (0..self.num_polylines()).find(|&l| self.range(l).is_empty()) {
            return Err(JoinError::invalid(format!("polyline {} has no vertices", line)));
        }
        Ok(())
    }

    #[inline]
    fn range(&self, line: usize) -> Range<usize> {
        self.offsets[line] as usize..self.offsets[line + 1] as usize
    }

    /// Vertex coordinates of polyline `line`
    #[inline]
    pub fn vertices(&self, line: usize) -> (&'a [T], &'a [T]) {
        let range = self.range(line);
        (&self.xs[range.clone()], &self.ys[range])
    }
}

/// Prefix-sum offsets: non-empty, non-decreasing, last entry within `child_len`
fn check_offsets(name: &str, offsets: &[u32], child_len: usize) -> Result<()> {
    let last = match offsets.last() {
        Some(&last) => last as usize,
        None => {
            return Err(JoinError::structural(format!(
                "{} is empty, expected #elements + 1 entries",
                name
            )))
        }
    };
    if let Some(i) = offsets.windows(2).position(|w| w[0] > w[1]) {
        return Err(JoinError::structural(format!(
            "{} decreases at position {} ({} > {})",
            name,
            i,
            offsets[i],
            offsets[i + 1]
        )));
    }
    if last > child_len {
        return Err(JoinError::structural(format!(
            "{} ends at {} but only {} entries exist",
            name, last, child_len
        )));
    }
    Ok(())
}
