//! Even-odd ray-crossing containment
//!
//! Boundary convention: an edge counts as crossed when its endpoints straddle
//! the query row half-open (`(y0 > py) != (y1 > py)`) and the query point lies
//! strictly left of the crossing. On an axis-aligned square this puts points on
//! the left and bottom edges inside and points on the right and top edges
//! outside. Shared edges between adjacent polygons therefore belong to exactly
//! one of them.

use crate::types::CoordFloat;

/// One closed boundary loop. The closing edge (last -> first) is implicit; an
/// explicitly repeated first vertex only adds a zero-length edge.
#[derive(Debug, Clone, Copy)]
pub struct Ring<'a, T> {
    pub xs: &'a [T],
    pub ys: &'a [T],
}

impl<'a, T: CoordFloat> Ring<'a, T> {
    pub fn new(xs: &'a [T], ys: &'a [T]) -> Self {
        debug_assert_eq!(xs.len(), ys.len());
        Self { xs, ys }
    }

    pub fn len(&self) -> usize {
        self.xs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }

    /// Edges `(x0, y0, x1, y1)` including the closing edge
    pub fn edges(&self) -> impl Iterator<Item = (T, T, T, T)> + '_ {
        let n = self.len();
        (0..n).map(move |i| {
            let j = if i + 1 == n { 0 } else { i + 1 };
            (self.xs[i], self.ys[i], self.xs[j], self.ys[j])
        })
    }
}

/// Even-odd test of `(px, py)` against a single ring
pub fn point_in_ring<T: CoordFloat>(px: T, py: T, ring: &Ring<'_, T>) -> bool {
    let mut inside = false;
    for (x0, y0, x1, y1) in ring.edges() {
        if (y0 > py) != (y1 > py) {
            // y0 != y1 here, the division is safe
            let x_cross = x0 + (py - y0) * (x1 - x0) / (y1 - y0);
            if px < x_cross {
                inside = !inside;
            }
        }
    }
    inside
}

/// Inside the exterior (first ring) and outside every hole.
///
/// An empty ring sequence contains nothing.
pub fn point_in_polygon<'a, T, I>(px: T, py: T, rings: I) -> bool
where
    T: CoordFloat,
    I: IntoIterator<Item = Ring<'a, T>>,
{
    let mut rings = rings.into_iter();
    match rings.next() {
        Some(exterior) if point_in_ring(px, py, &exterior) => {}
        _ => return false,
    }
    // 第一个命中的洞即可判定在外部
    rings.all(|hole| !point_in_ring(px, py, &hole))
}
