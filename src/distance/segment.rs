//! Point-to-segment and point-to-polyline distances

use crate::types::CoordFloat;

/// Squared distance from `(px, py)` to the segment `(x0, y0)-(x1, y1)`.
///
/// The projection parameter is clamped to `[0, 1]`; a zero-length segment
/// reduces to the point-to-point distance.
#[inline]
pub fn point_segment_distance_squared<T: CoordFloat>(px: T, py: T, x0: T, y0: T, x1: T, y1: T) -> T {
    let dx = x1 - x0;
    let dy = y1 - y0;
    let len_sq = dx * dx + dy * dy;

    let (cx, cy) = if len_sq > T::ZERO {
        let t = ((px - x0) * dx + (py - y0) * dy) / len_sq;
        let t = if t < T::ZERO {
            T::ZERO
        } else if t > T::ONE {
            T::ONE
        } else {
            t
        };
        (x0 + t * dx, y0 + t * dy)
    } else {
        (x0, y0)
    };

    let ex = px - cx;
    let ey = py - cy;
    ex * ex + ey * ey
}

/// Euclidean distance from `(px, py)` to the closest point of the segment
#[inline]
pub fn point_segment_distance<T: CoordFloat>(px: T, py: T, x0: T, y0: T, x1: T, y1: T) -> T {
    point_segment_distance_squared(px, py, x0, y0, x1, y1).sqrt()
}

/// Minimum distance from `(px, py)` to any segment of the polyline.
///
/// A single vertex is treated as a zero-length segment. Returns `None` for an
/// empty vertex list.
pub fn point_polyline_distance<T: CoordFloat>(px: T, py: T, xs: &[T], ys: &[T]) -> Option<T> {
    debug_assert_eq!(xs.len(), ys.len());
    match xs.len() {
        0 => None,
        1 => Some(point_segment_distance(px, py, xs[0], ys[0], xs[0], ys[0])),
        n => {
            // 先比较平方距离，最后只开一次方
            let mut best = point_segment_distance_squared(px, py, xs[0], ys[0], xs[1], ys[1]);
            for i in 1..n - 1 {
                let d = point_segment_distance_squared(px, py, xs[i], ys[i], xs[i + 1], ys[i + 1]);
                if d < best {
                    best = d;
                }
            }
            Some(best.sqrt())
        }
    }
}
