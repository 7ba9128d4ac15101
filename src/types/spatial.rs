//! Spatial primitives: points and axis-aligned bounding boxes

use serde::{Deserialize, Serialize};

/// 2D point
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: &Point) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

/// Closed axis-aligned rectangle.
///
/// Construction never panics: shape and area-of-interest boxes arrive from
/// external tables and may be inverted. Call [`BoundingBox::normalized`]
/// before comparing.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct BoundingBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl BoundingBox {
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self { min_x, min_y, max_x, max_y }
    }

    pub fn from_point(point: Point) -> Self {
        Self {
            min_x: point.x,
            min_y: point.y,
            max_x: point.x,
            max_y: point.y,
        }
    }

    /// Bounding box of a vertex sequence, `None` when empty
    pub fn from_vertices(xs: &[f64], ys: &[f64]) -> Option<Self> {
        let (&x0, &y0) = (xs.first()?, ys.first()?);
        let mut bbox = BoundingBox::from_point(Point::new(x0, y0));
        for (&x, &y) in xs.iter().zip(ys.iter()).skip(1) {
            bbox.expand(&Point::new(x, y));
        }
        Some(bbox)
    }

    /// Swap min/max on any inverted axis
    pub fn normalized(&self) -> Self {
        // NaN never compares greater, so it survives and `is_valid` rejects it later
        let (min_x, max_x) = if self.min_x > self.max_x {
            (self.max_x, self.min_x)
        } else {
            (self.min_x, self.max_x)
        };
        let (min_y, max_y) = if self.min_y > self.max_y {
            (self.max_y, self.min_y)
        } else {
            (self.min_y, self.max_y)
        };
        Self { min_x, min_y, max_x, max_y }
    }

    pub fn is_inverted(&self) -> bool {
        self.min_x > self.max_x || self.min_y > self.max_y
    }

    /// All four bounds are finite and ordered
    pub fn is_valid(&self) -> bool {
        self.min_x.is_finite()
            && self.min_y.is_finite()
            && self.max_x.is_finite()
            && self.max_y.is_finite()
            && self.min_x <= self.max_x
            && self.min_y <= self.max_y
    }

    pub fn contains(&self, point: &Point) -> bool {
        point.x >= self.min_x
            && point.x <= self.max_x
            && point.y >= self.min_y
            && point.y <= self.max_y
    }

    /// `other` lies entirely inside `self` (boundaries included)
    pub fn contains_box(&self, other: &BoundingBox) -> bool {
        other.min_x >= self.min_x
            && other.max_x <= self.max_x
            && other.min_y >= self.min_y
            && other.max_y <= self.max_y
    }

    #[inline]
    pub fn intersects(&self, other: &BoundingBox) -> bool {
        box_intersects(self, other)
    }

    pub fn expand(&mut self, point: &Point) {
        self.min_x = self.min_x.min(point.x);
        self.min_y = self.min_y.min(point.y);
        self.max_x = self.max_x.max(point.x);
        self.max_y = self.max_y.max(point.y);
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }
}

/// Closed-rectangle overlap test; touching edges count as intersecting.
#[inline]
pub fn box_intersects(a: &BoundingBox, b: &BoundingBox) -> bool {
    a.min_x <= b.max_x && b.min_x <= a.max_x && a.min_y <= b.max_y && b.min_y <= a.max_y
}
