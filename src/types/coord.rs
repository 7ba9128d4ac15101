//! Coordinate scalar types
//!
//! Engines are generic over [`CoordFloat`], so mixing `f32` points with `f64`
//! polygons is a compile error. [`CoordColumn`] carries the type at runtime for
//! callers that hold type-erased columns.

use std::fmt::Debug;
use std::ops::{Add, Div, Mul, Sub};

/// Floating-point coordinate scalar (`f32` or `f64`)
pub trait CoordFloat:
    Copy
    + Debug
    + PartialOrd
    + Send
    + Sync
    + 'static
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
{
    const ZERO: Self;
    const ONE: Self;
    /// Name used in type-mismatch errors
    const TYPE_NAME: &'static str;

    fn sqrt(self) -> Self;
    fn is_nan(self) -> bool;
}

impl CoordFloat for f32 {
    const ZERO: Self = 0.0;
    const ONE: Self = 1.0;
    const TYPE_NAME: &'static str = "float32";

    #[inline]
    fn sqrt(self) -> Self {
        f32::sqrt(self)
    }

    #[inline]
    fn is_nan(self) -> bool {
        f32::is_nan(self)
    }
}

impl CoordFloat for f64 {
    const ZERO: Self = 0.0;
    const ONE: Self = 1.0;
    const TYPE_NAME: &'static str = "float64";

    #[inline]
    fn sqrt(self) -> Self {
        f64::sqrt(self)
    }

    #[inline]
    fn is_nan(self) -> bool {
        f64::is_nan(self)
    }
}

/// Borrowed coordinate column with its element type known only at runtime
#[derive(Debug, Clone, Copy)]
pub enum CoordColumn<'a> {
    Float32(&'a [f32]),
    Float64(&'a [f64]),
}

impl<'a> CoordColumn<'a> {
    pub fn type_name(&self) -> &'static str {
        match self {
            CoordColumn::Float32(_) => f32::TYPE_NAME,
            CoordColumn::Float64(_) => f64::TYPE_NAME,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            CoordColumn::Float32(values) => values.len(),
            CoordColumn::Float64(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<'a> From<&'a [f32]> for CoordColumn<'a> {
    fn from(values: &'a [f32]) -> Self {
        CoordColumn::Float32(values)
    }
}

impl<'a> From<&'a [f64]> for CoordColumn<'a> {
    fn from(values: &'a [f64]) -> Self {
        CoordColumn::Float64(values)
    }
}

impl<'a> From<&'a Vec<f32>> for CoordColumn<'a> {
    fn from(values: &'a Vec<f32>) -> Self {
        CoordColumn::Float32(values.as_slice())
    }
}

impl<'a> From<&'a Vec<f64>> for CoordColumn<'a> {
    fn from(values: &'a Vec<f64>) -> Self {
        CoordColumn::Float64(values.as_slice())
    }
}
