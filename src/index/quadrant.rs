//! Quadrant geometry: `(key, level)` -> bounding box
//!
//! Level-0 quadrants have side `scale * 2^(max_depth - 1)`; every level below
//! halves it. The key's de-interleaved `(qx, qy)` count quadrants of that side
//! from the area-of-interest origin.

use crate::config::IndexParams;
use crate::index::morton;
use crate::types::BoundingBox;
use crate::{JoinError, Result};

/// Deepest supported `max_depth`: a `u32` key holds 16 bits per axis and the
/// top level is reserved.
pub const MAX_DEPTH_LIMIT: u8 = 15;

pub fn validate_scale(scale: f64) -> Result<()> {
    if !(scale.is_finite() && scale > 0.0) {
        return Err(JoinError::invalid(format!("scale must be positive and finite, got {}", scale)));
    }
    Ok(())
}

pub fn validate_max_depth(max_depth: u8) -> Result<()> {
    if !(1..=MAX_DEPTH_LIMIT).contains(&max_depth) {
        return Err(JoinError::invalid(format!(
            "max_depth must be in [1, {}], got {}",
            MAX_DEPTH_LIMIT, max_depth
        )));
    }
    Ok(())
}

/// Reconstructs quadrant boxes for one index
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadrantResolver {
    x_min: f64,
    y_min: f64,
    root_side: f64,
    max_depth: u8,
}

impl QuadrantResolver {
    pub fn new(x_min: f64, y_min: f64, scale: f64, max_depth: u8) -> Result<Self> {
        validate_scale(scale)?;
        validate_max_depth(max_depth)?;
        if !(x_min.is_finite() && y_min.is_finite()) {
            return Err(JoinError::invalid(format!(
                "area-of-interest origin must be finite, got ({}, {})",
                x_min, y_min
            )));
        }
        Ok(Self {
            x_min,
            y_min,
            root_side: scale * f64::from(1u32 << (max_depth - 1)),
            max_depth,
        })
    }

    /// Resolver anchored at the (normalized) area-of-interest origin
    pub fn from_params(params: &IndexParams) -> Result<Self> {
        let aoi = params.area_of_interest.normalized();
        Self::new(aoi.min_x, aoi.min_y, params.scale, params.max_depth)
    }

    pub fn max_depth(&self) -> u8 {
        self.max_depth
    }

    /// Side length of a level-0 quadrant
    pub fn root_side(&self) -> f64 {
        self.root_side
    }

    #[inline]
    pub fn side_at(&self, level: u8) -> f64 {
        self.root_side / 2f64.powi(level as i32)
    }

    #[inline]
    pub fn quadrant_box(&self, key: u32, level: u8) -> BoundingBox {
        let (qx, qy) = morton::decode(key);
        let side = self.side_at(level);
        let min_x = self.x_min + f64::from(qx) * side;
        let min_y = self.y_min + f64::from(qy) * side;
        BoundingBox::new(min_x, min_y, min_x + side, min_y + side)
    }
}
