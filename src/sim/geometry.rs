//! Axis-aligned bounding boxes for collision detection
//!
//! Every entity reports a box as (min corner, max corner). Two boxes
//! intercept only when they overlap strictly on both axes; touching edges
//! do not count.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Top-left corner (smallest x and y)
    pub min: Vec2,
    /// Bottom-right corner (largest x and y)
    pub max: Vec2,
}

impl BoundingBox {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Zero-area box at a point
    pub fn point(pos: Vec2) -> Self {
        Self { min: pos, max: pos }
    }

    /// Box centred on `center` extending `half` on each axis
    pub fn centered(center: Vec2, half: Vec2) -> Self {
        Self {
            min: center - half,
            max: center + half,
        }
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    /// A box with non-finite or inverted corners is not a box
    pub fn is_valid(&self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.min.cmple(self.max).all()
    }

    /// Strict overlap test on both axes
    pub fn intercepts(&self, other: &BoundingBox) -> bool {
        if !self.is_valid() || !other.is_valid() {
            return false;
        }
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }
}
