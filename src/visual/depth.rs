//! Radius scaling and depth normalization

use crate::core::constants::*;
use crate::core::DepthRange;
use serde::{Deserialize, Serialize};

/// Linear radius scale with a lower floor
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RadiusScale {
    pub floor: f64,
    pub scale: f64,
}

impl RadiusScale {
    pub const fn new(floor: f64, scale: f64) -> Self {
        Self { floor, scale }
    }

    /// Heatmap glow: floor 30, five units per meter
    pub const fn heatmap() -> Self {
        Self::new(HEATMAP_RADIUS_FLOOR, HEATMAP_RADIUS_SCALE)
    }

    /// Base ring: floor 10 m, three meters per meter of depth
    pub const fn rings() -> Self {
        Self::new(RING_RADIUS_FLOOR, RING_RADIUS_SCALE)
    }

    pub fn circle_radius(&self, depth: f64) -> f64 {
        self.floor.max(depth * self.scale)
    }
}

/// Position of `depth` within `[min, max]`, clamped to `[0, 1]`.
///
/// A zero-width range yields 0 rather than dividing by zero.
pub fn normalize(depth: f64, min: f64, max: f64) -> f64 {
    ((depth - min) / (max - min).max(NORMALIZE_EPSILON)).clamp(0.0, 1.0)
}

impl DepthRange {
    pub fn normalize(&self, depth: f64) -> f64 {
        normalize(depth, self.min, self.max)
    }
}
