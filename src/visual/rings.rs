//! Concentric depth rings drawn around each waypoint

use crate::core::constants::RING_COUNT;
use crate::core::{Coordinate, Waypoint};
use crate::visual::color::Rgba;
use crate::visual::depth::RadiusScale;
use serde::{Deserialize, Serialize};

/// Fill and stroke for ring overlays
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RingStyle {
    pub fill: Rgba,
    pub stroke: Rgba,
    pub line_width: f64,
}

impl Default for RingStyle {
    fn default() -> Self {
        Self {
            fill: Rgba::blue().with_alpha(0.1),
            stroke: Rgba::blue(),
            line_width: 1.0,
        }
    }
}

/// Ring radii (meters) around one coordinate, innermost first
#[derive(Debug, Clone, PartialEq)]
pub struct RingSet {
    pub center: Coordinate,
    pub radii_m: Vec<f64>,
}

impl RingSet {
    /// Rings at 1x..=count x the scaled base radius
    pub fn for_waypoint(waypoint: &Waypoint, scale: &RadiusScale, count: u8) -> Self {
        let base = scale.circle_radius(waypoint.depth);
        Self {
            center: waypoint.coordinate,
            radii_m: (1..=count).map(|i| base * i as f64).collect(),
        }
    }

    pub fn standard(waypoint: &Waypoint) -> Self {
        Self::for_waypoint(waypoint, &RadiusScale::rings(), RING_COUNT)
    }

    pub fn outer_radius(&self) -> Option<f64> {
        self.radii_m.last().copied()
    }
}
