//! Heatmap overlay render pass
//!
//! Each waypoint becomes a radial glow centred on its projected map point.
//! Glow size follows the heatmap [`RadiusScale`] and shrinks with zoom so it
//! keeps a constant on-screen size; colour follows the [`DepthRamp`] over
//! the current collection's depth range.

use crate::core::constants::{HEATMAP_GLOW_ALPHA, MAP_WORLD_SIZE};
use crate::core::{Coordinate, DepthRange, Waypoint, WaypointId};
use crate::visual::color::{DepthRamp, Rgba};
use crate::visual::depth::RadiusScale;
use nalgebra::{Point2, Vector2};
use std::f64::consts::PI;
use tracing::{trace, warn};

/// Projected position in map points (Web Mercator, origin top-left)
pub type MapPoint = Point2<f64>;

/// Latitude limit of the square Mercator world
const MAX_MERCATOR_LATITUDE: f64 = 85.051_128_779_806_59;

/// Project a coordinate onto the flat map
pub fn project(coordinate: &Coordinate) -> MapPoint {
    let lat = coordinate
        .latitude
        .clamp(-MAX_MERCATOR_LATITUDE, MAX_MERCATOR_LATITUDE)
        .to_radians();
    let x = (coordinate.longitude + 180.0) / 360.0 * MAP_WORLD_SIZE;
    let y = (0.5 - (PI / 4.0 + lat / 2.0).tan().ln() / (2.0 * PI)) * MAP_WORLD_SIZE;
    Point2::new(x, y)
}

/// Axis-aligned rectangle in map points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapRect {
    pub origin: MapPoint,
    pub size: Vector2<f64>,
}

impl MapRect {
    pub fn new(origin: MapPoint, size: Vector2<f64>) -> Self {
        Self { origin, size }
    }

    pub fn world() -> Self {
        Self::new(Point2::origin(), Vector2::new(MAP_WORLD_SIZE, MAP_WORLD_SIZE))
    }

    pub fn max(&self) -> MapPoint {
        self.origin + self.size
    }
}

/// One radial glow ready for drawing
#[derive(Debug, Clone, PartialEq)]
pub struct HeatmapSpot {
    pub waypoint_id: WaypointId,
    pub center: MapPoint,
    /// Glow radius in map points at the requested zoom
    pub radius: f64,
    /// Gradient colour at the centre
    pub inner: Rgba,
    /// Gradient colour at `radius`
    pub outer: Rgba,
}

impl HeatmapSpot {
    /// Whether the glow touches the given tile
    pub fn intersects(&self, rect: &MapRect) -> bool {
        let max = rect.max();
        let nearest = Point2::new(
            self.center.x.clamp(rect.origin.x, max.x),
            self.center.y.clamp(rect.origin.y, max.y),
        );
        nalgebra::distance(&nearest, &self.center) <= self.radius
    }
}

/// Turns the waypoint collection into heatmap spots
#[derive(Debug, Clone, PartialEq)]
pub struct HeatmapRenderer {
    pub scale: RadiusScale,
    pub ramp: DepthRamp,
    pub glow_alpha: f64,
}

impl Default for HeatmapRenderer {
    fn default() -> Self {
        Self {
            scale: RadiusScale::heatmap(),
            ramp: DepthRamp::default(),
            glow_alpha: HEATMAP_GLOW_ALPHA,
        }
    }
}

impl HeatmapRenderer {
    pub fn new(scale: RadiusScale, ramp: DepthRamp, glow_alpha: f64) -> Self {
        Self { scale, ramp, glow_alpha }
    }

    /// Colour of a waypoint at `depth` within `range`
    pub fn color(&self, depth: f64, range: &DepthRange) -> Rgba {
        self.ramp.color_for(range.normalize(depth))
    }

    /// Spots for every waypoint. Empty collections render nothing.
    pub fn render(&self, waypoints: &[Waypoint], zoom_scale: f64) -> Vec<HeatmapSpot> {
        if !(zoom_scale.is_finite() && zoom_scale > 0.0) {
            warn!(zoom_scale, "skipping heatmap pass with invalid zoom scale");
            return Vec::new();
        }
        let Some(range) = DepthRange::from_depths(waypoints.iter().map(|w| w.depth)) else {
            return Vec::new();
        };

        let spots: Vec<HeatmapSpot> = waypoints
            .iter()
            .map(|waypoint| {
                let color = self.color(waypoint.depth, &range);
                HeatmapSpot {
                    waypoint_id: waypoint.id(),
                    center: project(&waypoint.coordinate),
                    radius: self.scale.circle_radius(waypoint.depth) / zoom_scale,
                    inner: color.with_alpha(self.glow_alpha),
                    outer: color.with_alpha(0.0),
                }
            })
            .collect();

        trace!(spots = spots.len(), min = range.min, max = range.max, zoom_scale, "heatmap pass");
        spots
    }

    /// Spots touching one tile of the overlay
    pub fn render_tile(&self, waypoints: &[Waypoint], zoom_scale: f64, tile: &MapRect) -> Vec<HeatmapSpot> {
        self.render(waypoints, zoom_scale)
            .into_iter()
            .filter(|spot| spot.intersects(tile))
            .collect()
    }
}
