//! Depth-to-visual mapping shared by the marker and heatmap renderers

pub mod depth;
pub mod color;
pub mod heatmap;
pub mod rings;

pub use depth::{normalize, RadiusScale};
pub use color::{DepthRamp, Rgba};
pub use heatmap::{project, HeatmapRenderer, HeatmapSpot, MapPoint};
pub use rings::{RingSet, RingStyle};
