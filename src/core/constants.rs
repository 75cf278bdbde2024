//! Unit factors and default visual parameters

/// Meters per international foot
pub const FEET_TO_METERS: f64 = 0.3048;

/// Guards the depth range against a zero-width collection
pub const NORMALIZE_EPSILON: f64 = 0.0001;

/// Minimum heatmap glow radius
pub const HEATMAP_RADIUS_FLOOR: f64 = 30.0;
/// Heatmap glow radius per meter of depth
pub const HEATMAP_RADIUS_SCALE: f64 = 5.0;

/// Minimum base ring radius (meters)
pub const RING_RADIUS_FLOOR: f64 = 10.0;
/// Base ring radius per meter of depth
pub const RING_RADIUS_SCALE: f64 = 3.0;
/// Rings drawn per waypoint, at 1x, 2x, 3x the base radius
pub const RING_COUNT: u8 = 3;

/// Hue of the depth colour ramp (0.0 to 1.0)
pub const DEPTH_RAMP_HUE: f64 = 0.6;
/// Brightness at the shallow end of the ramp
pub const DEPTH_RAMP_MAX_BRIGHTNESS: f64 = 1.0;
/// Brightness at the deep end of the ramp
pub const DEPTH_RAMP_MIN_BRIGHTNESS: f64 = 0.4;
/// Alpha at the centre of a heatmap glow
pub const HEATMAP_GLOW_ALPHA: f64 = 0.6;

/// Width of the Web Mercator world in map points (2^28)
pub const MAP_WORLD_SIZE: f64 = 268_435_456.0;
