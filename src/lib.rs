//! Lake Mapper
//!
//! Core of a lake depth-sounding app: waypoints carrying a depth reading,
//! the mapping from depth to ring and heatmap visuals, and incremental
//! reconciliation of rendered map layers against the collection.

pub mod core;
pub mod store;
pub mod visual;
pub mod render;
pub mod input;
pub mod location;
pub mod utils;
pub mod api;

// Re-export commonly used types
pub use crate::core::{Coordinate, CoordinateSpan, DepthRange, DepthUnit, MapRegion, Waypoint, WaypointId, WaypointRecord};
pub use store::{StoreError, StoreEvent, SubscriptionHandle, WaypointStore};
pub use visual::{normalize, DepthRamp, HeatmapRenderer, HeatmapSpot, RadiusScale, Rgba, RingSet, RingStyle};
pub use render::{reconcile, AnnotationHandle, MapSurface, OverlayHandle, ReconcileDiff, RecordingSurface, RenderedLayer};
pub use input::{parse_decimal, CoordinateValidator, InputError, ValidationPolicy, WaypointDraft, WaypointForm};
pub use location::{describe_current_location, LocationError, LocationProvider, MockLocationProvider};
pub use utils::{ConfigError, ConfigurationManager, MapperConfig};
pub use api::{ApiError, ApiResult, DragTarget, ListRow, MapSession};
