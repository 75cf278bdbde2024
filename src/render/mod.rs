//! Keeps rendered map layers in step with the waypoint collection

pub mod reconcile;
pub mod surface;
pub mod layer;

pub use reconcile::{reconcile, ReconcileDiff};
pub use surface::{AnnotationHandle, MapSurface, OverlayHandle, RecordingSurface, SurfaceOp};
pub use layer::{annotation_title, RenderedLayer, WaypointVisual};
