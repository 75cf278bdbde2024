//! In-memory waypoint collection with change observers

pub mod waypoints;
pub mod events;
pub mod error;

pub use waypoints::WaypointStore;
pub use events::{StoreEvent, StoreObserver, SubscriptionHandle};
pub use error::{StoreError, StoreResult};
