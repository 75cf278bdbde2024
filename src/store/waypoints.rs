//! Ordered waypoint collection
//!
//! Insertion order is the list display order. Identity is carried by
//! [`WaypointId`] alone, so positions may shift without affecting
//! rendered layers keyed by id.

use crate::core::{Coordinate, DepthRange, Waypoint, WaypointId};
use crate::store::events::{ObserverRegistry, StoreEvent, StoreObserver, SubscriptionHandle};
use crate::store::error::{StoreError, StoreResult};
use std::collections::HashSet;
use tracing::debug;

/// Owner of the waypoint collection
#[derive(Default)]
pub struct WaypointStore {
    waypoints: Vec<Waypoint>,
    observers: ObserverRegistry,
}

impl WaypointStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a new waypoint and return its fresh id.
    ///
    /// Inputs are expected to be validated already; depth must be meters.
    pub fn add(&mut self, coordinate: Coordinate, depth_meters: f64) -> WaypointId {
        let waypoint = Waypoint::new(coordinate, depth_meters);
        let id = waypoint.id();
        let index = self.waypoints.len();
        self.waypoints.push(waypoint.clone());

        debug!(%id, lat = coordinate.latitude, lon = coordinate.longitude, depth_m = depth_meters, "waypoint added");
        self.observers.notify(&StoreEvent::Added { waypoint, index });
        id
    }

    /// Update fields of an existing waypoint in place
    pub fn update(
        &mut self,
        id: WaypointId,
        coordinate: Option<Coordinate>,
        depth_meters: Option<f64>,
    ) -> StoreResult<()> {
        let waypoint = self
            .waypoints
            .iter_mut()
            .find(|w| w.id() == id)
            .ok_or(StoreError::NotFound { id })?;

        let old_coordinate = waypoint.coordinate;
        let old_depth = waypoint.depth;
        if let Some(coordinate) = coordinate {
            waypoint.coordinate = coordinate;
        }
        if let Some(depth) = depth_meters {
            waypoint.depth = depth;
        }
        let snapshot = waypoint.clone();

        debug!(%id, depth_m = snapshot.depth, "waypoint updated");
        self.observers.notify(&StoreEvent::Updated {
            id,
            old_coordinate,
            old_depth,
            waypoint: snapshot,
        });
        Ok(())
    }

    /// Remove every waypoint whose id is listed. Unknown ids are ignored.
    pub fn remove(&mut self, ids: &[WaypointId]) -> Vec<Waypoint> {
        let targets: HashSet<WaypointId> = ids.iter().copied().collect();
        let (removed, kept): (Vec<Waypoint>, Vec<Waypoint>) = std::mem::take(&mut self.waypoints)
            .into_iter()
            .partition(|w| targets.contains(&w.id()));
        self.waypoints = kept;
        self.finish_removal(removed)
    }

    /// Remove waypoints by list position. Out-of-range offsets are ignored.
    pub fn remove_at(&mut self, offsets: &[usize]) -> Vec<Waypoint> {
        let targets: HashSet<usize> = offsets.iter().copied().collect();
        let mut removed = Vec::new();
        let mut kept = Vec::with_capacity(self.waypoints.len());
        for (index, waypoint) in std::mem::take(&mut self.waypoints).into_iter().enumerate() {
            if targets.contains(&index) {
                removed.push(waypoint);
            } else {
                kept.push(waypoint);
            }
        }
        self.waypoints = kept;
        self.finish_removal(removed)
    }

    fn finish_removal(&mut self, removed: Vec<Waypoint>) -> Vec<Waypoint> {
        if !removed.is_empty() {
            debug!(count = removed.len(), remaining = self.waypoints.len(), "waypoints removed");
            self.observers.notify(&StoreEvent::Removed {
                waypoints: removed.clone(),
            });
        }
        removed
    }

    /// Ordered read-only snapshot for rendering layers
    pub fn all(&self) -> &[Waypoint] {
        &self.waypoints
    }

    pub fn get(&self, id: WaypointId) -> Option<&Waypoint> {
        self.waypoints.iter().find(|w| w.id() == id)
    }

    pub fn position(&self, id: WaypointId) -> Option<usize> {
        self.waypoints.iter().position(|w| w.id() == id)
    }

    pub fn ids(&self) -> Vec<WaypointId> {
        self.waypoints.iter().map(|w| w.id()).collect()
    }

    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    /// Current depth range, `None` for an empty collection
    pub fn depth_range(&self) -> Option<DepthRange> {
        DepthRange::from_depths(self.waypoints.iter().map(|w| w.depth))
    }

    /// Register an observer for subsequent changes
    pub fn subscribe(&mut self, observer: StoreObserver) -> SubscriptionHandle {
        self.observers.register(observer)
    }

    pub fn unsubscribe(&mut self, handle: SubscriptionHandle) -> StoreResult<()> {
        if self.observers.unregister(handle) {
            Ok(())
        } else {
            Err(StoreError::SubscriptionNotFound { handle: handle.id() })
        }
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }
}
