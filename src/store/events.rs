//! Change notifications for store observers

use crate::core::{Coordinate, Waypoint, WaypointId};
use std::collections::BTreeMap;

/// Callback invoked after every store mutation
pub type StoreObserver = Box<dyn Fn(&StoreEvent)>;

/// A change that has already been applied to the collection
#[derive(Debug, Clone, PartialEq)]
pub enum StoreEvent {
    Added {
        waypoint: Waypoint,
        index: usize,
    },
    Updated {
        id: WaypointId,
        old_coordinate: Coordinate,
        old_depth: f64,
        waypoint: Waypoint,
    },
    Removed {
        waypoints: Vec<Waypoint>,
    },
}

impl StoreEvent {
    /// Ids touched by this event
    pub fn ids(&self) -> Vec<WaypointId> {
        match self {
            StoreEvent::Added { waypoint, .. } => vec![waypoint.id()],
            StoreEvent::Updated { id, .. } => vec![*id],
            StoreEvent::Removed { waypoints } => waypoints.iter().map(|w| w.id()).collect(),
        }
    }
}

/// Observer registration handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionHandle(u32);

impl SubscriptionHandle {
    pub fn id(&self) -> u32 {
        self.0
    }
}

/// Registered observers, notified in subscription order
#[derive(Default)]
pub(crate) struct ObserverRegistry {
    counter: u32,
    observers: BTreeMap<SubscriptionHandle, StoreObserver>,
}

impl ObserverRegistry {
    pub(crate) fn register(&mut self, observer: StoreObserver) -> SubscriptionHandle {
        self.counter += 1;
        let handle = SubscriptionHandle(self.counter);
        self.observers.insert(handle, observer);
        handle
    }

    pub(crate) fn unregister(&mut self, handle: SubscriptionHandle) -> bool {
        self.observers.remove(&handle).is_some()
    }

    pub(crate) fn notify(&self, event: &StoreEvent) {
        for observer in self.observers.values() {
            observer(event);
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.observers.len()
    }
}
