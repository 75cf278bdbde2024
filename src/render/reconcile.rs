//! Set-difference between rendered ids and the current collection

use crate::core::{Waypoint, WaypointId};
use std::collections::HashSet;

/// Minimal change set bringing a rendered layer up to date.
///
/// The three lists are disjoint. `created` and `updated` follow collection
/// order, `removed` is sorted.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReconcileDiff {
    pub removed: Vec<WaypointId>,
    pub updated: Vec<WaypointId>,
    pub created: Vec<WaypointId>,
}

impl ReconcileDiff {
    pub fn is_empty(&self) -> bool {
        self.removed.is_empty() && self.updated.is_empty() && self.created.is_empty()
    }

    /// Whether the layer gains or loses elements
    pub fn changes_membership(&self) -> bool {
        !self.removed.is_empty() || !self.created.is_empty()
    }
}

/// Diff previously rendered ids against the current collection
pub fn reconcile<I>(previous: I, current: &[Waypoint]) -> ReconcileDiff
where
    I: IntoIterator<Item = WaypointId>,
{
    let old: HashSet<WaypointId> = previous.into_iter().collect();
    let mut seen = HashSet::with_capacity(current.len());
    let mut diff = ReconcileDiff::default();

    for waypoint in current {
        let id = waypoint.id();
        if !seen.insert(id) {
            continue;
        }
        if old.contains(&id) {
            diff.updated.push(id);
        } else {
            diff.created.push(id);
        }
    }

    diff.removed = old.difference(&seen).copied().collect();
    diff.removed.sort();
    diff
}
