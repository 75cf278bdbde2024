//! Store error types

use crate::core::WaypointId;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum StoreError {
    /// No waypoint with this id is in the collection
    #[error("waypoint {id} not found")]
    NotFound { id: WaypointId },
    /// Observer handle was never issued or is already gone
    #[error("no subscription with handle {handle}")]
    SubscriptionNotFound { handle: u32 },
}

pub type StoreResult<T> = Result<T, StoreError>;
