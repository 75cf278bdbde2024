//! Common API result and error types

use crate::input::InputError;
use crate::location::LocationError;
use crate::render::AnnotationHandle;
use crate::store::StoreError;
use crate::utils::config::ConfigError;
use thiserror::Error;

/// Result type for session operations
pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Input(#[from] InputError),
    #[error(transparent)]
    Location(#[from] LocationError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// Confirm was requested with no long-press pin on the map
    #[error("no pending waypoint to confirm")]
    NoPendingWaypoint,
    /// Drag ended on an annotation this session did not place
    #[error("annotation {} is not managed by this session", .handle.0)]
    UnknownAnnotation { handle: AnnotationHandle },
}
