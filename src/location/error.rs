//! Location service errors

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum LocationError {
    /// The user has not granted location access
    #[error("location access not authorized")]
    Unauthorized,
    /// The service failed to produce a fix
    #[error("location service unavailable: {reason}")]
    Unavailable { reason: String },
}

pub type LocationResult<T> = Result<T, LocationError>;
