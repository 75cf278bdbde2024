//! Location provider trait and user-facing readout

use crate::core::Coordinate;
use crate::location::error::LocationResult;
use tracing::warn;

/// Text shown when no current location can be read
pub const LOCATION_UNAVAILABLE: &str = "Location unavailable";

/// Location permission state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthorizationStatus {
    NotDetermined,
    Denied,
    Authorized,
}

/// Source of the device's current coordinate
pub trait LocationProvider {
    /// Latest fix. `Ok(None)` means no fix has been produced yet.
    fn current_location(&self) -> LocationResult<Option<Coordinate>>;

    fn authorization(&self) -> AuthorizationStatus;
}

/// Readout for the current-location label
pub fn describe_current_location<P: LocationProvider + ?Sized>(provider: &P) -> String {
    if provider.authorization() != AuthorizationStatus::Authorized {
        return LOCATION_UNAVAILABLE.to_string();
    }
    match provider.current_location() {
        Ok(Some(coordinate)) => format!("Lat: {:.6}, Lon: {:.6}", coordinate.latitude, coordinate.longitude),
        Ok(None) => LOCATION_UNAVAILABLE.to_string(),
        Err(e) => {
            warn!(error = %e, "current location read failed");
            LOCATION_UNAVAILABLE.to_string()
        }
    }
}
