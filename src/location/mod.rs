//! Device location service abstraction
//!
//! The platform location manager is consumed through [`LocationProvider`];
//! the only reader is the current-location readout and map recentring.

pub mod provider;
pub mod mock;
pub mod error;

pub use provider::{describe_current_location, AuthorizationStatus, LocationProvider, LOCATION_UNAVAILABLE};
pub use mock::MockLocationProvider;
pub use error::{LocationError, LocationResult};
