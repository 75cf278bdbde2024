//! Scriptable location provider for testing and demos

use crate::core::Coordinate;
use crate::location::error::{LocationError, LocationResult};
use crate::location::provider::{AuthorizationStatus, LocationProvider};

/// Mock provider with a settable fix and permission state
#[derive(Debug, Clone)]
pub struct MockLocationProvider {
    fix: Option<Coordinate>,
    authorization: AuthorizationStatus,
    failure: Option<String>,
}

impl MockLocationProvider {
    /// Authorized provider without a fix
    pub fn new() -> Self {
        Self {
            fix: None,
            authorization: AuthorizationStatus::Authorized,
            failure: None,
        }
    }

    pub fn with_fix(coordinate: Coordinate) -> Self {
        let mut provider = Self::new();
        provider.set_fix(Some(coordinate));
        provider
    }

    pub fn set_fix(&mut self, fix: Option<Coordinate>) {
        self.fix = fix;
    }

    pub fn set_authorization(&mut self, status: AuthorizationStatus) {
        self.authorization = status;
    }

    /// Make subsequent reads fail with the given reason
    pub fn simulate_failure(&mut self, reason: Option<&str>) {
        self.failure = reason.map(str::to_string);
    }
}

impl Default for MockLocationProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl LocationProvider for MockLocationProvider {
    fn current_location(&self) -> LocationResult<Option<Coordinate>> {
        if self.authorization != AuthorizationStatus::Authorized {
            return Err(LocationError::Unauthorized);
        }
        if let Some(reason) = &self.failure {
            return Err(LocationError::Unavailable {
                reason: reason.clone(),
            });
        }
        Ok(self.fix)
    }

    fn authorization(&self) -> AuthorizationStatus {
        self.authorization
    }
}
