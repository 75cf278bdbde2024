//! Range checks applied to parsed input

use crate::core::Coordinate;
use crate::input::error::{InputError, InputResult};
use serde::{Deserialize, Serialize};

/// Which checks run on entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationPolicy {
    /// Reject latitude outside [-90, 90] and longitude outside [-180, 180]
    pub enforce_coordinate_ranges: bool,
    /// Reject depths above the water surface
    pub reject_negative_depth: bool,
}

impl Default for ValidationPolicy {
    fn default() -> Self {
        Self {
            enforce_coordinate_ranges: true,
            reject_negative_depth: true,
        }
    }
}

impl ValidationPolicy {
    /// Only the finiteness check, matching the permissive app behaviour
    pub fn permissive() -> Self {
        Self {
            enforce_coordinate_ranges: false,
            reject_negative_depth: false,
        }
    }
}

/// Validates coordinates and canonical depths
#[derive(Debug, Clone, Default)]
pub struct CoordinateValidator {
    policy: ValidationPolicy,
}

impl CoordinateValidator {
    pub fn new(policy: ValidationPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &ValidationPolicy {
        &self.policy
    }

    pub fn validate_coordinate(&self, coordinate: &Coordinate) -> InputResult<()> {
        check_finite("latitude", coordinate.latitude)?;
        check_finite("longitude", coordinate.longitude)?;
        if self.policy.enforce_coordinate_ranges {
            check_range("latitude", coordinate.latitude, -90.0, 90.0)?;
            check_range("longitude", coordinate.longitude, -180.0, 180.0)?;
        }
        Ok(())
    }

    /// Validate a depth already converted to meters
    pub fn validate_depth(&self, depth_meters: f64) -> InputResult<()> {
        check_finite("depth", depth_meters)?;
        if self.policy.reject_negative_depth && depth_meters < 0.0 {
            return Err(InputError::NegativeDepth { depth: depth_meters });
        }
        Ok(())
    }
}

fn check_finite(field: &str, value: f64) -> InputResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(InputError::NonFinite {
            field: field.to_string(),
        })
    }
}

fn check_range(field: &str, value: f64, min: f64, max: f64) -> InputResult<()> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(InputError::OutOfRange {
            field: field.to_string(),
            value,
            min,
            max,
        })
    }
}
