//! Raw-text waypoint forms
//!
//! A form holds exactly what the user typed. Parsing never touches the
//! text on failure, so a rejected entry can be corrected in place.

use crate::core::{Coordinate, DepthUnit, Waypoint};
use crate::input::error::InputResult;
use crate::input::parser::parse_decimal;
use crate::input::validation::CoordinateValidator;

/// Parsed, validated entry with depth in meters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaypointDraft {
    pub coordinate: Coordinate,
    pub depth_meters: f64,
}

/// Latitude, longitude and depth text fields
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WaypointForm {
    pub latitude: String,
    pub longitude: String,
    pub depth: String,
    /// Unit the depth field is typed in
    pub unit: DepthUnit,
}

impl WaypointForm {
    pub fn new(unit: DepthUnit) -> Self {
        Self {
            unit,
            ..Self::default()
        }
    }

    /// Form with all three fields filled in
    pub fn with_text(latitude: &str, longitude: &str, depth: &str, unit: DepthUnit) -> Self {
        Self {
            latitude: latitude.to_string(),
            longitude: longitude.to_string(),
            depth: depth.to_string(),
            unit,
        }
    }

    /// Form for a long-press pin: coordinate filled, depth left blank
    pub fn for_dropped(coordinate: Coordinate, unit: DepthUnit) -> Self {
        Self {
            latitude: format!("{:.6}", coordinate.latitude),
            longitude: format!("{:.6}", coordinate.longitude),
            depth: String::new(),
            unit,
        }
    }

    /// Detail form prefilled from an existing waypoint
    pub fn for_edit(waypoint: &Waypoint, unit: DepthUnit) -> Self {
        Self {
            latitude: format!("{:.6}", waypoint.coordinate.latitude),
            longitude: format!("{:.6}", waypoint.coordinate.longitude),
            depth: format!("{:.1}", unit.from_meters(waypoint.depth)),
            unit,
        }
    }

    /// Parse and validate without modifying the form
    pub fn parse(&self, validator: &CoordinateValidator) -> InputResult<WaypointDraft> {
        let latitude = parse_decimal("latitude", &self.latitude)?;
        let longitude = parse_decimal("longitude", &self.longitude)?;
        let depth = parse_decimal("depth", &self.depth)?;

        let coordinate = Coordinate::new(latitude, longitude);
        let depth_meters = self.unit.to_meters(depth);
        validator.validate_coordinate(&coordinate)?;
        validator.validate_depth(depth_meters)?;

        Ok(WaypointDraft {
            coordinate,
            depth_meters,
        })
    }

    /// Parse, then clear the fields on success
    pub fn submit(&mut self, validator: &CoordinateValidator) -> InputResult<WaypointDraft> {
        let draft = self.parse(validator)?;
        self.clear();
        Ok(draft)
    }

    /// Parse only the depth and pair it with an externally placed
    /// coordinate, clearing the fields on success
    pub fn submit_at(&mut self, coordinate: Coordinate, validator: &CoordinateValidator) -> InputResult<WaypointDraft> {
        let depth = parse_decimal("depth", &self.depth)?;
        let depth_meters = self.unit.to_meters(depth);
        validator.validate_coordinate(&coordinate)?;
        validator.validate_depth(depth_meters)?;
        self.clear();
        Ok(WaypointDraft {
            coordinate,
            depth_meters,
        })
    }

    pub fn clear(&mut self) {
        self.latitude.clear();
        self.longitude.clear();
        self.depth.clear();
    }

    pub fn is_blank(&self) -> bool {
        self.latitude.trim().is_empty() && self.longitude.trim().is_empty() && self.depth.trim().is_empty()
    }
}
