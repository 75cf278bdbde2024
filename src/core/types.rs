//! Core data types for waypoints and map geometry

use crate::core::constants::FEET_TO_METERS;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Geographic coordinate in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    pub fn is_finite(&self) -> bool {
        self.latitude.is_finite() && self.longitude.is_finite()
    }
}

/// Stable identity of a waypoint for its whole lifetime
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WaypointId(Uuid);

impl WaypointId {
    /// Generate a fresh id. Never returns an id already handed out.
    pub fn new() -> Self {
        WaypointId(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for WaypointId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for WaypointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A depth sounding pinned to a coordinate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "WaypointRecord", from = "WaypointRecord")]
pub struct Waypoint {
    id: WaypointId,
    pub coordinate: Coordinate,
    /// Depth in meters, positive down
    pub depth: f64,
}

impl Waypoint {
    pub fn new(coordinate: Coordinate, depth_meters: f64) -> Self {
        Self {
            id: WaypointId::new(),
            coordinate,
            depth: depth_meters,
        }
    }

    pub fn id(&self) -> WaypointId {
        self.id
    }
}

/// Flat record shape exposed to consumers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WaypointRecord {
    pub id: WaypointId,
    pub latitude: f64,
    pub longitude: f64,
    pub depth_meters: f64,
}

impl From<Waypoint> for WaypointRecord {
    fn from(waypoint: Waypoint) -> Self {
        Self {
            id: waypoint.id,
            latitude: waypoint.coordinate.latitude,
            longitude: waypoint.coordinate.longitude,
            depth_meters: waypoint.depth,
        }
    }
}

impl From<WaypointRecord> for Waypoint {
    fn from(record: WaypointRecord) -> Self {
        Self {
            id: record.id,
            coordinate: Coordinate::new(record.latitude, record.longitude),
            depth: record.depth_meters,
        }
    }
}

/// Unit a depth is displayed and entered in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DepthUnit {
    #[default]
    Meters,
    Feet,
}

impl DepthUnit {
    pub fn from_use_feet(use_feet: bool) -> Self {
        if use_feet {
            DepthUnit::Feet
        } else {
            DepthUnit::Meters
        }
    }

    /// Convert a value in this unit to canonical meters
    pub fn to_meters(&self, value: f64) -> f64 {
        match self {
            DepthUnit::Meters => value,
            DepthUnit::Feet => value * FEET_TO_METERS,
        }
    }

    /// Convert canonical meters to this unit for display
    pub fn from_meters(&self, meters: f64) -> f64 {
        match self {
            DepthUnit::Meters => meters,
            DepthUnit::Feet => meters / FEET_TO_METERS,
        }
    }

    pub fn suffix(&self) -> &'static str {
        match self {
            DepthUnit::Meters => "m",
            DepthUnit::Feet => "ft",
        }
    }
}

/// Inclusive depth range of a non-empty collection
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DepthRange {
    pub min: f64,
    pub max: f64,
}

impl DepthRange {
    /// Range over the given depths, `None` when there are none
    pub fn from_depths<I: IntoIterator<Item = f64>>(depths: I) -> Option<Self> {
        depths.into_iter().fold(None, |range, depth| match range {
            None => Some(DepthRange { min: depth, max: depth }),
            Some(r) => Some(DepthRange {
                min: r.min.min(depth),
                max: r.max.max(depth),
            }),
        })
    }
}

/// Latitude/longitude extent of a map region
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoordinateSpan {
    pub latitude_delta: f64,
    pub longitude_delta: f64,
}

/// Visible map region
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapRegion {
    pub center: Coordinate,
    pub span: CoordinateSpan,
}

impl MapRegion {
    pub fn new(center: Coordinate, span: CoordinateSpan) -> Self {
        Self { center, span }
    }

    pub fn contains(&self, coordinate: &Coordinate) -> bool {
        (coordinate.latitude - self.center.latitude).abs() <= self.span.latitude_delta / 2.0
            && (coordinate.longitude - self.center.longitude).abs() <= self.span.longitude_delta / 2.0
    }
}
