//! Display strings for annotations and list rows

use crate::core::{DepthUnit, Waypoint, WaypointId};
use crate::render::annotation_title;
use std::fmt;

/// One line of the waypoint list
#[derive(Debug, Clone, PartialEq)]
pub struct ListRow {
    pub id: WaypointId,
    /// `lat, lon` with six decimals
    pub title: String,
    /// `Depth: x.x m`
    pub subtitle: String,
}

impl ListRow {
    pub fn new(waypoint: &Waypoint, unit: DepthUnit) -> Self {
        Self {
            id: waypoint.id(),
            title: format!(
                "{:.6}, {:.6}",
                waypoint.coordinate.latitude, waypoint.coordinate.longitude
            ),
            subtitle: format!("Depth: {}", annotation_title(waypoint.depth, unit)),
        }
    }
}

impl fmt::Display for ListRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.title, self.subtitle)
    }
}

/// Rows for the whole collection in display order
pub fn list_rows(waypoints: &[Waypoint], unit: DepthUnit) -> Vec<ListRow> {
    waypoints.iter().map(|w| ListRow::new(w, unit)).collect()
}
