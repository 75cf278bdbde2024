//! Rendered waypoint layer keyed by waypoint id

use crate::core::{Coordinate, DepthUnit, Waypoint, WaypointId};
use crate::render::reconcile::{reconcile, ReconcileDiff};
use crate::render::surface::{AnnotationHandle, MapSurface, OverlayHandle};
use crate::visual::depth::RadiusScale;
use crate::visual::rings::{RingSet, RingStyle};
use crate::core::constants::RING_COUNT;
use std::collections::HashMap;
use tracing::debug;

/// Callout title for a waypoint pin, e.g. `4.2 m`
pub fn annotation_title(depth_meters: f64, unit: DepthUnit) -> String {
    format!("{:.1} {}", unit.from_meters(depth_meters), unit.suffix())
}

/// Surface resources owned by one rendered waypoint
#[derive(Debug, Clone, PartialEq)]
pub struct WaypointVisual {
    pub annotation: AnnotationHandle,
    pub rings: Vec<OverlayHandle>,
    /// Values the resources were last drawn with
    coordinate: Coordinate,
    depth: f64,
    /// Pin position or title no longer matches what was drawn
    annotation_stale: bool,
}

/// Annotations and ring overlays for the whole collection, plus the
/// pending long-press pin
pub struct RenderedLayer {
    visuals: HashMap<WaypointId, WaypointVisual>,
    pending: Option<AnnotationHandle>,
    ring_scale: RadiusScale,
    ring_count: u8,
    ring_style: RingStyle,
    unit: DepthUnit,
}

impl Default for RenderedLayer {
    fn default() -> Self {
        Self::new(RadiusScale::rings(), RING_COUNT, RingStyle::default(), DepthUnit::Meters)
    }
}

impl RenderedLayer {
    pub fn new(ring_scale: RadiusScale, ring_count: u8, ring_style: RingStyle, unit: DepthUnit) -> Self {
        Self {
            visuals: HashMap::new(),
            pending: None,
            ring_scale,
            ring_count,
            ring_style,
            unit,
        }
    }

    /// Change the display unit. Titles refresh on the next sync.
    pub fn set_unit(&mut self, unit: DepthUnit) {
        if self.unit != unit {
            self.unit = unit;
            for visual in self.visuals.values_mut() {
                visual.annotation_stale = true;
            }
        }
    }

    /// Redraw a pin on the next sync, e.g. after the platform moved it
    /// and the move was refused. Returns false for handles this layer
    /// does not own.
    pub fn invalidate_annotation(&mut self, handle: AnnotationHandle) -> bool {
        match self.visuals.values_mut().find(|visual| visual.annotation == handle) {
            Some(visual) => {
                visual.annotation_stale = true;
                true
            }
            None => false,
        }
    }

    /// Bring the surface in line with `waypoints` and return the diff applied
    pub fn sync<S: MapSurface + ?Sized>(&mut self, waypoints: &[Waypoint], surface: &mut S) -> ReconcileDiff {
        let diff = reconcile(self.visuals.keys().copied(), waypoints);
        let by_id: HashMap<WaypointId, &Waypoint> = waypoints.iter().map(|w| (w.id(), w)).collect();

        for id in &diff.removed {
            if let Some(visual) = self.visuals.remove(id) {
                surface.remove_annotation(visual.annotation);
                for ring in visual.rings {
                    surface.remove_circle(ring);
                }
            }
        }

        for id in &diff.updated {
            let (Some(waypoint), Some(visual)) = (by_id.get(id), self.visuals.get_mut(id)) else {
                continue;
            };
            let geometry_changed = visual.coordinate != waypoint.coordinate || visual.depth != waypoint.depth;
            if !geometry_changed && !visual.annotation_stale {
                continue;
            }
            let title = annotation_title(waypoint.depth, self.unit);
            surface.update_annotation(visual.annotation, waypoint.coordinate, Some(&title));
            visual.annotation_stale = false;
            if !geometry_changed {
                continue;
            }
            for ring in visual.rings.drain(..) {
                surface.remove_circle(ring);
            }
            visual.rings = draw_rings(surface, waypoint, &self.ring_scale, self.ring_count, &self.ring_style);
            visual.coordinate = waypoint.coordinate;
            visual.depth = waypoint.depth;
        }

        for id in &diff.created {
            let Some(waypoint) = by_id.get(id) else {
                continue;
            };
            let title = annotation_title(waypoint.depth, self.unit);
            let annotation = surface.add_annotation(waypoint.coordinate, Some(&title));
            let rings = draw_rings(surface, waypoint, &self.ring_scale, self.ring_count, &self.ring_style);
            self.visuals.insert(
                *id,
                WaypointVisual {
                    annotation,
                    rings,
                    coordinate: waypoint.coordinate,
                    depth: waypoint.depth,
                    annotation_stale: false,
                },
            );
        }

        if diff.changes_membership() {
            debug!(
                created = diff.created.len(),
                removed = diff.removed.len(),
                rendered = self.visuals.len(),
                "layer reconciled"
            );
        }
        diff
    }

    /// Show, move or hide the untitled pending pin
    pub fn sync_pending<S: MapSurface + ?Sized>(&mut self, pending: Option<Coordinate>, surface: &mut S) {
        match (pending, self.pending) {
            (Some(coordinate), Some(handle)) => surface.update_annotation(handle, coordinate, None),
            (Some(coordinate), None) => self.pending = Some(surface.add_annotation(coordinate, None)),
            (None, Some(handle)) => {
                surface.remove_annotation(handle);
                self.pending = None;
            }
            (None, None) => {}
        }
    }

    /// Waypoint owning a dragged annotation, if any
    pub fn waypoint_for_annotation(&self, handle: AnnotationHandle) -> Option<WaypointId> {
        self.visuals
            .iter()
            .find(|(_, visual)| visual.annotation == handle)
            .map(|(id, _)| *id)
    }

    pub fn visual(&self, id: WaypointId) -> Option<&WaypointVisual> {
        self.visuals.get(&id)
    }

    pub fn pending_annotation(&self) -> Option<AnnotationHandle> {
        self.pending
    }

    pub fn len(&self) -> usize {
        self.visuals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.visuals.is_empty()
    }

    /// Remove everything this layer put on the surface
    pub fn clear<S: MapSurface + ?Sized>(&mut self, surface: &mut S) {
        self.sync(&[], surface);
        self.sync_pending(None, surface);
    }
}

fn draw_rings<S: MapSurface + ?Sized>(
    surface: &mut S,
    waypoint: &Waypoint,
    scale: &RadiusScale,
    count: u8,
    style: &RingStyle,
) -> Vec<OverlayHandle> {
    RingSet::for_waypoint(waypoint, scale, count)
        .radii_m
        .into_iter()
        .map(|radius| surface.add_circle(waypoint.coordinate, radius, style))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::surface::{RecordingSurface, SurfaceOp};
    use crate::store::WaypointStore;

    #[test]
    fn test_annotation_title() {
        assert_eq!(annotation_title(4.24, DepthUnit::Meters), "4.2 m");
        assert_eq!(annotation_title(3.048, DepthUnit::Feet), "10.0 ft");
        assert_eq!(annotation_title(0.0, DepthUnit::Meters), "0.0 m");
    }

    fn ops_of(log: &[SurfaceOp], pred: fn(&SurfaceOp) -> bool) -> usize {
        log.iter().filter(|op| pred(op)).count()
    }

    #[test]
    fn test_initial_sync_draws_pins_and_rings() {
        let mut store = WaypointStore::new();
        let id = store.add(Coordinate::new(45.0, -93.0), 2.0);
        store.add(Coordinate::new(45.1, -93.1), 12.0);

        let mut layer = RenderedLayer::default();
        let mut surface = RecordingSurface::new();
        let diff = layer.sync(store.all(), &mut surface);

        assert_eq!(diff.created.len(), 2);
        assert_eq!(surface.annotation_count(), 2);
        assert_eq!(surface.circle_count(), 6);

        let visual = layer.visual(id).unwrap();
        assert_eq!(surface.annotation(visual.annotation).unwrap().title.as_deref(), Some("2.0 m"));
        let radii: Vec<f64> = visual.rings.iter().map(|r| surface.circle(*r).unwrap().radius_m).collect();
        assert_eq!(radii, vec![10.0, 20.0, 30.0]);
    }

    #[test]
    fn test_unchanged_waypoints_are_left_alone() {
        let mut store = WaypointStore::new();
        store.add(Coordinate::new(45.0, -93.0), 2.0);
        let mut layer = RenderedLayer::default();
        let mut surface = RecordingSurface::new();
        layer.sync(store.all(), &mut surface);
        surface.take_log();

        let diff = layer.sync(store.all(), &mut surface);
        assert_eq!(diff.updated.len(), 1);
        assert!(surface.log().is_empty());
    }

    #[test]
    fn test_update_keeps_annotation_and_replaces_rings() {
        let mut store = WaypointStore::new();
        let id = store.add(Coordinate::new(45.0, -93.0), 2.0);
        let mut layer = RenderedLayer::default();
        let mut surface = RecordingSurface::new();
        layer.sync(store.all(), &mut surface);
        let before = layer.visual(id).unwrap().annotation;
        surface.take_log();

        store.update(id, Some(Coordinate::new(45.2, -93.2)), Some(5.0)).unwrap();
        layer.sync(store.all(), &mut surface);

        let visual = layer.visual(id).unwrap();
        assert_eq!(visual.annotation, before);
        let pin = surface.annotation(before).unwrap();
        assert_eq!(pin.coordinate, Coordinate::new(45.2, -93.2));
        assert_eq!(pin.title.as_deref(), Some("5.0 m"));

        let log = surface.take_log();
        assert_eq!(ops_of(&log, |op| matches!(op, SurfaceOp::AddAnnotation(_))), 0);
        assert_eq!(ops_of(&log, |op| matches!(op, SurfaceOp::RemoveCircle(_))), 3);
        assert_eq!(ops_of(&log, |op| matches!(op, SurfaceOp::AddCircle(_))), 3);
        assert_eq!(surface.circle_count(), 3);
        assert_eq!(surface.circle(visual.rings[0]).unwrap().radius_m, 15.0);
    }

    #[test]
    fn test_removed_waypoints_release_resources() {
        let mut store = WaypointStore::new();
        let gone = store.add(Coordinate::new(45.0, -93.0), 2.0);
        let kept = store.add(Coordinate::new(45.1, -93.1), 3.0);
        let mut layer = RenderedLayer::default();
        let mut surface = RecordingSurface::new();
        layer.sync(store.all(), &mut surface);

        store.remove(&[gone]);
        let diff = layer.sync(store.all(), &mut surface);
        assert_eq!(diff.removed, vec![gone]);
        assert!(layer.visual(gone).is_none());
        assert!(layer.visual(kept).is_some());
        assert_eq!(surface.annotation_count(), 1);
        assert_eq!(surface.circle_count(), 3);
    }

    #[test]
    fn test_invalidated_pin_is_moved_back() {
        let mut store = WaypointStore::new();
        let id = store.add(Coordinate::new(45.0, -93.0), 2.0);
        let mut layer = RenderedLayer::default();
        let mut surface = RecordingSurface::new();
        layer.sync(store.all(), &mut surface);
        let handle = layer.visual(id).unwrap().annotation;

        // platform drag the store never accepted
        surface.update_annotation(handle, Coordinate::new(89.0, -93.0), Some("2.0 m"));
        surface.take_log();

        assert!(layer.invalidate_annotation(handle));
        assert!(!layer.invalidate_annotation(AnnotationHandle(9999)));
        layer.sync(store.all(), &mut surface);

        assert_eq!(surface.annotation(handle).unwrap().coordinate, Coordinate::new(45.0, -93.0));
        let log = surface.take_log();
        assert_eq!(log, vec![SurfaceOp::UpdateAnnotation(handle)]);

        layer.sync(store.all(), &mut surface);
        assert!(surface.log().is_empty());
    }

    #[test]
    fn test_pending_pin_lifecycle() {
        let mut layer = RenderedLayer::default();
        let mut surface = RecordingSurface::new();

        layer.sync_pending(Some(Coordinate::new(45.0, -93.0)), &mut surface);
        let handle = layer.pending_annotation().unwrap();
        assert_eq!(surface.annotation(handle).unwrap().title, None);

        layer.sync_pending(Some(Coordinate::new(45.3, -93.3)), &mut surface);
        assert_eq!(layer.pending_annotation(), Some(handle));
        assert_eq!(surface.annotation(handle).unwrap().coordinate, Coordinate::new(45.3, -93.3));

        layer.sync_pending(None, &mut surface);
        assert!(layer.pending_annotation().is_none());
        assert_eq!(surface.annotation_count(), 0);
    }

    #[test]
    fn test_drag_lookup_and_unit_change() {
        let mut store = WaypointStore::new();
        let id = store.add(Coordinate::new(45.0, -93.0), 3.048);
        let mut layer = RenderedLayer::default();
        let mut surface = RecordingSurface::new();
        layer.sync(store.all(), &mut surface);

        let handle = layer.visual(id).unwrap().annotation;
        assert_eq!(layer.waypoint_for_annotation(handle), Some(id));
        assert_eq!(layer.waypoint_for_annotation(AnnotationHandle(9999)), None);

        surface.take_log();
        layer.set_unit(DepthUnit::Feet);
        layer.sync(store.all(), &mut surface);
        assert_eq!(surface.annotation(handle).unwrap().title.as_deref(), Some("10.0 ft"));
        // retitle only, rings stay
        let log = surface.take_log();
        assert_eq!(ops_of(&log, |op| matches!(op, SurfaceOp::UpdateAnnotation(_))), 1);
        assert_eq!(ops_of(&log, |op| matches!(op, SurfaceOp::RemoveCircle(_))), 0);
        assert_eq!(ops_of(&log, |op| matches!(op, SurfaceOp::AddCircle(_))), 0);

        layer.clear(&mut surface);
        assert!(layer.is_empty());
        assert_eq!(surface.annotation_count(), 0);
        assert_eq!(surface.circle_count(), 0);
    }
}
