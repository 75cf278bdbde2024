//! Event-driven map session
//!
//! All mutations arrive from UI callbacks on one thread. After any change
//! the shell calls [`MapSession::render`] to reconcile the map and
//! [`MapSession::heatmap`] on each overlay draw.

use crate::api::formatting::{list_rows, ListRow};
use crate::api::types::{ApiError, ApiResult};
use crate::core::{Coordinate, DepthUnit, MapRegion, Waypoint, WaypointId};
use crate::input::{CoordinateValidator, WaypointForm};
use crate::location::{describe_current_location, LocationError, LocationProvider};
use crate::render::{AnnotationHandle, MapSurface, ReconcileDiff, RenderedLayer};
use crate::store::{StoreError, StoreObserver, SubscriptionHandle, WaypointStore};
use crate::utils::config::MapperConfig;
use crate::visual::heatmap::{HeatmapRenderer, HeatmapSpot};
use tracing::{debug, info, warn};

/// What a finished drag moved
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragTarget {
    Waypoint(WaypointId),
    Pending,
}

pub struct MapSession {
    store: WaypointStore,
    layer: RenderedLayer,
    heatmap: HeatmapRenderer,
    validator: CoordinateValidator,
    pending: Option<Coordinate>,
    region: MapRegion,
    unit: DepthUnit,
}

impl MapSession {
    /// Session centred on `center` using the config's span and styling
    pub fn new(config: &MapperConfig, center: Coordinate) -> Self {
        Self {
            store: WaypointStore::new(),
            layer: RenderedLayer::new(
                config.rings.radius,
                config.rings.count,
                config.rings.style,
                config.depth_unit,
            ),
            heatmap: HeatmapRenderer::new(config.heatmap.radius, config.ramp, config.heatmap.glow_alpha),
            validator: CoordinateValidator::new(config.validation),
            pending: None,
            region: MapRegion::new(center, config.default_span),
            unit: config.depth_unit,
        }
    }

    // Waypoint entry

    /// Drop the pending pin at `coordinate` and return the form to complete
    pub fn long_press(&mut self, coordinate: Coordinate) -> WaypointForm {
        debug!(lat = coordinate.latitude, lon = coordinate.longitude, "pending pin dropped");
        self.pending = Some(coordinate);
        WaypointForm::for_dropped(coordinate, self.unit)
    }

    pub fn pending(&self) -> Option<Coordinate> {
        self.pending
    }

    pub fn cancel_pending(&mut self) {
        self.pending = None;
    }

    /// Turn the pending pin into a waypoint at the pin's current position,
    /// taking only the depth from the form
    pub fn confirm_pending(&mut self, form: &mut WaypointForm) -> ApiResult<WaypointId> {
        let coordinate = self.pending.ok_or(ApiError::NoPendingWaypoint)?;
        let draft = form.submit_at(coordinate, &self.validator).map_err(|e| {
            warn!(error = %e, "pending waypoint rejected");
            e
        })?;
        let id = self.store.add(draft.coordinate, draft.depth_meters);
        self.pending = None;
        info!(%id, depth_m = draft.depth_meters, total = self.store.len(), "waypoint created");
        Ok(id)
    }

    /// Add a waypoint from the manual-entry form
    pub fn add_manual(&mut self, form: &mut WaypointForm) -> ApiResult<WaypointId> {
        let draft = form.submit(&self.validator).map_err(|e| {
            warn!(error = %e, "waypoint entry rejected");
            e
        })?;
        let id = self.store.add(draft.coordinate, draft.depth_meters);
        info!(%id, depth_m = draft.depth_meters, total = self.store.len(), "waypoint created");
        Ok(id)
    }

    // Editing

    /// Pin drag finished; only the coordinate changes. A refused drag
    /// leaves the pin to be moved back on the next render.
    pub fn drag_ended(&mut self, handle: AnnotationHandle, coordinate: Coordinate) -> ApiResult<DragTarget> {
        let result = self.apply_drag(handle, coordinate);
        if let Err(error) = &result {
            warn!(%error, handle = handle.0, "drag rejected");
            self.layer.invalidate_annotation(handle);
        }
        result
    }

    fn apply_drag(&mut self, handle: AnnotationHandle, coordinate: Coordinate) -> ApiResult<DragTarget> {
        self.validator.validate_coordinate(&coordinate)?;

        if self.layer.pending_annotation() == Some(handle) && self.pending.is_some() {
            self.pending = Some(coordinate);
            return Ok(DragTarget::Pending);
        }

        let id = self
            .layer
            .waypoint_for_annotation(handle)
            .ok_or(ApiError::UnknownAnnotation { handle })?;
        self.store.update(id, Some(coordinate), None)?;
        debug!(%id, "waypoint dragged");
        Ok(DragTarget::Waypoint(id))
    }

    /// Detail form for an existing waypoint
    pub fn edit_form(&self, id: WaypointId) -> ApiResult<WaypointForm> {
        let waypoint = self
            .store
            .get(id)
            .ok_or(StoreError::NotFound { id })?;
        Ok(WaypointForm::for_edit(waypoint, self.unit))
    }

    /// Save the detail form. On any error the waypoint is unchanged.
    pub fn edit(&mut self, id: WaypointId, form: &WaypointForm) -> ApiResult<()> {
        let draft = form.parse(&self.validator)?;
        self.store.update(id, Some(draft.coordinate), Some(draft.depth_meters))?;
        info!(%id, depth_m = draft.depth_meters, "waypoint edited");
        Ok(())
    }

    /// Swipe-delete from the list by row offsets
    pub fn delete_at(&mut self, offsets: &[usize]) -> Vec<Waypoint> {
        let removed = self.store.remove_at(offsets);
        if !removed.is_empty() {
            info!(removed = removed.len(), remaining = self.store.len(), "waypoints deleted");
        }
        removed
    }

    pub fn delete(&mut self, ids: &[WaypointId]) -> Vec<Waypoint> {
        self.store.remove(ids)
    }

    // Reading

    pub fn waypoints(&self) -> &[Waypoint] {
        self.store.all()
    }

    pub fn store(&self) -> &WaypointStore {
        &self.store
    }

    pub fn subscribe(&mut self, observer: StoreObserver) -> SubscriptionHandle {
        self.store.subscribe(observer)
    }

    pub fn unsubscribe(&mut self, handle: SubscriptionHandle) -> ApiResult<()> {
        Ok(self.store.unsubscribe(handle)?)
    }

    /// Rows for the list view
    pub fn rows(&self) -> Vec<ListRow> {
        list_rows(self.store.all(), self.unit)
    }

    pub fn unit(&self) -> DepthUnit {
        self.unit
    }

    /// Switch display units; stored depths stay in meters
    pub fn set_unit(&mut self, unit: DepthUnit) {
        self.unit = unit;
        self.layer.set_unit(unit);
    }

    // Map region and location

    pub fn region(&self) -> MapRegion {
        self.region
    }

    /// Record a region change reported by the map
    pub fn set_region(&mut self, region: MapRegion) {
        self.region = region;
    }

    /// Move the region centre to the device location, keeping the span
    pub fn recenter_on_user<P: LocationProvider + ?Sized>(&mut self, provider: &P) -> ApiResult<MapRegion> {
        let center = provider.current_location()?.ok_or_else(|| LocationError::Unavailable {
            reason: "no location fix yet".to_string(),
        })?;
        let was_visible = self.region.contains(&center);
        self.region.center = center;
        debug!(lat = center.latitude, lon = center.longitude, was_visible, "region recentred on user");
        Ok(self.region)
    }

    pub fn location_readout<P: LocationProvider + ?Sized>(&self, provider: &P) -> String {
        describe_current_location(provider)
    }

    // Rendering

    /// Reconcile pins, rings and the pending pin with the surface
    pub fn render<S: MapSurface + ?Sized>(&mut self, surface: &mut S) -> ReconcileDiff {
        let diff = self.layer.sync(self.store.all(), surface);
        self.layer.sync_pending(self.pending, surface);
        diff
    }

    /// Heatmap glows for the current zoom; empty when there are no waypoints
    pub fn heatmap(&self, zoom_scale: f64) -> Vec<HeatmapSpot> {
        self.heatmap.render(self.store.all(), zoom_scale)
    }

    pub fn layer(&self) -> &RenderedLayer {
        &self.layer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::InputError;
    use crate::location::MockLocationProvider;
    use crate::render::RecordingSurface;
    use crate::store::StoreEvent;
    use std::cell::Cell;
    use std::rc::Rc;

    fn session() -> MapSession {
        MapSession::new(&MapperConfig::default(), Coordinate::new(46.73, -94.69))
    }

    fn metric(lat: &str, lon: &str, depth: &str) -> WaypointForm {
        WaypointForm::with_text(lat, lon, depth, DepthUnit::Meters)
    }

    #[test]
    fn test_long_press_then_confirm() {
        let mut session = session();
        let mut surface = RecordingSurface::new();

        let mut form = session.long_press(Coordinate::new(46.7301, -94.6902));
        session.render(&mut surface);
        assert_eq!(surface.annotation_count(), 1);

        form.depth = "8.5".to_string();
        let id = session.confirm_pending(&mut form).unwrap();
        assert!(session.pending().is_none());
        assert!(form.is_blank());

        let diff = session.render(&mut surface);
        assert_eq!(diff.created, vec![id]);
        // pending pin replaced by the real one
        assert_eq!(surface.annotation_count(), 1);
        assert_eq!(surface.circle_count(), 3);
        assert_eq!(session.waypoints()[0].depth, 8.5);
    }

    #[test]
    fn test_confirm_without_pending() {
        let mut session = session();
        let mut form = metric("46.7", "-94.6", "3");
        assert_eq!(session.confirm_pending(&mut form), Err(ApiError::NoPendingWaypoint));
        assert!(session.waypoints().is_empty());
    }

    #[test]
    fn test_bad_manual_entry_changes_nothing() {
        let mut session = session();
        let mut form = metric("46.7", "-94.6", "deep");
        let result = session.add_manual(&mut form);
        assert!(matches!(result, Err(ApiError::Input(InputError::Unparsable { .. }))));
        assert_eq!(form.depth, "deep");
        assert!(session.waypoints().is_empty());
    }

    #[test]
    fn test_feet_mode_entry() {
        let mut config = MapperConfig::default();
        config.depth_unit = DepthUnit::Feet;
        let mut session = MapSession::new(&config, Coordinate::new(46.73, -94.69));

        let mut form = WaypointForm::with_text("46.7", "-94.6", "10", session.unit());
        let id = session.add_manual(&mut form).unwrap();
        assert!((session.store().get(id).unwrap().depth - 3.048).abs() < 1e-12);
        assert_eq!(session.rows()[0].subtitle, "Depth: 10.0 ft");
    }

    #[test]
    fn test_drag_updates_coordinate_only() {
        let mut session = session();
        let mut surface = RecordingSurface::new();
        let id = session.add_manual(&mut metric("46.7", "-94.6", "4")).unwrap();
        session.render(&mut surface);

        let handle = session.layer().visual(id).unwrap().annotation;
        let target = session.drag_ended(handle, Coordinate::new(46.71, -94.61)).unwrap();
        assert_eq!(target, DragTarget::Waypoint(id));

        let waypoint = session.store().get(id).unwrap();
        assert_eq!(waypoint.coordinate, Coordinate::new(46.71, -94.61));
        assert_eq!(waypoint.depth, 4.0);

        session.render(&mut surface);
        assert_eq!(surface.annotation(handle).unwrap().coordinate, Coordinate::new(46.71, -94.61));

        assert!(matches!(
            session.drag_ended(AnnotationHandle(4242), Coordinate::new(0.0, 0.0)),
            Err(ApiError::UnknownAnnotation { .. })
        ));
    }

    #[test]
    fn test_dragging_pending_pin() {
        let mut session = session();
        let mut surface = RecordingSurface::new();
        session.long_press(Coordinate::new(46.7, -94.6));
        session.render(&mut surface);

        let handle = session.layer().pending_annotation().unwrap();
        let target = session.drag_ended(handle, Coordinate::new(46.8, -94.7)).unwrap();
        assert_eq!(target, DragTarget::Pending);
        assert_eq!(session.pending(), Some(Coordinate::new(46.8, -94.7)));
    }

    #[test]
    fn test_confirm_uses_dragged_pending_position() {
        let mut session = session();
        let mut surface = RecordingSurface::new();
        let mut form = session.long_press(Coordinate::new(46.70, -94.60));
        session.render(&mut surface);

        let handle = session.layer().pending_annotation().unwrap();
        session.drag_ended(handle, Coordinate::new(46.80, -94.70)).unwrap();

        form.depth = "5".to_string();
        let id = session.confirm_pending(&mut form).unwrap();
        let waypoint = session.store().get(id).unwrap();
        assert_eq!(waypoint.coordinate, Coordinate::new(46.80, -94.70));
        assert_eq!(waypoint.depth, 5.0);
    }

    #[test]
    fn test_failed_confirm_keeps_pending_pin() {
        let mut session = session();
        let mut form = session.long_press(Coordinate::new(46.70, -94.60));
        let before = form.clone();
        assert!(matches!(
            session.confirm_pending(&mut form),
            Err(ApiError::Input(InputError::Unparsable { .. }))
        ));
        assert_eq!(form, before);
        assert_eq!(session.pending(), Some(Coordinate::new(46.70, -94.60)));
        assert!(session.waypoints().is_empty());
    }

    #[test]
    fn test_rejected_drag_moves_pin_back() {
        let mut session = session();
        let mut surface = RecordingSurface::new();
        let id = session.add_manual(&mut metric("46.7", "-94.6", "4")).unwrap();
        session.render(&mut surface);
        let handle = session.layer().visual(id).unwrap().annotation;

        // the platform has already shown the pin at the drop point
        surface.update_annotation(handle, Coordinate::new(95.0, -94.6), Some("4.0 m"));
        let result = session.drag_ended(handle, Coordinate::new(95.0, -94.6));
        assert!(matches!(result, Err(ApiError::Input(InputError::OutOfRange { .. }))));
        assert_eq!(session.store().get(id).unwrap().coordinate, Coordinate::new(46.7, -94.6));

        session.render(&mut surface);
        assert_eq!(surface.annotation(handle).unwrap().coordinate, Coordinate::new(46.7, -94.6));
        assert_eq!(surface.annotation(handle).unwrap().title.as_deref(), Some("4.0 m"));
    }

    #[test]
    fn test_edit_round_trip() {
        let mut session = session();
        let id = session.add_manual(&mut metric("46.7", "-94.6", "4")).unwrap();

        let mut form = session.edit_form(id).unwrap();
        assert_eq!(form.latitude, "46.700000");
        assert_eq!(form.depth, "4.0");

        form.depth = "9.5".to_string();
        session.edit(id, &form).unwrap();
        assert_eq!(session.store().get(id).unwrap().depth, 9.5);

        form.latitude = "north".to_string();
        assert!(session.edit(id, &form).is_err());
        assert_eq!(session.store().get(id).unwrap().coordinate.latitude, 46.7);
    }

    #[test]
    fn test_edit_missing_waypoint() {
        let mut session = session();
        session.add_manual(&mut metric("46.7", "-94.6", "4")).unwrap();
        let before = session.waypoints().to_vec();

        let missing = WaypointId::new();
        let result = session.edit(missing, &metric("1", "2", "3"));
        assert_eq!(result, Err(ApiError::Store(StoreError::NotFound { id: missing })));
        assert!(session.edit_form(missing).is_err());
        assert_eq!(session.waypoints(), before.as_slice());
    }

    #[test]
    fn test_delete_and_render() {
        let mut session = session();
        let mut surface = RecordingSurface::new();
        let a = session.add_manual(&mut metric("46.7", "-94.6", "2")).unwrap();
        let b = session.add_manual(&mut metric("46.8", "-94.7", "10")).unwrap();
        session.render(&mut surface);

        let removed = session.delete_at(&[0, 5]);
        assert_eq!(removed.len(), 1);
        assert_eq!(removed[0].id(), a);

        let diff = session.render(&mut surface);
        assert_eq!(diff.removed, vec![a]);
        assert_eq!(diff.updated, vec![b]);
        assert_eq!(surface.annotation_count(), 1);
        assert_eq!(session.rows()[0].id, b);
    }

    #[test]
    fn test_heatmap_follows_collection() {
        let mut session = session();
        assert!(session.heatmap(1.0).is_empty());

        session.add_manual(&mut metric("46.7", "-94.6", "2")).unwrap();
        session.add_manual(&mut metric("46.8", "-94.7", "10")).unwrap();
        let spots = session.heatmap(2.0);
        assert_eq!(spots.len(), 2);
        assert_eq!(spots[0].radius, 15.0);
        assert_eq!(spots[1].radius, 25.0);
        assert!(spots[0].inner.luminance() > spots[1].inner.luminance());
    }

    #[test]
    fn test_region_and_location() {
        let mut session = session();
        let provider = MockLocationProvider::new();
        assert_eq!(session.location_readout(&provider), "Location unavailable");
        assert!(matches!(
            session.recenter_on_user(&provider),
            Err(ApiError::Location(LocationError::Unavailable { .. }))
        ));
        let before = session.region();

        let provider = MockLocationProvider::with_fix(Coordinate::new(47.0, -95.0));
        let region = session.recenter_on_user(&provider).unwrap();
        assert_eq!(region.center, Coordinate::new(47.0, -95.0));
        assert_eq!(region.span, before.span);

        let moved = MapRegion::new(Coordinate::new(47.1, -95.1), before.span);
        session.set_region(moved);
        assert_eq!(session.region(), moved);
    }

    #[test]
    fn test_observers_see_session_changes() {
        let mut session = session();
        let count = Rc::new(Cell::new(0));
        let seen = Rc::clone(&count);
        let handle = session.subscribe(Box::new(move |event| {
            if matches!(event, StoreEvent::Added { .. }) {
                seen.set(seen.get() + 1);
            }
        }));

        session.add_manual(&mut metric("46.7", "-94.6", "2")).unwrap();
        assert_eq!(count.get(), 1);
        session.unsubscribe(handle).unwrap();
        assert!(session.unsubscribe(handle).is_err());
    }

    #[test]
    fn test_unit_switch_retitles_pins() {
        let mut session = session();
        let mut surface = RecordingSurface::new();
        let id = session.add_manual(&mut metric("46.7", "-94.6", "3.048")).unwrap();
        session.render(&mut surface);

        session.set_unit(DepthUnit::Feet);
        session.render(&mut surface);
        let handle = session.layer().visual(id).unwrap().annotation;
        assert_eq!(surface.annotation(handle).unwrap().title.as_deref(), Some("10.0 ft"));
        assert_eq!(session.store().get(id).unwrap().depth, 3.048);
    }
}
