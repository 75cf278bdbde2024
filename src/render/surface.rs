//! Map surface abstraction
//!
//! The platform map widget is a black box that accepts point annotations
//! and circle overlays. Handles are issued by the surface and are only
//! meaningful to the surface that issued them.

use crate::core::Coordinate;
use crate::visual::rings::RingStyle;
use std::collections::HashMap;

/// Handle to a point annotation on a surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AnnotationHandle(pub u64);

/// Handle to a circle overlay on a surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OverlayHandle(pub u64);

/// Rendering surface the layer drives
pub trait MapSurface {
    /// Place a pin. `title` is shown in the callout.
    fn add_annotation(&mut self, coordinate: Coordinate, title: Option<&str>) -> AnnotationHandle;

    /// Move and retitle an existing pin
    fn update_annotation(&mut self, handle: AnnotationHandle, coordinate: Coordinate, title: Option<&str>);

    fn remove_annotation(&mut self, handle: AnnotationHandle);

    /// Draw a circle of `radius_m` meters around `center`
    fn add_circle(&mut self, center: Coordinate, radius_m: f64, style: &RingStyle) -> OverlayHandle;

    fn remove_circle(&mut self, handle: OverlayHandle);
}

/// Operation applied to a [`RecordingSurface`]
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceOp {
    AddAnnotation(AnnotationHandle),
    UpdateAnnotation(AnnotationHandle),
    RemoveAnnotation(AnnotationHandle),
    AddCircle(OverlayHandle),
    RemoveCircle(OverlayHandle),
}

/// Annotation state held by a [`RecordingSurface`]
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedAnnotation {
    pub coordinate: Coordinate,
    pub title: Option<String>,
}

/// Circle state held by a [`RecordingSurface`]
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCircle {
    pub center: Coordinate,
    pub radius_m: f64,
}

/// In-memory surface that keeps current state and an operation log
#[derive(Debug, Default)]
pub struct RecordingSurface {
    next_handle: u64,
    annotations: HashMap<AnnotationHandle, RecordedAnnotation>,
    circles: HashMap<OverlayHandle, RecordedCircle>,
    log: Vec<SurfaceOp>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    fn issue(&mut self) -> u64 {
        self.next_handle += 1;
        self.next_handle
    }

    pub fn annotation(&self, handle: AnnotationHandle) -> Option<&RecordedAnnotation> {
        self.annotations.get(&handle)
    }

    pub fn annotation_count(&self) -> usize {
        self.annotations.len()
    }

    pub fn circle(&self, handle: OverlayHandle) -> Option<&RecordedCircle> {
        self.circles.get(&handle)
    }

    pub fn circle_count(&self) -> usize {
        self.circles.len()
    }

    pub fn log(&self) -> &[SurfaceOp] {
        &self.log
    }

    /// Drain the operation log, keeping current state
    pub fn take_log(&mut self) -> Vec<SurfaceOp> {
        std::mem::take(&mut self.log)
    }
}

impl MapSurface for RecordingSurface {
    fn add_annotation(&mut self, coordinate: Coordinate, title: Option<&str>) -> AnnotationHandle {
        let handle = AnnotationHandle(self.issue());
        self.annotations.insert(
            handle,
            RecordedAnnotation {
                coordinate,
                title: title.map(str::to_string),
            },
        );
        self.log.push(SurfaceOp::AddAnnotation(handle));
        handle
    }

    fn update_annotation(&mut self, handle: AnnotationHandle, coordinate: Coordinate, title: Option<&str>) {
        if let Some(annotation) = self.annotations.get_mut(&handle) {
            annotation.coordinate = coordinate;
            annotation.title = title.map(str::to_string);
            self.log.push(SurfaceOp::UpdateAnnotation(handle));
        }
    }

    fn remove_annotation(&mut self, handle: AnnotationHandle) {
        if self.annotations.remove(&handle).is_some() {
            self.log.push(SurfaceOp::RemoveAnnotation(handle));
        }
    }

    fn add_circle(&mut self, center: Coordinate, radius_m: f64, _style: &RingStyle) -> OverlayHandle {
        let handle = OverlayHandle(self.issue());
        self.circles.insert(handle, RecordedCircle { center, radius_m });
        self.log.push(SurfaceOp::AddCircle(handle));
        handle
    }

    fn remove_circle(&mut self, handle: OverlayHandle) {
        if self.circles.remove(&handle).is_some() {
            self.log.push(SurfaceOp::RemoveCircle(handle));
        }
    }
}
