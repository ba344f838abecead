//! Map controller: one authoritative owner of viewport, selection and the
//! pending frame callback, driving a rendering surface.

use crate::geometry::Rect;
use crate::selection::{Repaint, Selection};
use crate::tween::{ViewportAnimator, RESET_MS, ZOOM_IN_MS};
use crate::zoom;

/// Handle of a scheduled frame callback.
pub type FrameId = i32;

/// Where the map is drawn.
pub trait MapSurface {
    /// Bounding box of a region's shape in native coordinates, if the map
    /// contains it.
    fn region_bounds(&self, region: &str) -> Option<Rect>;
    fn set_view_box(&mut self, rect: Rect);
    /// Set a region's fill; `None` restores the default.
    fn set_region_fill(&mut self, region: &str, fill: Option<&str>);
    fn selection_changed(&mut self, selected: Option<&str>);
}

/// Per-frame callback source (`requestAnimationFrame` on the web).
pub trait FrameScheduler {
    fn request_frame(&mut self) -> Option<FrameId>;
    fn cancel_frame(&mut self, id: FrameId);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoomOutcome {
    Started,
    AlreadySelected,
    RegionNotFound,
    Detached,
}

pub struct MapController<V: MapSurface, S: FrameScheduler> {
    surface: V,
    scheduler: S,
    animator: ViewportAnimator,
    selection: Selection,
    native: Rect,
    pending_frame: Option<FrameId>,
    attached: bool,
}

impl<V: MapSurface, S: FrameScheduler> MapController<V, S> {
    pub fn new(surface: V, scheduler: S) -> Self {
        let native = Rect::native();
        Self {
            surface,
            scheduler,
            animator: ViewportAnimator::new(native),
            selection: Selection::new(),
            native,
            pending_frame: None,
            attached: true,
        }
    }

    pub fn current_view(&self) -> Rect {
        self.animator.current()
    }

    pub fn selected(&self) -> Option<&str> {
        self.selection.selected()
    }

    pub fn is_animating(&self) -> bool {
        self.animator.is_animating()
    }

    pub fn has_pending_frame(&self) -> bool {
        self.pending_frame.is_some()
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    pub fn surface(&self) -> &V {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut V {
        &mut self.surface
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// Push the current viewport to the surface, e.g. after the map mounts.
    pub fn redraw(&mut self) {
        if self.attached {
            self.surface.set_view_box(self.animator.current());
        }
    }

    /// Select `region` and tween the viewport to frame it.
    pub fn zoom_to_region(&mut self, region: &str, now: f64) -> ZoomOutcome {
        if !self.attached {
            return ZoomOutcome::Detached;
        }
        if self.selection.is_selected(region) {
            return ZoomOutcome::AlreadySelected;
        }
        let Some(bounds) = self.surface.region_bounds(region) else {
            tracing::debug!(region, "zoom request ignored: region shape not found");
            return ZoomOutcome::RegionNotFound;
        };

        let target = zoom::zoom_target(&bounds, &self.native);
        if let Some(repaints) = self.selection.select(region) {
            self.apply(repaints);
        }
        self.surface.selection_changed(self.selection.selected());
        self.start_tween(target, ZOOM_IN_MS, now);
        ZoomOutcome::Started
    }

    /// Clear the selection and tween back to the full map.
    pub fn reset(&mut self, now: f64) -> bool {
        if !self.attached {
            return false;
        }
        let repaints = self.selection.clear();
        self.apply(repaints);
        self.surface.selection_changed(None);
        self.start_tween(self.native, RESET_MS, now);
        true
    }

    pub fn hover(&mut self, region: &str, entering: bool) {
        if !self.attached {
            return;
        }
        if let Some(repaint) = self.selection.hover(region, entering) {
            self.apply(vec![repaint]);
        }
    }

    /// Frame callback entry point.
    pub fn on_frame(&mut self, now: f64) {
        self.pending_frame = None;
        if !self.attached {
            return;
        }
        let Some(frame) = self.animator.advance(now) else {
            return;
        };
        self.surface.set_view_box(frame.rect);
        if frame.finished {
            tracing::trace!(view = %frame.rect, "viewport tween finished");
        } else {
            self.schedule_frame();
        }
    }

    /// Cancel the pending frame and stop reacting. Safe to call repeatedly.
    pub fn teardown(&mut self) {
        if let Some(id) = self.pending_frame.take() {
            self.scheduler.cancel_frame(id);
        }
        self.animator.stop();
        self.attached = false;
    }

    fn start_tween(&mut self, target: Rect, duration_ms: f64, now: f64) {
        self.animator.animate_to(target, duration_ms, now);
        self.schedule_frame();
    }

    fn schedule_frame(&mut self) {
        if let Some(id) = self.pending_frame.take() {
            self.scheduler.cancel_frame(id);
        }
        self.pending_frame = self.scheduler.request_frame();
    }

    fn apply(&mut self, repaints: Vec<Repaint>) {
        for repaint in repaints {
            self.surface.set_region_fill(&repaint.region, repaint.fill);
        }
    }
}

impl<V: MapSurface, S: FrameScheduler> Drop for MapController<V, S> {
    fn drop(&mut self) {
        self.teardown();
    }
}
