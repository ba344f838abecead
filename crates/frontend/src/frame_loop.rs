use std::cell::RefCell;
use std::rc::{Rc, Weak};

use wasm_bindgen::prelude::*;
use worldmap_shared::controller::{FrameId, FrameScheduler, MapController, MapSurface};

/// `requestAnimationFrame`-backed frame source.
///
/// Holds one persistent callback (set with [`RafScheduler::bind`]) that is
/// handed to the browser for every requested frame. The controller owning
/// this scheduler tracks the pending frame id and cancels it on teardown.
pub struct RafScheduler {
    window: Option<web_sys::Window>,
    callback: RefCell<Option<Closure<dyn FnMut(f64)>>>,
}

impl RafScheduler {
    pub fn new() -> Self {
        Self {
            window: web_sys::window(),
            callback: RefCell::new(None),
        }
    }

    /// Route frame callbacks (with their high-resolution timestamp) to `on_frame`.
    pub fn bind(&self, on_frame: impl FnMut(f64) + 'static) {
        *self.callback.borrow_mut() = Some(Closure::<dyn FnMut(f64)>::new(on_frame));
    }
}

impl FrameScheduler for RafScheduler {
    fn request_frame(&mut self) -> Option<FrameId> {
        let window = self.window.as_ref()?;
        let cb_ref = self.callback.borrow();
        let cb = cb_ref.as_ref()?;
        window
            .request_animation_frame(cb.as_ref().unchecked_ref())
            .ok()
    }

    fn cancel_frame(&mut self, id: FrameId) {
        if let Some(window) = self.window.as_ref() {
            let _ = window.cancel_animation_frame(id);
        }
    }
}

/// Wire a shared controller's scheduler back to the controller.
///
/// The callback holds a weak reference, so a frame firing after the
/// controller is dropped does nothing.
pub fn bind<V: MapSurface + 'static>(controller: &Rc<RefCell<MapController<V, RafScheduler>>>) {
    let weak: Weak<RefCell<MapController<V, RafScheduler>>> = Rc::downgrade(controller);
    controller.borrow().scheduler().bind(move |timestamp: f64| {
        if let Some(controller) = weak.upgrade() {
            controller.borrow_mut().on_frame(timestamp);
        }
    });
}

/// Current time on the same clock as `requestAnimationFrame` timestamps.
pub fn now_ms() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0)
}
