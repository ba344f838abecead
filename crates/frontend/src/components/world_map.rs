use std::cell::RefCell;
use std::rc::Rc;

use dioxus::prelude::*;
use worldmap_shared::controller::MapController;
use worldmap_shared::regions;

use crate::components::marker_layer::hit_radius;
use crate::coords;
use crate::dom::{self, DomSurface, MAP_HOST_ID, MARKER_LAYER_ID};
use crate::frame_loop::{self, now_ms, RafScheduler};
use crate::loader;

type SharedController = Rc<RefCell<MapController<DomSurface, RafScheduler>>>;

const HINT: &str = "Click a country or marker to zoom in";

/// Interactive world map: click a country or marker glyph to zoom to it,
/// click the background or the reset control to return to the full map.
#[component]
pub fn WorldMap(svg_path: String) -> Element {
    // Projection of the controller's selection for rendering only.
    let selected = use_signal(|| None::<String>);
    let mut hovered = use_signal(|| None::<String>);

    let controller: SharedController = use_hook(|| {
        let controller = Rc::new(RefCell::new(MapController::new(
            DomSurface::new(selected),
            RafScheduler::new(),
        )));
        frame_loop::bind(&controller);
        controller
    });

    // Fetch and mount the map once per mount. The task is owned by this
    // scope; the weak handle covers a controller already torn down.
    let loader_ctl = Rc::downgrade(&controller);
    use_effect(move || {
        let weak = loader_ctl.clone();
        let path = svg_path.clone();
        spawn(async move {
            let Some(host) = web_sys::window()
                .and_then(|w| w.document())
                .and_then(|d| d.get_element_by_id(MAP_HOST_ID))
            else {
                tracing::warn!("map host #{MAP_HOST_ID} not found");
                return;
            };
            match loader::load_into(&host, &path).await {
                Ok(svg) => {
                    let Some(controller) = weak.upgrade() else {
                        return;
                    };
                    let mut controller = controller.borrow_mut();
                    controller.surface_mut().attach(svg);
                    controller.redraw();
                    tracing::info!(%path, "world map mounted");
                }
                Err(e) => tracing::warn!(%path, error = %e, "failed to load world map"),
            }
        });
    });

    let teardown_ctl = controller.clone();
    use_drop(move || {
        if let Ok(mut controller) = teardown_ctl.try_borrow_mut() {
            controller.teardown();
        }
    });

    let banner = selected
        .read()
        .as_deref()
        .map(regions::display_label)
        .unwrap_or_else(|| HINT.to_string());
    let banner_class = if selected.read().is_some() {
        "world-map-banner active"
    } else {
        "world-map-banner"
    };

    let click_ctl = controller.clone();
    let hover_ctl = controller.clone();
    let leave_ctl = controller.clone();
    let reset_ctl = controller.clone();

    rsx! {
        div { class: "world-map",
            div { class: "{banner_class}", "{banner}" }

            div {
                class: "world-map-frame",

                onclick: move |evt: Event<MouseData>| {
                    let client = evt.client_coordinates();
                    let now = now_ms();
                    let mut controller = click_ctl.borrow_mut();

                    // Marker glyphs sit above the shapes and take precedence.
                    let view = controller.current_view();
                    let marker = coords::client_to_native(client.x, client.y, MAP_HOST_ID, &view)
                        .and_then(|p| regions::nearest_marker(p, hit_radius(&view)));
                    let region = match marker {
                        Some(m) => Some(m.region_id.to_string()),
                        None => dom::region_code_at(client.x, client.y),
                    };

                    match region {
                        Some(code) => {
                            let outcome = controller.zoom_to_region(&code, now);
                            tracing::debug!(region = %code, ?outcome, "region clicked");
                        }
                        None => {
                            controller.reset(now);
                        }
                    }
                },

                onmousemove: move |evt: Event<MouseData>| {
                    let client = evt.client_coordinates();
                    let code = dom::region_code_at(client.x, client.y);
                    if *hovered.read() == code {
                        return;
                    }
                    let mut controller = hover_ctl.borrow_mut();
                    let previous = hovered.read().clone();
                    if let Some(previous) = previous {
                        controller.hover(&previous, false);
                    }
                    if let Some(next) = &code {
                        controller.hover(next, true);
                    }
                    hovered.set(code);
                },

                onmouseleave: move |_| {
                    let previous = hovered.read().clone();
                    if let Some(previous) = previous {
                        leave_ctl.borrow_mut().hover(&previous, false);
                        hovered.set(None);
                    }
                },

                div { id: MAP_HOST_ID, class: "world-map-host" }
                div { id: MARKER_LAYER_ID, class: "world-map-markers" }
            }

            if selected.read().is_some() {
                button {
                    class: "world-map-reset",
                    onclick: move |evt: Event<MouseData>| {
                        evt.stop_propagation();
                        reset_ctl.borrow_mut().reset(now_ms());
                    },
                    "Reset view"
                }
            }
        }
    }
}
