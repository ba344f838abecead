use dioxus::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, Node, SvgElement, SvgGraphicsElement};
use worldmap_shared::controller::MapSurface;
use worldmap_shared::geometry::Rect;
use worldmap_shared::regions::MARKERS;

use crate::components::marker_layer::build_overlay_svg;

/// Element the map document is mounted into.
pub const MAP_HOST_ID: &str = "world-map-host";

/// Absolutely positioned layer above the map holding the marker glyphs.
pub const MARKER_LAYER_ID: &str = "world-map-markers";

/// `MapSurface` over the mounted map document.
///
/// Until [`DomSurface::attach`] is called every query misses and every write
/// is dropped. The marker layer is re-rendered on each viewBox change so the
/// glyphs track the map.
pub struct DomSurface {
    svg: Option<SvgElement>,
    overlay: Option<Element>,
    view: Rect,
    selected: Option<String>,
    selected_signal: Signal<Option<String>>,
}

impl DomSurface {
    pub fn new(selected_signal: Signal<Option<String>>) -> Self {
        Self {
            svg: None,
            overlay: None,
            view: Rect::native(),
            selected: None,
            selected_signal,
        }
    }

    pub fn attach(&mut self, svg: SvgElement) {
        self.overlay = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(MARKER_LAYER_ID));
        if self.overlay.is_none() {
            tracing::warn!("marker layer #{MARKER_LAYER_ID} not found");
        }
        self.svg = Some(svg);
    }

    fn shape(&self, region: &str) -> Option<Element> {
        if !is_region_code(region) {
            return None;
        }
        self.svg
            .as_ref()?
            .query_selector(&format!("[id=\"{region}\"]"))
            .ok()
            .flatten()
    }

    fn render_overlay(&self) {
        if let Some(overlay) = &self.overlay {
            overlay.set_inner_html(&build_overlay_svg(
                MARKERS,
                &self.view,
                self.selected.as_deref(),
            ));
        }
    }
}

impl MapSurface for DomSurface {
    fn region_bounds(&self, region: &str) -> Option<Rect> {
        let shape = self.shape(region)?.dyn_into::<SvgGraphicsElement>().ok()?;
        let bbox = shape.get_b_box().ok()?;
        Some(Rect::new(
            f64::from(bbox.x()),
            f64::from(bbox.y()),
            f64::from(bbox.width()),
            f64::from(bbox.height()),
        ))
    }

    fn set_view_box(&mut self, rect: Rect) {
        let Some(svg) = &self.svg else { return };
        let _ = svg.set_attribute("viewBox", &rect.to_string());
        self.view = rect;
        self.render_overlay();
    }

    fn set_region_fill(&mut self, region: &str, fill: Option<&str>) {
        let Some(shape) = self
            .shape(region)
            .and_then(|el| el.dyn_into::<SvgElement>().ok())
        else {
            return;
        };
        let style = shape.style();
        let _ = match fill {
            Some(color) => style.set_property("fill", color),
            None => style.remove_property("fill").map(|_| ()),
        };
    }

    fn selection_changed(&mut self, selected: Option<&str>) {
        self.selected = selected.map(str::to_string);
        self.selected_signal.set(self.selected.clone());
        self.render_overlay();
    }
}

/// Region code of the map shape under a client-space point, if any.
///
/// Walks from the topmost element at the point to the nearest ancestor
/// carrying an `id`. Hits on the map root or outside the mounted document
/// count as background.
pub fn region_code_at(client_x: f64, client_y: f64) -> Option<String> {
    let document = web_sys::window()?.document()?;
    let hit = document.element_from_point(client_x as f32, client_y as f32)?;
    let svg = document
        .get_element_by_id(MAP_HOST_ID)?
        .query_selector("svg")
        .ok()??;
    let shape = hit.closest("[id]").ok()??;

    let shape_node: &Node = &shape;
    if shape == svg || !svg.contains(Some(shape_node)) {
        return None;
    }
    let id = shape.id();
    is_region_code(&id).then_some(id)
}

/// Region codes are plain identifiers; anything else never names a shape.
fn is_region_code(code: &str) -> bool {
    !code.is_empty()
        && code
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_codes() {
        assert!(is_region_code("US"));
        assert!(is_region_code("GB-SCT"));
        assert!(is_region_code("path_12"));
    }

    #[test]
    fn test_rejects_selector_breaking_codes() {
        assert!(!is_region_code(""));
        assert!(!is_region_code("US\"]"));
        assert!(!is_region_code("a b"));
    }
}
