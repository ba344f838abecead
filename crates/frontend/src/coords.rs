use worldmap_shared::geometry::Rect;

/// Convert client (viewport) coordinates to container-relative pixel coordinates.
pub fn client_to_container(
    client_x: f64,
    client_y: f64,
    rect_left: f64,
    rect_top: f64,
) -> (f64, f64) {
    (client_x - rect_left, client_y - rect_top)
}

/// Pure function: convert container-relative pixels to native map coordinates
/// through the current `view` box. Usable in unit tests (no web_sys dependency).
///
/// The map renders with `preserveAspectRatio="xMidYMid meet"`: the view is
/// scaled uniformly to fit and centered, leaving letterbox bands on one axis.
pub fn container_to_native(
    container_x: f64,
    container_y: f64,
    container_w: f64,
    container_h: f64,
    view: &Rect,
) -> Option<(f64, f64)> {
    if container_w <= 0.0 || container_h <= 0.0 || view.width <= 0.0 || view.height <= 0.0 {
        return None;
    }

    let scale = (container_w / view.width).min(container_h / view.height);
    let offset_x = (container_w - view.width * scale) / 2.0;
    let offset_y = (container_h - view.height * scale) / 2.0;

    Some((
        view.x + (container_x - offset_x) / scale,
        view.y + (container_y - offset_y) / scale,
    ))
}

/// Get container-relative click coordinates using web_sys, then convert
/// from rendered pixel space to native map space.
pub fn client_to_native(
    client_x: f64,
    client_y: f64,
    container_id: &str,
    view: &Rect,
) -> Option<(f64, f64)> {
    let document = web_sys::window()?.document()?;
    let element = document.get_element_by_id(container_id)?;
    let rect = element.get_bounding_client_rect();

    let (x, y) = client_to_container(client_x, client_y, rect.left(), rect.top());
    container_to_native(x, y, rect.width(), rect.height(), view)
}
