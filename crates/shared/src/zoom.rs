//! Zoom targeting: frame a region's bounding box inside the native map.
//!
//! Padding is proportional to the region (`PADDING_RATIO` of its larger
//! side) and the resulting zoom is held between `MIN_ZOOM` and `MAX_ZOOM`.

use crate::geometry::Rect;

pub const PADDING_RATIO: f64 = 0.3;
pub const MIN_ZOOM: f64 = 1.5;
pub const MAX_ZOOM: f64 = 6.0;

/// Zoom factor (native size / visible size) that frames `bounds` with padding.
///
/// Always in `[MIN_ZOOM, MAX_ZOOM]`. A degenerate box (zero, negative or
/// non-finite extent) yields `MAX_ZOOM`.
pub fn zoom_factor(bounds: &Rect, native: &Rect) -> f64 {
    let padding = bounds.width.max(bounds.height) * PADDING_RATIO;
    let zoom_x = fit(native.width, bounds.width + 2.0 * padding);
    let zoom_y = fit(native.height, bounds.height + 2.0 * padding);
    let zoom = zoom_x.min(zoom_y);
    if zoom.is_nan() {
        return MAX_ZOOM;
    }
    zoom.clamp(MIN_ZOOM, MAX_ZOOM)
}

fn fit(available: f64, span: f64) -> f64 {
    if span > 0.0 && span.is_finite() {
        available / span
    } else {
        MAX_ZOOM
    }
}

/// Target viewport for a region: native size divided by the zoom factor,
/// centered on the region and shifted so it stays inside `native`.
pub fn zoom_target(bounds: &Rect, native: &Rect) -> Rect {
    let zoom = zoom_factor(bounds, native);
    let width = (native.width / zoom).min(native.width);
    let height = (native.height / zoom).min(native.height);

    let (cx, cy) = bounds.center();
    let x = clamp_origin(cx - width / 2.0, native.x, native.right() - width);
    let y = clamp_origin(cy - height / 2.0, native.y, native.bottom() - height);

    Rect::new(x, y, width, height)
}

fn clamp_origin(value: f64, min: f64, max: f64) -> f64 {
    if value.is_nan() {
        return min;
    }
    value.min(max).max(min)
}
