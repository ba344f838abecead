use worldmap_shared::geometry::{Rect, NATIVE_WIDTH};
use worldmap_shared::regions::Marker;

/// Glyph radius in native units at the full-map view.
const GLYPH_RADIUS: f64 = 9.0;

/// Hit area around a glyph, as a multiple of its drawn radius.
const HIT_SLOP: f64 = 1.5;

/// Scale applied to glyph sizes so markers keep a constant on-screen size
/// while the view zooms: 1.0 at the full map, 1/6 at maximum zoom.
pub fn glyph_scale(view: &Rect) -> f64 {
    view.width / NATIVE_WIDTH
}

/// Distance (native units) within which a click counts as hitting a glyph.
pub fn hit_radius(view: &Rect) -> f64 {
    GLYPH_RADIUS * glyph_scale(view) * HIT_SLOP
}

/// Build the marker overlay as an SVG document sharing the map's viewBox.
/// The overlay never takes pointer events; clicks are hit-tested in native
/// space against `hit_radius`.
pub fn build_overlay_svg(markers: &[Marker], view: &Rect, selected: Option<&str>) -> String {
    let mut svg = String::with_capacity(4096);
    let s = glyph_scale(view);
    for marker in markers {
        build_marker_glyph(&mut svg, marker, s, selected == Some(marker.region_id));
    }
    format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="{view}" preserveAspectRatio="xMidYMid meet" style="position:absolute;top:0;left:0;width:100%;height:100%;pointer-events:none;">{svg}</svg>"#
    )
}

fn build_marker_glyph(svg: &mut String, marker: &Marker, s: f64, selected: bool) {
    let (cx, cy) = (marker.x, marker.y);
    let r = GLYPH_RADIUS * s;
    let sw = 1.5 * s;
    let icon_fs = 10.0 * s;
    let label_fs = 9.0 * s;
    let label_y = cy - r - 4.0 * s;
    let tsw = 2.5 * s;
    let label = escape_text(marker.label);
    let icon = escape_text(marker.icon);
    let color = marker.color;
    let background = marker.background_color;
    let region = marker.region_id;

    svg.push_str(&format!(
        r##"<g class="marker" data-region="{region}"><title>{label}</title>"##
    ));
    svg.push_str(&format!(
        r##"<circle cx="{cx}" cy="{cy}" r="{r}" fill="{background}" stroke="{color}" stroke-width="{sw}"/>"##
    ));
    svg.push_str(&format!(
        r##"<text x="{cx}" y="{cy}" font-size="{icon_fs}" text-anchor="middle" dominant-baseline="central">{icon}</text>"##
    ));
    if selected {
        svg.push_str(&format!(
            r##"<text x="{cx}" y="{label_y}" fill="{color}" font-size="{label_fs}" font-family="sans-serif" font-weight="700" text-anchor="middle" stroke="white" stroke-width="{tsw}" paint-order="stroke">{label}</text>"##
        ));
        build_selection_ring(svg, cx, cy, s, color);
    }
    svg.push_str("</g>");
}

/// Emit an animated dashed selection ring around a marker.
fn build_selection_ring(svg: &mut String, cx: f64, cy: f64, s: f64, color: &str) {
    let r = (GLYPH_RADIUS + 5.0) * s;
    let sw = 1.5 * s;
    let da1 = 4.0 * s;
    let da2 = 3.0 * s;
    svg.push_str(&format!(
        r##"<circle cx="{cx}" cy="{cy}" r="{r}" fill="none" stroke="{color}" stroke-width="{sw}" stroke-dasharray="{da1} {da2}" opacity="0.9"><animate attributeName="opacity" values="0.5;1;0.5" dur="1.2s" repeatCount="indefinite"/></circle>"##
    ));
}

fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
