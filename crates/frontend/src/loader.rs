use wasm_bindgen::JsCast;
use web_sys::{Element, SvgElement};
use worldmap_shared::geometry::Rect;

/// Same-origin path of the world map resource.
pub const MAP_SVG_PATH: &str = "/svg/world-map.svg";

/// Absolute URL for a same-origin asset. reqwest on wasm rejects relative URLs.
pub fn asset_url(origin: &str, path: &str) -> String {
    format!(
        "{}/{}",
        origin.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

fn page_origin() -> Result<String, String> {
    let window = web_sys::window().ok_or("no window")?;
    window
        .location()
        .origin()
        .map_err(|e| format!("location.origin unavailable: {e:?}"))
}

/// GET the map document as text.
pub async fn fetch_map_svg(path: &str) -> Result<String, String> {
    let url = asset_url(&page_origin()?, path);
    let resp = reqwest::get(&url).await.map_err(|e| e.to_string())?;
    if !resp.status().is_success() {
        return Err(format!("GET {url}: {}", resp.status()));
    }
    resp.text().await.map_err(|e| e.to_string())
}

/// Inject the map document into `host` and normalize the root `<svg>`: fill
/// the container, keep the aspect ratio, drop hardcoded fills and guarantee
/// a viewBox. On failure the host is left empty.
pub fn mount_svg(host: &Element, text: &str) -> Result<SvgElement, String> {
    host.set_inner_html(text);
    match normalize(host) {
        Ok(svg) => Ok(svg),
        Err(e) => {
            host.set_inner_html("");
            Err(e)
        }
    }
}

/// Fetch the map and mount it into `host`.
pub async fn load_into(host: &Element, path: &str) -> Result<SvgElement, String> {
    let text = fetch_map_svg(path).await?;
    mount_svg(host, &text)
}

fn normalize(host: &Element) -> Result<SvgElement, String> {
    let svg = host
        .query_selector("svg")
        .map_err(|e| format!("{e:?}"))?
        .ok_or("map resource has no <svg> element")?
        .dyn_into::<SvgElement>()
        .map_err(|_| "map root is not an SVG element".to_string())?;

    for (name, value) in [
        ("width", "100%"),
        ("height", "100%"),
        ("preserveAspectRatio", "xMidYMid meet"),
    ] {
        svg.set_attribute(name, value)
            .map_err(|e| format!("set {name}: {e:?}"))?;
    }

    let has_view_box = svg
        .get_attribute("viewBox")
        .and_then(|v| Rect::parse_view_box(&v))
        .is_some();
    if !has_view_box {
        svg.set_attribute("viewBox", &Rect::native().to_string())
            .map_err(|e| format!("set viewBox: {e:?}"))?;
    }

    let filled = svg
        .query_selector_all("[fill]")
        .map_err(|e| format!("{e:?}"))?;
    for i in 0..filled.length() {
        if let Some(el) = filled.item(i).and_then(|n| n.dyn_into::<Element>().ok()) {
            let _ = el.remove_attribute("fill");
        }
    }

    Ok(svg)
}
