mod components;
mod coords;
mod dom;
mod frame_loop;
mod loader;

use dioxus::prelude::*;

use components::world_map::WorldMap;

const CSS: Asset = asset!("/assets/main.css");
const FAVICON: Asset = asset!("/assets/favicon.svg");

#[allow(non_snake_case)]
fn App() -> Element {
    rsx! {
        document::Link { rel: "icon", r#type: "image/svg+xml", href: FAVICON }
        document::Stylesheet { href: CSS }
        header { class: "app-header",
            h1 { "World Map" }
        }
        main { class: "app-main",
            WorldMap { svg_path: loader::MAP_SVG_PATH.to_string() }
        }
    }
}

fn main() {
    if let Err(e) = dioxus::logger::init(tracing::Level::INFO) {
        web_sys::console::warn_1(&format!("logger init failed: {e}").into());
    }
    launch(App);
}
