mod config;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::http::HeaderValue;
use axum::{extract::State, response::Html, routing::get, Router};
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::set_header::SetResponseHeaderLayer;
use tracing_subscriber::EnvFilter;

/// Build a cache-controlled static file router.
///
/// Separated so tests can exercise the caching layer with arbitrary directories.
fn cached_static_router(dir: &Path, cache_header: &'static str) -> Router {
    let layer = SetResponseHeaderLayer::overriding(
        axum::http::header::CACHE_CONTROL,
        HeaderValue::from_static(cache_header),
    );
    Router::new()
        .fallback_service(ServeDir::new(dir))
        .layer(layer)
}

const CACHE_1DAY: &str = "public, max-age=86400, must-revalidate";
const CACHE_IMMUTABLE: &str = "public, max-age=31536000, immutable";

const FALLBACK_INDEX: &str = r#"<!DOCTYPE html>
<html>
<head><title>World Map</title></head>
<body>
<h1>World Map</h1>
<p>Frontend not built yet. Run <code>dx build --release</code> in <code>crates/frontend</code> and point <code>DIST_DIR</code> at the output.</p>
</body>
</html>"#;

#[derive(Clone)]
struct AppState {
    index_html: Arc<PathBuf>,
}

/// Build the full application router.
///
/// `/svg` serves the map documents under `assets_dir/svg`; `/assets` serves
/// the hashed frontend bundle from `dist_dir/assets`.
fn build_app(assets_dir: &Path, dist_dir: &Path) -> Router {
    let static_files = Router::new()
        .nest(
            "/svg",
            cached_static_router(&assets_dir.join("svg"), CACHE_1DAY),
        )
        .nest(
            "/assets",
            cached_static_router(&dist_dir.join("assets"), CACHE_IMMUTABLE),
        );

    let state = AppState {
        index_html: Arc::new(dist_dir.join("index.html")),
    };

    Router::new()
        .route("/", get(serve_index))
        .with_state(state)
        .merge(static_files)
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let assets_dir = config::assets_dir();
    let dist_dir = config::dist_dir();
    if !assets_dir.join("svg").is_dir() {
        tracing::warn!(dir = %assets_dir.display(), "no svg/ directory under ASSETS_DIR; the map will not load");
    }
    let app = build_app(&assets_dir, &dist_dir);

    let port = config::port();
    let addr = format!("0.0.0.0:{port}");
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(%addr, error = %e, "failed to bind");
            return;
        }
    };
    tracing::info!(
        assets = %assets_dir.display(),
        dist = %dist_dir.display(),
        "server running at http://localhost:{port}"
    );

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!(error = %e, "server error");
    }
}

async fn serve_index(State(state): State<AppState>) -> Html<String> {
    // Serve the built frontend, fall back to a short notice
    match tokio::fs::read_to_string(state.index_html.as_path()).await {
        Ok(html) => Html(html),
        Err(e) => {
            tracing::debug!(path = %state.index_html.display(), error = %e, "index.html unavailable");
            Html(FALLBACK_INDEX.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    struct Dirs {
        assets: tempfile::TempDir,
        dist: tempfile::TempDir,
    }

    impl Dirs {
        fn app(&self) -> Router {
            build_app(self.assets.path(), self.dist.path())
        }
    }

    /// Temp ASSETS_DIR with `svg/world-map.svg` and a DIST_DIR with one bundle file.
    fn temp_dirs(with_index: bool) -> Dirs {
        let assets = tempfile::tempdir().unwrap();
        std::fs::create_dir(assets.path().join("svg")).unwrap();
        std::fs::write(
            assets.path().join("svg/world-map.svg"),
            r#"<svg xmlns="http://www.w3.org/2000/svg"><path id="US" d="M0 0h1v1z"/></svg>"#,
        )
        .unwrap();

        let dist = tempfile::tempdir().unwrap();
        std::fs::create_dir(dist.path().join("assets")).unwrap();
        std::fs::write(dist.path().join("assets/app-abc123.js"), "bundle()").unwrap();
        if with_index {
            std::fs::write(dist.path().join("index.html"), "<html>built</html>").unwrap();
        }
        Dirs { assets, dist }
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn body_string(resp: axum::response::Response) -> String {
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_map_svg_has_1day_cache() {
        let dirs = temp_dirs(true);

        let resp = dirs.app().oneshot(get("/svg/world-map.svg")).await.unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            resp.headers().get("cache-control").unwrap(),
            "public, max-age=86400, must-revalidate"
        );
        assert!(body_string(resp).await.contains(r#"id="US""#));
    }

    #[tokio::test]
    async fn test_bundle_assets_have_immutable_cache() {
        let dirs = temp_dirs(true);

        let resp = dirs.app().oneshot(get("/assets/app-abc123.js")).await.unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            resp.headers().get("cache-control").unwrap(),
            "public, max-age=31536000, immutable"
        );
    }

    #[tokio::test]
    async fn test_missing_svg_returns_404() {
        let dirs = temp_dirs(true);

        let resp = dirs.app().oneshot(get("/svg/nonexistent.svg")).await.unwrap();

        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_index_serves_built_frontend() {
        let dirs = temp_dirs(true);

        let resp = dirs.app().oneshot(get("/")).await.unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body_string(resp).await, "<html>built</html>");
    }

    #[tokio::test]
    async fn test_index_falls_back_when_unbuilt() {
        let dirs = temp_dirs(false);

        let resp = dirs.app().oneshot(get("/")).await.unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        assert!(body_string(resp).await.contains("Frontend not built yet"));
    }

    #[tokio::test]
    async fn test_cors_is_permissive() {
        let dirs = temp_dirs(true);

        let resp = dirs
            .app()
            .oneshot(
                Request::builder()
                    .uri("/svg/world-map.svg")
                    .header("origin", "http://localhost:8080")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            resp.headers().get("access-control-allow-origin").unwrap(),
            "*"
        );
    }

    #[tokio::test]
    async fn test_svg_and_bundle_have_different_cache_policies() {
        let dirs = temp_dirs(true);
        let app = dirs.app();

        let svg_resp = app.clone().oneshot(get("/svg/world-map.svg")).await.unwrap();
        let bundle_resp = app.oneshot(get("/assets/app-abc123.js")).await.unwrap();

        let svg_cc = svg_resp
            .headers()
            .get("cache-control")
            .unwrap()
            .to_str()
            .unwrap();
        let bundle_cc = bundle_resp
            .headers()
            .get("cache-control")
            .unwrap()
            .to_str()
            .unwrap();

        assert_ne!(svg_cc, bundle_cc);
        assert!(svg_cc.contains("max-age=86400"));
        assert!(bundle_cc.contains("max-age=31536000"));
    }
}
