use std::path::PathBuf;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_ASSETS_DIR: &str = "assets";
pub const DEFAULT_DIST_DIR: &str = "dist";

pub fn port() -> u16 {
    std::env::var("PORT")
        .ok()
        .and_then(|value| value.trim().parse::<u16>().ok())
        .filter(|value| *value > 0)
        .unwrap_or(DEFAULT_PORT)
}

/// Directory holding static source assets; the map is served from its `svg/`.
pub fn assets_dir() -> PathBuf {
    dir_from_env("ASSETS_DIR", DEFAULT_ASSETS_DIR)
}

/// Output directory of the frontend build (`index.html`, `assets/`).
pub fn dist_dir() -> PathBuf {
    dir_from_env("DIST_DIR", DEFAULT_DIST_DIR)
}

fn dir_from_env(key: &str, default: &str) -> PathBuf {
    std::env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(default))
}
