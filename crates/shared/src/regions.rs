use serde::Serialize;

/// Fill used for hover previews and for selected regions without a table entry.
pub const DEFAULT_ACCENT: &str = "#3b82f6";

/// A highlighted region's marker glyph, placed in native map coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Marker {
    pub region_id: &'static str,
    pub label: &'static str,
    pub icon: &'static str,
    pub color: &'static str,
    pub background_color: &'static str,
    pub x: f64,
    pub y: f64,
}

// Positions are hand-placed over each country's mainland on the bundled map.
pub static MARKERS: &[Marker] = &[
    Marker {
        region_id: "US",
        label: "United States",
        icon: "🗽",
        color: "#2563eb",
        background_color: "#dbeafe",
        x: 230.0,
        y: 200.0,
    },
    Marker {
        region_id: "BR",
        label: "Brazil",
        icon: "⚽",
        color: "#16a34a",
        background_color: "#dcfce7",
        x: 340.0,
        y: 430.0,
    },
    Marker {
        region_id: "GB",
        label: "United Kingdom",
        icon: "🎡",
        color: "#7c3aed",
        background_color: "#ede9fe",
        x: 488.0,
        y: 142.0,
    },
    Marker {
        region_id: "DE",
        label: "Germany",
        icon: "🏰",
        color: "#ca8a04",
        background_color: "#fef9c3",
        x: 522.0,
        y: 152.0,
    },
    Marker {
        region_id: "ZA",
        label: "South Africa",
        icon: "🦁",
        color: "#ea580c",
        background_color: "#ffedd5",
        x: 565.0,
        y: 515.0,
    },
    Marker {
        region_id: "IN",
        label: "India",
        icon: "🕌",
        color: "#db2777",
        background_color: "#fce7f3",
        x: 715.0,
        y: 285.0,
    },
    Marker {
        region_id: "JP",
        label: "Japan",
        icon: "🗻",
        color: "#dc2626",
        background_color: "#fee2e2",
        x: 872.0,
        y: 215.0,
    },
    Marker {
        region_id: "AU",
        label: "Australia",
        icon: "🦘",
        color: "#0d9488",
        background_color: "#ccfbf1",
        x: 860.0,
        y: 480.0,
    },
];

pub fn marker_for(region: &str) -> Option<&'static Marker> {
    MARKERS.iter().find(|m| m.region_id == region)
}

/// Highlight fill for a selected region, falling back to `DEFAULT_ACCENT`.
pub fn highlight_color(region: &str) -> &'static str {
    marker_for(region).map_or(DEFAULT_ACCENT, |m| m.color)
}

/// Banner text for a region: its table label, or the bare code.
pub fn display_label(region: &str) -> String {
    match marker_for(region) {
        Some(m) => m.label.to_string(),
        None => region.to_string(),
    }
}

/// Nearest marker to `point` (native coordinates) within `max_distance`.
pub fn nearest_marker(point: (f64, f64), max_distance: f64) -> Option<&'static Marker> {
    let mut best = None;
    let mut best_dist = max_distance;
    for marker in MARKERS {
        let dx = marker.x - point.0;
        let dy = marker.y - point.1;
        let dist = (dx * dx + dy * dy).sqrt();
        if dist < best_dist {
            best_dist = dist;
            best = Some(marker);
        }
    }
    best
}
