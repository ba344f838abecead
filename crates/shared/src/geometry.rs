use std::fmt;

use serde::{Deserialize, Serialize};

/// World map coordinate space.
///
/// The bundled map is authored in a fixed native space; every rectangle the
/// widget handles (viewBox, region bounds, marker positions) is expressed in
/// these units.
pub const NATIVE_WIDTH: f64 = 1009.6727;
pub const NATIVE_HEIGHT: f64 = 665.96301;

/// A visible window into native map space, as used by an SVG `viewBox`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// The full-map rectangle.
    pub const fn native() -> Self {
        Self::new(0.0, 0.0, NATIVE_WIDTH, NATIVE_HEIGHT)
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn center(&self) -> (f64, f64) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// True when `other` lies inside `self`, allowing for float noise.
    pub fn contains_rect(&self, other: &Rect) -> bool {
        const EPS: f64 = 1e-9;
        other.x >= self.x - EPS
            && other.y >= self.y - EPS
            && other.right() <= self.right() + EPS
            && other.bottom() <= self.bottom() + EPS
    }

    /// Linear interpolation of all four fields by the same factor `t`.
    pub fn lerp(&self, to: &Rect, t: f64) -> Rect {
        Rect {
            x: self.x + (to.x - self.x) * t,
            y: self.y + (to.y - self.y) * t,
            width: self.width + (to.width - self.width) * t,
            height: self.height + (to.height - self.height) * t,
        }
    }

    /// Parse an SVG `viewBox` attribute (`"x y w h"`, whitespace and/or comma
    /// separated). Rejects malformed values and non-positive sizes.
    pub fn parse_view_box(value: &str) -> Option<Rect> {
        let mut parts = value
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|s| !s.is_empty())
            .map(str::parse::<f64>);

        let mut next = || parts.next()?.ok().filter(|v| v.is_finite());
        let rect = Rect::new(next()?, next()?, next()?, next()?);
        if parts.next().is_some() || rect.width <= 0.0 || rect.height <= 0.0 {
            return None;
        }
        Some(rect)
    }
}

impl Default for Rect {
    fn default() -> Self {
        Self::native()
    }
}

/// Renders as a `viewBox` attribute value.
impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} {}", self.x, self.y, self.width, self.height)
    }
}
