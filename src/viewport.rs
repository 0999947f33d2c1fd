//! Pan/zoom transform between screen pixels and logical content space.

#[cfg(test)]
#[path = "viewport_test.rs"]
mod viewport_test;

use serde::Serialize;

use crate::consts::{MAX_SCALE, MIN_SCALE, ZOOM_STEP};

/// A point in either screen or content space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle in content space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    /// Bounds of a square with top-left corner `origin` and side `side`.
    #[must_use]
    pub fn square(origin: Point, side: f64) -> Self {
        Self { min_x: origin.x, min_y: origin.y, max_x: origin.x + side, max_y: origin.y + side }
    }

    /// Smallest bounds containing both.
    #[must_use]
    pub fn union(self, other: Bounds) -> Self {
        Self {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }

    /// Grow every side by `margin`.
    #[must_use]
    pub fn padded(self, margin: f64) -> Self {
        Self {
            min_x: self.min_x - margin,
            min_y: self.min_y - margin,
            max_x: self.max_x + margin,
            max_y: self.max_y + margin,
        }
    }

    #[must_use]
    pub fn center(self) -> Point {
        Point::new((self.min_x + self.max_x) * 0.5, (self.min_y + self.max_y) * 0.5)
    }

    #[must_use]
    pub fn contains(self, p: Point) -> bool {
        p.x >= self.min_x && p.x <= self.max_x && p.y >= self.min_y && p.y <= self.max_y
    }
}

/// Direction of a single zoom step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoomDirection {
    In,
    Out,
}

/// Viewport transform applied to the whole scene.
///
/// `offset_x` / `offset_y` are in screen pixels. `scale` is clamped to
/// `[MIN_SCALE, MAX_SCALE]`. A screen pixel `p` shows content point
/// `(p - offset) / scale`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub offset_x: f64,
    pub offset_y: f64,
    pub scale: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self { offset_x: 0.0, offset_y: 0.0, scale: 1.0 }
    }
}

impl Viewport {
    /// Convert a screen-space point to content coordinates.
    #[must_use]
    pub fn screen_to_world(&self, screen: Point) -> Point {
        Point {
            x: (screen.x - self.offset_x) / self.scale,
            y: (screen.y - self.offset_y) / self.scale,
        }
    }

    /// Convert a content-space point to screen coordinates.
    #[must_use]
    pub fn world_to_screen(&self, world: Point) -> Point {
        Point {
            x: world.x * self.scale + self.offset_x,
            y: world.y * self.scale + self.offset_y,
        }
    }

    /// Shift the view by a screen-space delta. Scale is unchanged.
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.offset_x += dx;
        self.offset_y += dy;
    }

    /// Step the scale by one notch, keeping the content point under `anchor`
    /// fixed on screen. Returns `false` when the scale is already pinned at
    /// the limit in that direction.
    pub fn zoom_at(&mut self, anchor: Point, direction: ZoomDirection) -> bool {
        let factor = match direction {
            ZoomDirection::In => ZOOM_STEP,
            ZoomDirection::Out => 1.0 / ZOOM_STEP,
        };
        let new_scale = (self.scale * factor).clamp(MIN_SCALE, MAX_SCALE);
        if (new_scale - self.scale).abs() < f64::EPSILON {
            return false;
        }
        self.offset_x = anchor.x - (anchor.x - self.offset_x) / self.scale * new_scale;
        self.offset_y = anchor.y - (anchor.y - self.offset_y) / self.scale * new_scale;
        self.scale = new_scale;
        true
    }

    /// Translate so `world` sits at the center of a `width × height` surface
    /// at the current scale.
    pub fn center_on(&mut self, world: Point, width: f64, height: f64) {
        self.offset_x = width * 0.5 - world.x * self.scale;
        self.offset_y = height * 0.5 - world.y * self.scale;
    }
}
