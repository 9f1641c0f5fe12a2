use crate::{Point2, Vector2};
use serde::{Deserialize, Serialize};

/// Maps plan coordinates (cm) to a zoomed, panned display space and back.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewTransform {
    pub pixels_per_unit: f64,
    pub zoom: f64,
    pub pan: Vector2,
}

impl ViewTransform {
    pub const MIN_ZOOM: f64 = 0.1;
    pub const MAX_ZOOM: f64 = 10.0;

    pub fn new(pixels_per_unit: f64, zoom: f64, pan: Vector2) -> Self {
        Self {
            pixels_per_unit,
            zoom,
            pan,
        }
    }

    pub fn identity() -> Self {
        Self::new(1.0, 1.0, Vector2::ZERO)
    }

    /// Display pixels per plan unit at the current zoom.
    pub fn scale(&self) -> f64 {
        self.pixels_per_unit * self.zoom
    }

    pub fn to_display(&self, p: Point2) -> Point2 {
        p * self.scale() + self.pan
    }

    pub fn to_world(&self, p: Point2) -> Point2 {
        (p - self.pan) / self.scale()
    }

    /// Convert a display distance (e.g. a pick radius) to plan units.
    pub fn display_to_world_length(&self, length: f64) -> f64 {
        length / self.scale()
    }

    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.pan += Vector2::new(dx, dy);
    }

    /// Zoom by `factor` while keeping the plan point under `anchor` fixed.
    pub fn zoom_at(&mut self, factor: f64, anchor: Point2) {
        let world = self.to_world(anchor);
        self.zoom = (self.zoom * factor).clamp(Self::MIN_ZOOM, Self::MAX_ZOOM);
        self.pan = anchor - world * self.scale();
    }
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self::identity()
    }
}

/// Rounds plan coordinates to a grid when enabled.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridSnap {
    pub size: f64,
    pub enabled: bool,
}

impl GridSnap {
    pub fn new(size: f64, enabled: bool) -> Self {
        Self { size, enabled }
    }

    pub fn snap(&self, v: f64) -> f64 {
        if !self.enabled || self.size <= 0.0 {
            return v;
        }
        (v / self.size).round() * self.size
    }

    pub fn snap_point(&self, p: Point2) -> Point2 {
        Point2::new(self.snap(p.x), self.snap(p.y))
    }
}

impl Default for GridSnap {
    fn default() -> Self {
        Self::new(10.0, true)
    }
}
