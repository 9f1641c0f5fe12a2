use crate::{Point2, Vector2};
use serde::{Deserialize, Serialize};

/// Axis-Aligned Bounding Box in plan space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb2 {
    pub min: Point2,
    pub max: Point2,
}

impl Aabb2 {
    pub fn new(min: Point2, max: Point2) -> Self {
        Self { min, max }
    }

    /// Box from an origin and a size. Negative sizes (a drag towards the
    /// top-left) are normalized.
    pub fn from_rect(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::from_corners(Point2::new(x, y), Point2::new(x + width, y + height))
    }

    /// Box spanning two arbitrary opposite corners.
    pub fn from_corners(a: Point2, b: Point2) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    pub fn from_points(points: &[Point2]) -> Option<Self> {
        let (&first, rest) = points.split_first()?;
        let mut min = first;
        let mut max = first;
        for &p in rest {
            min = min.min(p);
            max = max.max(p);
        }
        Some(Self { min, max })
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    pub fn center(&self) -> Point2 {
        (self.min + self.max) * 0.5
    }

    pub fn extents(&self) -> Vector2 {
        self.max - self.min
    }

    pub fn contains_point(&self, p: Point2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    /// True if `other` lies entirely inside (touching edges counts as inside).
    pub fn contains_aabb(&self, other: &Self) -> bool {
        self.contains_point(other.min) && self.contains_point(other.max)
    }

    /// Separating-axis overlap test; touching boxes intersect.
    pub fn intersects(&self, other: &Self) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
    }

    pub fn merge(&self, other: &Self) -> Self {
        Self {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    pub fn expand(&self, amount: f64) -> Self {
        let offset = Vector2::splat(amount);
        Self {
            min: self.min - offset,
            max: self.max + offset,
        }
    }

    pub fn translate(&self, delta: Vector2) -> Self {
        Self {
            min: self.min + delta,
            max: self.max + delta,
        }
    }

    /// Corners in order: min, (max.x, min.y), max, (min.x, max.y).
    pub fn corners(&self) -> [Point2; 4] {
        [
            self.min,
            Point2::new(self.max.x, self.min.y),
            self.max,
            Point2::new(self.min.x, self.max.y),
        ]
    }

    /// The four boundary edges, following [`Aabb2::corners`].
    pub fn edges(&self) -> [(Point2, Point2); 4] {
        let c = self.corners();
        [(c[0], c[1]), (c[1], c[2]), (c[2], c[3]), (c[3], c[0])]
    }
}
