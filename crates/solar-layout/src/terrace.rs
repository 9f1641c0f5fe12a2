use serde::{Deserialize, Serialize};
use solar_math::{Aabb2, GridSnap, Point2};

/// Usable roof outline, in plan coordinates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Terrace {
    pub vertices: Vec<Point2>,
}

impl Terrace {
    pub const MIN_VERTICES: usize = 3;

    pub fn new(vertices: Vec<Point2>) -> Self {
        Self { vertices }
    }

    /// Axis-aligned rectangle with its origin at (0, 0).
    pub fn rectangle(width: f64, height: f64) -> Self {
        Self::new(vec![
            Point2::new(0.0, 0.0),
            Point2::new(width, 0.0),
            Point2::new(width, height),
            Point2::new(0.0, height),
        ])
    }

    pub fn is_valid(&self) -> bool {
        self.vertices.len() >= Self::MIN_VERTICES
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn aabb(&self) -> Option<Aabb2> {
        Aabb2::from_points(&self.vertices)
    }

    /// Shoelace area in cm².
    pub fn area(&self) -> f64 {
        let n = self.vertices.len();
        if n < Self::MIN_VERTICES {
            return 0.0;
        }
        let twice: f64 = (0..n)
            .map(|i| {
                let a = self.vertices[i];
                let b = self.vertices[(i + 1) % n];
                a.x * b.y - b.x * a.y
            })
            .sum();
        twice.abs() * 0.5
    }
}

/// Free-form outline being drawn point by point.
#[derive(Debug, Clone, Default)]
pub struct TerraceDraft {
    points: Vec<Point2>,
    grid: GridSnap,
}

impl TerraceDraft {
    pub fn new(grid: GridSnap) -> Self {
        Self {
            points: Vec::new(),
            grid,
        }
    }

    /// Append a snapped point; consecutive duplicates are ignored.
    pub fn push(&mut self, p: Point2) {
        let p = self.grid.snap_point(p);
        if self.points.last() != Some(&p) {
            self.points.push(p);
        }
    }

    pub fn undo(&mut self) -> Option<Point2> {
        self.points.pop()
    }

    pub fn points(&self) -> &[Point2] {
        &self.points
    }

    pub fn can_close(&self) -> bool {
        self.points.len() >= Terrace::MIN_VERTICES
    }

    /// Close the outline. Returns `None` (and keeps the draft) with fewer than three points.
    pub fn close(&mut self) -> Option<Terrace> {
        if !self.can_close() {
            return None;
        }
        Some(Terrace::new(std::mem::take(&mut self.points)))
    }
}
