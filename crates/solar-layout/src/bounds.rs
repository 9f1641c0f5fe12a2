//! Safety margins derived from the terrace.
//!
//! Beams must stay inside the construction bounds and panels inside the
//! looser panel bounds. With no terrace there are no bounds and every check
//! passes.

use serde::{Deserialize, Serialize};
use solar_core::BoundsMargins;
use solar_math::{Aabb2, Point2};

use crate::terrace::Terrace;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlanBounds {
    pub construction: Aabb2,
    pub panel: Aabb2,
}

impl PlanBounds {
    pub fn from_terrace_aabb(terrace: &Aabb2, margins: &BoundsMargins) -> Self {
        let construction = compute_construction_bounds(terrace, margins.construction);
        let panel = compute_panel_bounds(&construction, margins.panel);
        Self {
            construction,
            panel,
        }
    }

    /// Bounds for a terrace, or `None` until it has at least three vertices.
    pub fn for_terrace(terrace: &Terrace, margins: &BoundsMargins) -> Option<Self> {
        if !terrace.is_valid() {
            return None;
        }
        terrace
            .aabb()
            .map(|bbox| Self::from_terrace_aabb(&bbox, margins))
    }

    /// Check `terrace ⊆ construction ⊆ panel`.
    pub fn nests(&self, terrace: &Aabb2) -> bool {
        self.construction.contains_aabb(terrace) && self.panel.contains_aabb(&self.construction)
    }
}

pub fn compute_construction_bounds(terrace: &Aabb2, margin: f64) -> Aabb2 {
    terrace.expand(margin)
}

/// The panel margin is measured from the construction bounds, not the terrace.
pub fn compute_panel_bounds(construction: &Aabb2, margin: f64) -> Aabb2 {
    construction.expand(margin)
}

pub fn contains_point(bounds: Option<&Aabb2>, p: Point2) -> bool {
    bounds.map_or(true, |b| b.contains_point(p))
}

/// Both extreme corners must be inside. Exact for rectangular bounds.
pub fn contains_rect(bounds: Option<&Aabb2>, rect: &Aabb2) -> bool {
    contains_point(bounds, rect.min) && contains_point(bounds, rect.max)
}

/// Both endpoints must be inside. Exact for rectangular bounds.
pub fn contains_segment(bounds: Option<&Aabb2>, a: Point2, b: Point2) -> bool {
    contains_point(bounds, a) && contains_point(bounds, b)
}
