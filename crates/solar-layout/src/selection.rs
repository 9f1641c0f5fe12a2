//! Picking and multi-selection.

use solar_math::{point_to_segment_distance, segment_intersects_aabb, Aabb2, Point2, ViewTransform};

use crate::layout::Layout;
use crate::planner::Planner;
use crate::types::ElementRef;

/// Ordered set of selected elements.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selection {
    entries: Vec<ElementRef>,
}

impl Selection {
    pub fn entries(&self) -> &[ElementRef] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, element: ElementRef) -> bool {
        self.entries.contains(&element)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn add(&mut self, element: ElementRef) {
        if !self.contains(element) {
            self.entries.push(element);
        }
    }

    pub fn remove(&mut self, element: ElementRef) {
        self.entries.retain(|&e| e != element);
    }

    pub fn toggle(&mut self, element: ElementRef) {
        if self.contains(element) {
            self.remove(element);
        } else {
            self.entries.push(element);
        }
    }

    pub fn replace(&mut self, elements: impl IntoIterator<Item = ElementRef>) {
        self.entries.clear();
        for e in elements {
            self.add(e);
        }
    }

    /// Drop entries whose element no longer exists.
    pub fn retain_live(&mut self, layout: &Layout) {
        self.entries.retain(|&e| layout.contains(e));
    }
}

/// Topmost element under `point`, or `None`.
///
/// Priority is text, panels, obstacles, then beams; within a kind the most
/// recently created wins. `beam_tolerance` is in plan units.
pub fn hit_test(layout: &Layout, point: Point2, beam_tolerance: f64) -> Option<ElementRef> {
    if let Some((id, _)) = layout
        .texts()
        .rev()
        .find(|(_, t)| t.footprint().contains_point(point))
    {
        return Some(ElementRef::Text(id));
    }
    if let Some((id, _)) = layout
        .panels()
        .rev()
        .find(|(_, p)| p.footprint().contains_point(point))
    {
        return Some(ElementRef::Panel(id));
    }
    if let Some((id, _)) = layout
        .obstacles()
        .rev()
        .find(|(_, o)| o.footprint().contains_point(point))
    {
        return Some(ElementRef::Obstacle(id));
    }
    layout
        .beams()
        .rev()
        .find(|(_, b)| point_to_segment_distance(point, b.start(), b.end()) <= beam_tolerance)
        .map(|(id, _)| ElementRef::Beam(id))
}

/// Every element whose shape touches `rect`, in kind priority order.
pub fn elements_in_rect(layout: &Layout, rect: &Aabb2) -> Vec<ElementRef> {
    let mut hits = Vec::new();
    hits.extend(
        layout
            .texts()
            .filter(|(_, t)| t.footprint().intersects(rect))
            .map(|(id, _)| ElementRef::Text(id)),
    );
    hits.extend(
        layout
            .panels()
            .filter(|(_, p)| p.footprint().intersects(rect))
            .map(|(id, _)| ElementRef::Panel(id)),
    );
    hits.extend(
        layout
            .obstacles()
            .filter(|(_, o)| o.footprint().intersects(rect))
            .map(|(id, _)| ElementRef::Obstacle(id)),
    );
    hits.extend(
        layout
            .beams()
            .filter(|(_, b)| segment_intersects_aabb(b.start(), b.end(), rect))
            .map(|(id, _)| ElementRef::Beam(id)),
    );
    hits
}

impl Planner {
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Pick at a plan point; the beam pick radius is the configured display
    /// tolerance converted through `view`.
    pub fn hit_test(&self, point: Point2, view: &ViewTransform) -> Option<ElementRef> {
        let tolerance = view.display_to_world_length(self.config.hit_tolerance_px);
        hit_test(&self.layout, point, tolerance)
    }

    /// Click selection. A plain click replaces the selection with the hit (or
    /// clears it on a miss); an additive click toggles the hit.
    pub fn click_select(&mut self, point: Point2, additive: bool, view: &ViewTransform) -> Option<ElementRef> {
        self.selection.retain_live(&self.layout);
        let hit = self.hit_test(point, view);
        match (hit, additive) {
            (Some(e), true) => self.selection.toggle(e),
            (Some(e), false) => self.selection.replace([e]),
            (None, false) => self.selection.clear(),
            (None, true) => {}
        }
        hit
    }

    /// Rubber-band selection between two dragged corners.
    pub fn select_area(&mut self, a: Point2, b: Point2, additive: bool) -> usize {
        let rect = Aabb2::from_corners(a, b);
        let hits = elements_in_rect(&self.layout, &rect);
        let count = hits.len();
        if additive {
            self.selection.retain_live(&self.layout);
            for e in hits {
                self.selection.add(e);
            }
        } else {
            self.selection.replace(hits);
        }
        count
    }

    pub fn select(&mut self, element: ElementRef) -> bool {
        if !self.layout.contains(element) {
            return false;
        }
        self.selection.replace([element]);
        true
    }

    pub fn select_all(&mut self) {
        let all: Vec<ElementRef> = self
            .layout
            .texts()
            .map(|(id, _)| ElementRef::Text(id))
            .chain(self.layout.panels().map(|(id, _)| ElementRef::Panel(id)))
            .chain(self.layout.obstacles().map(|(id, _)| ElementRef::Obstacle(id)))
            .chain(self.layout.beams().map(|(id, _)| ElementRef::Beam(id)))
            .collect();
        self.selection.replace(all);
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }
}
