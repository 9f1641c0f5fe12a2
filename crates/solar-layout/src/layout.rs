use solar_core::BoundsMargins;
use solar_math::Aabb2;

use crate::bounds::PlanBounds;
use crate::collection::Collection;
use crate::terrace::Terrace;
use crate::types::*;

/// Element store: the terrace, its derived bounds and every placed element.
///
/// Read access is public. Mutation goes through [`crate::Planner`], which
/// validates before it writes, or through [`Layout::restore`] for imports.
#[derive(Debug, Clone)]
pub struct Layout {
    margins: BoundsMargins,
    terrace: Terrace,
    bounds: Option<PlanBounds>,
    pub(crate) obstacles: Collection<ObstacleId, Obstacle>,
    pub(crate) beams: Collection<BeamId, Beam>,
    pub(crate) panels: Collection<PanelId, Panel>,
    pub(crate) texts: Collection<TextId, TextAnnotation>,
    pub panel_defaults: PanelDefaults,
    pub text_defaults: TextDefaults,
}

/// Plain data used to rebuild a [`Layout`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayoutParts {
    pub terrace: Terrace,
    /// Stored bounds; recomputed when absent or not nested around the terrace
    pub bounds: Option<PlanBounds>,
    pub obstacles: Vec<Obstacle>,
    pub beams: Vec<Beam>,
    pub panels: Vec<Panel>,
    pub texts: Vec<TextAnnotation>,
    pub panel_defaults: PanelDefaults,
    pub text_defaults: TextDefaults,
}

impl Layout {
    pub fn new(margins: BoundsMargins) -> Self {
        Self {
            margins,
            terrace: Terrace::default(),
            bounds: None,
            obstacles: Collection::new(),
            beams: Collection::new(),
            panels: Collection::new(),
            texts: Collection::new(),
            panel_defaults: PanelDefaults::default(),
            text_defaults: TextDefaults::default(),
        }
    }

    /// Rebuild a store from imported data. Elements are inserted as given.
    pub fn restore(parts: LayoutParts, margins: BoundsMargins) -> Self {
        let mut layout = Self::new(margins);
        layout.terrace = parts.terrace;
        layout.bounds = match (parts.bounds, layout.terrace.aabb()) {
            (Some(stored), Some(bbox)) if layout.terrace.is_valid() && stored.nests(&bbox) => {
                Some(stored)
            }
            _ => PlanBounds::for_terrace(&layout.terrace, &margins),
        };
        for o in parts.obstacles {
            layout.obstacles.insert(o);
        }
        for b in parts.beams {
            layout.beams.insert(b);
        }
        for p in parts.panels {
            layout.panels.insert(p);
        }
        for t in parts.texts {
            layout.texts.insert(t);
        }
        layout.panel_defaults = parts.panel_defaults;
        layout.text_defaults = parts.text_defaults;
        layout
    }

    /// Ordered copy of every collection.
    pub fn to_parts(&self) -> LayoutParts {
        LayoutParts {
            terrace: self.terrace.clone(),
            bounds: self.bounds,
            obstacles: self.obstacles.values().cloned().collect(),
            beams: self.beams.values().cloned().collect(),
            panels: self.panels.values().cloned().collect(),
            texts: self.texts.values().cloned().collect(),
            panel_defaults: self.panel_defaults.clone(),
            text_defaults: self.text_defaults.clone(),
        }
    }

    pub fn margins(&self) -> &BoundsMargins {
        &self.margins
    }

    pub fn terrace(&self) -> &Terrace {
        &self.terrace
    }

    pub fn bounds(&self) -> Option<&PlanBounds> {
        self.bounds.as_ref()
    }

    pub fn construction_bounds(&self) -> Option<&Aabb2> {
        self.bounds.as_ref().map(|b| &b.construction)
    }

    pub fn panel_bounds(&self) -> Option<&Aabb2> {
        self.bounds.as_ref().map(|b| &b.panel)
    }

    /// Replace the terrace and recompute the derived bounds.
    pub(crate) fn replace_terrace(&mut self, terrace: Terrace) {
        self.bounds = PlanBounds::for_terrace(&terrace, &self.margins);
        self.terrace = terrace;
    }

    // --- Collections ---

    pub fn obstacles(&self) -> impl DoubleEndedIterator<Item = (ObstacleId, &Obstacle)> + '_ {
        self.obstacles.iter()
    }

    pub fn beams(&self) -> impl DoubleEndedIterator<Item = (BeamId, &Beam)> + '_ {
        self.beams.iter()
    }

    pub fn panels(&self) -> impl DoubleEndedIterator<Item = (PanelId, &Panel)> + '_ {
        self.panels.iter()
    }

    pub fn texts(&self) -> impl DoubleEndedIterator<Item = (TextId, &TextAnnotation)> + '_ {
        self.texts.iter()
    }

    pub fn obstacle(&self, id: ObstacleId) -> Option<&Obstacle> {
        self.obstacles.get(id)
    }

    pub fn beam(&self, id: BeamId) -> Option<&Beam> {
        self.beams.get(id)
    }

    pub fn panel(&self, id: PanelId) -> Option<&Panel> {
        self.panels.get(id)
    }

    pub fn text(&self, id: TextId) -> Option<&TextAnnotation> {
        self.texts.get(id)
    }

    /// Beam at a creation-order position.
    pub fn beam_at(&self, index: usize) -> Option<(BeamId, &Beam)> {
        let id = self.beams.key_at(index)?;
        self.beams.get(id).map(|b| (id, b))
    }

    pub fn beam_count(&self) -> usize {
        self.beams.len()
    }

    pub fn panel_count(&self) -> usize {
        self.panels.len()
    }

    pub fn obstacle_count(&self) -> usize {
        self.obstacles.len()
    }

    pub fn text_count(&self) -> usize {
        self.texts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
            && self.beams.is_empty()
            && self.panels.is_empty()
            && self.texts.is_empty()
    }

    /// Whether the reference still resolves to a live element.
    pub fn contains(&self, element: ElementRef) -> bool {
        match element {
            ElementRef::Obstacle(id) => self.obstacles.contains(id),
            ElementRef::Beam(id) => self.beams.contains(id),
            ElementRef::Panel(id) => self.panels.contains(id),
            ElementRef::Text(id) => self.texts.contains(id),
        }
    }

    pub(crate) fn remove(&mut self, element: ElementRef) -> bool {
        match element {
            ElementRef::Obstacle(id) => self.obstacles.remove(id).is_some(),
            ElementRef::Beam(id) => self.beams.remove(id).is_some(),
            ElementRef::Panel(id) => self.panels.remove(id).is_some(),
            ElementRef::Text(id) => self.texts.remove(id).is_some(),
        }
    }
}

impl Default for Layout {
    fn default() -> Self {
        Self::new(BoundsMargins::default())
    }
}
