use solar_core::error::{PlanError, Result};
use solar_core::PlannerConfig;
use solar_math::{Aabb2, Point2};
use tracing::{debug, warn};

use crate::bounds::{contains_rect, contains_segment};
use crate::edit::Clipboard;
use crate::layout::Layout;
use crate::selection::Selection;
use crate::terrace::{Terrace, TerraceDraft};
use crate::types::*;

/// Owns the element store and runs every mutating operation on it.
#[derive(Debug, Clone)]
pub struct Planner {
    pub(crate) config: PlannerConfig,
    pub(crate) layout: Layout,
    pub(crate) selection: Selection,
    pub(crate) clipboard: Clipboard,
}

impl Planner {
    pub fn new(config: PlannerConfig) -> Self {
        let layout = Layout::new(config.margins);
        Self::with_layout(config, layout)
    }

    pub fn with_layout(config: PlannerConfig, layout: Layout) -> Self {
        Self {
            config,
            layout,
            selection: Selection::default(),
            clipboard: Clipboard::default(),
        }
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn into_layout(self) -> Layout {
        self.layout
    }

    pub fn set_panel_defaults(&mut self, defaults: PanelDefaults) {
        self.layout.panel_defaults = defaults;
    }

    pub fn set_text_defaults(&mut self, defaults: TextDefaults) {
        self.layout.text_defaults = defaults;
    }

    // --- Terrace ---

    /// Replace the terrace. Requires at least three vertices.
    pub fn set_terrace(&mut self, terrace: Terrace) -> Result<()> {
        if !terrace.is_valid() {
            return Err(PlanError::InvalidOperation(format!(
                "A terrace needs at least {} vertices, got {}",
                Terrace::MIN_VERTICES,
                terrace.vertices.len()
            )));
        }
        debug!(vertices = terrace.vertices.len(), "terrace replaced");
        self.layout.replace_terrace(terrace);
        Ok(())
    }

    pub fn set_rectangular_terrace(&mut self, width: f64, height: f64) -> Result<()> {
        if !(width > 0.0 && height > 0.0) {
            return Err(PlanError::InvalidOperation(format!(
                "Terrace dimensions must be positive, got {width} x {height}"
            )));
        }
        self.set_terrace(Terrace::rectangle(width, height))
    }

    /// Close a drawn outline and use it as the terrace. Returns false and
    /// leaves the draft untouched if it has fewer than three points.
    pub fn confirm_terrace(&mut self, draft: &mut TerraceDraft) -> bool {
        match draft.close() {
            Some(terrace) => {
                debug!(vertices = terrace.vertices.len(), "terrace confirmed");
                self.layout.replace_terrace(terrace);
                true
            }
            None => false,
        }
    }

    pub fn clear_terrace(&mut self) {
        self.layout.replace_terrace(Terrace::default());
    }

    // --- Placement ---

    /// Add a drawn beam. Returns `Ok(None)` when it is too short to keep.
    pub fn place_beam(&mut self, start: Point2, end: Point2, profile: &str) -> Result<Option<BeamId>> {
        let beam = Beam::new(start, end, profile);
        if beam.length() < self.config.min_beam_length {
            debug!(length = beam.length(), "beam discarded: below minimum length");
            return Ok(None);
        }
        self.check_beam(&beam)?;
        let id = self.layout.beams.insert(beam);
        debug!(?id, "beam placed");
        Ok(Some(id))
    }

    pub fn place_panel(&mut self, x: f64, y: f64, spec: &PanelSpec) -> Result<PanelId> {
        let panel = Panel::new(x, y, spec);
        self.check_panel(&panel)?;
        let id = self.layout.panels.insert(panel);
        debug!(?id, x, y, "panel placed");
        Ok(id)
    }

    /// Place a panel using the store's panel defaults.
    pub fn place_default_panel(&mut self, x: f64, y: f64) -> Result<PanelId> {
        let spec = self.layout.panel_defaults.spec();
        self.place_panel(x, y, &spec)
    }

    /// Add an obstacle spanning two dragged corners. Returns `None` when a
    /// side is below the minimum size.
    pub fn place_obstacle(&mut self, a: Point2, b: Point2, kind: ObstacleKind) -> Option<ObstacleId> {
        let rect = Aabb2::from_corners(a, b);
        let min = self.config.min_obstacle_size;
        if rect.width() < min || rect.height() < min {
            debug!(width = rect.width(), height = rect.height(), "obstacle discarded: too small");
            return None;
        }
        let id = self.layout.obstacles.insert(Obstacle {
            x: rect.min.x,
            y: rect.min.y,
            width: rect.width(),
            height: rect.height(),
            kind,
        });
        debug!(?id, "obstacle placed");
        Some(id)
    }

    // --- Property edits ---

    /// Change a panel's dimensions, tilt or rating in place.
    pub fn edit_panel(&mut self, id: PanelId, spec: &PanelSpec) -> Result<()> {
        let current = self
            .layout
            .panel(id)
            .ok_or_else(|| PlanError::NotFound(format!("Panel {id:?}")))?;
        let updated = Panel::new(current.x, current.y, spec);
        self.check_panel(&updated)?;
        if let Some(panel) = self.layout.panels.get_mut(id) {
            *panel = updated;
        }
        Ok(())
    }

    pub fn set_beam_profile(&mut self, id: BeamId, profile: &str) -> Result<()> {
        let beam = self
            .layout
            .beams
            .get_mut(id)
            .ok_or_else(|| PlanError::NotFound(format!("Beam {id:?}")))?;
        beam.profile = profile.to_string();
        Ok(())
    }

    // --- Bound checks ---

    pub(crate) fn check_beam(&self, beam: &Beam) -> Result<()> {
        if contains_segment(self.layout.construction_bounds(), beam.start(), beam.end()) {
            return Ok(());
        }
        warn!(start = ?beam.start(), end = ?beam.end(), "beam outside construction bounds");
        Err(PlanError::ConstraintViolation(format!(
            "Beam from ({}, {}) to ({}, {}) would leave the construction bounds",
            beam.x1, beam.y1, beam.x2, beam.y2
        )))
    }

    pub(crate) fn check_panel(&self, panel: &Panel) -> Result<()> {
        if contains_rect(self.layout.panel_bounds(), &panel.footprint()) {
            return Ok(());
        }
        warn!(x = panel.x, y = panel.y, "panel outside panel bounds");
        Err(PlanError::ConstraintViolation(format!(
            "Panel {} x {} at ({}, {}) would leave the panel bounds",
            panel.width, panel.projected_height, panel.x, panel.y
        )))
    }
}

impl Default for Planner {
    fn default() -> Self {
        Self::new(PlannerConfig::default())
    }
}
