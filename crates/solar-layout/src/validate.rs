use solar_core::error::{PlanError, Result};
use solar_core::traits::Validate;

use crate::bounds::{contains_rect, contains_segment};
use crate::layout::Layout;

/// Check the store-wide invariants: nested bounds, beams inside the
/// construction bounds and panels inside the panel bounds.
impl Validate for Layout {
    fn validate(&self) -> Result<()> {
        // 1. Bounds nest around the terrace
        if let (Some(bounds), Some(bbox)) = (self.bounds(), self.terrace().aabb()) {
            if !bounds.nests(&bbox) {
                return Err(PlanError::Geometry(format!(
                    "Bounds do not nest: terrace {:?}, construction {:?}, panel {:?}",
                    bbox, bounds.construction, bounds.panel
                )));
            }
        }

        // 2. Beams within construction bounds
        for (id, beam) in self.beams() {
            if !contains_segment(self.construction_bounds(), beam.start(), beam.end()) {
                return Err(PlanError::ConstraintViolation(format!(
                    "Beam {:?} from {:?} to {:?} lies outside the construction bounds",
                    id,
                    beam.start(),
                    beam.end()
                )));
            }
        }

        // 3. Panels within panel bounds
        for (id, panel) in self.panels() {
            if !contains_rect(self.panel_bounds(), &panel.footprint()) {
                return Err(PlanError::ConstraintViolation(format!(
                    "Panel {:?} at ({}, {}) lies outside the panel bounds",
                    id, panel.x, panel.y
                )));
            }
        }

        Ok(())
    }
}
