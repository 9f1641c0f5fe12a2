//! Rectangular frame with evenly spaced parallel beams.
//!
//! The frame is inset from the terrace bounding box; parallel beams run along
//! the width axis (x) and are spaced along the depth axis (y).

use serde::{Deserialize, Serialize};
use solar_core::error::{PlanError, Result};
use solar_math::{Aabb2, Point2};
use tracing::{debug, warn};

use crate::planner::Planner;
use crate::terrace::Terrace;
use crate::types::{Beam, BeamId, DEFAULT_BEAM_PROFILE};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AutoStructureParams {
    pub beam_count: usize,
    /// Distance between consecutive parallel beams (cm)
    pub spacing: f64,
    pub profile: String,
}

impl Default for AutoStructureParams {
    fn default() -> Self {
        Self {
            beam_count: 3,
            spacing: 100.0,
            profile: DEFAULT_BEAM_PROFILE.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AutoStructureReport {
    /// Structure rectangle the frame was built on
    pub frame: Aabb2,
    /// Frame beams in order: top, right, bottom, left
    pub perimeter: [BeamId; 4],
    pub parallel: Vec<BeamId>,
    /// Whether a default terrace had to be created first
    pub terrace_created: bool,
}

/// Frame beams followed by the parallel beams for `frame`.
pub fn structure_beams(frame: &Aabb2, params: &AutoStructureParams) -> Vec<Beam> {
    let [tl, tr, br, bl] = [
        frame.min,
        Point2::new(frame.max.x, frame.min.y),
        frame.max,
        Point2::new(frame.min.x, frame.max.y),
    ];
    let profile = params.profile.as_str();
    let mut beams = vec![
        Beam::auto(tl, tr, profile),
        Beam::auto(tr, br, profile),
        Beam::auto(br, bl, profile),
        Beam::auto(bl, tl, profile),
    ];
    for i in 0..params.beam_count {
        let y = frame.min.y + (i + 1) as f64 * params.spacing;
        if y >= frame.max.y {
            break;
        }
        beams.push(Beam::auto(
            Point2::new(frame.min.x, y),
            Point2::new(frame.max.x, y),
            profile,
        ));
    }
    beams
}

/// Structure rectangle inset from a terrace bounding box, each side at least `min_side`.
pub fn structure_frame(terrace_bbox: &Aabb2, inset: f64, min_side: f64) -> Aabb2 {
    let width = (terrace_bbox.width() - 2.0 * inset).max(min_side);
    let depth = (terrace_bbox.height() - 2.0 * inset).max(min_side);
    Aabb2::from_rect(terrace_bbox.min.x + inset, terrace_bbox.min.y + inset, width, depth)
}

impl Planner {
    /// Replace all beams with a generated frame and parallel beams.
    ///
    /// Without a terrace, a default rectangular one is created first. Fails
    /// without touching the store when `beam_count * spacing` does not fit
    /// strictly inside the structure depth. The frame keeps its minimum side
    /// even when that reaches past a narrow terrace.
    pub fn generate_auto_structure(&mut self, params: &AutoStructureParams) -> Result<AutoStructureReport> {
        if !(params.spacing > 0.0) {
            return Err(PlanError::InvalidOperation(format!(
                "Beam spacing must be positive, got {}",
                params.spacing
            )));
        }

        let new_terrace = (!self.layout.terrace().is_valid()).then(|| {
            let size = self.config.default_terrace;
            Terrace::rectangle(size.width, size.height)
        });
        let terrace = new_terrace.as_ref().unwrap_or(self.layout.terrace());
        let bbox = terrace
            .aabb()
            .ok_or_else(|| PlanError::Geometry("Terrace has no bounding box".into()))?;
        let frame = structure_frame(&bbox, self.config.structure_inset, self.config.structure_min_side);

        let required = params.beam_count as f64 * params.spacing;
        let available = frame.height();
        if required >= available {
            warn!(required, available, "auto structure does not fit");
            return Err(PlanError::InfeasibleStructure {
                beam_count: params.beam_count,
                spacing: params.spacing,
                required,
                available,
            });
        }

        let beams = structure_beams(&frame, params);
        let terrace_created = new_terrace.is_some();
        if let Some(terrace) = new_terrace {
            self.layout.replace_terrace(terrace);
        }
        self.layout.beams.clear();
        self.selection.retain_live(&self.layout);

        let ids: Vec<BeamId> = beams
            .into_iter()
            .map(|b| self.layout.beams.insert(b))
            .collect();
        let perimeter = [ids[0], ids[1], ids[2], ids[3]];
        let parallel = ids[4..].to_vec();
        debug!(
            parallel = parallel.len(),
            width = frame.width(),
            depth = frame.height(),
            "auto structure generated"
        );
        Ok(AutoStructureReport {
            frame,
            perimeter,
            parallel,
            terrace_created,
        })
    }
}
