//! Where each panel rests on the inclined structure.

use serde::{Deserialize, Serialize};
use solar_layout::{Beam, BeamId, Layout, Panel, PanelId};
use solar_math::{point_to_segment_distance, segment_intersects_aabb};
use tracing::debug;

use crate::inclination::InclinationProfile;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelSupport {
    pub panel: PanelId,
    /// Beams the panel rests on
    pub beams: Vec<BeamId>,
    /// Signed tilt in radians, negative on an inverted ramp
    pub tilt: f64,
    pub resting_height: f64,
    /// No beam crosses the footprint and the nearest one was used instead
    pub used_fallback: bool,
}

/// Support for every panel, in creation order.
pub fn resolve_supports(layout: &Layout, profile: &InclinationProfile) -> Vec<PanelSupport> {
    let beams: Vec<(BeamId, &Beam)> = layout.beams().collect();
    let supports: Vec<PanelSupport> = layout
        .panels()
        .map(|(id, panel)| panel_support(id, panel, &beams, profile))
        .collect();
    debug!(
        panels = supports.len(),
        fallback = supports.iter().filter(|s| s.used_fallback).count(),
        "panel supports resolved"
    );
    supports
}

/// Resting height and tilt of one panel.
///
/// The panel takes the steepest tilt among the beams crossing its footprint
/// and rests at the highest point any of them reaches under either of its
/// depth edges.
pub fn panel_support(
    id: PanelId,
    panel: &Panel,
    beams: &[(BeamId, &Beam)],
    profile: &InclinationProfile,
) -> PanelSupport {
    let footprint = panel.footprint();
    let mut supporting: Vec<BeamId> = beams
        .iter()
        .filter(|(_, b)| segment_intersects_aabb(b.start(), b.end(), &footprint))
        .map(|&(id, _)| id)
        .collect();

    let used_fallback = supporting.is_empty() && !beams.is_empty();
    if used_fallback {
        let center = footprint.center();
        let nearest = beams.iter().min_by(|(_, a), (_, b)| {
            let da = point_to_segment_distance(center, a.start(), a.end());
            let db = point_to_segment_distance(center, b.start(), b.end());
            da.total_cmp(&db)
        });
        supporting.extend(nearest.map(|&(id, _)| id));
    }

    if supporting.is_empty() {
        return PanelSupport {
            panel: id,
            beams: supporting,
            tilt: 0.0,
            resting_height: profile.base_height,
            used_fallback,
        };
    }

    let edges = [footprint.min.y, footprint.max.y];
    let mut tilt: f64 = 0.0;
    let mut resting_height = f64::NEG_INFINITY;
    for &beam in &supporting {
        let beam_tilt = profile.tilt_of(beam);
        tilt = tilt.max(beam_tilt);
        for edge in edges {
            resting_height = resting_height.max(profile.height_at(edge, beam_tilt));
        }
    }
    if profile.invert {
        tilt = -tilt;
    }

    PanelSupport {
        panel: id,
        beams: supporting,
        tilt,
        resting_height,
        used_fallback,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inclination::InclinationRequest;
    use solar_layout::{PanelSpec, Planner, DEFAULT_BEAM_PROFILE};
    use solar_math::dvec2;

    fn flat_panel() -> PanelSpec {
        PanelSpec {
            width: 100.0,
            real_height: 50.0,
            tilt_deg: 0.0,
            power_w: 400,
        }
    }

    fn profile(planner: &Planner, request: InclinationRequest) -> InclinationProfile {
        InclinationProfile::resolve(planner.layout(), &request, 100.0, planner.config())
    }

    #[test]
    fn test_no_beams_rests_at_base() {
        let mut planner = Planner::default();
        planner.place_panel(0.0, 0.0, &flat_panel()).unwrap();
        let supports = resolve_supports(planner.layout(), &profile(&planner, InclinationRequest::default()));
        assert_eq!(supports.len(), 1);
        assert_eq!(supports[0].resting_height, 100.0);
        assert_eq!(supports[0].tilt, 0.0);
        assert!(supports[0].beams.is_empty());
        assert!(!supports[0].used_fallback);
    }

    #[test]
    fn test_nearest_beam_fallback() {
        let mut planner = Planner::default();
        let near = planner
            .place_beam(dvec2(0.0, 80.0), dvec2(100.0, 80.0), DEFAULT_BEAM_PROFILE)
            .unwrap()
            .unwrap();
        planner
            .place_beam(dvec2(0.0, 300.0), dvec2(100.0, 300.0), DEFAULT_BEAM_PROFILE)
            .unwrap();
        planner.place_panel(0.0, 0.0, &flat_panel()).unwrap();

        let supports = resolve_supports(planner.layout(), &profile(&planner, InclinationRequest::default()));
        assert!(supports[0].used_fallback);
        assert_eq!(supports[0].beams, vec![near]);
    }

    #[test]
    fn test_inverted_ramp_flips_tilt_sign() {
        let mut planner = Planner::default();
        planner
            .place_beam(dvec2(0.0, 0.0), dvec2(0.0, 200.0), DEFAULT_BEAM_PROFILE)
            .unwrap();
        planner
            .place_beam(dvec2(0.0, 200.0), dvec2(200.0, 200.0), DEFAULT_BEAM_PROFILE)
            .unwrap();
        planner.place_panel(-50.0, 20.0, &flat_panel()).unwrap();

        let forward = resolve_supports(planner.layout(), &profile(&planner, InclinationRequest::new(10.0, 0, Some(1))));
        let inverted = resolve_supports(planner.layout(), &profile(&planner, InclinationRequest::new(10.0, 1, Some(0))));
        assert!(forward[0].tilt > 0.0);
        assert_eq!(inverted[0].tilt, -forward[0].tilt);
    }
}
