//! Everything a 3D view needs, resolved up front.
//!
//! The renderer draws these placements as given and makes no geometric
//! decisions of its own.

use serde::{Deserialize, Serialize};
use solar_core::traits::BoundingBox;
use solar_core::PlannerConfig;
use solar_layout::{BeamId, Layout, PanelId, DEFAULT_BEAM_PROFILE};
use solar_math::{dvec3, Aabb2, Point2, Point3};
use tracing::debug;

use crate::inclination::{InclinationProfile, InclinationRequest, TiltClass};
use crate::support::resolve_supports;

/// Structure settings chosen by the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StructureConfig {
    /// Height of the flat end of the ramp (cm)
    pub base_height_cm: f64,
    pub inclination: InclinationRequest,
    pub show_post_labels: bool,
    pub material: String,
    pub beam_profile: String,
}

impl StructureConfig {
    pub const DEFAULT_BASE_HEIGHT_CM: f64 = 120.0;
    pub const DEFAULT_MATERIAL: &'static str = "Acero S275";
}

impl Default for StructureConfig {
    fn default() -> Self {
        Self {
            base_height_cm: Self::DEFAULT_BASE_HEIGHT_CM,
            inclination: InclinationRequest::default(),
            show_post_labels: true,
            material: Self::DEFAULT_MATERIAL.into(),
            beam_profile: DEFAULT_BEAM_PROFILE.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeamPlacement {
    pub beam: BeamId,
    pub start: Point3,
    pub end: Point3,
    pub class: TiltClass,
    /// Radians
    pub tilt: f64,
    pub profile: String,
}

/// Vertical post under a corner of the structure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostPlacement {
    pub corner: Point2,
    pub height: f64,
    pub label: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelPlacement {
    pub panel: PanelId,
    /// Footprint centre at the resting height
    pub center: Point3,
    pub width: f64,
    /// Length along the slope
    pub length: f64,
    /// Signed radians
    pub tilt: f64,
    pub resting_height: f64,
    pub supports: Vec<BeamId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructureScene {
    pub profile: InclinationProfile,
    pub material: String,
    pub beams: Vec<BeamPlacement>,
    pub posts: Vec<PostPlacement>,
    pub panels: Vec<PanelPlacement>,
}

impl StructureScene {
    /// Tallest point of the structure or its panels.
    pub fn max_height(&self) -> f64 {
        let beams = self.beams.iter().flat_map(|b| [b.start.z, b.end.z]);
        let posts = self.posts.iter().map(|p| p.height);
        let panels = self.panels.iter().map(|p| p.resting_height);
        beams
            .chain(posts)
            .chain(panels)
            .fold(self.profile.base_height, f64::max)
    }

    pub fn is_empty(&self) -> bool {
        self.beams.is_empty() && self.panels.is_empty()
    }
}

/// Resolve the scene with the default planner tolerances.
pub fn build_scene(layout: &Layout, config: &StructureConfig) -> StructureScene {
    build_scene_with(layout, config, &PlannerConfig::default())
}

pub fn build_scene_with(layout: &Layout, config: &StructureConfig, planner: &PlannerConfig) -> StructureScene {
    let profile = InclinationProfile::resolve(layout, &config.inclination, config.base_height_cm, planner);

    let beams: Vec<BeamPlacement> = layout
        .beams()
        .zip(&profile.beams)
        .map(|((id, beam), resolved)| BeamPlacement {
            beam: id,
            start: dvec3(beam.x1, beam.y1, profile.height_at(beam.y1, resolved.tilt)),
            end: dvec3(beam.x2, beam.y2, profile.height_at(beam.y2, resolved.tilt)),
            class: resolved.class,
            tilt: resolved.tilt,
            profile: beam.profile.clone(),
        })
        .collect();

    let posts = layout
        .bounding_box()
        .map(|(min, max)| corner_posts(layout, &profile, &Aabb2::new(min, max), config, planner))
        .unwrap_or_default();

    let panels: Vec<PanelPlacement> = resolve_supports(layout, &profile)
        .into_iter()
        .filter_map(|support| {
            let panel = layout.panel(support.panel)?;
            let center = panel.footprint().center();
            Some(PanelPlacement {
                panel: support.panel,
                center: dvec3(center.x, center.y, support.resting_height),
                width: panel.width,
                length: panel.real_height,
                tilt: support.tilt,
                resting_height: support.resting_height,
                supports: support.beams,
            })
        })
        .collect();

    debug!(
        beams = beams.len(),
        posts = posts.len(),
        panels = panels.len(),
        "structure scene built"
    );

    StructureScene {
        profile,
        material: config.material.clone(),
        beams,
        posts,
        panels,
    }
}

/// One post per corner of the beam extent, as tall as the steepest beam
/// ending there.
fn corner_posts(
    layout: &Layout,
    profile: &InclinationProfile,
    extent: &Aabb2,
    config: &StructureConfig,
    planner: &PlannerConfig,
) -> Vec<PostPlacement> {
    let joint = planner.tolerance.joint;
    extent
        .corners()
        .into_iter()
        .enumerate()
        .map(|(i, corner)| {
            let tilt = layout
                .beams()
                .filter(|(_, b)| b.endpoints().iter().any(|p| p.distance(corner) <= joint))
                .map(|(id, _)| profile.tilt_of(id))
                .reduce(f64::max);
            let height = match tilt {
                Some(tilt) => profile.height_at(corner.y, tilt),
                None => profile.base_height,
            };
            PostPlacement {
                corner,
                height,
                label: config
                    .show_post_labels
                    .then(|| format!("P{}: {:.0} cm", i + 1, height)),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use solar_layout::{AutoStructureParams, PanelSpec, Planner};
    use solar_math::dvec2;

    #[test]
    fn test_empty_layout_scene() {
        let scene = build_scene(&Layout::default(), &StructureConfig::default());
        assert!(scene.is_empty());
        assert!(scene.posts.is_empty());
        assert_eq!(scene.max_height(), 120.0);
    }

    #[test]
    fn test_posts_follow_the_ramp() {
        let mut planner = Planner::default();
        planner.set_rectangular_terrace(210.0, 210.0).unwrap();
        planner
            .generate_auto_structure(&AutoStructureParams {
                beam_count: 1,
                spacing: 100.0,
                profile: "IPN-80".into(),
            })
            .unwrap();
        let scene = build_scene(planner.layout(), &StructureConfig::default());
        assert_eq!(scene.beams.len(), 5);
        assert_eq!(scene.posts.len(), 4);

        let rise = 200.0 * 20f64.to_radians().tan();
        // Near corners at base height, far corners at the top of the ramp
        assert_relative_eq!(scene.posts[0].height, 120.0);
        assert_relative_eq!(scene.posts[1].height, 120.0);
        assert_relative_eq!(scene.posts[2].height, 120.0 + rise, epsilon = 1e-9);
        assert_relative_eq!(scene.posts[3].height, 120.0 + rise, epsilon = 1e-9);
        assert_eq!(scene.posts[0].corner, dvec2(5.0, 5.0));
        assert_eq!(scene.posts[2].label.as_deref(), Some("P3: 193 cm"));
    }

    #[test]
    fn test_labels_hidden() {
        let mut planner = Planner::default();
        planner
            .place_beam(dvec2(0.0, 0.0), dvec2(100.0, 100.0), "IPN-80")
            .unwrap();
        let config = StructureConfig {
            show_post_labels: false,
            ..StructureConfig::default()
        };
        let scene = build_scene(planner.layout(), &config);
        assert!(scene.posts.iter().all(|p| p.label.is_none()));
        // Off-diagonal corners have no beam ending on them
        assert_eq!(scene.posts[1].height, 120.0);
    }

    #[test]
    fn test_panel_placement_uses_real_length() {
        let mut planner = Planner::default();
        planner
            .place_beam(dvec2(0.0, 0.0), dvec2(0.0, 300.0), "IPN-80")
            .unwrap();
        let spec = PanelSpec {
            width: 100.0,
            real_height: 200.0,
            tilt_deg: 60.0,
            power_w: 400,
        };
        planner.place_panel(-50.0, 0.0, &spec).unwrap();
        let scene = build_scene(planner.layout(), &StructureConfig::default());
        let placed = &scene.panels[0];
        assert_eq!(placed.length, 200.0);
        assert_relative_eq!(placed.center.y, 50.0, epsilon = 1e-9);
        assert_eq!(placed.center.z, placed.resting_height);
        assert!(placed.resting_height > 120.0);
        assert_eq!(scene.max_height(), scene.beams[0].end.z);
    }

    #[test]
    fn test_config_defaults_from_partial_json() {
        let config: StructureConfig = serde_json::from_str(r#"{"base_height_cm": 90}"#).unwrap();
        assert_eq!(config.base_height_cm, 90.0);
        assert_eq!(config.material, "Acero S275");
        assert_eq!(config.inclination.end_beam, None);
        assert!(config.show_post_labels);
    }

    #[test]
    fn test_config_with_negative_start_beam() {
        let config: StructureConfig =
            serde_json::from_str(r#"{"inclination": {"start_beam": -1, "end_beam": -1}}"#).unwrap();
        assert_eq!(config.inclination, InclinationRequest::default());
    }
}
