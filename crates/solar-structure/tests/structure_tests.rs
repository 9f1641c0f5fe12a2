use approx::assert_relative_eq;
use solar_core::PlannerConfig;
use solar_layout::{AutoStructureParams, BeamId, PanelSpec, Planner, DEFAULT_BEAM_PROFILE};
use solar_math::{dvec2, Point2};
use solar_structure::{
    build_scene, resolve_supports, InclinationProfile, InclinationRequest, StructureConfig, TiltClass,
};

fn place_beams(planner: &mut Planner, beams: &[(Point2, Point2)]) -> Vec<BeamId> {
    beams
        .iter()
        .map(|&(a, b)| {
            planner
                .place_beam(a, b, DEFAULT_BEAM_PROFILE)
                .unwrap()
                .unwrap()
        })
        .collect()
}

fn resolve(planner: &Planner, request: InclinationRequest) -> InclinationProfile {
    InclinationProfile::resolve(planner.layout(), &request, 120.0, planner.config())
}

/// Frame with one parallel beam and a slanted connector hanging off it:
///
/// ```text
/// b0  (0,0) ------------- (100,0)
/// b1  (0,100) ----------- (100,100)
///                             \  b4
/// b3  left side x = 0          \
/// b2  (0,200) ----------- (60,200)
/// ```
fn connector_layout() -> (Planner, Vec<BeamId>) {
    let mut planner = Planner::default();
    let ids = place_beams(
        &mut planner,
        &[
            (dvec2(0.0, 0.0), dvec2(100.0, 0.0)),
            (dvec2(0.0, 100.0), dvec2(100.0, 100.0)),
            (dvec2(0.0, 200.0), dvec2(60.0, 200.0)),
            (dvec2(0.0, 0.0), dvec2(0.0, 200.0)),
            (dvec2(100.0, 100.0), dvec2(60.0, 200.0)),
        ],
    );
    (planner, ids)
}

#[test]
fn test_full_range_over_auto_structure() {
    let mut planner = Planner::default();
    planner.set_rectangular_terrace(585.0, 388.0).unwrap();
    planner
        .generate_auto_structure(&AutoStructureParams {
            beam_count: 2,
            spacing: 120.0,
            profile: "IPN-80".into(),
        })
        .unwrap();
    assert_eq!(planner.layout().beam_count(), 6);

    let profile = resolve(&planner, InclinationRequest::from_signed(20.0, 0, -1));
    assert!(!profile.invert);
    assert_eq!((profile.min_depth, profile.max_depth), (5.0, 383.0));
    for tilt in &profile.beams {
        assert_eq!(tilt.class, TiltClass::Full);
        assert_relative_eq!(tilt.tilt, 20f64.to_radians());
    }
}

#[test]
fn test_connector_gets_quarter_tilt() {
    let (planner, ids) = connector_layout();
    let profile = resolve(&planner, InclinationRequest::new(20.0, 0, Some(1)));
    assert_eq!((profile.min_depth, profile.max_depth), (0.0, 100.0));

    // b0, b1 and the left side (centre depth 100) are in range
    assert_eq!(profile.class_of(ids[0]), Some(TiltClass::Full));
    assert_eq!(profile.class_of(ids[1]), Some(TiltClass::Full));
    assert_eq!(profile.class_of(ids[3]), Some(TiltClass::Full));
    // b2 lies on the far edge of the frame and joins the left side
    assert_eq!(profile.class_of(ids[2]), Some(TiltClass::Full));
    // b4 joins b1 but is not on any frame edge
    assert_eq!(profile.class_of(ids[4]), Some(TiltClass::Partial));
    assert_relative_eq!(profile.tilt_of(ids[4]), 5f64.to_radians());
}

#[test]
fn test_partial_factor_comes_from_config() {
    let (planner, ids) = connector_layout();
    let config = PlannerConfig {
        partial_tilt_factor: 0.5,
        ..PlannerConfig::default()
    };
    let profile = InclinationProfile::resolve(
        planner.layout(),
        &InclinationRequest::new(20.0, 0, Some(1)),
        120.0,
        &config,
    );
    assert_relative_eq!(profile.tilt_of(ids[4]), 10f64.to_radians());
}

#[test]
fn test_height_is_monotonic_along_depth() {
    let (planner, _) = connector_layout();
    let forward = resolve(&planner, InclinationRequest::new(25.0, 0, Some(2)));
    let inverted = resolve(&planner, InclinationRequest::new(25.0, 2, Some(0)));
    assert!(!forward.invert);
    assert!(inverted.invert);

    for tilt in [5f64, 12.5, 25.0].map(f64::to_radians) {
        let mut prev_forward = f64::NEG_INFINITY;
        let mut prev_inverted = f64::INFINITY;
        for step in -10..=30 {
            let depth = step as f64 * 10.0;
            let h = forward.height_at(depth, tilt);
            let hi = inverted.height_at(depth, tilt);
            assert!(h >= prev_forward);
            assert!(hi <= prev_inverted);
            prev_forward = h;
            prev_inverted = hi;
        }
    }
}

#[test]
fn test_panel_rests_on_highest_support() {
    let mut planner = Planner::default();
    let ids = place_beams(
        &mut planner,
        &[
            (dvec2(0.0, 0.0), dvec2(300.0, 0.0)),
            (dvec2(0.0, 200.0), dvec2(300.0, 200.0)),
            // Unconnected, out of range: flat
            (dvec2(150.0, 400.0), dvec2(150.0, 500.0)),
            // Crosses both panels below, tilted fully (centre depth 100)
            (dvec2(100.0, 0.0), dvec2(100.0, 200.0)),
        ],
    );
    let spec = PanelSpec {
        width: 100.0,
        real_height: 100.0,
        tilt_deg: 0.0,
        power_w: 400,
    };
    // Crosses the flat vertical beam and nothing else
    let flat_only = planner.place_panel(100.0, 420.0, &spec).unwrap();
    // Crosses the tilted vertical beam between depths 50 and 150
    let ramped = planner.place_panel(50.0, 50.0, &spec).unwrap();

    let profile = resolve(&planner, InclinationRequest::new(20.0, 0, Some(1)));
    assert_eq!(profile.class_of(ids[2]), Some(TiltClass::Flat));
    let supports = resolve_supports(planner.layout(), &profile);

    let flat = supports.iter().find(|s| s.panel == flat_only).unwrap();
    assert_eq!(flat.beams, vec![ids[2]]);
    assert_eq!(flat.tilt, 0.0);
    assert_eq!(flat.resting_height, 120.0);

    let on_ramp = supports.iter().find(|s| s.panel == ramped).unwrap();
    assert_eq!(on_ramp.beams, vec![ids[3]]);
    assert!(!on_ramp.used_fallback);
    let tilt = 20f64.to_radians();
    assert_relative_eq!(on_ramp.tilt, tilt);
    // Far edge at depth 150 is the higher one
    assert_relative_eq!(on_ramp.resting_height, 120.0 + 150.0 * tilt.tan(), epsilon = 1e-9);
}

#[test]
fn test_mixed_tilts_take_the_maximum() {
    let (mut planner, ids) = connector_layout();
    let spec = PanelSpec {
        width: 40.0,
        real_height: 40.0,
        tilt_deg: 0.0,
        power_w: 300,
    };
    // Straddles b1 (full) and the connector b4 (partial) near (90, 100)
    let panel = planner.place_panel(75.0, 95.0, &spec).unwrap();
    let profile = resolve(&planner, InclinationRequest::new(20.0, 0, Some(1)));
    let support = resolve_supports(planner.layout(), &profile)
        .into_iter()
        .find(|s| s.panel == panel)
        .unwrap();

    assert!(support.beams.contains(&ids[1]));
    assert!(support.beams.contains(&ids[4]));
    assert_relative_eq!(support.tilt, 20f64.to_radians());
    let expected = [95.0, 135.0]
        .iter()
        .flat_map(|&edge| {
            [ids[1], ids[4]].map(|id| profile.height_at(edge, profile.tilt_of(id)))
        })
        .fold(f64::NEG_INFINITY, f64::max);
    assert_eq!(support.resting_height, expected);
}

#[test]
fn test_scene_beam_heights_match_profile() {
    let (planner, ids) = connector_layout();
    let config = StructureConfig {
        inclination: InclinationRequest::new(20.0, 0, Some(1)),
        ..StructureConfig::default()
    };
    let scene = build_scene(planner.layout(), &config);
    assert_eq!(scene.beams.len(), ids.len());
    for placement in &scene.beams {
        let beam = planner.layout().beam(placement.beam).unwrap();
        let tilt = scene.profile.tilt_of(placement.beam);
        assert_eq!(placement.start.z, scene.profile.height_at(beam.y1, tilt));
        assert_eq!(placement.end.z, scene.profile.height_at(beam.y2, tilt));
    }
    assert_eq!(scene.beams[4].class, TiltClass::Partial);
    assert_eq!(scene.material, "Acero S275");
}
