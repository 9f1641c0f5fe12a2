use solar_core::traits::{BoundingBox, Validate};
use solar_core::PlanError;
use solar_layout::{
    AutoStructureParams, ElementRef, ObstacleKind, PanelSpec, Planner, Terrace, DEFAULT_BEAM_PROFILE,
};
use solar_math::{dvec2, Aabb2, Point2, ViewTransform};

fn terrace_planner(width: f64, height: f64) -> Planner {
    let mut planner = Planner::default();
    planner.set_rectangular_terrace(width, height).unwrap();
    planner
}

fn panel_114x228() -> PanelSpec {
    PanelSpec {
        width: 114.0,
        real_height: 228.0,
        tilt_deg: 0.0,
        power_w: 550,
    }
}

#[test]
fn test_bounds_nest_for_any_terrace() {
    let outlines: Vec<Vec<Point2>> = vec![
        vec![dvec2(0.0, 0.0), dvec2(585.0, 0.0), dvec2(585.0, 388.0), dvec2(0.0, 388.0)],
        vec![dvec2(-40.0, 10.0), dvec2(300.0, -90.0), dvec2(120.0, 500.0)],
        vec![
            dvec2(0.0, 0.0),
            dvec2(400.0, 0.0),
            dvec2(400.0, 100.0),
            dvec2(150.0, 100.0),
            dvec2(150.0, 300.0),
            dvec2(0.0, 300.0),
        ],
    ];

    for vertices in outlines {
        let mut planner = Planner::default();
        planner.set_terrace(Terrace::new(vertices.clone())).unwrap();
        let layout = planner.layout();
        let terrace_box = Aabb2::from_points(&vertices).unwrap();
        let bounds = layout.bounds().unwrap();
        assert!(bounds.construction.contains_aabb(&terrace_box));
        assert!(bounds.panel.contains_aabb(&bounds.construction));
        layout.validate().unwrap();

        let (min, max) = layout.terrace().bounding_box().unwrap();
        assert_eq!((min, max), (terrace_box.min, terrace_box.max));
    }
}

#[test]
fn test_panel_bounds_scenario() {
    let mut planner = terrace_planner(585.0, 388.0);
    let bounds = *planner.layout().bounds().unwrap();
    assert_eq!(bounds.construction.min, dvec2(-10.0, -10.0));
    assert_eq!(bounds.construction.max, dvec2(595.0, 398.0));
    assert_eq!(bounds.panel.min, dvec2(-50.0, -50.0));
    assert_eq!(bounds.panel.max, dvec2(635.0, 438.0));

    assert!(planner.place_panel(0.0, 0.0, &panel_114x228()).is_ok());
    let err = planner.place_panel(610.0, 0.0, &panel_114x228()).unwrap_err();
    assert!(matches!(err, PlanError::ConstraintViolation(_)));
    assert_eq!(planner.layout().panel_count(), 1);
}

#[test]
fn test_replacing_terrace_recomputes_bounds() {
    let mut planner = terrace_planner(585.0, 388.0);
    planner.set_rectangular_terrace(100.0, 100.0).unwrap();
    assert_eq!(planner.layout().construction_bounds().unwrap().max, dvec2(110.0, 110.0));
    planner.clear_terrace();
    assert!(planner.layout().bounds().is_none());
}

#[test]
fn test_rejected_move_is_bit_identical() {
    let mut planner = terrace_planner(585.0, 388.0);
    planner.place_panel(0.0, 0.0, &panel_114x228()).unwrap();
    planner.place_panel(480.3, 150.7, &panel_114x228()).unwrap();
    planner
        .place_beam(dvec2(0.1, 0.0), dvec2(0.1, 380.0), DEFAULT_BEAM_PROFILE)
        .unwrap();
    planner.place_obstacle(dvec2(200.0, 200.0), dvec2(240.0, 260.0), ObstacleKind::Chimney);
    planner.select_all();
    assert_eq!(planner.selection().len(), 4);

    // The beam and first panel fit, the second panel ends at 594.3 + 45 > 635
    let before = planner.layout().to_parts();
    assert!(planner.move_selected(45.0, 0.0).is_err());
    let after = planner.layout().to_parts();
    assert_eq!(before, after);
    for (a, b) in before.panels.iter().zip(&after.panels) {
        assert_eq!(a.x.to_bits(), b.x.to_bits());
        assert_eq!(a.y.to_bits(), b.y.to_bits());
    }
    for (a, b) in before.beams.iter().zip(&after.beams) {
        assert_eq!(a.x1.to_bits(), b.x1.to_bits());
        assert_eq!(a.x2.to_bits(), b.x2.to_bits());
    }

    // Only the beam leaves its bound (0.1 - 10.2 < -10)
    assert!(planner.move_selected(-10.2, 0.0).is_err());
    assert_eq!(planner.layout().to_parts(), before);

    planner.move_selected(-10.0, 0.0).unwrap();
    assert_ne!(planner.layout().to_parts(), before);
}

#[test]
fn test_auto_structure_infeasible_scenario() {
    let mut planner = terrace_planner(585.0, 388.0);
    let params = AutoStructureParams {
        beam_count: 5,
        spacing: 100.0,
        profile: "IPN-80".into(),
    };
    let err = planner.generate_auto_structure(&params).unwrap_err();
    match err {
        PlanError::InfeasibleStructure {
            required, available, ..
        } => {
            assert_eq!(required, 500.0);
            assert_eq!(available, 378.0);
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(planner.layout().beam_count(), 0);
}

#[test]
fn test_auto_structure_feasible_replaces_beams() {
    let mut planner = terrace_planner(585.0, 388.0);
    let manual = planner
        .place_beam(dvec2(10.0, 10.0), dvec2(200.0, 10.0), DEFAULT_BEAM_PROFILE)
        .unwrap()
        .unwrap();
    planner.select(ElementRef::Beam(manual));

    let params = AutoStructureParams {
        beam_count: 3,
        spacing: 100.0,
        profile: "IPN-80".into(),
    };
    let report = planner.generate_auto_structure(&params).unwrap();
    let layout = planner.layout();
    assert_eq!(layout.beam_count(), 4 + 3);
    assert_eq!(report.parallel.len(), 3);
    assert!(layout.beam(manual).is_none());
    assert!(planner.selection().is_empty());

    let depths: Vec<f64> = report
        .parallel
        .iter()
        .map(|&id| layout.beam(id).unwrap().y1)
        .collect();
    assert_eq!(depths, vec![105.0, 205.0, 305.0]);

    let top = layout.beam(report.perimeter[0]).unwrap();
    assert_eq!((top.start(), top.end()), (dvec2(5.0, 5.0), dvec2(580.0, 5.0)));
    layout.validate().unwrap();

    let (min, max) = layout.bounding_box().unwrap();
    assert_eq!(min, dvec2(5.0, 5.0));
    assert_eq!(max, dvec2(580.0, 383.0));
}

#[test]
fn test_auto_structure_count_never_exceeds_request() {
    for beam_count in 0..6 {
        for spacing in [30.0, 60.0, 75.5, 120.0] {
            let mut planner = terrace_planner(585.0, 388.0);
            let params = AutoStructureParams {
                beam_count,
                spacing,
                profile: "IPN-80".into(),
            };
            let feasible = (beam_count as f64) * spacing < 378.0;
            match planner.generate_auto_structure(&params) {
                Ok(report) => {
                    assert!(feasible);
                    assert!(report.parallel.len() <= beam_count);
                    assert_eq!(planner.layout().beam_count(), 4 + report.parallel.len());
                }
                Err(_) => {
                    assert!(!feasible);
                    assert_eq!(planner.layout().beam_count(), 0);
                }
            }
        }
    }
}

#[test]
fn test_select_move_delete_workflow() {
    let mut planner = terrace_planner(585.0, 388.0);
    let view = ViewTransform::new(2.0, 1.0, dvec2(100.0, 100.0));
    let panel = planner.place_default_panel(100.0, 100.0).unwrap();
    let beam = planner
        .place_beam(dvec2(0.0, 300.0), dvec2(500.0, 300.0), DEFAULT_BEAM_PROFILE)
        .unwrap()
        .unwrap();

    // Display point for plan (150, 120) with scale 2 and pan 100
    let click = view.to_world(dvec2(400.0, 340.0));
    assert_eq!(planner.click_select(click, false, &view), Some(ElementRef::Panel(panel)));
    // 2 display units off the beam is 1 cm: within tolerance
    let near_beam = view.to_world(view.to_display(dvec2(250.0, 301.0)));
    planner.click_select(near_beam, true, &view);
    assert_eq!(planner.selection().len(), 2);

    planner.move_selected(10.0, -10.0).unwrap();
    assert_eq!(planner.layout().panel(panel).unwrap().x, 110.0);
    assert_eq!(planner.layout().beam(beam).unwrap().y1, 290.0);

    assert_eq!(planner.delete_selected(), 2);
    assert!(planner.layout().is_empty());
}
