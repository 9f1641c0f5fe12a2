use serde::{Deserialize, Serialize};
use solar_layout::Layout;

use crate::catalog::{panel_weight, PanelModelRecord};

/// Aggregate figures for a layout.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutSummary {
    pub panel_count: usize,
    pub total_power_w: u64,
    /// Surface of the panels themselves, not their footprint
    pub panel_area_m2: f64,
    pub total_weight_kg: f64,
    pub beam_count: usize,
    pub total_beam_length_cm: f64,
    pub obstacle_count: usize,
}

impl LayoutSummary {
    /// Panel weights come from the layout's placement defaults.
    pub fn of(layout: &Layout) -> Self {
        Self::with_catalog(layout, &[])
    }

    /// Panel weights come from the first matching catalog model.
    pub fn with_catalog(layout: &Layout, catalog: &[PanelModelRecord]) -> Self {
        let fallback_kg = layout.panel_defaults.weight_kg;
        Self {
            panel_count: layout.panel_count(),
            total_power_w: layout.panels().map(|(_, p)| u64::from(p.power_w)).sum(),
            panel_area_m2: layout.panels().map(|(_, p)| p.area_m2()).sum(),
            total_weight_kg: layout
                .panels()
                .map(|(_, p)| panel_weight(catalog, p, fallback_kg))
                .sum(),
            beam_count: layout.beam_count(),
            total_beam_length_cm: layout.beams().map(|(_, b)| b.length()).sum(),
            obstacle_count: layout.obstacle_count(),
        }
    }

    /// Installed peak power in kW.
    pub fn total_power_kw(&self) -> f64 {
        self.total_power_w as f64 / 1000.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use solar_layout::{ObstacleKind, PanelSpec, Planner, DEFAULT_BEAM_PROFILE};
    use solar_math::dvec2;

    #[test]
    fn test_summary_totals() {
        let mut planner = Planner::default();
        let spec = PanelSpec {
            width: 100.0,
            real_height: 200.0,
            tilt_deg: 30.0,
            power_w: 450,
        };
        planner.place_panel(0.0, 0.0, &spec).unwrap();
        planner.place_panel(200.0, 0.0, &spec).unwrap();
        planner
            .place_beam(dvec2(0.0, 0.0), dvec2(300.0, 400.0), DEFAULT_BEAM_PROFILE)
            .unwrap();
        planner.place_obstacle(dvec2(0.0, 0.0), dvec2(20.0, 20.0), ObstacleKind::Vent);

        let summary = LayoutSummary::of(planner.layout());
        assert_eq!(summary.panel_count, 2);
        assert_eq!(summary.total_power_w, 900);
        assert_relative_eq!(summary.total_power_kw(), 0.9);
        assert_relative_eq!(summary.panel_area_m2, 4.0);
        assert_eq!(summary.beam_count, 1);
        assert_relative_eq!(summary.total_beam_length_cm, 500.0);
        assert_eq!(summary.obstacle_count, 1);
        assert_relative_eq!(summary.total_weight_kg, 42.0);

        let model = PanelModelRecord {
            width_cm: 100.0,
            height_cm: 200.0,
            power_w: 450,
            weight_kg: 27.5,
            ..PanelModelRecord::default()
        };
        let weighed = LayoutSummary::with_catalog(planner.layout(), &[model]);
        assert_relative_eq!(weighed.total_weight_kg, 55.0);
        assert_eq!(weighed.panel_count, summary.panel_count);
    }

    #[test]
    fn test_empty_summary() {
        assert_eq!(LayoutSummary::of(&Layout::default()), LayoutSummary::default());
    }
}
