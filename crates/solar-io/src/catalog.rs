//! Panel models attached to a structure.
//!
//! The catalog lists the panel types a project uses, with the physical
//! figures placed panels do not carry (thickness, weight, quantity).

use serde::{Deserialize, Serialize};
use solar_layout::{Panel, PanelDefaults, PanelSpec};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelModelRecord {
    pub model_name: String,
    pub width_cm: f64,
    /// Length along the slope
    pub height_cm: f64,
    /// Thickness
    pub depth_cm: f64,
    pub weight_kg: f64,
    pub power_w: u32,
    pub inclination_deg: f64,
    pub quantity: u32,
}

impl Default for PanelModelRecord {
    fn default() -> Self {
        Self::from_defaults(&PanelDefaults::default())
    }
}

impl PanelModelRecord {
    pub const DEFAULT_DEPTH_CM: f64 = 3.5;

    pub fn from_defaults(defaults: &PanelDefaults) -> Self {
        Self {
            model_name: defaults.model_name.clone(),
            width_cm: defaults.width,
            height_cm: defaults.real_height,
            depth_cm: Self::DEFAULT_DEPTH_CM,
            weight_kg: defaults.weight_kg,
            power_w: defaults.power_w,
            inclination_deg: defaults.tilt_deg,
            quantity: 1,
        }
    }

    /// Placement defaults for new panels of this model.
    pub fn defaults(&self) -> PanelDefaults {
        PanelDefaults {
            model_name: self.model_name.clone(),
            width: self.width_cm,
            real_height: self.height_cm,
            tilt_deg: self.inclination_deg,
            power_w: self.power_w,
            weight_kg: self.weight_kg,
        }
    }

    pub fn spec(&self) -> PanelSpec {
        self.defaults().spec()
    }

    /// Same footprint and rating as `panel`. Tilt is not compared since a
    /// placed panel may be re-tilted.
    pub fn matches(&self, panel: &Panel) -> bool {
        self.width_cm == panel.width && self.height_cm == panel.real_height && self.power_w == panel.power_w
    }

    pub fn total_power_w(&self) -> u64 {
        u64::from(self.power_w) * u64::from(self.quantity)
    }

    pub fn total_weight_kg(&self) -> f64 {
        self.weight_kg * f64::from(self.quantity)
    }
}

/// Weight of a placed panel: the first matching model, else `fallback_kg`.
pub fn panel_weight(catalog: &[PanelModelRecord], panel: &Panel, fallback_kg: f64) -> f64 {
    catalog
        .iter()
        .find(|m| m.matches(panel))
        .map_or(fallback_kg, |m| m.weight_kg)
}
