//! Planner configuration.
//!
//! Every operation that depends on a margin, threshold or tolerance reads it
//! from a [`PlannerConfig`] handed to the planner at construction time.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::tolerance::Tolerance;

/// Safety margins around the terrace bounding box (cm).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoundsMargins {
    /// Expansion of the terrace bounding box that beams must stay inside
    pub construction: f64,
    /// Further expansion of the construction bounds that panels must stay inside
    pub panel: f64,
}

impl BoundsMargins {
    pub const DEFAULT_CONSTRUCTION: f64 = 10.0;
    pub const DEFAULT_PANEL: f64 = 40.0;
}

impl Default for BoundsMargins {
    fn default() -> Self {
        Self {
            construction: Self::DEFAULT_CONSTRUCTION,
            panel: Self::DEFAULT_PANEL,
        }
    }
}

/// Width and depth of a rectangular terrace (cm).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TerraceSize {
    pub width: f64,
    pub height: f64,
}

impl Default for TerraceSize {
    fn default() -> Self {
        Self {
            width: 600.0,
            height: 400.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    pub margins: BoundsMargins,
    /// Beams shorter than this are discarded right after drawing
    pub min_beam_length: f64,
    /// Obstacles with a side shorter than this are discarded
    pub min_obstacle_size: f64,
    /// Beam pick distance in display units
    pub hit_tolerance_px: f64,
    /// Inset of the generated structure from the terrace bounding box
    pub structure_inset: f64,
    /// Smallest side of a generated structure
    pub structure_min_side: f64,
    /// Terrace synthesized when a structure is generated without one
    pub default_terrace: TerraceSize,
    /// Fraction of the requested angle given to connector beams
    pub partial_tilt_factor: f64,
    pub tolerance: Tolerance,
}

impl PlannerConfig {
    pub const DEFAULT_MIN_BEAM_LENGTH: f64 = 5.0;
    pub const DEFAULT_MIN_OBSTACLE_SIZE: f64 = 5.0;
    pub const DEFAULT_HIT_TOLERANCE_PX: f64 = 5.0;
    pub const DEFAULT_STRUCTURE_INSET: f64 = 5.0;
    pub const DEFAULT_STRUCTURE_MIN_SIDE: f64 = 50.0;
    pub const DEFAULT_PARTIAL_TILT_FACTOR: f64 = 0.25;

    /// Parse a configuration, filling any missing field with its default.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            margins: BoundsMargins::default(),
            min_beam_length: Self::DEFAULT_MIN_BEAM_LENGTH,
            min_obstacle_size: Self::DEFAULT_MIN_OBSTACLE_SIZE,
            hit_tolerance_px: Self::DEFAULT_HIT_TOLERANCE_PX,
            structure_inset: Self::DEFAULT_STRUCTURE_INSET,
            structure_min_side: Self::DEFAULT_STRUCTURE_MIN_SIDE,
            default_terrace: TerraceSize::default(),
            partial_tilt_factor: Self::DEFAULT_PARTIAL_TILT_FACTOR,
            tolerance: Tolerance::default(),
        }
    }
}
