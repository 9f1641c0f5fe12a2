//! Layout export and import.
//!
//! Records mirror the store one-to-one but every field is optional on the
//! way in: missing collections are empty, missing panel or text properties
//! fall back to the record's defaults, and bounds that are missing or do not
//! nest around the terrace are recomputed.

use serde::{Deserialize, Serialize};
use solar_core::error::Result;
use solar_core::BoundsMargins;
use solar_layout::{
    projected_height, Beam, Layout, LayoutParts, Obstacle, ObstacleKind, Panel, PanelDefaults,
    PlanBounds, Terrace, TextAnnotation, TextDefaults, DEFAULT_BEAM_PROFILE,
};
use solar_math::{Aabb2, Point2};
use solar_structure::{build_scene, StructureConfig, StructureScene};
use tracing::debug;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PointRecord {
    pub x: f64,
    pub y: f64,
}

impl From<Point2> for PointRecord {
    fn from(p: Point2) -> Self {
        Self { x: p.x, y: p.y }
    }
}

impl From<PointRecord> for Point2 {
    fn from(p: PointRecord) -> Self {
        Point2::new(p.x, p.y)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoundsRecord {
    pub min: PointRecord,
    pub max: PointRecord,
}

impl From<Aabb2> for BoundsRecord {
    fn from(b: Aabb2) -> Self {
        Self {
            min: b.min.into(),
            max: b.max.into(),
        }
    }
}

impl From<BoundsRecord> for Aabb2 {
    fn from(b: BoundsRecord) -> Self {
        Aabb2::from_corners(b.min.into(), b.max.into())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObstacleRecord {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub kind: ObstacleKind,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BeamRecord {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,
    pub auto_generated: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelRecord {
    pub x: f64,
    pub y: f64,
    pub width: Option<f64>,
    pub projected_height: Option<f64>,
    pub real_height: Option<f64>,
    pub tilt_deg: Option<f64>,
    pub power_w: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextRecord {
    pub x: f64,
    pub y: f64,
    pub content: String,
    pub font_size: Option<f64>,
}

/// Complete exported layout.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutRecord {
    pub terrace: Vec<PointRecord>,
    pub construction_bounds: Option<BoundsRecord>,
    pub panel_bounds: Option<BoundsRecord>,
    pub obstacles: Vec<ObstacleRecord>,
    pub beams: Vec<BeamRecord>,
    pub panels: Vec<PanelRecord>,
    pub texts: Vec<TextRecord>,
    pub panel_defaults: PanelDefaults,
    pub text_defaults: TextDefaults,
}

impl From<&Obstacle> for ObstacleRecord {
    fn from(o: &Obstacle) -> Self {
        Self {
            x: o.x,
            y: o.y,
            width: o.width,
            height: o.height,
            kind: o.kind,
        }
    }
}

impl From<ObstacleRecord> for Obstacle {
    fn from(o: ObstacleRecord) -> Self {
        Self {
            x: o.x,
            y: o.y,
            width: o.width,
            height: o.height,
            kind: o.kind,
        }
    }
}

impl From<&Beam> for BeamRecord {
    fn from(b: &Beam) -> Self {
        Self {
            x1: b.x1,
            y1: b.y1,
            x2: b.x2,
            y2: b.y2,
            profile: Some(b.profile.clone()),
            auto_generated: b.auto_generated,
        }
    }
}

impl From<BeamRecord> for Beam {
    fn from(b: BeamRecord) -> Self {
        Self {
            x1: b.x1,
            y1: b.y1,
            x2: b.x2,
            y2: b.y2,
            profile: b.profile.unwrap_or_else(|| DEFAULT_BEAM_PROFILE.to_string()),
            auto_generated: b.auto_generated,
        }
    }
}

impl From<&Panel> for PanelRecord {
    fn from(p: &Panel) -> Self {
        Self {
            x: p.x,
            y: p.y,
            width: Some(p.width),
            projected_height: Some(p.projected_height),
            real_height: Some(p.real_height),
            tilt_deg: Some(p.tilt_deg),
            power_w: Some(p.power_w),
        }
    }
}

impl PanelRecord {
    /// Fill missing properties from `defaults`. A missing real height is
    /// recovered from the projected height when the tilt allows it.
    pub fn into_panel(self, defaults: &PanelDefaults) -> Panel {
        let tilt_deg = self.tilt_deg.unwrap_or(defaults.tilt_deg);
        let cos = tilt_deg.to_radians().cos();
        let real_height = match (self.real_height, self.projected_height) {
            (Some(real), _) => real,
            (None, Some(projected)) if cos > f64::EPSILON => projected / cos,
            (None, Some(projected)) => projected,
            (None, None) => defaults.real_height,
        };
        Panel {
            x: self.x,
            y: self.y,
            width: self.width.unwrap_or(defaults.width),
            projected_height: self
                .projected_height
                .unwrap_or_else(|| projected_height(real_height, tilt_deg)),
            real_height,
            tilt_deg,
            power_w: self.power_w.unwrap_or(defaults.power_w),
        }
    }
}

impl From<&TextAnnotation> for TextRecord {
    fn from(t: &TextAnnotation) -> Self {
        Self {
            x: t.x,
            y: t.y,
            content: t.content.clone(),
            font_size: Some(t.font_size),
        }
    }
}

impl TextRecord {
    pub fn into_text(self, defaults: &TextDefaults) -> TextAnnotation {
        TextAnnotation {
            x: self.x,
            y: self.y,
            content: self.content,
            font_size: self.font_size.unwrap_or(defaults.font_size),
        }
    }
}

/// Snapshot the whole store, collections in creation order.
pub fn export_layout(layout: &Layout) -> LayoutRecord {
    LayoutRecord {
        terrace: layout.terrace().vertices.iter().map(|&p| p.into()).collect(),
        construction_bounds: layout.construction_bounds().map(|&b| b.into()),
        panel_bounds: layout.panel_bounds().map(|&b| b.into()),
        obstacles: layout.obstacles().map(|(_, o)| o.into()).collect(),
        beams: layout.beams().map(|(_, b)| b.into()).collect(),
        panels: layout.panels().map(|(_, p)| p.into()).collect(),
        texts: layout.texts().map(|(_, t)| t.into()).collect(),
        panel_defaults: layout.panel_defaults.clone(),
        text_defaults: layout.text_defaults.clone(),
    }
}

/// Rebuild a store from a record.
pub fn import_layout(record: LayoutRecord, margins: &BoundsMargins) -> Layout {
    let bounds = match (record.construction_bounds, record.panel_bounds) {
        (Some(construction), Some(panel)) => Some(PlanBounds {
            construction: construction.into(),
            panel: panel.into(),
        }),
        _ => None,
    };
    let panel_defaults = record.panel_defaults;
    let text_defaults = record.text_defaults;
    let parts = LayoutParts {
        terrace: Terrace::new(record.terrace.into_iter().map(Point2::from).collect()),
        bounds,
        obstacles: record.obstacles.into_iter().map(Obstacle::from).collect(),
        beams: record.beams.into_iter().map(Beam::from).collect(),
        panels: record
            .panels
            .into_iter()
            .map(|p| p.into_panel(&panel_defaults))
            .collect(),
        texts: record
            .texts
            .into_iter()
            .map(|t| t.into_text(&text_defaults))
            .collect(),
        panel_defaults,
        text_defaults,
    };
    let layout = Layout::restore(parts, *margins);
    debug!(
        beams = layout.beam_count(),
        panels = layout.panel_count(),
        obstacles = layout.obstacle_count(),
        texts = layout.text_count(),
        "layout imported"
    );
    layout
}

pub fn to_json(record: &LayoutRecord) -> Result<String> {
    Ok(serde_json::to_string_pretty(record)?)
}

pub fn from_json(json: &str) -> Result<LayoutRecord> {
    Ok(serde_json::from_str(json)?)
}

/// Resolve the 3D scene for an exported layout.
pub fn scene_from_record(
    record: LayoutRecord,
    config: &StructureConfig,
    margins: &BoundsMargins,
) -> StructureScene {
    build_scene(&import_layout(record, margins), config)
}
