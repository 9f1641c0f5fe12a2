use serde::{Deserialize, Serialize};
use slotmap::new_key_type;
use solar_math::{segment_length, Aabb2, Point2, Vector2};

// --- SlotMap key types ---

new_key_type! {
    pub struct ObstacleId;
    pub struct BeamId;
    pub struct PanelId;
    pub struct TextId;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementKind {
    Obstacle,
    Beam,
    Panel,
    Text,
}

impl std::fmt::Display for ElementKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ElementKind::Obstacle => "obstacle",
            ElementKind::Beam => "beam",
            ElementKind::Panel => "panel",
            ElementKind::Text => "text",
        };
        f.write_str(name)
    }
}

/// Non-owning reference to one element of the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementRef {
    Obstacle(ObstacleId),
    Beam(BeamId),
    Panel(PanelId),
    Text(TextId),
}

impl ElementRef {
    pub fn kind(self) -> ElementKind {
        match self {
            ElementRef::Obstacle(_) => ElementKind::Obstacle,
            ElementRef::Beam(_) => ElementKind::Beam,
            ElementRef::Panel(_) => ElementKind::Panel,
            ElementRef::Text(_) => ElementKind::Text,
        }
    }
}

// --- Entity structs ---

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObstacleKind {
    Column,
    Chimney,
    Skylight,
    Vent,
    /// Also the kind of any unrecognised name on import
    #[default]
    #[serde(other)]
    Generic,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub kind: ObstacleKind,
}

impl Obstacle {
    pub fn footprint(&self) -> Aabb2 {
        Aabb2::from_rect(self.x, self.y, self.width, self.height)
    }

    pub fn translate(&mut self, delta: Vector2) {
        self.x += delta.x;
        self.y += delta.y;
    }
}

pub const DEFAULT_BEAM_PROFILE: &str = "IPN-80";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Beam {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub profile: String,
    pub auto_generated: bool,
}

impl Beam {
    pub fn new(start: Point2, end: Point2, profile: impl Into<String>) -> Self {
        Self {
            x1: start.x,
            y1: start.y,
            x2: end.x,
            y2: end.y,
            profile: profile.into(),
            auto_generated: false,
        }
    }

    pub fn auto(start: Point2, end: Point2, profile: impl Into<String>) -> Self {
        Self {
            auto_generated: true,
            ..Self::new(start, end, profile)
        }
    }

    pub fn start(&self) -> Point2 {
        Point2::new(self.x1, self.y1)
    }

    pub fn end(&self) -> Point2 {
        Point2::new(self.x2, self.y2)
    }

    pub fn endpoints(&self) -> [Point2; 2] {
        [self.start(), self.end()]
    }

    pub fn length(&self) -> f64 {
        segment_length(self.start(), self.end())
    }

    /// Depth (y) of the beam's centerline midpoint.
    pub fn center_depth(&self) -> f64 {
        (self.y1 + self.y2) * 0.5
    }

    pub fn translate(&mut self, delta: Vector2) {
        self.x1 += delta.x;
        self.y1 += delta.y;
        self.x2 += delta.x;
        self.y2 += delta.y;
    }

    pub fn translated(&self, delta: Vector2) -> Self {
        let mut beam = self.clone();
        beam.translate(delta);
        beam
    }
}

/// Physical parameters of a panel, as entered by the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelSpec {
    pub width: f64,
    pub real_height: f64,
    pub tilt_deg: f64,
    pub power_w: u32,
}

impl Default for PanelSpec {
    fn default() -> Self {
        PanelDefaults::default().spec()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Panel {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    /// Footprint depth on the plan: `real_height * cos(tilt)`
    pub projected_height: f64,
    pub real_height: f64,
    pub tilt_deg: f64,
    pub power_w: u32,
}

impl Panel {
    pub fn new(x: f64, y: f64, spec: &PanelSpec) -> Self {
        Self {
            x,
            y,
            width: spec.width,
            projected_height: projected_height(spec.real_height, spec.tilt_deg),
            real_height: spec.real_height,
            tilt_deg: spec.tilt_deg,
            power_w: spec.power_w,
        }
    }

    pub fn spec(&self) -> PanelSpec {
        PanelSpec {
            width: self.width,
            real_height: self.real_height,
            tilt_deg: self.tilt_deg,
            power_w: self.power_w,
        }
    }

    pub fn footprint(&self) -> Aabb2 {
        Aabb2::from_rect(self.x, self.y, self.width, self.projected_height)
    }

    /// Surface area of the panel itself, in m².
    pub fn area_m2(&self) -> f64 {
        self.width * self.real_height / 10_000.0
    }

    pub fn translate(&mut self, delta: Vector2) {
        self.x += delta.x;
        self.y += delta.y;
    }
}

pub fn projected_height(real_height: f64, tilt_deg: f64) -> f64 {
    real_height * tilt_deg.to_radians().cos()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextAnnotation {
    /// Baseline origin
    pub x: f64,
    pub y: f64,
    pub content: String,
    pub font_size: f64,
}

impl TextAnnotation {
    /// Average glyph advance relative to the font size.
    pub const GLYPH_WIDTH_FACTOR: f64 = 0.6;

    /// Approximate box covered by the rendered text, above the baseline.
    pub fn footprint(&self) -> Aabb2 {
        let width = self.content.chars().count() as f64 * self.font_size * Self::GLYPH_WIDTH_FACTOR;
        Aabb2::from_rect(self.x, self.y - self.font_size, width, self.font_size)
    }

    pub fn translate(&mut self, delta: Vector2) {
        self.x += delta.x;
        self.y += delta.y;
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelDefaults {
    pub model_name: String,
    pub width: f64,
    pub real_height: f64,
    pub tilt_deg: f64,
    pub power_w: u32,
    pub weight_kg: f64,
}

impl PanelDefaults {
    pub fn spec(&self) -> PanelSpec {
        PanelSpec {
            width: self.width,
            real_height: self.real_height,
            tilt_deg: self.tilt_deg,
            power_w: self.power_w,
        }
    }
}

impl Default for PanelDefaults {
    fn default() -> Self {
        Self {
            model_name: "Panel genérico 400W".into(),
            width: 99.2,
            real_height: 165.6,
            tilt_deg: 20.0,
            power_w: 400,
            weight_kg: 21.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextDefaults {
    pub font_size: f64,
}

impl Default for TextDefaults {
    fn default() -> Self {
        Self { font_size: 16.0 }
    }
}
