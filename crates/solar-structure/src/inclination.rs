//! Tilt propagation over the beam structure.
//!
//! A request names a range of beams by creation index. Beams inside the
//! resulting depth range tilt at the requested angle; beams joined to them
//! tilt fully when they are part of the frame and at a damped angle
//! otherwise. [`InclinationProfile::height_at`] is the one height function
//! shared by beams, posts and panels.

use serde::{Deserialize, Serialize};
use solar_core::traits::BoundingBox;
use solar_core::PlannerConfig;
use solar_layout::{Beam, BeamId, Layout};
use solar_math::{Aabb2, Point2};
use tracing::debug;

/// Which beams to tilt and by how much.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InclinationRequest {
    pub angle_deg: f64,
    /// Creation index of the first beam of the ramp; negative on the wire reads as `0`
    #[serde(with = "start_index")]
    pub start_beam: usize,
    /// Creation index of the last beam; `None` (`-1` on the wire) runs to the last beam
    #[serde(with = "end_index")]
    pub end_beam: Option<usize>,
}

impl InclinationRequest {
    pub const DEFAULT_ANGLE_DEG: f64 = 20.0;

    pub fn new(angle_deg: f64, start_beam: usize, end_beam: Option<usize>) -> Self {
        Self {
            angle_deg,
            start_beam,
            end_beam,
        }
    }

    /// Build from signed indices; a negative end means "to the last beam".
    pub fn from_signed(angle_deg: f64, start_beam: i64, end_beam: i64) -> Self {
        Self::new(
            angle_deg,
            usize::try_from(start_beam).unwrap_or(0),
            usize::try_from(end_beam).ok(),
        )
    }
}

impl Default for InclinationRequest {
    fn default() -> Self {
        Self::new(Self::DEFAULT_ANGLE_DEG, 0, None)
    }
}

/// `usize` stored as a signed index; negative values read as `0`.
pub(crate) mod start_index {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &usize, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(i64::try_from(*value).unwrap_or(i64::MAX))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<usize, D::Error> {
        let raw = i64::deserialize(deserializer)?;
        Ok(usize::try_from(raw).unwrap_or(0))
    }
}

/// `Option<usize>` stored as a signed index with `-1` for `None`.
pub(crate) mod end_index {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Option<usize>, serializer: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(i) => serializer.serialize_i64(*i as i64),
            None => serializer.serialize_i64(-1),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<usize>, D::Error> {
        let raw = Option::<i64>::deserialize(deserializer)?;
        Ok(raw.and_then(|i| usize::try_from(i).ok()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TiltClass {
    /// Requested angle
    Full,
    /// Damped angle of a connector beam
    Partial,
    #[serde(rename = "none")]
    Flat,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BeamTilt {
    pub beam: BeamId,
    /// Radians
    pub tilt: f64,
    pub class: TiltClass,
}

/// Resolved tilt per beam plus the depth ramp they share.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InclinationProfile {
    /// One entry per beam, in creation order
    pub beams: Vec<BeamTilt>,
    pub min_depth: f64,
    pub max_depth: f64,
    /// Ramp rises towards `min_depth` instead of `max_depth`
    pub invert: bool,
    pub base_height: f64,
}

impl InclinationProfile {
    /// Resolve `request` against the layout's beams.
    pub fn resolve(
        layout: &Layout,
        request: &InclinationRequest,
        base_height: f64,
        config: &PlannerConfig,
    ) -> Self {
        let beams: Vec<(BeamId, &Beam)> = layout.beams().collect();
        let (Some(last), Some(extent)) = (beams.len().checked_sub(1), layout.bounding_box()) else {
            return Self::flat(base_height);
        };
        let extent = Aabb2::new(extent.0, extent.1);
        let tol = config.tolerance;

        // Direction follows the request even when both indices clamp to the same beam
        let invert = request.end_beam.is_some_and(|e| request.start_beam > e);
        let start = request.start_beam.min(last);
        let end = request.end_beam.map(|e| e.min(last));
        let (min_depth, max_depth) = match end {
            None => (extent.min.y, extent.max.y),
            Some(end) => depth_range([beams[start].1, beams[end].1]),
        };

        let in_range: Vec<bool> = beams
            .iter()
            .map(|(_, b)| tol.depth_within(b.center_depth(), min_depth, max_depth))
            .collect();

        let angle = request.angle_deg.to_radians();
        let partial = angle * config.partial_tilt_factor;
        let resolved: Vec<BeamTilt> = beams
            .iter()
            .enumerate()
            .map(|(i, &(id, beam))| {
                let (tilt, class) = if in_range[i] {
                    (angle, TiltClass::Full)
                } else if beams
                    .iter()
                    .zip(&in_range)
                    .any(|((_, other), &inside)| inside && shares_endpoint(beam, other, tol.joint))
                {
                    if is_frame_beam(beam, &extent, tol.joint) {
                        (angle, TiltClass::Full)
                    } else {
                        (partial, TiltClass::Partial)
                    }
                } else {
                    (0.0, TiltClass::Flat)
                };
                BeamTilt {
                    beam: id,
                    tilt,
                    class,
                }
            })
            .collect();

        debug!(
            beams = resolved.len(),
            full = resolved.iter().filter(|b| b.class == TiltClass::Full).count(),
            partial = resolved.iter().filter(|b| b.class == TiltClass::Partial).count(),
            min_depth,
            max_depth,
            invert,
            "inclination resolved"
        );

        Self {
            beams: resolved,
            min_depth,
            max_depth,
            invert,
            base_height,
        }
    }

    /// Profile with no beams: everything sits at `base_height`.
    pub fn flat(base_height: f64) -> Self {
        Self {
            beams: Vec::new(),
            min_depth: 0.0,
            max_depth: 0.0,
            invert: false,
            base_height,
        }
    }

    pub fn span(&self) -> f64 {
        self.max_depth - self.min_depth
    }

    /// Structure height at `depth` for a member tilted by `tilt` radians.
    pub fn height_at(&self, depth: f64, tilt: f64) -> f64 {
        let span = self.span();
        if span <= 0.0 || tilt == 0.0 {
            return self.base_height;
        }
        let mut t = ((depth - self.min_depth) / span).clamp(0.0, 1.0);
        if self.invert {
            t = 1.0 - t;
        }
        self.base_height + span * tilt.tan() * t
    }

    pub fn get(&self, id: BeamId) -> Option<&BeamTilt> {
        self.beams.iter().find(|b| b.beam == id)
    }

    /// Tilt of a beam in radians, zero for unknown beams.
    pub fn tilt_of(&self, id: BeamId) -> f64 {
        self.get(id).map_or(0.0, |b| b.tilt)
    }

    pub fn class_of(&self, id: BeamId) -> Option<TiltClass> {
        self.get(id).map(|b| b.class)
    }
}

fn depth_range(beams: [&Beam; 2]) -> (f64, f64) {
    beams
        .iter()
        .flat_map(|b| [b.y1, b.y2])
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), y| (lo.min(y), hi.max(y)))
}

fn near(a: Point2, b: Point2, joint: f64) -> bool {
    a.distance(b) <= joint
}

fn shares_endpoint(a: &Beam, b: &Beam, joint: f64) -> bool {
    a.endpoints()
        .iter()
        .any(|&p| b.endpoints().iter().any(|&q| near(p, q, joint)))
}

/// Both endpoints lie on the same side of the structure's bounding rectangle.
fn is_frame_beam(beam: &Beam, extent: &Aabb2, joint: f64) -> bool {
    let on = |a: f64, b: f64, line: f64| (a - line).abs() <= joint && (b - line).abs() <= joint;
    on(beam.x1, beam.x2, extent.min.x)
        || on(beam.x1, beam.x2, extent.max.x)
        || on(beam.y1, beam.y2, extent.min.y)
        || on(beam.y1, beam.y2, extent.max.y)
}
