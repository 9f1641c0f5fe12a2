/// Tolerances used when matching plan geometry.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Tolerance {
    /// Numeric epsilon for geometric predicates (cm)
    pub linear: f64,
    /// Slack when testing whether a beam's centerline lies in an inclination range (cm)
    pub depth: f64,
    /// Distance under which two beam endpoints count as the same joint (cm)
    pub joint: f64,
}

impl Tolerance {
    pub const DEFAULT_LINEAR: f64 = 1e-9;
    pub const DEFAULT_DEPTH: f64 = 0.5;
    pub const DEFAULT_JOINT: f64 = 1.0;

    pub fn new(linear: f64, depth: f64, joint: f64) -> Self {
        Self {
            linear,
            depth,
            joint,
        }
    }

    pub fn default_precision() -> Self {
        Self {
            linear: Self::DEFAULT_LINEAR,
            depth: Self::DEFAULT_DEPTH,
            joint: Self::DEFAULT_JOINT,
        }
    }

    /// Check if two values are equal within linear tolerance
    pub fn linear_eq(self, a: f64, b: f64) -> bool {
        (a - b).abs() < self.linear
    }

    /// Check if a value is zero within linear tolerance
    pub fn is_zero(self, v: f64) -> bool {
        v.abs() < self.linear
    }

    /// Check if `v` lies in `[min, max]` widened by the depth tolerance
    pub fn depth_within(self, v: f64, min: f64, max: f64) -> bool {
        v >= min - self.depth && v <= max + self.depth
    }

    /// Check if two coordinates belong to the same joint
    pub fn joint_eq(self, a: f64, b: f64) -> bool {
        (a - b).abs() <= self.joint
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::default_precision()
    }
}
