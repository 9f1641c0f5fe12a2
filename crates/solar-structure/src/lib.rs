//! Read-only projections of a layout into an inclined 3D structure.
//!
//! [`InclinationProfile`] decides which beams tilt and owns the single height
//! function; [`support`] rests panels on it and [`scene`] assembles
//! everything a renderer needs.

pub mod inclination;
pub mod scene;
pub mod support;

pub use inclination::{BeamTilt, InclinationProfile, InclinationRequest, TiltClass};
pub use scene::{
    build_scene, build_scene_with, BeamPlacement, PanelPlacement, PostPlacement, StructureConfig,
    StructureScene,
};
pub use support::{resolve_supports, PanelSupport};
