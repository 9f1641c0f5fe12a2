pub mod aabb;
pub mod segment;
pub mod transform;

pub use glam::{dvec2, dvec3, DVec2, DVec3};
pub use aabb::Aabb2;
pub use segment::{
    on_segment, orientation, point_to_segment_distance, segment_intersects_aabb, segment_length,
    segments_intersect, Orientation,
};
pub use transform::{GridSnap, ViewTransform};

pub type Point2 = DVec2;
pub type Point3 = DVec3;
pub type Vector2 = DVec2;
pub type Vector3 = DVec3;
