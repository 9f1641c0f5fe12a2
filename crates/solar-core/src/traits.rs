use crate::error::Result;

/// Validate the invariants of a plan entity.
pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// Compute an axis-aligned bounding box, if the entity has any extent.
pub trait BoundingBox {
    type Point;
    fn bounding_box(&self) -> Option<(Self::Point, Self::Point)>;
}
