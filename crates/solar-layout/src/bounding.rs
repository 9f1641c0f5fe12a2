use solar_core::traits::BoundingBox;
use solar_math::Point2;

use crate::layout::Layout;
use crate::terrace::Terrace;

impl BoundingBox for Terrace {
    type Point = Point2;

    fn bounding_box(&self) -> Option<(Point2, Point2)> {
        self.aabb().map(|b| (b.min, b.max))
    }
}

/// Extent of the beam structure.
impl BoundingBox for Layout {
    type Point = Point2;

    fn bounding_box(&self) -> Option<(Point2, Point2)> {
        if self.beam_count() == 0 {
            return None;
        }

        let mut min = Point2::splat(f64::INFINITY);
        let mut max = Point2::splat(f64::NEG_INFINITY);

        for (_, beam) in self.beams() {
            for p in beam.endpoints() {
                min = min.min(p);
                max = max.max(p);
            }
        }

        Some((min, max))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Beam, DEFAULT_BEAM_PROFILE};
    use crate::LayoutParts;
    use solar_math::dvec2;

    #[test]
    fn test_structure_extent() {
        let parts = LayoutParts {
            beams: vec![
                Beam::new(dvec2(5.0, 5.0), dvec2(100.0, 5.0), DEFAULT_BEAM_PROFILE),
                Beam::new(dvec2(20.0, 80.0), dvec2(-3.0, 40.0), DEFAULT_BEAM_PROFILE),
            ],
            ..LayoutParts::default()
        };
        let layout = Layout::restore(parts, Default::default());
        let (min, max) = layout.bounding_box().unwrap();
        assert_eq!(min, dvec2(-3.0, 5.0));
        assert_eq!(max, dvec2(100.0, 80.0));
        assert!(Layout::default().bounding_box().is_none());
    }
}
