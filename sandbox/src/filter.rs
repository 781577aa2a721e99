//! Drops noise-sized and degenerate rects before they become physics shapes.

use whiteboard_shared::OrientedRect;

/// Default minimum area in px².
pub const DEFAULT_MIN_AREA: f32 = 100.0;

#[derive(Debug, Clone, Copy)]
pub struct GeometryFilter {
    min_area: f32,
}

impl Default for GeometryFilter {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_AREA)
    }
}

impl GeometryFilter {
    pub fn new(min_area: f32) -> Self {
        Self { min_area }
    }

    pub fn min_area(&self) -> f32 {
        self.min_area
    }

    /// Whether a single rect qualifies as an obstacle.
    pub fn accepts(&self, rect: &OrientedRect) -> bool {
        rect.is_finite() && rect.area() >= self.min_area && rect.has_polygon_corners()
    }

    /// Qualifying rects, in the order the vision pipeline produced them.
    pub fn apply<'a>(&self, rects: &'a [OrientedRect]) -> Vec<&'a OrientedRect> {
        rects
            .iter()
            .filter(|rect| {
                let keep = self.accepts(rect);
                if !keep {
                    tracing::trace!(area = rect.area(), center = ?rect.center, "dropping rect");
                }
                keep
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use whiteboard_shared::vec2;

    fn rect_with_area(width: f32, height: f32) -> OrientedRect {
        OrientedRect::new(vec2(100.0, 100.0), width, height, 15.0)
    }

    #[test]
    fn empty_input_yields_empty_output() {
        let filter = GeometryFilter::default();
        assert!(filter.apply(&[]).is_empty());
    }

    #[test]
    fn below_threshold_is_dropped() {
        let filter = GeometryFilter::default();
        for (w, h) in [(9.0, 11.0), (1.0, 99.0), (9.99, 10.0), (0.5, 0.5)] {
            assert!(!filter.accepts(&rect_with_area(w, h)), "{w} x {h}");
        }
    }

    #[test]
    fn at_or_above_threshold_passes_unchanged() {
        let filter = GeometryFilter::default();
        let rects = [rect_with_area(10.0, 10.0), rect_with_area(5.0, 30.0)];
        let kept = filter.apply(&rects);
        assert_eq!(kept.len(), 2);
        assert_eq!(*kept[0], rects[0]);
        assert_eq!(*kept[1], rects[1]);
    }

    #[test]
    fn preserves_input_order() {
        let filter = GeometryFilter::default();
        let rects = [
            OrientedRect::axis_aligned(0.0, 0.0, 20.0, 20.0),
            OrientedRect::axis_aligned(0.0, 0.0, 2.0, 2.0),
            OrientedRect::axis_aligned(50.0, 0.0, 20.0, 20.0),
            OrientedRect::axis_aligned(90.0, 0.0, 20.0, 20.0),
        ];
        let kept = filter.apply(&rects);
        let xs: Vec<f32> = kept.iter().map(|r| r.center.x).collect();
        assert_eq!(xs, vec![10.0, 60.0, 100.0]);
    }

    #[test]
    fn zero_area_is_dropped_even_with_zero_threshold() {
        let filter = GeometryFilter::new(0.0);
        assert!(!filter.accepts(&rect_with_area(0.0, 50.0)));
    }

    #[test]
    fn coincident_corners_are_dropped() {
        let filter = GeometryFilter::new(0.0);
        let mut rect = rect_with_area(20.0, 20.0);
        rect.corners[2] = rect.corners[1];
        assert!(!filter.accepts(&rect));
    }

    #[test]
    fn collinear_corners_are_dropped_despite_declared_size() {
        let filter = GeometryFilter::default();
        let mut flat = rect_with_area(20.0, 20.0);
        flat.corners = [
            vec2(0.0, 0.0),
            vec2(10.0, 0.0),
            vec2(20.0, 0.0),
            vec2(30.0, 0.0),
        ];
        let rects = [rect_with_area(40.0, 10.0), flat];
        let kept = filter.apply(&rects);
        assert_eq!(kept.len(), 1);
        assert_eq!(*kept[0], rects[0]);
    }

    #[test]
    fn non_finite_rect_is_dropped() {
        let filter = GeometryFilter::default();
        let mut rect = rect_with_area(20.0, 20.0);
        rect.corners[3].x = f32::NAN;
        assert!(!filter.accepts(&rect));
    }

    #[test]
    fn custom_threshold_is_respected() {
        let filter = GeometryFilter::new(400.0);
        assert!(!filter.accepts(&rect_with_area(15.0, 20.0)));
        assert!(filter.accepts(&rect_with_area(20.0, 20.0)));
    }
}
