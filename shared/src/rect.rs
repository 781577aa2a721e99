use serde::{Deserialize, Serialize};

use crate::vec2::Vec2;

/// Minimum separation for two corners to count as distinct (pixels).
pub const CORNER_EPSILON: f32 = 1e-3;

/// Smallest enclosed corner area (px²) that still forms a usable polygon.
pub const MIN_CORNER_AREA: f32 = 1.0;

/// Rotated rectangle extracted from one contour of a thresholded camera frame.
/// All values are in pixel space (origin top-left, Y-down).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrientedRect {
    pub center: Vec2,
    pub width: f32,
    pub height: f32,
    /// Rotation in degrees.
    pub angle: f32,
    pub corners: [Vec2; 4],
}

impl OrientedRect {
    /// Build a rect and derive its corners the way the vision pipeline does:
    /// corner 0 is bottom-left of the unrotated box, then clockwise on screen.
    pub fn new(center: Vec2, width: f32, height: f32, angle: f32) -> Self {
        let (sin, cos) = angle.to_radians().sin_cos();
        let a = sin * 0.5;
        let b = cos * 0.5;

        let p0 = Vec2::new(
            center.x - a * height - b * width,
            center.y + b * height - a * width,
        );
        let p1 = Vec2::new(
            center.x + a * height - b * width,
            center.y - b * height - a * width,
        );
        let p2 = center * 2.0 - p0;
        let p3 = center * 2.0 - p1;

        Self {
            center,
            width,
            height,
            angle,
            corners: [p0, p1, p2, p3],
        }
    }

    /// Axis-aligned convenience constructor from the top-left corner.
    pub fn axis_aligned(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self::new(
            Vec2::new(x + width * 0.5, y + height * 0.5),
            width,
            height,
            0.0,
        )
    }

    pub fn area(&self) -> f32 {
        self.width * self.height
    }

    pub fn is_finite(&self) -> bool {
        self.center.is_finite()
            && self.width.is_finite()
            && self.height.is_finite()
            && self.angle.is_finite()
            && self.corners.iter().all(|c| c.is_finite())
    }

    /// Area enclosed by the corner polygon (shoelace), independent of the
    /// declared `width` and `height`.
    pub fn corner_area(&self) -> f32 {
        let mut twice = 0.0;
        for i in 0..4 {
            let a = self.corners[i];
            let b = self.corners[(i + 1) % 4];
            twice += a.x * b.y - b.x * a.y;
        }
        (twice * 0.5).abs()
    }

    /// Corners are pairwise distinct and enclose a real polygon.
    pub fn has_polygon_corners(&self) -> bool {
        self.has_distinct_corners() && self.corner_area() >= MIN_CORNER_AREA
    }

    /// True when no two corners coincide.
    pub fn has_distinct_corners(&self) -> bool {
        for i in 0..4 {
            for j in (i + 1)..4 {
                if self.corners[i].distance(self.corners[j]) < CORNER_EPSILON {
                    return false;
                }
            }
        }
        true
    }
}
