use bevy::prelude::{Resource, Vec2, Vec3};
use whiteboard_sandbox::PixelRect;

/// Camera frame dimensions in pixels; the drawing surface mirrors it 1:1.
#[derive(Resource, Clone, Copy, Debug, PartialEq)]
pub struct Canvas {
    pub width: f32,
    pub height: f32,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width as f32,
            height: height as f32,
        }
    }

    /// Frame pixel coordinates (origin top-left, Y-down) to Bevy world
    /// coordinates (origin center, Y-up).
    pub fn px_to_world(&self, x: f32, y: f32, z: f32) -> Vec3 {
        Vec3::new(x - self.width * 0.5, self.height * 0.5 - y, z)
    }

    pub fn px_to_world2(&self, p: whiteboard_shared::Vec2) -> Vec2 {
        self.px_to_world(p.x, p.y, 0.0).truncate()
    }

    /// Center of a pixel-space box, in Bevy world coordinates.
    pub fn rect_center(&self, rect: PixelRect, z: f32) -> Vec3 {
        let cx = rect.x as f32 + rect.width as f32 * 0.5;
        let cy = rect.y as f32 + rect.height as f32 * 0.5;
        self.px_to_world(cx, cy, z)
    }
}
