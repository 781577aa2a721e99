pub const Z_OVERLAY: f32 = 1.0;
pub const Z_BALL: f32 = 2.0;

pub const OVERLAY_STROKE_WIDTH: f32 = 1.0;

#[derive(Clone, Copy)]
pub struct Colors;

impl Colors {
    pub const BACKGROUND: u32 = 0x000000;
    pub const BALL: u32 = 0xff0000;
    pub const OBSTACLE: u32 = 0x00ff00;
}

pub fn color_from_hex(rgb: u32) -> bevy::prelude::Color {
    let r = ((rgb >> 16) & 0xff) as f32 / 255.0;
    let g = ((rgb >> 8) & 0xff) as f32 / 255.0;
    let b = (rgb & 0xff) as f32 / 255.0;
    bevy::prelude::Color::srgb(r, g, b)
}
