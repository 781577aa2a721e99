mod ball;
mod core;
mod input;
mod overlay;

pub use ball::BallPlugin;
pub use core::{CorePlugin, Sandbox};
pub(crate) use core::UpdateSet;
pub use input::InputPlugin;
pub use overlay::OverlayPlugin;
