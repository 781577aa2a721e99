//! Data types shared by the whiteboard sandbox core and its presentation client.

pub mod config;
pub mod protocol;
pub mod rect;
pub mod vec2;

pub use config::SandboxConfig;
pub use protocol::{Frame, Recording, RECORDING_VERSION};
pub use rect::OrientedRect;
pub use vec2::{vec2, Vec2};
