//! Whiteboard sandbox core.
//!
//! Turns per-frame rectangles from the vision pipeline into static collision
//! geometry, steps the simulation by real elapsed time, and keeps the single
//! ball on the board.

pub mod actor;
pub mod clock;
pub mod config;
pub mod error;
pub mod filter;
pub mod obstacles;
pub mod physics;
pub mod rapier_world;
pub mod source;
pub mod sync_loop;

#[cfg(test)]
pub(crate) mod test_support;

pub use actor::{Actor, ActorState, PixelRect};
pub use clock::{Clock, ManualClock, MonotonicClock, SimulationClock};
pub use error::{PhysicsError, SandboxError};
pub use filter::GeometryFilter;
pub use obstacles::{Obstacle, ObstacleSet, RebuildStats};
pub use physics::{Material, PhysicsWorld, SolverIterations};
pub use rapier_world::RapierWorld;
pub use source::{FrameSource, ReplaySource, ScriptedSource};
pub use sync_loop::{QuitSignal, StopReason, SyncLoop, TickBudget, TickReport};
