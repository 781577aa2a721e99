//! Seam between the sync loop and the rigid-body engine.
//!
//! The core never touches engine internals: bodies are referred to by opaque
//! handles owned by the engine's own tables, so a destroyed body cannot be
//! reached through a stale pointer.

use std::fmt::Debug;

use whiteboard_shared::Vec2;

use crate::error::PhysicsError;

/// Surface properties of a fixture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub density: f32,
    pub friction: f32,
    pub restitution: f32,
}

/// Static whiteboard strokes. Zero density: they carry no mass.
pub const OBSTACLE_MATERIAL: Material = Material {
    density: 0.0,
    friction: 0.1,
    restitution: 0.1,
};

pub const BALL_MATERIAL: Material = Material {
    density: 0.1,
    friction: 0.1,
    restitution: 0.2,
};

/// Solver effort per step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SolverIterations {
    pub velocity: usize,
    pub position: usize,
}

impl Default for SolverIterations {
    fn default() -> Self {
        Self {
            velocity: 6,
            position: 2,
        }
    }
}

/// Body lifecycle and stepping, all positions in world units (Y-down).
pub trait PhysicsWorld {
    type Handle: Copy + Eq + Debug;

    /// Create a static body at `position` with a four-vertex polygon fixture.
    /// `vertices` are relative to `position`.
    fn create_static_polygon(
        &mut self,
        position: Vec2,
        vertices: &[Vec2; 4],
        material: Material,
    ) -> Result<Self::Handle, PhysicsError>;

    fn create_dynamic_circle(
        &mut self,
        position: Vec2,
        radius: f32,
        material: Material,
    ) -> Result<Self::Handle, PhysicsError>;

    /// Remove a body and its fixtures. Returns false if the handle was not live.
    fn destroy_body(&mut self, handle: Self::Handle) -> bool;

    fn set_transform(
        &mut self,
        handle: Self::Handle,
        position: Vec2,
        rotation: f32,
    ) -> Result<(), PhysicsError>;

    fn set_linear_velocity(
        &mut self,
        handle: Self::Handle,
        velocity: Vec2,
    ) -> Result<(), PhysicsError>;

    fn position(&self, handle: Self::Handle) -> Result<Vec2, PhysicsError>;

    fn linear_velocity(&self, handle: Self::Handle) -> Result<Vec2, PhysicsError>;

    /// Advance the simulation by `delta_secs`.
    fn step(&mut self, delta_secs: f32, iterations: SolverIterations);

    /// Number of live bodies.
    fn body_count(&self) -> usize;
}

pub(crate) fn unknown_body<H: Debug>(handle: H) -> PhysicsError {
    PhysicsError::UnknownBody {
        handle: format!("{:?}", handle),
    }
}
