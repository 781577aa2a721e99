//! The ball: one dynamic body that lives for the whole process and is
//! teleported back to its spawn pose whenever it drops off the board.

use whiteboard_shared::{SandboxConfig, Vec2};

use crate::error::PhysicsError;
use crate::physics::{PhysicsWorld, BALL_MATERIAL};

/// Screen-space box the presentation layer draws the ball into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActorState {
    /// Normal simulation-driven motion.
    Falling,
    /// Left the board this tick and was put back at the spawn pose.
    Resetting,
}

#[derive(Debug)]
pub struct Actor<H> {
    handle: H,
    spawn: Vec2,
    radius: f32,
    leeway: f32,
    resets: u64,
}

impl<H: Copy + Eq + std::fmt::Debug> Actor<H> {
    /// Create the ball horizontally at `spawn_fraction` of the frame width,
    /// flush with the top edge.
    pub fn spawn<W>(
        world: &mut W,
        window_width: u32,
        config: &SandboxConfig,
    ) -> Result<Self, PhysicsError>
    where
        W: PhysicsWorld<Handle = H>,
    {
        let spawn = spawn_pose(window_width, config.scale, config.spawn_fraction);
        let handle = world.create_dynamic_circle(spawn, config.ball_radius, BALL_MATERIAL)?;

        tracing::info!(x = spawn.x, y = spawn.y, radius = config.ball_radius, "ball spawned");

        Ok(Self {
            handle,
            spawn,
            radius: config.ball_radius,
            leeway: config.leeway,
            resets: 0,
        })
    }

    pub fn handle(&self) -> H {
        self.handle
    }

    pub fn spawn_position(&self) -> Vec2 {
        self.spawn
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Number of times the ball has been put back.
    pub fn resets(&self) -> u64 {
        self.resets
    }

    pub fn position<W>(&self, world: &W) -> Result<Vec2, PhysicsError>
    where
        W: PhysicsWorld<Handle = H>,
    {
        world.position(self.handle)
    }

    /// Reset the ball if it has fallen more than `leeway` pixels below the
    /// bottom of the frame.
    pub fn check_and_reset<W>(
        &mut self,
        world: &mut W,
        window_height: u32,
        scale: f32,
    ) -> Result<ActorState, PhysicsError>
    where
        W: PhysicsWorld<Handle = H>,
    {
        let y_px = world.position(self.handle)?.y * scale;
        if y_px <= window_height as f32 + self.leeway {
            return Ok(ActorState::Falling);
        }

        world.set_transform(self.handle, self.spawn, 0.0)?;
        world.set_linear_velocity(self.handle, Vec2::ZERO)?;
        self.resets += 1;

        tracing::info!(y_px, resets = self.resets, "ball left the board; resetting");
        Ok(ActorState::Resetting)
    }

    /// Pixel-space bounding box of the ball.
    pub fn world_rect<W>(&self, world: &W, scale: f32) -> Result<PixelRect, PhysicsError>
    where
        W: PhysicsWorld<Handle = H>,
    {
        let p = world.position(self.handle)?;
        let size = (self.radius * scale * 2.0) as i32;
        Ok(PixelRect {
            x: ((p.x - self.radius) * scale) as i32,
            y: ((p.y - self.radius) * scale) as i32,
            width: size,
            height: size,
        })
    }
}

/// Spawn point in world units.
pub fn spawn_pose(window_width: u32, scale: f32, fraction: f32) -> Vec2 {
    Vec2::new(window_width as f32 / scale * fraction, 0.0)
}
