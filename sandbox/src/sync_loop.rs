use std::sync::atomic::{AtomicBool, Ordering};

use whiteboard_shared::{Frame, SandboxConfig, Vec2};

use crate::actor::{Actor, ActorState, PixelRect};
use crate::clock::{Clock, SimulationClock};
use crate::error::SandboxError;
use crate::filter::GeometryFilter;
use crate::obstacles::{Obstacle, ObstacleSet};
use crate::physics::{PhysicsWorld, SolverIterations};
use crate::source::FrameSource;

/// External stop request, polled at the start of every tick.
pub trait QuitSignal {
    fn should_quit(&self) -> bool;
}

impl QuitSignal for AtomicBool {
    fn should_quit(&self) -> bool {
        self.load(Ordering::Relaxed)
    }
}

/// Stop after a fixed number of ticks.
#[derive(Debug)]
pub struct TickBudget {
    remaining: std::cell::Cell<u64>,
}

impl TickBudget {
    pub fn new(ticks: u64) -> Self {
        Self {
            remaining: std::cell::Cell::new(ticks),
        }
    }
}

impl QuitSignal for TickBudget {
    fn should_quit(&self) -> bool {
        let left = self.remaining.get();
        if left == 0 {
            return true;
        }
        self.remaining.set(left - 1);
        false
    }
}

/// Never asks to stop; the loop runs until its source ends.
pub struct Never;

impl QuitSignal for Never {
    fn should_quit(&self) -> bool {
        false
    }
}

/// What one tick did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickReport {
    pub tick: u64,
    /// Rects that became obstacles.
    pub accepted: usize,
    /// Rects dropped as noise or degenerate.
    pub rejected: usize,
    pub created: usize,
    pub destroyed: usize,
    pub delta_secs: f32,
    pub actor: ActorState,
}

/// Why `run` returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    Quit,
    SourceEnded,
}

/// Owns the world and everything that lives in it, and advances them one
/// camera frame at a time.
pub struct SyncLoop<W: PhysicsWorld, C: Clock> {
    world: W,
    clock: C,
    sim_clock: SimulationClock,
    filter: GeometryFilter,
    obstacles: ObstacleSet<W::Handle>,
    actor: Actor<W::Handle>,
    config: SandboxConfig,
    frame_width: u32,
    frame_height: u32,
    ticks: u64,
}

impl<W: PhysicsWorld, C: Clock> SyncLoop<W, C> {
    pub fn new(
        mut world: W,
        clock: C,
        frame_width: u32,
        frame_height: u32,
        config: SandboxConfig,
    ) -> Result<Self, SandboxError> {
        config.validate().map_err(SandboxError::InvalidConfig)?;

        let actor = Actor::spawn(&mut world, frame_width, &config)?;
        let sim_clock = SimulationClock::new(
            clock.now_millis(),
            SolverIterations {
                velocity: config.velocity_iterations,
                position: config.position_iterations,
            },
            config.max_step_secs,
            config.stall_warn_secs,
        );

        tracing::info!(
            frame_width,
            frame_height,
            scale = config.scale,
            min_area = config.min_area,
            "sync loop ready"
        );

        Ok(Self {
            world,
            clock,
            sim_clock,
            filter: GeometryFilter::new(config.min_area),
            obstacles: ObstacleSet::new(),
            actor,
            config,
            frame_width,
            frame_height,
            ticks: 0,
        })
    }

    /// Filter, rebuild obstacles, step, then check the ball. In that order.
    pub fn tick(&mut self, frame: &Frame) -> Result<TickReport, SandboxError> {
        self.ticks += 1;

        let accepted = self.filter.apply(&frame.rects);
        let rejected = frame.rects.len() - accepted.len();

        let stats = self
            .obstacles
            .rebuild(&mut self.world, &accepted, self.config.scale)?;

        let delta_secs = self.sim_clock.step(&mut self.world, &self.clock);

        let actor =
            self.actor
                .check_and_reset(&mut self.world, self.frame_height, self.config.scale)?;

        let report = TickReport {
            tick: self.ticks,
            accepted: accepted.len(),
            rejected,
            created: stats.created,
            destroyed: stats.destroyed,
            delta_secs,
            actor,
        };
        tracing::debug!(?report, "tick");
        Ok(report)
    }

    /// Tick until `quit` fires or `source` runs dry.
    pub fn run<S, Q>(&mut self, source: &mut S, quit: &Q) -> Result<StopReason, SandboxError>
    where
        S: FrameSource + ?Sized,
        Q: QuitSignal + ?Sized,
    {
        loop {
            if quit.should_quit() {
                return Ok(StopReason::Quit);
            }
            let Some(frame) = source.next_frame() else {
                return Ok(StopReason::SourceEnded);
            };
            self.tick(&frame)?;
        }
    }

    /// Destroy all obstacle bodies. The ball stays.
    pub fn clear_obstacles(&mut self) -> usize {
        self.obstacles.clear(&mut self.world)
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn config(&self) -> &SandboxConfig {
        &self.config
    }

    pub fn frame_size(&self) -> (u32, u32) {
        (self.frame_width, self.frame_height)
    }

    pub fn world(&self) -> &W {
        &self.world
    }

    pub fn actor(&self) -> &Actor<W::Handle> {
        &self.actor
    }

    pub fn obstacles(&self) -> impl Iterator<Item = &Obstacle<W::Handle>> {
        self.obstacles.iter()
    }

    pub fn obstacle_count(&self) -> usize {
        self.obstacles.len()
    }

    pub fn actor_position(&self) -> Result<Vec2, SandboxError> {
        Ok(self.actor.position(&self.world)?)
    }

    pub fn actor_rect(&self) -> Result<PixelRect, SandboxError> {
        Ok(self.actor.world_rect(&self.world, self.config.scale)?)
    }
}
