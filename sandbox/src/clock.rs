//! Variable-timestep driver: each tick advances the simulation by the real
//! time elapsed since the previous tick.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use crate::physics::{PhysicsWorld, SolverIterations};

/// Monotonic millisecond time source.
pub trait Clock {
    fn now_millis(&self) -> u64;
}

/// Wall-clock time since construction.
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    start: Instant,
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Clock for MonotonicClock {
    fn now_millis(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }
}

/// Clock that only moves when told to. Used for deterministic replays.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: AtomicU64,
}

impl ManualClock {
    pub fn new(start_millis: u64) -> Self {
        Self {
            now: AtomicU64::new(start_millis),
        }
    }

    pub fn advance(&self, millis: u64) {
        self.now.fetch_add(millis, Ordering::Relaxed);
    }
}

impl Clock for ManualClock {
    fn now_millis(&self) -> u64 {
        self.now.load(Ordering::Relaxed)
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now_millis(&self) -> u64 {
        (**self).now_millis()
    }
}

impl<C: Clock + ?Sized> Clock for std::sync::Arc<C> {
    fn now_millis(&self) -> u64 {
        (**self).now_millis()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct SimulationClock {
    previous_millis: u64,
    iterations: SolverIterations,
    max_step_secs: Option<f32>,
    stall_warn_secs: f32,
}

impl SimulationClock {
    pub fn new(
        previous_millis: u64,
        iterations: SolverIterations,
        max_step_secs: Option<f32>,
        stall_warn_secs: f32,
    ) -> Self {
        Self {
            previous_millis,
            iterations,
            max_step_secs,
            stall_warn_secs,
        }
    }

    pub fn previous_millis(&self) -> u64 {
        self.previous_millis
    }

    /// Step `world` by the time elapsed since the last call and return the
    /// delta (seconds) actually passed to the engine.
    ///
    /// The delta is unclamped unless `max_step_secs` is set.
    pub fn step<W: PhysicsWorld, C: Clock>(&mut self, world: &mut W, clock: &C) -> f32 {
        let now = clock.now_millis();
        let elapsed = now.saturating_sub(self.previous_millis) as f32 / 1000.0;

        if elapsed > self.stall_warn_secs {
            tracing::warn!(elapsed, "frame stall; large physics step");
        }

        let delta = match self.max_step_secs {
            Some(max) => elapsed.min(max),
            None => elapsed,
        };

        world.step(delta, self.iterations);
        self.previous_millis = now;
        delta
    }
}
