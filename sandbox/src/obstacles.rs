//! Static collision shapes mirroring what is currently drawn on the board.
//!
//! The set is replaced wholesale on every tick: all bodies from the previous
//! tick are destroyed before any new one is created, and no identity is
//! carried between ticks.

use whiteboard_shared::{OrientedRect, Vec2};

use crate::error::PhysicsError;
use crate::physics::{PhysicsWorld, OBSTACLE_MATERIAL};

/// One static body built from one qualifying rect.
#[derive(Debug, Clone)]
pub struct Obstacle<H> {
    handle: H,
    /// First corner of the rect, in world units. The body sits here.
    origin_world: Vec2,
    /// All four corners relative to `origin_world`, in world units.
    vertices_world: [Vec2; 4],
}

impl<H: Copy> Obstacle<H> {
    /// Convert a rect's corners to world units relative to its first corner.
    pub fn geometry(rect: &OrientedRect, scale: f32) -> (Vec2, [Vec2; 4]) {
        let origin = rect.corners[0];
        let vertices = rect.corners.map(|corner| (corner - origin) / scale);
        (origin / scale, vertices)
    }

    pub fn handle(&self) -> H {
        self.handle
    }

    pub fn origin_world(&self) -> Vec2 {
        self.origin_world
    }

    pub fn vertices_world(&self) -> &[Vec2; 4] {
        &self.vertices_world
    }

    /// Corners back in pixel space.
    pub fn corners_px(&self, scale: f32) -> [Vec2; 4] {
        let origin_px = self.origin_world * scale;
        self.vertices_world.map(|v| v * scale + origin_px)
    }
}

/// Bodies created and destroyed by one rebuild.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RebuildStats {
    pub destroyed: usize,
    pub created: usize,
}

#[derive(Debug)]
pub struct ObstacleSet<H> {
    obstacles: Vec<Obstacle<H>>,
}

impl<H> Default for ObstacleSet<H> {
    fn default() -> Self {
        Self {
            obstacles: Vec::new(),
        }
    }
}

impl<H: Copy + Eq + std::fmt::Debug> ObstacleSet<H> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Obstacle<H>> {
        self.obstacles.iter()
    }

    /// Destroy every body from the previous tick, then create one static
    /// body per rect in `rects`, keeping their order.
    ///
    /// On an engine fault the bodies created so far stay in the set, so the
    /// next rebuild (or `clear`) still destroys them.
    pub fn rebuild<W>(
        &mut self,
        world: &mut W,
        rects: &[&OrientedRect],
        scale: f32,
    ) -> Result<RebuildStats, PhysicsError>
    where
        W: PhysicsWorld<Handle = H>,
    {
        let destroyed = self.clear(world);
        self.obstacles.reserve(rects.len());

        for rect in rects {
            let (origin_world, vertices_world) = Obstacle::<H>::geometry(rect, scale);
            let handle =
                world.create_static_polygon(origin_world, &vertices_world, OBSTACLE_MATERIAL)?;
            self.obstacles.push(Obstacle {
                handle,
                origin_world,
                vertices_world,
            });
        }

        Ok(RebuildStats {
            destroyed,
            created: self.obstacles.len(),
        })
    }

    /// Destroy all held bodies. Returns how many were removed.
    pub fn clear<W>(&mut self, world: &mut W) -> usize
    where
        W: PhysicsWorld<Handle = H>,
    {
        let mut destroyed = 0;
        for obstacle in self.obstacles.drain(..) {
            if world.destroy_body(obstacle.handle) {
                destroyed += 1;
            } else {
                tracing::warn!(handle = ?obstacle.handle, "obstacle body was already gone");
            }
        }
        destroyed
    }
}
