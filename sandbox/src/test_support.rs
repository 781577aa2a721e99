use std::collections::HashMap;

use whiteboard_shared::Vec2;

use crate::error::PhysicsError;
use crate::physics::{unknown_body, Material, PhysicsWorld, SolverIterations};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct FakeHandle(pub(crate) u32);

#[derive(Debug, Clone)]
pub(crate) struct FakeBody {
    pub(crate) position: Vec2,
    pub(crate) velocity: Vec2,
    pub(crate) rotation: f32,
    pub(crate) vertices: Option<[Vec2; 4]>,
    pub(crate) radius: Option<f32>,
    pub(crate) material: Material,
    pub(crate) dynamic: bool,
}

/// In-memory engine that records every call. Handles are never reused and
/// any use of a destroyed handle panics.
#[derive(Default)]
pub(crate) struct RecordingWorld {
    pub(crate) bodies: HashMap<FakeHandle, FakeBody>,
    pub(crate) destroyed: Vec<FakeHandle>,
    pub(crate) creates: usize,
    pub(crate) destroys: usize,
    pub(crate) steps: Vec<(f32, SolverIterations)>,
    /// Polygon creations fail once this many have succeeded.
    pub(crate) fail_polygon_after: Option<usize>,
    pub(crate) next_id: u32,
}

impl RecordingWorld {
    fn alloc(&mut self, body: FakeBody) -> FakeHandle {
        let handle = FakeHandle(self.next_id);
        self.next_id += 1;
        self.creates += 1;
        self.bodies.insert(handle, body);
        handle
    }

    fn live(&self, handle: FakeHandle) -> Result<&FakeBody, PhysicsError> {
        assert!(
            !self.destroyed.contains(&handle),
            "use of destroyed handle {:?}",
            handle
        );
        self.bodies.get(&handle).ok_or_else(|| unknown_body(handle))
    }

    fn live_mut(&mut self, handle: FakeHandle) -> Result<&mut FakeBody, PhysicsError> {
        assert!(
            !self.destroyed.contains(&handle),
            "use of destroyed handle {:?}",
            handle
        );
        self.bodies.get_mut(&handle).ok_or_else(|| unknown_body(handle))
    }

    pub(crate) fn body(&self, handle: FakeHandle) -> &FakeBody {
        &self.bodies[&handle]
    }

    pub(crate) fn static_count(&self) -> usize {
        self.bodies.values().filter(|b| !b.dynamic).count()
    }
}

impl PhysicsWorld for RecordingWorld {
    type Handle = FakeHandle;

    fn create_static_polygon(
        &mut self,
        position: Vec2,
        vertices: &[Vec2; 4],
        material: Material,
    ) -> Result<FakeHandle, PhysicsError> {
        if let Some(limit) = self.fail_polygon_after {
            if self.static_count() >= limit {
                return Err(PhysicsError::DegeneratePolygon {
                    vertices: vertices.map(|v| [v.x, v.y]),
                });
            }
        }
        Ok(self.alloc(FakeBody {
            position,
            velocity: Vec2::ZERO,
            rotation: 0.0,
            vertices: Some(*vertices),
            radius: None,
            material,
            dynamic: false,
        }))
    }

    fn create_dynamic_circle(
        &mut self,
        position: Vec2,
        radius: f32,
        material: Material,
    ) -> Result<FakeHandle, PhysicsError> {
        Ok(self.alloc(FakeBody {
            position,
            velocity: Vec2::ZERO,
            rotation: 0.0,
            vertices: None,
            radius: Some(radius),
            material,
            dynamic: true,
        }))
    }

    fn destroy_body(&mut self, handle: FakeHandle) -> bool {
        assert!(
            !self.destroyed.contains(&handle),
            "double destroy of {:?}",
            handle
        );
        if self.bodies.remove(&handle).is_some() {
            self.destroyed.push(handle);
            self.destroys += 1;
            true
        } else {
            false
        }
    }

    fn set_transform(
        &mut self,
        handle: FakeHandle,
        position: Vec2,
        rotation: f32,
    ) -> Result<(), PhysicsError> {
        let body = self.live_mut(handle)?;
        body.position = position;
        body.rotation = rotation;
        Ok(())
    }

    fn set_linear_velocity(&mut self, handle: FakeHandle, velocity: Vec2) -> Result<(), PhysicsError> {
        self.live_mut(handle)?.velocity = velocity;
        Ok(())
    }

    fn position(&self, handle: FakeHandle) -> Result<Vec2, PhysicsError> {
        Ok(self.live(handle)?.position)
    }

    fn linear_velocity(&self, handle: FakeHandle) -> Result<Vec2, PhysicsError> {
        Ok(self.live(handle)?.velocity)
    }

    fn step(&mut self, delta_secs: f32, iterations: SolverIterations) {
        self.steps.push((delta_secs, iterations));
    }

    fn body_count(&self) -> usize {
        self.bodies.len()
    }
}
