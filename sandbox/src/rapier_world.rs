use std::num::NonZeroUsize;

use rapier2d::prelude::*;
use whiteboard_shared::Vec2;

use crate::error::PhysicsError;
use crate::physics::{unknown_body, Material, PhysicsWorld, SolverIterations};

/// `PhysicsWorld` backed by rapier2d.
pub struct RapierWorld {
    gravity: Vector<Real>,
    integration_parameters: IntegrationParameters,
    physics_pipeline: PhysicsPipeline,
    island_manager: IslandManager,
    broad_phase: DefaultBroadPhase,
    narrow_phase: NarrowPhase,
    bodies: RigidBodySet,
    colliders: ColliderSet,
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    ccd_solver: CCDSolver,
}

impl RapierWorld {
    pub fn new(gravity: Vec2) -> Self {
        Self {
            gravity: vector![gravity.x, gravity.y],
            integration_parameters: IntegrationParameters::default(),
            physics_pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
        }
    }

    fn insert(&mut self, body: RigidBody, collider: Collider) -> RigidBodyHandle {
        let handle = self.bodies.insert(body);
        self.colliders
            .insert_with_parent(collider, handle, &mut self.bodies);
        handle
    }
}

impl PhysicsWorld for RapierWorld {
    type Handle = RigidBodyHandle;

    fn create_static_polygon(
        &mut self,
        position: Vec2,
        vertices: &[Vec2; 4],
        material: Material,
    ) -> Result<RigidBodyHandle, PhysicsError> {
        let points: Vec<Point<Real>> = vertices.iter().map(|v| point![v.x, v.y]).collect();
        let collider = ColliderBuilder::convex_hull(&points)
            .ok_or(PhysicsError::DegeneratePolygon {
                vertices: vertices.map(|v| [v.x, v.y]),
            })?
            .density(material.density)
            .friction(material.friction)
            .restitution(material.restitution)
            .build();

        let body = RigidBodyBuilder::fixed()
            .translation(vector![position.x, position.y])
            .build();

        Ok(self.insert(body, collider))
    }

    fn create_dynamic_circle(
        &mut self,
        position: Vec2,
        radius: f32,
        material: Material,
    ) -> Result<RigidBodyHandle, PhysicsError> {
        let collider = ColliderBuilder::ball(radius)
            .density(material.density)
            .friction(material.friction)
            .restitution(material.restitution)
            // Bounce off a stroke as hard as the bouncier of the two surfaces.
            .restitution_combine_rule(CoefficientCombineRule::Max)
            .build();

        let body = RigidBodyBuilder::dynamic()
            .translation(vector![position.x, position.y])
            .ccd_enabled(true)
            .build();

        Ok(self.insert(body, collider))
    }

    fn destroy_body(&mut self, handle: RigidBodyHandle) -> bool {
        self.bodies
            .remove(
                handle,
                &mut self.island_manager,
                &mut self.colliders,
                &mut self.impulse_joints,
                &mut self.multibody_joints,
                true,
            )
            .is_some()
    }

    fn set_transform(
        &mut self,
        handle: RigidBodyHandle,
        position: Vec2,
        rotation: f32,
    ) -> Result<(), PhysicsError> {
        let body = self
            .bodies
            .get_mut(handle)
            .ok_or_else(|| unknown_body(handle))?;
        body.set_position(Isometry::new(vector![position.x, position.y], rotation), true);
        Ok(())
    }

    fn set_linear_velocity(
        &mut self,
        handle: RigidBodyHandle,
        velocity: Vec2,
    ) -> Result<(), PhysicsError> {
        let body = self
            .bodies
            .get_mut(handle)
            .ok_or_else(|| unknown_body(handle))?;
        body.set_linvel(vector![velocity.x, velocity.y], true);
        Ok(())
    }

    fn position(&self, handle: RigidBodyHandle) -> Result<Vec2, PhysicsError> {
        let body = self.bodies.get(handle).ok_or_else(|| unknown_body(handle))?;
        let t = body.translation();
        Ok(Vec2::new(t.x, t.y))
    }

    fn linear_velocity(&self, handle: RigidBodyHandle) -> Result<Vec2, PhysicsError> {
        let body = self.bodies.get(handle).ok_or_else(|| unknown_body(handle))?;
        let v = body.linvel();
        Ok(Vec2::new(v.x, v.y))
    }

    fn step(&mut self, delta_secs: f32, iterations: SolverIterations) {
        // Also rejects NaN.
        if !(delta_secs > 0.0) {
            return;
        }

        let mut params = self.integration_parameters;
        params.dt = delta_secs;
        params.num_solver_iterations =
            NonZeroUsize::new(iterations.velocity).unwrap_or(NonZeroUsize::MIN);
        params.num_internal_pgs_iterations = iterations.position.max(1);

        self.physics_pipeline.step(
            &self.gravity,
            &params,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd_solver,
            None,
            &(),
            &(),
        );
    }

    fn body_count(&self) -> usize {
        self.bodies.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::{BALL_MATERIAL, OBSTACLE_MATERIAL};
    use whiteboard_shared::vec2;

    fn square(side: f32) -> [Vec2; 4] {
        [
            vec2(0.0, 0.0),
            vec2(side, 0.0),
            vec2(side, side),
            vec2(0.0, side),
        ]
    }

    #[test]
    fn dynamic_body_falls_under_gravity() {
        let mut world = RapierWorld::new(vec2(0.0, 5.0));
        let ball = world
            .create_dynamic_circle(vec2(1.0, 0.0), 0.25, BALL_MATERIAL)
            .unwrap();

        for _ in 0..30 {
            world.step(1.0 / 60.0, SolverIterations::default());
        }

        let p = world.position(ball).unwrap();
        assert!((p.x - 1.0).abs() < 1e-4);
        assert!(p.y > 0.5, "ball should have fallen, y = {}", p.y);
    }

    #[test]
    fn zero_delta_does_not_move_bodies() {
        let mut world = RapierWorld::new(vec2(0.0, 5.0));
        let ball = world
            .create_dynamic_circle(vec2(1.0, 2.0), 0.25, BALL_MATERIAL)
            .unwrap();
        world.step(0.0, SolverIterations::default());
        assert_eq!(world.position(ball).unwrap(), vec2(1.0, 2.0));
    }

    #[test]
    fn static_polygon_does_not_move() {
        let mut world = RapierWorld::new(vec2(0.0, 5.0));
        let wall = world
            .create_static_polygon(vec2(2.0, 3.0), &square(0.5), OBSTACLE_MATERIAL)
            .unwrap();
        for _ in 0..10 {
            world.step(1.0 / 60.0, SolverIterations::default());
        }
        assert_eq!(world.position(wall).unwrap(), vec2(2.0, 3.0));
    }

    #[test]
    fn collinear_polygon_is_rejected() {
        let mut world = RapierWorld::new(vec2(0.0, 5.0));
        let line = [
            vec2(0.0, 0.0),
            vec2(1.0, 0.0),
            vec2(2.0, 0.0),
            vec2(3.0, 0.0),
        ];
        let err = world
            .create_static_polygon(vec2(0.0, 0.0), &line, OBSTACLE_MATERIAL)
            .unwrap_err();
        assert!(matches!(err, PhysicsError::DegeneratePolygon { .. }));
        assert_eq!(world.body_count(), 0);
    }

    #[test]
    fn destroyed_handle_is_unknown() {
        let mut world = RapierWorld::new(vec2(0.0, 5.0));
        let wall = world
            .create_static_polygon(vec2(0.0, 0.0), &square(1.0), OBSTACLE_MATERIAL)
            .unwrap();
        assert!(world.destroy_body(wall));
        assert!(!world.destroy_body(wall));
        assert!(world.position(wall).is_err());
        assert_eq!(world.body_count(), 0);
    }

    #[test]
    fn set_transform_and_velocity_teleport() {
        let mut world = RapierWorld::new(vec2(0.0, 5.0));
        let ball = world
            .create_dynamic_circle(vec2(0.0, 0.0), 0.25, BALL_MATERIAL)
            .unwrap();
        world.set_linear_velocity(ball, vec2(3.0, 4.0)).unwrap();
        world.set_transform(ball, vec2(5.0, 6.0), 0.0).unwrap();
        assert_eq!(world.position(ball).unwrap(), vec2(5.0, 6.0));
        assert_eq!(world.linear_velocity(ball).unwrap(), vec2(3.0, 4.0));
    }

    #[test]
    fn ball_comes_to_rest_on_static_polygon() {
        let mut world = RapierWorld::new(vec2(0.0, 5.0));
        // Slab spanning x in [0, 4], top surface at y = 2.
        let slab = [
            vec2(0.0, 0.0),
            vec2(4.0, 0.0),
            vec2(4.0, 0.5),
            vec2(0.0, 0.5),
        ];
        world
            .create_static_polygon(vec2(0.0, 2.0), &slab, OBSTACLE_MATERIAL)
            .unwrap();
        let ball = world
            .create_dynamic_circle(vec2(2.0, 0.0), 0.25, BALL_MATERIAL)
            .unwrap();

        for _ in 0..600 {
            world.step(1.0 / 60.0, SolverIterations::default());
        }

        let p = world.position(ball).unwrap();
        assert!(p.y < 2.0, "ball fell through the slab, y = {}", p.y);
        assert!(p.y > 1.6, "ball should rest on the slab, y = {}", p.y);
    }
}
