//! A thin owner of the rapier2d pipeline state.
//!
//! Everything here is in pixels with y pointing down the screen; the
//! [`LengthUnits`] handed to [`PhysicsWorld::new`] tell rapier how big a
//! meter is so its internal tolerances line up with pixel-sized shapes.

use std::num::NonZeroUsize;

use glam::Vec2;
use rapier2d::prelude::*;

use crate::units::LengthUnits;

pub use rapier2d::prelude::RigidBodyHandle as BodyHandle;

const SHAPE_DENSITY: Real = 1.0;
const SHAPE_FRICTION: Real = 0.6;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum BodyKind {
    /// Never moves.
    Static,
    /// Moves under gravity and contacts.
    Dynamic,
}

pub struct PhysicsWorld {
    gravity: Vector<Real>,
    integration_parameters: IntegrationParameters,
    pipeline: PhysicsPipeline,
    islands: IslandManager,
    broad_phase: DefaultBroadPhase,
    narrow_phase: NarrowPhase,
    bodies: RigidBodySet,
    colliders: ColliderSet,
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    ccd_solver: CCDSolver,
    query_pipeline: QueryPipeline,
}

impl PhysicsWorld {
    pub fn new(gravity: Vec2, units: LengthUnits) -> Self {
        let mut integration_parameters = IntegrationParameters::default();
        integration_parameters.length_unit = units.pixels_per_meter();
        Self {
            gravity: vector![gravity.x, gravity.y],
            integration_parameters,
            pipeline: PhysicsPipeline::new(),
            islands: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            query_pipeline: QueryPipeline::new(),
        }
    }
    pub fn gravity(&self) -> Vec2 {
        Vec2::new(self.gravity.x, self.gravity.y)
    }
    /// Creates a body at `position` with a box shape centered on the body origin.
    pub fn create_body(&mut self, kind: BodyKind, position: Vec2, half_extent: Vec2) -> BodyHandle {
        let builder = match kind {
            BodyKind::Static => RigidBodyBuilder::fixed(),
            BodyKind::Dynamic => RigidBodyBuilder::dynamic(),
        };
        let body = self
            .bodies
            .insert(builder.translation(vector![position.x, position.y]).build());
        let collider = ColliderBuilder::cuboid(half_extent.x, half_extent.y)
            .density(SHAPE_DENSITY)
            .friction(SHAPE_FRICTION)
            .build();
        self.colliders
            .insert_with_parent(collider, body, &mut self.bodies);
        body
    }
    /// Advances the simulation by `dt` seconds.  Does nothing for a non-positive `dt`.
    pub fn step(&mut self, dt: f32, substeps: usize) {
        if dt <= 0.0 {
            return;
        }
        self.integration_parameters.dt = dt;
        self.integration_parameters.num_solver_iterations =
            NonZeroUsize::new(substeps).unwrap_or(NonZeroUsize::MIN);
        self.pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.islands,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd_solver,
            Some(&mut self.query_pipeline),
            &(),
            &(),
        );
    }
    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }
    pub fn is_dynamic(&self, body: BodyHandle) -> bool {
        self.bodies[body].is_dynamic()
    }
    pub fn position(&self, body: BodyHandle) -> Vec2 {
        let t = self.bodies[body].translation();
        Vec2::new(t.x, t.y)
    }
    /// Body rotation in radians.
    pub fn angle(&self, body: BodyHandle) -> f32 {
        self.bodies[body].rotation().angle()
    }
    /// World-space location of a point given in the body's local frame.
    pub fn world_point(&self, body: BodyHandle, local: Vec2) -> Vec2 {
        let p = self.bodies[body]
            .position()
            .transform_point(&point![local.x, local.y]);
        Vec2::new(p.x, p.y)
    }
    /// Half-extent of the box attached to `body`, if it has one.
    pub fn half_extent(&self, body: BodyHandle) -> Option<Vec2> {
        self.bodies[body]
            .colliders()
            .iter()
            .find_map(|c| self.colliders[*c].shape().as_cuboid())
            .map(|cuboid| Vec2::new(cuboid.half_extents.x, cuboid.half_extents.y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn world() -> PhysicsWorld {
        let units = LengthUnits::default();
        PhysicsWorld::new(units.gravity(), units)
    }

    #[test]
    fn length_unit_reaches_solver() {
        let w = world();
        assert_eq!(w.integration_parameters.length_unit, 128.0);
        assert_eq!(w.gravity(), Vec2::new(0.0, 9.8 * 128.0));
    }

    #[test]
    fn dynamic_body_falls_static_body_stays() {
        let mut w = world();
        let floor = w.create_body(BodyKind::Static, Vec2::new(0.0, 1000.0), Vec2::new(64.0, 16.0));
        let block = w.create_body(BodyKind::Dynamic, Vec2::new(0.0, 0.0), Vec2::new(16.0, 16.0));
        assert_eq!(w.body_count(), 2);
        assert!(!w.is_dynamic(floor));
        assert!(w.is_dynamic(block));
        w.step(1.0 / 60.0, 4);
        assert_eq!(w.position(floor), Vec2::new(0.0, 1000.0));
        assert!(w.position(block).y > 0.0, "y-down gravity should pull the box to larger y");
    }

    #[test]
    fn zero_dt_is_a_no_op() {
        let mut w = world();
        let b = w.create_body(BodyKind::Dynamic, Vec2::new(5.0, 5.0), Vec2::new(1.0, 1.0));
        w.step(0.0, 4);
        w.step(-1.0, 4);
        assert_eq!(w.position(b), Vec2::new(5.0, 5.0));
    }

    #[test]
    fn world_point_and_extent() {
        let mut w = world();
        let b = w.create_body(BodyKind::Static, Vec2::new(100.0, 50.0), Vec2::new(8.0, 4.0));
        assert_eq!(w.half_extent(b), Some(Vec2::new(8.0, 4.0)));
        assert_eq!(w.angle(b), 0.0);
        let corner = w.world_point(b, Vec2::new(-8.0, -4.0));
        assert!((corner - Vec2::new(92.0, 46.0)).length() < 1e-4);
    }

    #[test]
    fn rotated_corner_leads_back_to_position() {
        let mut w = world();
        let extent = Vec2::new(64.0, 32.0);
        let b = w.create_body(BodyKind::Dynamic, Vec2::new(400.0, 300.0), extent);
        w.bodies[b].set_rotation(Rotation::new(0.7), true);
        let angle = w.angle(b);
        assert!((angle - 0.7).abs() < 1e-5);
        let corner = w.world_point(b, -extent);
        assert!((corner - (w.position(b) - extent)).length() > 1.0);
        let center = corner + Vec2::from_angle(angle).rotate(extent);
        assert!((center - w.position(b)).length() < 1e-3);

        let entity = crate::Entity {
            body: b,
            extent,
            texture: crate::TextureId(0),
        };
        let pose = entity.draw_pose(&w);
        assert_eq!(pose.corner, corner);
        let center = pose.corner + Vec2::from_angle(pose.angle).rotate(extent);
        assert!((center - w.position(b)).length() < 1e-3);
    }
}
