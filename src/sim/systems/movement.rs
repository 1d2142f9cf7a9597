//! Movement integration
//!
//! Per entity with a Transform and a dynamic Body:
//! 1. capture the previous position (the swept collision test needs it),
//! 2. apply the pending positional correction accumulated by collision
//!    resolution - once, then cleared, so simultaneous collisions on one
//!    body never compound order-sensitively within a tick,
//! 3. integrate acceleration and velocity with damping and speed clamp.
//!
//! A body whose numeric state went non-finite is force-destroyed rather
//! than allowed to poison the simulation.

use glam::Vec3;
use log::warn;

use crate::components::{Body, BodyKind, Health, Transform};
use crate::sim::{System, World};

pub struct Movement;

impl System for Movement {
    fn name(&self) -> &'static str {
        "movement"
    }

    fn run(&mut self, world: &mut World, dt: f32) {
        let store = &mut world.store;

        for id in store.query2::<Transform, Body>() {
            let Some(body) = store.get_mut::<Body>(id) else {
                continue;
            };
            if body.kind == BodyKind::Static {
                continue;
            }

            // Integrate velocity.
            let accel = body.acceleration;
            body.velocity += accel * dt;
            if body.damping > 0.0 {
                body.velocity *= (1.0 - body.damping * dt).max(0.0);
            }
            if body.max_speed > 0.0 {
                let speed = body.velocity.length();
                if speed > body.max_speed {
                    body.velocity *= body.max_speed / speed;
                }
            }
            let velocity = body.velocity;
            let correction = body.pending_correction;
            body.pending_correction = Vec3::ZERO;

            let Some(transform) = store.get_mut::<Transform>(id) else {
                continue;
            };
            transform.prev_position = transform.position;
            transform.position += correction + velocity * dt;

            let position = transform.position;
            if !position.is_finite() || !velocity.is_finite() {
                warn!("{id} has non-finite state, forcing destruction");
                if let Some(h) = store.get_mut::<Health>(id) {
                    h.mark_destroyed();
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{Faction, LifecycleState};
    use crate::config::SimConfig;
    use crate::spawn;

    const DT: f32 = 1.0 / 60.0;

    #[test]
    fn test_integration_and_prev_position() {
        let mut world = World::new(SimConfig::builtin(), 1);
        let id = spawn::ship(&mut world.store, Vec3::new(10.0, 0.0, 0.0), Faction(1));
        {
            let body = world.store.get_mut::<Body>(id).unwrap();
            body.velocity = Vec3::new(60.0, 0.0, 0.0);
            body.damping = 0.0;
        }

        Movement.run(&mut world, DT);

        let t = world.store.get::<Transform>(id).unwrap();
        assert_eq!(t.prev_position, Vec3::new(10.0, 0.0, 0.0));
        assert!((t.position.x - 11.0).abs() < 1e-4);
    }

    #[test]
    fn test_pending_correction_applied_once() {
        let mut world = World::new(SimConfig::builtin(), 1);
        let id = spawn::ship(&mut world.store, Vec3::ZERO, Faction(1));
        world.store.get_mut::<Body>(id).unwrap().pending_correction = Vec3::new(0.0, 5.0, 0.0);

        Movement.run(&mut world, DT);
        let y1 = world.store.get::<Transform>(id).unwrap().position.y;
        assert!((y1 - 5.0).abs() < 1e-4);

        // Second tick: correction was cleared, no re-application.
        Movement.run(&mut world, DT);
        let y2 = world.store.get::<Transform>(id).unwrap().position.y;
        assert!((y2 - 5.0).abs() < 1e-4);
    }

    #[test]
    fn test_speed_clamped_to_max() {
        let mut world = World::new(SimConfig::builtin(), 1);
        let id = spawn::ship(&mut world.store, Vec3::ZERO, Faction(1));
        {
            let body = world.store.get_mut::<Body>(id).unwrap();
            body.velocity = Vec3::new(10_000.0, 0.0, 0.0);
            body.damping = 0.0;
        }
        Movement.run(&mut world, DT);
        let body = world.store.get::<Body>(id).unwrap();
        assert!(body.velocity.length() <= body.max_speed + 1e-3);
    }

    #[test]
    fn test_static_bodies_never_move() {
        let mut world = World::new(SimConfig::builtin(), 1);
        let id = spawn::station(&mut world.store, Vec3::new(1.0, 2.0, 3.0));
        Movement.run(&mut world, DT);
        assert_eq!(
            world.store.get::<Transform>(id).unwrap().position,
            Vec3::new(1.0, 2.0, 3.0)
        );
    }

    #[test]
    fn test_non_finite_velocity_is_fatal_to_entity() {
        let mut world = World::new(SimConfig::builtin(), 1);
        let id = spawn::ship(&mut world.store, Vec3::ZERO, Faction(1));
        world.store.get_mut::<Body>(id).unwrap().velocity = Vec3::new(f32::NAN, 0.0, 0.0);

        Movement.run(&mut world, DT);
        assert_eq!(
            world.store.get::<Health>(id).unwrap().state,
            LifecycleState::Destroyed
        );
    }
}
