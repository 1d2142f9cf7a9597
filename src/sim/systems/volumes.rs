//! Derived-state update: world-space collision volumes and grid rebuild
//!
//! Composite colliders carry their sub-volumes in local space; this
//! system projects them into world space from the current Transform,
//! then clears and rebuilds the spatial grid. The grid must be current
//! before any collision or sensor system queries it - a hard per-tick
//! ordering contract.

use crate::components::{Collider, Health, Role, Transform, WorldSphere};
use crate::sim::{System, World};
use crate::spatial::{GridEntry, GridKey};

pub struct Volumes;

impl System for Volumes {
    fn name(&self) -> &'static str {
        "volumes"
    }

    fn run(&mut self, world: &mut World, _dt: f32) {
        let store = &mut world.store;

        let ids = store.query2::<Transform, Collider>();
        for id in &ids {
            let Some(transform) = store.get::<Transform>(*id) else {
                continue;
            };
            let position = transform.position;
            let rotation = transform.rotation;
            let Some(collider) = store.get_mut::<Collider>(*id) else {
                continue;
            };
            collider.world_volumes.clear();
            for local in &collider.local_volumes {
                collider.world_volumes.push(WorldSphere {
                    center: position + rotation * local.offset,
                    radius: local.radius,
                });
            }
        }

        world.grid.clear();
        for id in &ids {
            let alive = store.get::<Health>(*id).is_none_or(|h| h.is_alive());
            if !alive {
                continue;
            }
            let Some(role) = store.get::<Role>(*id).copied() else {
                continue;
            };
            let Some(category) = role.category() else {
                continue;
            };
            let (Some(transform), Some(collider)) =
                (store.get::<Transform>(*id), store.get::<Collider>(*id))
            else {
                continue;
            };
            // Shots register their whole swept path so the broad phase
            // cannot miss a high-speed crossing.
            let (center, radius) = if role.is_shot() {
                let mid = (transform.prev_position + transform.position) * 0.5;
                let half = (transform.position - transform.prev_position).length() * 0.5;
                (mid, half + collider.radius)
            } else {
                (transform.position, collider.radius)
            };
            world.grid.register(GridEntry {
                key: GridKey::Entity(*id),
                category,
                center,
                radius,
            });
        }
    }
}
