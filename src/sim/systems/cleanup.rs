//! End-of-pipeline housekeeping: spawning requested debris and damage
//! indicators, retiring `DropsHandled` entities (pooled kinds are parked
//! for reuse, everything else is removed), and shield regeneration.

use glam::Vec3;
use rand::Rng;

use crate::components::{Body, Health, Indicator, Lifetime, LifecycleState, Projectile, Role, Transform};
use crate::consts;
use crate::normalize_or;
use crate::sim::{System, World};
use crate::spawn;

pub struct Cleanup;

impl System for Cleanup {
    fn name(&self) -> &'static str {
        "cleanup"
    }

    fn run(&mut self, world: &mut World, dt: f32) {
        spawn_debris(world);
        spawn_indicators(world);
        retire_handled(world);
        regenerate_shields(world, dt);
    }
}

fn spawn_debris(world: &mut World) {
    let requests = world.events.take_debris_requests();
    for req in requests {
        for _ in 0..req.count {
            let dir = normalize_or(
                Vec3::new(
                    world.rng.random_range(-1.0..=1.0),
                    world.rng.random_range(-1.0..=1.0),
                    world.rng.random_range(-1.0..=1.0),
                ),
                Vec3::Y,
            );
            let speed = req.speed * world.rng.random_range(0.4..=1.0);
            spawn::debris(&mut world.store, req.origin + dir * 1.5, dir * speed);
        }
    }
}

fn spawn_indicators(world: &mut World) {
    let requests = world.events.take_indicator_requests();
    for req in requests {
        let Some(id) = world.indicator_pool.acquire(&mut world.store) else {
            continue;
        };
        if let Some(transform) = world.store.get_mut::<Transform>(id) {
            transform.position = req.position;
            transform.prev_position = req.position;
        }
        world.store.add(id, Indicator { amount: req.amount });
        world.store.add(
            id,
            Lifetime {
                remaining_ticks: consts::INDICATOR_LIFETIME_TICKS,
            },
        );
    }
}

/// `DropsHandled` entities leave the world: pooled kinds are parked and
/// flipped to `CleanupPending` so their pool can hand them out again,
/// everything else is removed outright.
fn retire_handled(world: &mut World) {
    let handled: Vec<_> = world
        .store
        .ids_with::<Health>()
        .into_iter()
        .filter(|&id| {
            world
                .store
                .get::<Health>(id)
                .is_some_and(|h| h.state == LifecycleState::DropsHandled)
        })
        .collect();

    for id in handled {
        let pooled = world
            .store
            .get::<Role>(id)
            .is_some_and(|role| role.is_pooled());
        if pooled {
            park(world, id);
        } else {
            world.store.remove_entity(id);
        }
    }
}

fn park(world: &mut World, id: crate::ecs::EntityId) {
    let store = &mut world.store;
    if let Some(transform) = store.get_mut::<Transform>(id) {
        transform.position = consts::PARK_POSITION;
        transform.prev_position = consts::PARK_POSITION;
    }
    if let Some(body) = store.get_mut::<Body>(id) {
        body.velocity = Vec3::ZERO;
        body.acceleration = Vec3::ZERO;
        body.pending_correction = Vec3::ZERO;
    }
    store.remove::<Projectile>(id);
    store.remove::<Lifetime>(id);
    if let Some(h) = store.get_mut::<Health>(id) {
        h.advance(LifecycleState::DropsHandled, LifecycleState::CleanupPending);
    }
}

fn regenerate_shields(world: &mut World, dt: f32) {
    for id in world.store.ids_with::<Health>() {
        let Some(h) = world.store.get_mut::<Health>(id) else {
            continue;
        };
        if !h.is_alive() || h.regen_delay_ticks > 0 || h.shield_regen <= 0.0 {
            continue;
        }
        if h.shield < h.shield_max {
            h.shield = (h.shield + h.shield_regen * dt).min(h.shield_max);
        }
    }
}
