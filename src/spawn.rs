//! Entity assemblers
//!
//! Factory-style helpers that attach a consistent component set per role.
//! Mesh and sprite creation belong to the presentation layer; the only
//! responsibility here is allocating the id and registering components.

use glam::Vec3;
use log::debug;

use crate::components::{
    Body, Collider, Faction, Health, Indicator, Lifetime, LocalSphere, Missile, PlayerControlled,
    Projectile, Role, Transform, WeaponState,
};
use crate::config::SimConfig;
use crate::consts;
use crate::ecs::{ComponentStore, EntityId};
use crate::sim::World;

/// A combat-capable ship.
pub fn ship(store: &mut ComponentStore, position: Vec3, faction: Faction) -> EntityId {
    let id = store.create_entity();
    store.add(id, Transform::at(position));
    let mut body = Body::dynamic(50.0, 120.0);
    body.damping = 0.4;
    store.add(id, body);
    store.add(id, Collider::sphere(6.0));
    store.add(id, Health::new(100.0, 50.0, 5.0));
    store.add(id, faction);
    store.add(id, Role::Ship);
    store.add(
        id,
        WeaponState {
            weapon: "pulse".to_string(),
            cooldown_ticks: 0,
        },
    );
    id
}

/// Mark a ship as the player's; it is subject to station-ramming fines.
pub fn make_player(store: &mut ComponentStore, id: EntityId) {
    store.add(id, PlayerControlled);
}

/// A drifting rock. Mass and hull scale with radius.
pub fn asteroid(store: &mut ComponentStore, position: Vec3, radius: f32) -> EntityId {
    let id = store.create_entity();
    store.add(id, Transform::at(position));
    store.add(id, Body::dynamic(radius * radius * 4.0, 30.0));
    store.add(id, Collider::sphere(radius));
    store.add(id, Health::new(radius * 15.0, 0.0, 0.0));
    store.add(id, Faction(0));
    store.add(id, Role::Asteroid);
    id
}

/// The station: static, composite ring of spheres.
pub fn station(store: &mut ComponentStore, position: Vec3) -> EntityId {
    let ring_radius = 60.0;
    let segment_radius = 18.0;
    let segments = 8;
    let local_volumes: Vec<LocalSphere> = (0..segments)
        .map(|i| {
            let angle = i as f32 / segments as f32 * std::f32::consts::TAU;
            LocalSphere {
                offset: Vec3::new(angle.cos() * ring_radius, 0.0, angle.sin() * ring_radius),
                radius: segment_radius,
            }
        })
        .collect();

    let id = store.create_entity();
    store.add(id, Transform::at(position));
    store.add(id, Body::fixed(1.0e9));
    store.add(
        id,
        Collider::composite(ring_radius + segment_radius, local_volumes),
    );
    store.add(id, Health::new(5_000.0, 0.0, 0.0));
    store.add(id, Faction(0));
    store.add(id, Role::Station);
    id
}

/// A floating collectible.
pub fn collectible(store: &mut ComponentStore, position: Vec3) -> EntityId {
    let id = store.create_entity();
    store.add(id, Transform::at(position));
    store.add(id, Body::dynamic(1.0, 0.0));
    store.add(id, Collider::sphere(4.0));
    store.add(id, Health::new(1.0, 0.0, 0.0));
    store.add(id, Faction(0));
    store.add(id, Role::Collectible);
    store.add(id, Lifetime { remaining_ticks: 3_600 });
    id
}

/// Launch a missile from a shooter. Returns `None` for an unknown weapon
/// id or a shooter missing placement data.
pub fn missile(
    store: &mut ComponentStore,
    config: &SimConfig,
    shooter: EntityId,
    direction: Vec3,
    weapon: &str,
) -> Option<EntityId> {
    let spec = config.weapon(weapon)?;
    let (muzzle, shooter_vel, faction) = muzzle_state(store, shooter, direction)?;

    let id = store.create_entity();
    let mut transform = Transform::at(muzzle);
    transform.prev_position = muzzle;
    store.add(id, transform);
    let mut body = Body::dynamic(8.0, spec.speed);
    body.velocity = shooter_vel + direction * spec.speed;
    store.add(id, body);
    store.add(id, Collider::sphere(2.0));
    store.add(id, Health::new(1.0, 0.0, 0.0));
    store.add(id, faction);
    store.add(id, Role::Missile);
    store.add(
        id,
        Missile {
            weapon: weapon.to_string(),
            origin: shooter,
            faction,
            arming_ticks: spec.arming_ticks,
        },
    );
    store.add(
        id,
        Lifetime {
            remaining_ticks: spec.lifetime_ticks,
        },
    );
    debug!("{shooter} launched missile {id} ({weapon})");
    Some(id)
}

/// Fire a projectile from the pool. Returns `None` on unknown weapon,
/// missing shooter data, or pool exhaustion (the request is dropped).
pub fn fire_projectile(
    world: &mut World,
    shooter: EntityId,
    direction: Vec3,
    weapon: &str,
) -> Option<EntityId> {
    let spec = world.config.weapon(weapon)?.clone();
    let (muzzle, shooter_vel, faction) = muzzle_state(&world.store, shooter, direction)?;

    let id = world.projectile_pool.acquire(&mut world.store)?;
    let store = &mut world.store;
    if let Some(transform) = store.get_mut::<Transform>(id) {
        transform.position = muzzle;
        transform.prev_position = muzzle;
    }
    if let Some(body) = store.get_mut::<Body>(id) {
        body.velocity = shooter_vel + direction * spec.speed;
        body.max_speed = spec.speed * 2.0;
        body.pending_correction = Vec3::ZERO;
    }
    store.add(
        id,
        Projectile {
            weapon: weapon.to_string(),
            origin: shooter,
            faction,
            pierce: spec.pierce,
        },
    );
    store.add(
        id,
        Lifetime {
            remaining_ticks: spec.lifetime_ticks,
        },
    );
    Some(id)
}

/// A debris chunk with the given scatter velocity.
pub fn debris(store: &mut ComponentStore, position: Vec3, velocity: Vec3) -> EntityId {
    let id = store.create_entity();
    let mut transform = Transform::at(position);
    transform.prev_position = position;
    store.add(id, transform);
    let mut body = Body::dynamic(2.0, velocity.length().max(1.0));
    body.velocity = velocity;
    body.damping = 0.2;
    store.add(id, body);
    store.add(id, Collider::sphere(1.5));
    store.add(id, Health::new(1.0, 0.0, 0.0));
    store.add(id, Faction(0));
    store.add(id, Role::Debris);
    store.add(
        id,
        Lifetime {
            remaining_ticks: consts::DEBRIS_LIFETIME_TICKS,
        },
    );
    id
}

/// Pre-create one parked projectile pool slot.
pub fn projectile_slot(store: &mut ComponentStore) -> EntityId {
    let id = store.create_entity();
    store.add(id, Transform::at(consts::PARK_POSITION));
    store.add(id, Body::dynamic(0.5, 0.0));
    store.add(id, Collider::sphere(1.0));
    let mut health = Health::new(1.0, 0.0, 0.0);
    health.state = crate::components::LifecycleState::CleanupPending;
    store.add(id, health);
    store.add(id, Faction(0));
    store.add(id, Role::Projectile);
    id
}

/// Pre-create one parked damage-indicator pool slot.
pub fn indicator_slot(store: &mut ComponentStore) -> EntityId {
    let id = store.create_entity();
    store.add(id, Transform::at(consts::PARK_POSITION));
    let mut health = Health::new(1.0, 0.0, 0.0);
    health.state = crate::components::LifecycleState::CleanupPending;
    store.add(id, health);
    store.add(id, Role::Indicator);
    store.add(id, Indicator { amount: 0.0 });
    id
}

/// Muzzle position, shooter velocity and faction for a shot.
fn muzzle_state(
    store: &ComponentStore,
    shooter: EntityId,
    direction: Vec3,
) -> Option<(Vec3, Vec3, Faction)> {
    let transform = store.get::<Transform>(shooter)?;
    let faction = store.get::<Faction>(shooter).copied()?;
    let offset = store
        .get::<Collider>(shooter)
        .map(|c| c.radius + 2.0)
        .unwrap_or(2.0);
    let velocity = store
        .get::<Body>(shooter)
        .map(|b| b.velocity)
        .unwrap_or(Vec3::ZERO);
    Some((transform.position + direction * offset, velocity, faction))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ship_component_set() {
        let mut store = ComponentStore::new();
        let id = ship(&mut store, Vec3::ZERO, Faction(1));
        assert!(store.get::<Transform>(id).is_some());
        assert!(store.get::<Body>(id).is_some());
        assert!(store.get::<Collider>(id).is_some());
        assert!(store.get::<Health>(id).is_some());
        assert_eq!(store.get::<Role>(id).copied(), Some(Role::Ship));
    }

    #[test]
    fn test_station_is_composite_and_static() {
        let mut store = ComponentStore::new();
        let id = station(&mut store, Vec3::ZERO);
        let collider = store.get::<Collider>(id).unwrap();
        assert!(collider.is_composite());
        assert_eq!(collider.local_volumes.len(), 8);
        assert_eq!(store.get::<Body>(id).unwrap().inv_mass(), 0.0);
    }

    #[test]
    fn test_missile_unknown_weapon_is_none() {
        let mut store = ComponentStore::new();
        let config = SimConfig::builtin();
        let shooter = ship(&mut store, Vec3::ZERO, Faction(1));
        assert!(missile(&mut store, &config, shooter, Vec3::X, "nope").is_none());
        assert!(missile(&mut store, &config, shooter, Vec3::X, "torpedo").is_some());
    }
}
