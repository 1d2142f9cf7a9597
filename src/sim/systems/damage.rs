//! Hit and damage resolution
//!
//! Three stages run back to back in the fixed order:
//!
//! 1. `HitResolution` consumes the tick's hit events: missile impacts
//!    become detonations, projectile impacts become damage (+ splash),
//!    body contacts become kinetic damage, impulses and fines.
//! 2. `Detonations` turns detonation events into area damage.
//! 3. `DamageApplication` applies damage events to shields and hulls and
//!    drives the `Alive -> Destroyed` transition exactly once.
//!
//! The projectile path and the generic contact path deliberately keep
//! separate kinematic code and tunables; their balance differs.

use glam::Vec3;
use log::{debug, info};

use crate::components::{
    Body, Collider, Faction, Health, Missile, PlayerControlled, Projectile, Role, Transform,
};
use crate::ecs::{ComponentStore, EntityId};
use crate::events::{
    DamageEvent, DebrisRequest, DetonationEvent, EffectKind, EffectRequest, Events, FineEvent,
    HitEvent, IndicatorRequest,
};
use crate::normalize_or;
use crate::sim::{System, World};
use crate::spatial::{GridKey, SpatialGrid};

/// Ticks a shield waits after the last hit before regenerating.
const SHIELD_REGEN_DELAY_TICKS: u32 = 120;

pub struct HitResolution;

impl System for HitResolution {
    fn name(&self) -> &'static str {
        "hit_resolution"
    }

    fn run(&mut self, world: &mut World, _dt: f32) {
        let hits = world.events.take_hits();
        for hit in hits {
            match hit {
                HitEvent::Shot { shot, target, point } => {
                    match world.store.get::<Role>(shot).copied() {
                        Some(Role::Missile) => resolve_missile_hit(world, shot, point),
                        Some(Role::Projectile) => resolve_projectile_hit(world, shot, target, point),
                        _ => {}
                    }
                }
                HitEvent::Contact {
                    a,
                    b,
                    normal,
                    relative_velocity,
                } => resolve_body_contact(world, a, b, normal, relative_velocity),
            }
        }
    }
}

/// An armed missile detonates on any impact. Flagging it `Destroyed`
/// immediately is the guard against double-detonation when several hit
/// sources land in the same tick.
fn resolve_missile_hit(world: &mut World, missile: EntityId, point: Vec3) {
    let Some(data) = world.store.get::<Missile>(missile) else {
        return;
    };
    if !data.armed() {
        return;
    }
    let weapon = data.weapon.clone();
    let origin = data.origin;
    let faction = data.faction;

    let detonated = world
        .store
        .get_mut::<Health>(missile)
        .is_some_and(|h| h.mark_destroyed());
    if !detonated {
        return;
    }
    world.events.publish_detonation(DetonationEvent {
        missile,
        weapon,
        origin,
        faction,
        point,
    });
}

fn resolve_projectile_hit(world: &mut World, shot: EntityId, target: EntityId, point: Vec3) {
    let Some(proj) = world.store.get::<Projectile>(shot).cloned() else {
        return;
    };
    // A shot that spent its last pierce on an earlier hit this tick is
    // already flagged destroyed and must not damage further targets.
    if proj.pierce == 0
        || !world
            .store
            .get::<Health>(shot)
            .is_some_and(|h| h.is_alive())
    {
        return;
    }
    // Validity: never the shot's own origin, never a friend, only the living.
    if target == proj.origin {
        return;
    }
    if let Some(target_faction) = world.store.get::<Faction>(target)
        && !proj.faction.is_hostile(*target_faction)
    {
        return;
    }
    if !world
        .store
        .get::<Health>(target)
        .is_some_and(|h| h.is_alive())
    {
        return;
    }
    let Some(spec) = world.config.weapon(&proj.weapon).cloned() else {
        debug!("projectile {shot} references unknown weapon '{}'", proj.weapon);
        return;
    };

    // Impact normal: from the target center toward the impact point;
    // attacker-to-target direction when the point sits on the center.
    let target_center = world
        .store
        .get::<Transform>(target)
        .map(|t| t.position)
        .unwrap_or(point);
    let attacker_dir = world
        .store
        .get::<Transform>(proj.origin)
        .map(|t| target_center - t.position)
        .unwrap_or(Vec3::X);
    let normal = normalize_or(point - target_center, normalize_or(attacker_dir, Vec3::X));

    world.events.publish_damage(DamageEvent {
        target,
        attacker: Some(proj.origin),
        amount: spec.damage,
        point,
        normal,
        weapon: Some(proj.weapon.clone()),
    });

    if spec.explosion_radius > 0.0 {
        splash(
            &world.store,
            &world.grid,
            &mut world.events,
            point,
            spec.explosion_radius,
            spec.damage,
            Some(proj.origin),
            Some(proj.faction),
            &[target, shot],
        );
    }

    // Spend one pierce; the shot dies once exhausted.
    let exhausted = match world.store.get_mut::<Projectile>(shot) {
        Some(p) => {
            p.pierce = p.pierce.saturating_sub(1);
            p.pierce == 0
        }
        None => false,
    };
    if exhausted {
        if let Some(h) = world.store.get_mut::<Health>(shot) {
            h.mark_destroyed();
        }
        world.events.publish_effect(EffectRequest {
            kind: EffectKind::Spark,
            position: point,
            radius: 1.0,
        });
    }
}

/// Generic body-vs-body resolution: kinetic damage above a threshold,
/// elastic inverse-mass impulse, and the station-ramming fine path.
fn resolve_body_contact(
    world: &mut World,
    a: EntityId,
    b: EntityId,
    normal: Vec3,
    relative_velocity: Vec3,
) {
    let tuning = world.config.collision.clone();

    // Speed along the contact normal; positive means approaching.
    let approach = -relative_velocity.dot(normal);
    if approach <= 0.0 {
        return;
    }

    let (ia, ma) = match world.store.get::<Body>(a) {
        Some(body) => (body.inv_mass(), body.mass),
        None => return,
    };
    let (ib, mb) = match world.store.get::<Body>(b) {
        Some(body) => (body.inv_mass(), body.mass),
        None => return,
    };
    if ia + ib <= 0.0 {
        return;
    }

    // Elastic impulse on each dynamic body.
    let j = (1.0 + tuning.restitution) * approach / (ia + ib);
    let impulse = normal * j;
    if ia > 0.0
        && let Some(body) = world.store.get_mut::<Body>(a)
    {
        body.velocity -= impulse * ia;
    }
    if ib > 0.0
        && let Some(body) = world.store.get_mut::<Body>(b)
    {
        body.velocity += impulse * ib;
    }

    // Station-ramming fine for the controlled entity.
    let roles = (
        world.store.get::<Role>(a).copied(),
        world.store.get::<Role>(b).copied(),
    );
    let offender = match roles {
        (_, Some(Role::Station)) if world.store.has::<PlayerControlled>(a) => Some(a),
        (Some(Role::Station), _) if world.store.has::<PlayerControlled>(b) => Some(b),
        _ => None,
    };
    if let Some(offender) = offender
        && approach > tuning.fine_speed_threshold
    {
        world.events.publish_fine(FineEvent {
            offender,
            impact_speed: approach,
        });
    }

    // Grazing contacts below the energy threshold do no damage.
    if approach < tuning.min_impact_speed {
        return;
    }

    // Kinetic damage from the effective mass of the pair.
    let effective_mass = if ia > 0.0 && ib > 0.0 {
        (ma * mb) / (ma + mb)
    } else if ia > 0.0 {
        ma
    } else {
        mb
    };
    let energy = 0.5 * effective_mass * approach * approach;
    let amount = (energy * tuning.energy_damage_factor).min(tuning.max_contact_damage);

    let midpoint = match (
        world.store.get::<Transform>(a),
        world.store.get::<Transform>(b),
    ) {
        (Some(ta), Some(tb)) => (ta.position + tb.position) * 0.5,
        _ => Vec3::ZERO,
    };
    world.events.publish_damage(DamageEvent {
        target: a,
        attacker: Some(b),
        amount,
        point: midpoint,
        normal: -normal,
        weapon: None,
    });
    world.events.publish_damage(DamageEvent {
        target: b,
        attacker: Some(a),
        amount,
        point: midpoint,
        normal,
        weapon: None,
    });
}

/// Turns detonations into area damage with linear falloff.
pub struct Detonations;

impl System for Detonations {
    fn name(&self) -> &'static str {
        "detonations"
    }

    fn run(&mut self, world: &mut World, _dt: f32) {
        let detonations = world.events.take_detonations();
        for det in detonations {
            let Some(spec) = world.config.weapon(&det.weapon).cloned() else {
                debug!("detonation references unknown weapon '{}'", det.weapon);
                continue;
            };
            world.events.publish_effect(EffectRequest {
                kind: EffectKind::Explosion,
                position: det.point,
                radius: spec.explosion_radius.max(1.0),
            });
            if spec.explosion_radius > 0.0 {
                splash(
                    &world.store,
                    &world.grid,
                    &mut world.events,
                    det.point,
                    spec.explosion_radius,
                    spec.damage,
                    Some(det.origin),
                    Some(det.faction),
                    &[det.missile],
                );
            }
        }
    }
}

/// Windowed area damage: linear falloff `1 - d/r` from the blast point,
/// same-faction and self immune.
#[allow(clippy::too_many_arguments)]
fn splash(
    store: &ComponentStore,
    grid: &SpatialGrid,
    events: &mut Events,
    point: Vec3,
    radius: f32,
    max_damage: f32,
    attacker: Option<EntityId>,
    attacker_faction: Option<Faction>,
    exclude: &[EntityId],
) {
    for entry in grid.get_nearby(point, radius, None) {
        let GridKey::Entity(target) = entry.key else {
            continue;
        };
        if exclude.contains(&target) || attacker == Some(target) {
            continue;
        }
        if let (Some(af), Some(tf)) = (attacker_faction, store.get::<Faction>(target))
            && !af.is_hostile(*tf)
        {
            continue;
        }
        let Some(transform) = store.get::<Transform>(target) else {
            continue;
        };
        let distance = (transform.position - point).length();
        if distance >= radius {
            continue;
        }
        let amount = max_damage * (1.0 - distance / radius);
        events.publish_damage(DamageEvent {
            target,
            attacker,
            amount,
            point: transform.position,
            normal: normalize_or(transform.position - point, Vec3::X),
            weapon: None,
        });
    }
}

/// Applies damage events: shield first, spillover to hull, destruction
/// transition exactly once, ledger bookkeeping, indicator requests.
pub struct DamageApplication;

impl System for DamageApplication {
    fn name(&self) -> &'static str {
        "damage_application"
    }

    fn run(&mut self, world: &mut World, _dt: f32) {
        let damage = world.events.take_damage();
        for ev in damage {
            apply_damage(world, &ev);
        }
    }
}

fn apply_damage(world: &mut World, ev: &DamageEvent) {
    let Some(health) = world.store.get_mut::<Health>(ev.target) else {
        return;
    };
    // Re-entrant damage after death in the same tick must no-op.
    if !health.is_alive() {
        return;
    }

    let absorbed = health.shield.min(ev.amount);
    health.shield -= absorbed;
    let spill = ev.amount - absorbed;
    health.hull -= spill;
    health.regen_delay_ticks = SHIELD_REGEN_DELAY_TICKS;
    if let Some(attacker) = ev.attacker {
        health.log_damage(attacker, ev.amount);
    }

    let died = health.hull <= 0.0 && health.mark_destroyed();

    world.events.publish_indicator(IndicatorRequest {
        position: ev.point,
        amount: ev.amount,
    });
    if absorbed > 0.0 && spill <= 0.0 {
        world.events.publish_effect(EffectRequest {
            kind: EffectKind::ShieldFlash,
            position: ev.point,
            radius: 2.0,
        });
    }

    if died {
        on_destroyed(world, ev.target, ev.attacker);
    }
}

/// Destruction side effects: explosion request, role-specific debris.
fn on_destroyed(world: &mut World, target: EntityId, attacker: Option<EntityId>) {
    let position = world
        .store
        .get::<Transform>(target)
        .map(|t| t.position)
        .unwrap_or(Vec3::ZERO);
    let radius = world
        .store
        .get::<Collider>(target)
        .map(|c| c.radius)
        .unwrap_or(2.0);

    match attacker {
        Some(by) => info!("{target} destroyed by {by}"),
        None => info!("{target} destroyed"),
    }

    world.events.publish_effect(EffectRequest {
        kind: EffectKind::Explosion,
        position,
        radius,
    });

    let debris = match world.store.get::<Role>(target) {
        Some(Role::Asteroid) => Some((6, 25.0)),
        Some(Role::Ship) => Some((4, 18.0)),
        _ => None,
    };
    if let Some((count, speed)) = debris {
        world.events.publish_debris(DebrisRequest {
            origin: position,
            count,
            speed,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::LifecycleState;
    use crate::config::SimConfig;
    use crate::sim::systems::{collision::Collision, volumes::Volumes};
    use crate::spawn;

    const DT: f32 = 1.0 / 60.0;

    fn damage_event(target: EntityId, amount: f32) -> DamageEvent {
        DamageEvent {
            target,
            attacker: None,
            amount,
            point: Vec3::ZERO,
            normal: Vec3::Z,
            weapon: None,
        }
    }

    #[test]
    fn test_shield_absorbs_then_hull_spills() {
        let mut world = World::new(SimConfig::builtin(), 1);
        let ship = spawn::ship(&mut world.store, Vec3::ZERO, Faction(1));
        {
            let h = world.store.get_mut::<Health>(ship).unwrap();
            h.shield = 30.0;
            h.hull = 100.0;
        }

        world.events.publish_damage(damage_event(ship, 50.0));
        DamageApplication.run(&mut world, DT);

        let h = world.store.get::<Health>(ship).unwrap();
        assert_eq!(h.shield, 0.0);
        assert_eq!(h.hull, 80.0);
        assert!(h.is_alive());
    }

    #[test]
    fn test_death_transition_happens_once() {
        let mut world = World::new(SimConfig::builtin(), 1);
        let ship = spawn::ship(&mut world.store, Vec3::ZERO, Faction(1));
        world.store.get_mut::<Health>(ship).unwrap().shield = 0.0;

        // Two lethal events in one tick: second must no-op.
        world.events.publish_damage(damage_event(ship, 500.0));
        world.events.publish_damage(damage_event(ship, 500.0));
        DamageApplication.run(&mut world, DT);

        let h = world.store.get::<Health>(ship).unwrap();
        assert_eq!(h.state, LifecycleState::Destroyed);
        // Exactly one explosion request despite two lethal events.
        let explosions = world
            .events
            .effect_requests()
            .iter()
            .filter(|e| e.kind == EffectKind::Explosion)
            .count();
        assert_eq!(explosions, 1);
    }

    #[test]
    fn test_aoe_linear_falloff() {
        let mut world = World::new(SimConfig::builtin(), 1);
        let near = spawn::asteroid(&mut world.store, Vec3::new(5.0, 0.0, 0.0), 1.0);
        let far = spawn::asteroid(&mut world.store, Vec3::new(12.0, 0.0, 0.0), 1.0);
        Volumes.run(&mut world, DT);

        splash(
            &world.store,
            &world.grid,
            &mut world.events,
            Vec3::ZERO,
            10.0,
            100.0,
            None,
            Some(Faction(1)),
            &[],
        );

        let hits: Vec<_> = world.events.damage().to_vec();
        let near_hit = hits.iter().find(|d| d.target == near).expect("near target hit");
        assert!((near_hit.amount - 50.0).abs() < 1.0);
        assert!(
            !hits.iter().any(|d| d.target == far),
            "targets at or beyond the radius receive nothing"
        );
    }

    #[test]
    fn test_splash_spares_same_faction_and_attacker() {
        let mut world = World::new(SimConfig::builtin(), 1);
        let attacker = spawn::ship(&mut world.store, Vec3::new(3.0, 0.0, 0.0), Faction(1));
        let friend = spawn::ship(&mut world.store, Vec3::new(-3.0, 0.0, 0.0), Faction(1));
        let foe = spawn::ship(&mut world.store, Vec3::new(0.0, 3.0, 0.0), Faction(2));
        Volumes.run(&mut world, DT);

        splash(
            &world.store,
            &world.grid,
            &mut world.events,
            Vec3::ZERO,
            20.0,
            100.0,
            Some(attacker),
            Some(Faction(1)),
            &[],
        );

        let targets: Vec<_> = world.events.damage().iter().map(|d| d.target).collect();
        assert_eq!(targets, vec![foe]);
        let _ = friend;
    }

    #[test]
    fn test_projectile_hit_damages_and_expires_on_pierce() {
        let mut world = World::new(SimConfig::builtin(), 1);
        let shooter = spawn::ship(&mut world.store, Vec3::new(0.0, 0.0, 30.0), Faction(1));
        let target = spawn::ship(&mut world.store, Vec3::ZERO, Faction(2));
        let shot = spawn::fire_projectile(&mut world, shooter, -Vec3::Z, "pulse").unwrap();
        {
            let t = world.store.get_mut::<Transform>(shot).unwrap();
            t.prev_position = Vec3::new(0.0, 0.0, 15.0);
            t.position = Vec3::new(0.0, 0.0, -5.0);
        }

        Volumes.run(&mut world, DT);
        Collision::new().run(&mut world, DT);
        HitResolution.run(&mut world, DT);
        DamageApplication.run(&mut world, DT);

        let h = world.store.get::<Health>(target).unwrap();
        let pulse = world.config.weapon("pulse").unwrap();
        assert!((h.shield - (50.0 - pulse.damage)).abs() < 1e-3);
        // pierce 1 -> spent on first hit
        assert_eq!(
            world.store.get::<Health>(shot).unwrap().state,
            LifecycleState::Destroyed
        );
    }

    #[test]
    fn test_exhausted_shot_stops_at_first_target() {
        let mut world = World::new(SimConfig::builtin(), 1);
        let shooter = spawn::ship(&mut world.store, Vec3::new(0.0, 0.0, 60.0), Faction(1));
        let near = spawn::ship(&mut world.store, Vec3::new(0.0, 0.0, 8.0), Faction(2));
        let far = spawn::ship(&mut world.store, Vec3::new(0.0, 0.0, -8.0), Faction(2));
        let shot = spawn::fire_projectile(&mut world, shooter, -Vec3::Z, "pulse").unwrap();
        // One tick carries the pierce-1 shot straight through both ships.
        {
            let t = world.store.get_mut::<Transform>(shot).unwrap();
            t.prev_position = Vec3::new(0.0, 0.0, 18.0);
            t.position = Vec3::new(0.0, 0.0, -18.0);
        }

        Volumes.run(&mut world, DT);
        Collision::new().run(&mut world, DT);
        HitResolution.run(&mut world, DT);
        DamageApplication.run(&mut world, DT);

        let damaged = [near, far]
            .iter()
            .filter(|&&id| {
                let h = world.store.get::<Health>(id).unwrap();
                h.shield < h.shield_max
            })
            .count();
        assert_eq!(damaged, 1, "a pierce-1 shot must stop at its first target");
        assert_eq!(
            world.store.get::<Health>(shot).unwrap().state,
            LifecycleState::Destroyed
        );
    }

    #[test]
    fn test_projectile_ignores_friends_and_its_origin() {
        let mut world = World::new(SimConfig::builtin(), 1);
        let shooter = spawn::ship(&mut world.store, Vec3::new(0.0, 0.0, 30.0), Faction(1));
        let friend = spawn::ship(&mut world.store, Vec3::ZERO, Faction(1));
        let shot = spawn::fire_projectile(&mut world, shooter, -Vec3::Z, "pulse").unwrap();
        {
            let t = world.store.get_mut::<Transform>(shot).unwrap();
            t.prev_position = Vec3::new(0.0, 0.0, 15.0);
            t.position = Vec3::new(0.0, 0.0, -5.0);
        }

        Volumes.run(&mut world, DT);
        Collision::new().run(&mut world, DT);
        HitResolution.run(&mut world, DT);
        DamageApplication.run(&mut world, DT);

        let h = world.store.get::<Health>(friend).unwrap();
        assert_eq!(h.shield, h.shield_max);
        assert_eq!(h.hull, h.hull_max);
    }

    #[test]
    fn test_armed_missile_detonates_once() {
        let mut world = World::new(SimConfig::builtin(), 1);
        let shooter = spawn::ship(&mut world.store, Vec3::new(0.0, 0.0, 50.0), Faction(1));
        let target = spawn::asteroid(&mut world.store, Vec3::ZERO, 5.0);
        let m = spawn::missile(&mut world.store, &SimConfig::builtin(), shooter, -Vec3::Z, "torpedo")
            .unwrap();
        world.store.get_mut::<Missile>(m).unwrap().arming_ticks = 0;
        {
            let t = world.store.get_mut::<Transform>(m).unwrap();
            t.prev_position = Vec3::new(0.0, 0.0, 12.0);
            t.position = Vec3::new(0.0, 0.0, 2.0);
        }

        Volumes.run(&mut world, DT);
        Collision::new().run(&mut world, DT);
        HitResolution.run(&mut world, DT);

        assert_eq!(world.events.detonations().len(), 1);
        assert_eq!(
            world.store.get::<Health>(m).unwrap().state,
            LifecycleState::Destroyed
        );

        Detonations.run(&mut world, DT);
        DamageApplication.run(&mut world, DT);
        let h = world.store.get::<Health>(target).unwrap();
        assert!(h.hull < h.hull_max, "splash must damage the nearby asteroid");
    }

    #[test]
    fn test_unarmed_missile_does_not_detonate() {
        let mut world = World::new(SimConfig::builtin(), 1);
        let shooter = spawn::ship(&mut world.store, Vec3::new(0.0, 0.0, 50.0), Faction(1));
        spawn::asteroid(&mut world.store, Vec3::ZERO, 5.0);
        let m = spawn::missile(&mut world.store, &SimConfig::builtin(), shooter, -Vec3::Z, "torpedo")
            .unwrap();
        assert!(world.store.get::<Missile>(m).unwrap().arming_ticks > 0);
        {
            let t = world.store.get_mut::<Transform>(m).unwrap();
            t.prev_position = Vec3::new(0.0, 0.0, 12.0);
            t.position = Vec3::new(0.0, 0.0, 2.0);
        }

        Volumes.run(&mut world, DT);
        Collision::new().run(&mut world, DT);
        HitResolution.run(&mut world, DT);

        assert!(world.events.detonations().is_empty());
        assert!(world.store.get::<Health>(m).unwrap().is_alive());
    }

    #[test]
    fn test_grazing_contact_does_no_damage() {
        let mut world = World::new(SimConfig::builtin(), 1);
        let a = spawn::ship(&mut world.store, Vec3::ZERO, Faction(1));
        let b = spawn::ship(&mut world.store, Vec3::new(8.0, 0.0, 0.0), Faction(2));
        // Slow drift toward each other, below min_impact_speed.
        world.store.get_mut::<Body>(a).unwrap().velocity = Vec3::new(1.0, 0.0, 0.0);
        world.store.get_mut::<Body>(b).unwrap().velocity = Vec3::new(-1.0, 0.0, 0.0);

        Volumes.run(&mut world, DT);
        Collision::new().run(&mut world, DT);
        HitResolution.run(&mut world, DT);

        assert!(world.events.damage().is_empty());
    }

    #[test]
    fn test_fast_contact_damages_both_and_applies_impulse() {
        let mut world = World::new(SimConfig::builtin(), 1);
        let a = spawn::ship(&mut world.store, Vec3::ZERO, Faction(1));
        let b = spawn::ship(&mut world.store, Vec3::new(8.0, 0.0, 0.0), Faction(2));
        world.store.get_mut::<Body>(a).unwrap().velocity = Vec3::new(30.0, 0.0, 0.0);
        world.store.get_mut::<Body>(b).unwrap().velocity = Vec3::new(-30.0, 0.0, 0.0);

        Volumes.run(&mut world, DT);
        Collision::new().run(&mut world, DT);
        HitResolution.run(&mut world, DT);

        assert_eq!(world.events.damage().len(), 2);
        // Impulse reversed the approach.
        let va = world.store.get::<Body>(a).unwrap().velocity;
        let vb = world.store.get::<Body>(b).unwrap().velocity;
        assert!(va.x < 0.0);
        assert!(vb.x > 0.0);
    }

    #[test]
    fn test_player_station_ramming_fine() {
        let mut world = World::new(SimConfig::builtin(), 1);
        spawn::station(&mut world.store, Vec3::ZERO);
        let player = spawn::ship(&mut world.store, Vec3::new(60.0, 0.0, 0.0), Faction(1));
        spawn::make_player(&mut world.store, player);
        world.store.get_mut::<Body>(player).unwrap().velocity = Vec3::new(-60.0, 0.0, 0.0);

        Volumes.run(&mut world, DT);
        Collision::new().run(&mut world, DT);
        HitResolution.run(&mut world, DT);

        assert_eq!(world.events.fines().len(), 1);
        assert_eq!(world.events.fines()[0].offender, player);
    }
}
