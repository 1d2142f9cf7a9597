//! Collision detection
//!
//! Broad phase pairs candidates through the spatial grid (each pair
//! visited once via a canonical ordered key), confirms with sphere
//! tests - composite shapes test their world-space sub-volumes - then
//! classifies by role:
//!
//! - ship vs collectible: pickup event
//! - shot vs shot: ignored
//! - shot vs body: continuous swept hit against the target's bounding
//!   sphere expanded by the shot's radius (no tunneling at high closing
//!   speed)
//! - body vs body: contact event plus a deferred positional correction
//!   split by inverse-mass ratio

use std::collections::HashSet;

use glam::Vec3;

use crate::components::{Body, Collider, Health, Role, Transform, WorldSphere};
use crate::ecs::EntityId;
use crate::events::{HitEvent, PickupEvent};
use crate::normalize_or;
use crate::sim::{System, World, sweep};
use crate::spatial::GridKey;

/// Narrow-phase result for body-vs-body contact.
struct Contact {
    /// From the first body toward the second
    normal: Vec3,
    penetration: f32,
}

pub struct Collision {
    // Reused across ticks to avoid per-frame allocation churn.
    seen_pairs: HashSet<(EntityId, EntityId)>,
}

impl Collision {
    pub fn new() -> Self {
        Self {
            seen_pairs: HashSet::new(),
        }
    }
}

impl Default for Collision {
    fn default() -> Self {
        Self::new()
    }
}

impl System for Collision {
    fn name(&self) -> &'static str {
        "collision"
    }

    fn run(&mut self, world: &mut World, _dt: f32) {
        self.seen_pairs.clear();

        let ids = world.store.query3::<Transform, Collider, Role>();
        for id in ids {
            let store = &world.store;
            // Dead entities are absent from the grid; they must not act
            // as query objects either.
            if store.get::<Health>(id).is_some_and(|h| !h.is_alive()) {
                continue;
            }
            let (Some(transform), Some(collider), Some(role)) = (
                store.get::<Transform>(id),
                store.get::<Collider>(id),
                store.get::<Role>(id).copied(),
            ) else {
                continue;
            };
            // Shots query with their swept bound, matching how they were
            // registered in the grid.
            let (center, radius) = if role.is_shot() {
                let mid = (transform.prev_position + transform.position) * 0.5;
                let half = (transform.position - transform.prev_position).length() * 0.5;
                (mid, half + collider.radius)
            } else {
                (transform.position, collider.radius)
            };

            for candidate in world.grid.get_nearby(center, radius, None) {
                let GridKey::Entity(other) = candidate.key else {
                    continue;
                };
                if other == id {
                    continue;
                }
                let pair = if id < other { (id, other) } else { (other, id) };
                if !self.seen_pairs.insert(pair) {
                    continue;
                }
                check_pair(world, pair.0, pair.1);
            }
        }
    }
}

/// Broad + narrow test, then classification by role priority.
fn check_pair(world: &mut World, a: EntityId, b: EntityId) {
    let store = &world.store;
    let (Some(ta), Some(tb)) = (store.get::<Transform>(a), store.get::<Transform>(b)) else {
        return;
    };
    let (Some(ca), Some(cb)) = (store.get::<Collider>(a), store.get::<Collider>(b)) else {
        return;
    };
    let (Some(&ra), Some(&rb)) = (store.get::<Role>(a), store.get::<Role>(b)) else {
        return;
    };

    // (b) shots never interact with each other
    if ra.is_shot() && rb.is_shot() {
        return;
    }

    // (c) fast-body hit: the sweep over the tick's path *is* the test;
    // an endpoint-only broad check would reintroduce tunneling.
    if ra.is_shot() {
        resolve_shot(world, a, b);
        return;
    }
    if rb.is_shot() {
        resolve_shot(world, b, a);
        return;
    }

    // Broad phase: enclosing bounding spheres.
    let delta = tb.position - ta.position;
    let reach = ca.radius + cb.radius;
    if delta.length_squared() > reach * reach {
        return;
    }

    // Narrow phase: composite shapes test sub-volume pairs.
    let Some(contact) = narrow_contact(ta, ca, tb, cb) else {
        return;
    };

    // (a) pickup has top priority among confirmed intersections
    if ra == Role::Ship && rb == Role::Collectible {
        world.events.publish_pickup(PickupEvent {
            collector: a,
            collectible: b,
        });
        return;
    }
    if rb == Role::Ship && ra == Role::Collectible {
        world.events.publish_pickup(PickupEvent {
            collector: b,
            collectible: a,
        });
        return;
    }

    // (d) generic dynamic collision
    resolve_contact(world, a, b, contact);
}

/// Deepest intersecting sub-volume pair, or the plain sphere overlap for
/// simple shapes. `None` when the detailed shapes do not actually touch.
fn narrow_contact(ta: &Transform, ca: &Collider, tb: &Transform, cb: &Collider) -> Option<Contact> {
    let single_a = [WorldSphere {
        center: ta.position,
        radius: ca.radius,
    }];
    let single_b = [WorldSphere {
        center: tb.position,
        radius: cb.radius,
    }];
    let vols_a: &[WorldSphere] = if ca.is_composite() {
        &ca.world_volumes
    } else {
        &single_a
    };
    let vols_b: &[WorldSphere] = if cb.is_composite() {
        &cb.world_volumes
    } else {
        &single_b
    };

    let mut best: Option<Contact> = None;
    for va in vols_a {
        for vb in vols_b {
            let delta = vb.center - va.center;
            let reach = va.radius + vb.radius;
            let dist_sq = delta.length_squared();
            if dist_sq > reach * reach {
                continue;
            }
            let dist = dist_sq.sqrt();
            let penetration = reach - dist;
            if best.as_ref().is_none_or(|c| penetration > c.penetration) {
                best = Some(Contact {
                    normal: normalize_or(delta, Vec3::X),
                    penetration,
                });
            }
        }
    }
    best
}

/// Swept test from the shot's previous position to its current one,
/// against the target's bounding sphere expanded by the shot's radius.
fn resolve_shot(world: &mut World, shot: EntityId, target: EntityId) {
    let store = &world.store;
    let (Some(ts), Some(cs)) = (store.get::<Transform>(shot), store.get::<Collider>(shot)) else {
        return;
    };
    let (Some(tt), Some(ct)) = (
        store.get::<Transform>(target),
        store.get::<Collider>(target),
    ) else {
        return;
    };

    let expanded = ct.radius + cs.radius;
    let Some(point) =
        sweep::segment_sphere_hit(ts.prev_position, ts.position, tt.position, expanded)
    else {
        return;
    };
    world.events.publish_hit(HitEvent::Shot {
        shot,
        target,
        point,
    });
}

/// Publish a contact event and accumulate deferred positional corrections
/// split by inverse mass. Corrections apply once at the next integration
/// step; applying them immediately would compound order-sensitively when
/// one body collides with several others in the same tick.
fn resolve_contact(world: &mut World, a: EntityId, b: EntityId, contact: Contact) {
    let store = &mut world.store;
    let (ia, va) = match store.get::<Body>(a) {
        Some(body) => (body.inv_mass(), body.velocity),
        None => return,
    };
    let (ib, vb) = match store.get::<Body>(b) {
        Some(body) => (body.inv_mass(), body.velocity),
        None => return,
    };
    let total_inv = ia + ib;
    if total_inv <= 0.0 {
        // Static-static pairs have nothing to resolve.
        return;
    }

    let push = contact.normal * contact.penetration;
    if ia > 0.0
        && let Some(body) = store.get_mut::<Body>(a)
    {
        body.pending_correction -= push * (ia / total_inv);
    }
    if ib > 0.0
        && let Some(body) = store.get_mut::<Body>(b)
    {
        body.pending_correction += push * (ib / total_inv);
    }

    world.events.publish_hit(HitEvent::Contact {
        a,
        b,
        normal: contact.normal,
        relative_velocity: vb - va,
    });
}
