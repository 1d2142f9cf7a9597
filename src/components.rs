//! Component records
//!
//! Plain data attached to entities. No behavior lives here beyond small
//! accessors; systems do all the work. Entity roles are a closed enum
//! matched exhaustively in each system instead of a class hierarchy.

use std::collections::BTreeMap;

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::ecs::EntityId;
use crate::spatial::Category;

/// World-space placement. `prev_position` is captured by the movement
/// system before integration each tick; the swept collision test depends
/// on it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
    pub prev_position: Vec3,
}

impl Transform {
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            rotation: Quat::IDENTITY,
            prev_position: position,
        }
    }
}

/// Whether a body ever moves. Static bodies have infinite effective mass
/// for impulse and correction purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BodyKind {
    Static,
    Dynamic,
}

/// Physical body state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Body {
    pub kind: BodyKind,
    pub velocity: Vec3,
    /// Commanded acceleration for this tick (set by AI/input, external)
    pub acceleration: Vec3,
    pub mass: f32,
    pub max_speed: f32,
    /// Linear damping per second (0 = none)
    pub damping: f32,
    /// Positional correction accumulated by collision resolution, applied
    /// once at the next integration step then cleared
    pub pending_correction: Vec3,
}

impl Body {
    pub fn dynamic(mass: f32, max_speed: f32) -> Self {
        Self {
            kind: BodyKind::Dynamic,
            velocity: Vec3::ZERO,
            acceleration: Vec3::ZERO,
            mass,
            max_speed,
            damping: 0.0,
            pending_correction: Vec3::ZERO,
        }
    }

    pub fn fixed(mass: f32) -> Self {
        Self {
            kind: BodyKind::Static,
            velocity: Vec3::ZERO,
            acceleration: Vec3::ZERO,
            mass,
            max_speed: 0.0,
            damping: 0.0,
            pending_correction: Vec3::ZERO,
        }
    }

    /// Inverse mass: zero for static bodies or non-positive mass.
    #[inline]
    pub fn inv_mass(&self) -> f32 {
        if self.kind == BodyKind::Static || self.mass <= 0.0 {
            0.0
        } else {
            1.0 / self.mass
        }
    }
}

/// A sphere in the entity's local space, part of a composite shape.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LocalSphere {
    pub offset: Vec3,
    pub radius: f32,
}

/// A sphere in world space, recomputed from the Transform every tick.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct WorldSphere {
    pub center: Vec3,
    pub radius: f32,
}

/// Collision shape: an enclosing bounding sphere, plus an optional list of
/// local-space sub-volumes for composite shapes (e.g. a station built from
/// a ring of spheres).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Collider {
    /// Broad-phase bounding sphere radius; always encloses the entity
    pub radius: f32,
    pub local_volumes: Vec<LocalSphere>,
    /// World-space counterparts of `local_volumes`, refreshed each tick
    /// before collision detection runs
    #[serde(skip)]
    pub world_volumes: Vec<WorldSphere>,
}

impl Collider {
    pub fn sphere(radius: f32) -> Self {
        Self {
            radius,
            local_volumes: Vec::new(),
            world_volumes: Vec::new(),
        }
    }

    pub fn composite(radius: f32, local_volumes: Vec<LocalSphere>) -> Self {
        Self {
            radius,
            local_volumes,
            world_volumes: Vec::new(),
        }
    }

    #[inline]
    pub fn is_composite(&self) -> bool {
        !self.local_volumes.is_empty()
    }
}

/// Destruction pipeline stage. Only ever moves forward, except pooled
/// entities which reset to `Alive` on reactivation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LifecycleState {
    Alive,
    Destroyed,
    DropsHandled,
    CleanupPending,
}

/// Hull, shield and destruction lifecycle. The damage ledger records
/// applied damage per attacker for reward attribution; attacker ids are
/// weak references and are only read opportunistically.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Health {
    pub hull: f32,
    pub hull_max: f32,
    pub shield: f32,
    pub shield_max: f32,
    /// Shield points regained per second once the regen delay has elapsed
    pub shield_regen: f32,
    /// Ticks until shield regeneration resumes; reset on every hit
    pub regen_delay_ticks: u32,
    pub state: LifecycleState,
    pub ledger: BTreeMap<EntityId, f32>,
}

impl Health {
    pub fn new(hull_max: f32, shield_max: f32, shield_regen: f32) -> Self {
        Self {
            hull: hull_max,
            hull_max,
            shield: shield_max,
            shield_max,
            shield_regen,
            regen_delay_ticks: 0,
            state: LifecycleState::Alive,
            ledger: BTreeMap::new(),
        }
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.state == LifecycleState::Alive
    }

    /// Advance `Alive -> Destroyed`. Returns true only on the transition,
    /// false if the entity was already past `Alive` - the first-writer-wins
    /// guard against double-destruction.
    pub fn mark_destroyed(&mut self) -> bool {
        if self.state == LifecycleState::Alive {
            self.state = LifecycleState::Destroyed;
            true
        } else {
            false
        }
    }

    /// Advance one forward step if the current state matches. Backward
    /// transitions are never taken.
    pub fn advance(&mut self, from: LifecycleState, to: LifecycleState) -> bool {
        if self.state == from && to > from {
            self.state = to;
            true
        } else {
            false
        }
    }

    /// Reset for pool reactivation: the one sanctioned return to `Alive`.
    pub fn reactivate(&mut self) {
        self.hull = self.hull_max;
        self.shield = self.shield_max;
        self.regen_delay_ticks = 0;
        self.state = LifecycleState::Alive;
        self.ledger.clear();
    }

    /// Record applied damage against an attacker.
    pub fn log_damage(&mut self, attacker: EntityId, amount: f32) {
        *self.ledger.entry(attacker).or_insert(0.0) += amount;
    }
}

/// Friend/foe group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Faction(pub u8);

impl Faction {
    #[inline]
    pub fn is_hostile(self, other: Faction) -> bool {
        self != other
    }
}

/// Entity role tag. Dispatch in systems pattern-matches on this closed
/// set instead of using virtual methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    Ship,
    Asteroid,
    Station,
    Missile,
    Projectile,
    Collectible,
    Debris,
    Indicator,
}

impl Role {
    /// Broad-phase category for spatial grid registration; indicators are
    /// presentation-only and never enter the grid.
    pub fn category(self) -> Option<Category> {
        match self {
            Role::Ship => Some(Category::Ship),
            Role::Asteroid => Some(Category::Asteroid),
            Role::Station => Some(Category::Station),
            Role::Missile => Some(Category::Missile),
            Role::Projectile => Some(Category::Projectile),
            Role::Collectible => Some(Category::Collectible),
            Role::Debris => Some(Category::Debris),
            Role::Indicator => None,
        }
    }

    /// Projectiles and missiles are "shots": thin, fast bodies that use
    /// the continuous swept hit test.
    #[inline]
    pub fn is_shot(self) -> bool {
        matches!(self, Role::Projectile | Role::Missile)
    }

    /// Pooled kinds cycle through fixed-capacity pools instead of being
    /// created and removed per use.
    #[inline]
    pub fn is_pooled(self) -> bool {
        matches!(self, Role::Projectile | Role::Indicator)
    }
}

/// Live projectile data. Weapon stats are looked up in the config by id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub weapon: String,
    /// Entity that fired this shot; immune to it
    pub origin: EntityId,
    pub faction: Faction,
    /// Remaining targets this shot may pass through
    pub pierce: u32,
}

/// Live missile data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Missile {
    pub weapon: String,
    pub origin: EntityId,
    pub faction: Faction,
    /// Ticks until the warhead arms; the missile cannot detonate before
    pub arming_ticks: u32,
}

impl Missile {
    #[inline]
    pub fn armed(&self) -> bool {
        self.arming_ticks == 0
    }
}

/// Generic countdown: the entity is force-destroyed (silently, no effects)
/// when it expires. Used by projectiles, debris and indicators.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Lifetime {
    pub remaining_ticks: u32,
}

/// Per-weapon-mount cooldown state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeaponState {
    pub weapon: String,
    pub cooldown_ticks: u32,
}

impl WeaponState {
    #[inline]
    pub fn ready(&self) -> bool {
        self.cooldown_ticks == 0
    }
}

/// Marker for the player-controlled entity (fine path for station
/// collisions applies to it).
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct PlayerControlled;

/// Floating damage indicator payload, read by the presentation layer.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Indicator {
    pub amount: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lifecycle_forward_only() {
        let mut h = Health::new(100.0, 50.0, 1.0);
        assert!(h.mark_destroyed());
        assert!(!h.mark_destroyed()); // second destruction is a no-op

        assert!(h.advance(LifecycleState::Destroyed, LifecycleState::DropsHandled));
        assert!(!h.advance(LifecycleState::Destroyed, LifecycleState::DropsHandled));
        assert!(h.advance(LifecycleState::DropsHandled, LifecycleState::CleanupPending));
        assert_eq!(h.state, LifecycleState::CleanupPending);

        // Pool reactivation is the only path back to Alive.
        h.reactivate();
        assert!(h.is_alive());
        assert_eq!(h.hull, h.hull_max);
    }

    #[test]
    fn test_inv_mass_static_is_zero() {
        assert_eq!(Body::fixed(1e9).inv_mass(), 0.0);
        assert!(Body::dynamic(2.0, 10.0).inv_mass() > 0.0);
    }

    #[test]
    fn test_ledger_accumulates() {
        let mut h = Health::new(100.0, 0.0, 0.0);
        let mut alloc = crate::ecs::entity::EntityAllocator::new();
        let attacker = alloc.allocate();
        h.log_damage(attacker, 10.0);
        h.log_damage(attacker, 5.0);
        assert_eq!(h.ledger.get(&attacker).copied(), Some(15.0));
    }
}
