//! Per-tick typed event queues
//!
//! Systems communicate within a tick by publishing events that systems
//! running *later* in the fixed order consume. Queues preserve publish
//! order and are wiped exactly once at tick end by the scheduler; no
//! event ever survives into the next tick.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::components::{Faction, Role};
use crate::ecs::EntityId;

/// A ship ran over a collectible.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PickupEvent {
    pub collector: EntityId,
    pub collectible: EntityId,
}

/// Confirmed intersection, classified by the collision system.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum HitEvent {
    /// A projectile or missile struck a body; `point` is the first
    /// intersection along the shot's swept path.
    Shot {
        shot: EntityId,
        target: EntityId,
        point: Vec3,
    },
    /// Two physical bodies overlapped. Carries the contact normal
    /// (from `a` toward `b`) and the relative velocity of `b` w.r.t. `a`
    /// at the moment of contact.
    Contact {
        a: EntityId,
        b: EntityId,
        normal: Vec3,
        relative_velocity: Vec3,
    },
}

/// An armed missile warhead went off.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetonationEvent {
    pub missile: EntityId,
    pub weapon: String,
    pub origin: EntityId,
    pub faction: Faction,
    pub point: Vec3,
}

/// Damage to apply to a target. Consumed by the damage-application stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DamageEvent {
    pub target: EntityId,
    pub attacker: Option<EntityId>,
    pub amount: f32,
    pub point: Vec3,
    pub normal: Vec3,
    pub weapon: Option<String>,
}

/// An entity finished the loot stage; rewards are the surviving ledger
/// entries, for external reward/score consumers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DestroyedEvent {
    pub entity: EntityId,
    pub role: Role,
    pub rewards: Vec<(EntityId, f32)>,
}

/// Request to scatter debris around a destruction site.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebrisRequest {
    pub origin: Vec3,
    pub count: u32,
    pub speed: f32,
}

/// Visual effect request for the (external) effects collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EffectRequest {
    pub kind: EffectKind,
    pub position: Vec3,
    pub radius: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EffectKind {
    Explosion,
    ShieldFlash,
    Spark,
}

/// Request to spawn a floating damage indicator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndicatorRequest {
    pub position: Vec3,
    pub amount: f32,
}

/// Penalty for a controlled entity ramming the station too fast.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FineEvent {
    pub offender: EntityId,
    pub impact_speed: f32,
}

/// The tick's mailboxes, one FIFO queue per event type.
#[derive(Debug, Default)]
pub struct Events {
    pickups: Vec<PickupEvent>,
    hits: Vec<HitEvent>,
    detonations: Vec<DetonationEvent>,
    damage: Vec<DamageEvent>,
    destroyed: Vec<DestroyedEvent>,
    debris_requests: Vec<DebrisRequest>,
    effect_requests: Vec<EffectRequest>,
    indicator_requests: Vec<IndicatorRequest>,
    fines: Vec<FineEvent>,
}

impl Events {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn publish_pickup(&mut self, e: PickupEvent) {
        self.pickups.push(e);
    }

    pub fn publish_hit(&mut self, e: HitEvent) {
        self.hits.push(e);
    }

    pub fn publish_detonation(&mut self, e: DetonationEvent) {
        self.detonations.push(e);
    }

    pub fn publish_damage(&mut self, e: DamageEvent) {
        self.damage.push(e);
    }

    pub fn publish_destroyed(&mut self, e: DestroyedEvent) {
        self.destroyed.push(e);
    }

    pub fn publish_debris(&mut self, e: DebrisRequest) {
        self.debris_requests.push(e);
    }

    pub fn publish_effect(&mut self, e: EffectRequest) {
        self.effect_requests.push(e);
    }

    pub fn publish_indicator(&mut self, e: IndicatorRequest) {
        self.indicator_requests.push(e);
    }

    pub fn publish_fine(&mut self, e: FineEvent) {
        self.fines.push(e);
    }

    pub fn pickups(&self) -> &[PickupEvent] {
        &self.pickups
    }

    pub fn hits(&self) -> &[HitEvent] {
        &self.hits
    }

    pub fn detonations(&self) -> &[DetonationEvent] {
        &self.detonations
    }

    pub fn damage(&self) -> &[DamageEvent] {
        &self.damage
    }

    pub fn destroyed(&self) -> &[DestroyedEvent] {
        &self.destroyed
    }

    pub fn debris_requests(&self) -> &[DebrisRequest] {
        &self.debris_requests
    }

    pub fn effect_requests(&self) -> &[EffectRequest] {
        &self.effect_requests
    }

    pub fn indicator_requests(&self) -> &[IndicatorRequest] {
        &self.indicator_requests
    }

    pub fn fines(&self) -> &[FineEvent] {
        &self.fines
    }

    /// Take ownership of a queue for exactly-once consumption. The queue
    /// is left empty; consumers process the drained events this tick.
    pub fn take_hits(&mut self) -> Vec<HitEvent> {
        std::mem::take(&mut self.hits)
    }

    pub fn take_detonations(&mut self) -> Vec<DetonationEvent> {
        std::mem::take(&mut self.detonations)
    }

    pub fn take_damage(&mut self) -> Vec<DamageEvent> {
        std::mem::take(&mut self.damage)
    }

    pub fn take_debris_requests(&mut self) -> Vec<DebrisRequest> {
        std::mem::take(&mut self.debris_requests)
    }

    pub fn take_indicator_requests(&mut self) -> Vec<IndicatorRequest> {
        std::mem::take(&mut self.indicator_requests)
    }

    /// Wipe every queue. Called exactly once at tick end by the scheduler.
    pub fn clear_all(&mut self) {
        self.pickups.clear();
        self.hits.clear();
        self.detonations.clear();
        self.damage.clear();
        self.destroyed.clear();
        self.debris_requests.clear();
        self.effect_requests.clear();
        self.indicator_requests.clear();
        self.fines.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn test_fifo_order_and_clear() {
        let mut events = Events::new();
        for amount in [1.0, 2.0, 3.0] {
            events.publish_damage(DamageEvent {
                target: dummy_id(),
                attacker: None,
                amount,
                point: Vec3::ZERO,
                normal: Vec3::Z,
                weapon: None,
            });
        }
        let amounts: Vec<f32> = events.damage().iter().map(|d| d.amount).collect();
        assert_eq!(amounts, vec![1.0, 2.0, 3.0]);

        events.clear_all();
        assert!(events.damage().is_empty());
    }

    #[test]
    fn test_take_leaves_queue_empty() {
        let mut events = Events::new();
        events.publish_hit(HitEvent::Shot {
            shot: dummy_id(),
            target: dummy_id(),
            point: Vec3::ZERO,
        });
        assert_eq!(events.take_hits().len(), 1);
        assert!(events.hits().is_empty());
    }

    fn dummy_id() -> EntityId {
        crate::ecs::entity::EntityAllocator::new().allocate()
    }
}
