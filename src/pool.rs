//! Fixed-capacity pools for high-churn transient entities
//!
//! Projectiles and floating damage indicators are pre-created once and
//! cycled instead of being created and removed per use. A slot is free
//! when its Health is not `Alive`; acquisition scans from a rotating
//! cursor so reuse spreads across slots instead of hammering slot 0.
//! Exhaustion is reported and the request dropped - never an error.

use log::warn;

use crate::components::Health;
use crate::ecs::{ComponentStore, EntityId};

/// A fixed set of reusable entity slots.
pub struct EntityPool {
    name: &'static str,
    slots: Vec<EntityId>,
    cursor: usize,
}

impl EntityPool {
    /// Wrap pre-created entities as pool slots. Every slot entity must
    /// carry a Health component (its lifecycle state is the free flag).
    pub fn new(name: &'static str, slots: Vec<EntityId>) -> Self {
        Self {
            name,
            slots,
            cursor: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of slots currently in use (Alive).
    pub fn in_use(&self, store: &ComponentStore) -> usize {
        self.slots
            .iter()
            .filter(|id| store.get::<Health>(**id).is_some_and(|h| h.is_alive()))
            .count()
    }

    /// Claim the next free slot, reactivating its Health. Returns `None`
    /// (after logging) when every slot is in use; the caller drops the
    /// request.
    pub fn acquire(&mut self, store: &mut ComponentStore) -> Option<EntityId> {
        let capacity = self.slots.len();
        for step in 0..capacity {
            let index = (self.cursor + step) % capacity;
            let id = self.slots[index];
            let Some(health) = store.get_mut::<Health>(id) else {
                continue;
            };
            if !health.is_alive() {
                health.reactivate();
                self.cursor = (index + 1) % capacity;
                return Some(id);
            }
        }
        warn!("pool '{}' exhausted ({} slots), request dropped", self.name, capacity);
        None
    }
}
