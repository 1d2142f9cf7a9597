//! Entity identifiers
//!
//! An entity is an opaque integer handle. IDs are allocated from a
//! monotonically increasing counter and never reused within a run, so a
//! stale reference (e.g. a damage-ledger key for a dead attacker) can
//! never silently alias a newer entity.

use serde::{Deserialize, Serialize};

/// Opaque entity handle. Ordered so collections of ids iterate
/// deterministically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityId(u32);

impl EntityId {
    /// Raw id value, for logging and composite keys.
    #[inline]
    pub fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "e{}", self.0)
    }
}

/// Allocates entity ids. Never reuses an id within a run.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct EntityAllocator {
    next: u32,
}

impl EntityAllocator {
    pub fn new() -> Self {
        Self { next: 1 }
    }

    /// Allocate the next id.
    pub fn allocate(&mut self) -> EntityId {
        let id = EntityId(self.next);
        self.next += 1;
        id
    }
}
