//! Entity allocation and typed sparse component storage
//!
//! Entities are opaque integer handles with no inherent data. Components
//! are plain records stored in per-type sparse tables keyed by entity id.
//! Behavior lives in systems, never in components.

pub mod entity;
pub mod store;

pub use entity::EntityId;
pub use store::ComponentStore;
