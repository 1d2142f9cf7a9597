//! Voidrift - entity-component simulation core for a 3D space combat game
//!
//! Core modules:
//! - `ecs`: Entity allocation and typed sparse component storage
//! - `components`: Plain data records attached to entities
//! - `events`: Per-tick typed event queues
//! - `spatial`: Uniform 3D hash grid for broad-phase proximity queries
//! - `sim`: Deterministic fixed-timestep simulation (scheduler + systems)
//! - `pool`: Fixed-capacity pools for high-churn transient entities
//! - `config`: Data-driven weapon/collision/pool tunables
//!
//! The simulation is single-threaded and deterministic: fixed timestep,
//! seeded RNG, stable iteration order (by entity ID), no rendering or
//! platform dependencies.

pub mod components;
pub mod config;
pub mod ecs;
pub mod events;
pub mod pool;
pub mod sim;
pub mod spatial;
pub mod spawn;

pub use components::{
    Body, BodyKind, Collider, Faction, Health, LifecycleState, Role, Transform,
};
pub use config::SimConfig;
pub use ecs::{ComponentStore, EntityId};
pub use sim::{Scheduler, System, World};
pub use spatial::SpatialGrid;

use glam::Vec3;

/// Simulation constants
pub mod consts {
    use glam::Vec3;

    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame the scheduler will accumulate (seconds)
    pub const MAX_FRAME_TIME: f32 = 0.25;

    /// Half-extent of the cubic play space, centered at the origin
    pub const WORLD_HALF_EXTENT: f32 = 2_000.0;
    /// Spatial grid cell size in world units
    pub const GRID_CELL_SIZE: f32 = 100.0;

    /// Where pooled entities are parked while inactive (far outside play space)
    pub const PARK_POSITION: Vec3 = Vec3::new(
        WORLD_HALF_EXTENT * 4.0,
        WORLD_HALF_EXTENT * 4.0,
        WORLD_HALF_EXTENT * 4.0,
    );

    /// Debris lifetime in ticks
    pub const DEBRIS_LIFETIME_TICKS: u32 = 180;
    /// Floating damage indicator lifetime in ticks
    pub const INDICATOR_LIFETIME_TICKS: u32 = 60;
}

/// Normalize a vector, falling back to the given direction when degenerate
#[inline]
pub fn normalize_or(v: Vec3, fallback: Vec3) -> Vec3 {
    let n = v.normalize_or_zero();
    if n.length_squared() < 0.5 { fallback } else { n }
}
