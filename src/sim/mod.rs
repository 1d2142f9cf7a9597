//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod scheduler;
pub mod sweep;
pub mod systems;

pub use scheduler::{Scheduler, System};
pub use sweep::segment_sphere_hit;

use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::config::SimConfig;
use crate::consts;
use crate::ecs::ComponentStore;
use crate::events::Events;
use crate::pool::EntityPool;
use crate::spatial::SpatialGrid;
use crate::spawn;

/// Shared simulation state handed to every system. Systems receive it by
/// explicit reference - no global registries.
pub struct World {
    pub store: ComponentStore,
    pub events: Events,
    pub grid: SpatialGrid,
    pub config: SimConfig,
    /// Seeded RNG; the only source of randomness in the simulation
    pub rng: Pcg32,
    pub projectile_pool: EntityPool,
    pub indicator_pool: EntityPool,
    /// Completed tick count
    pub tick: u64,
}

impl World {
    /// Build a world, pre-creating the transient-entity pools.
    pub fn new(config: SimConfig, seed: u64) -> Self {
        let mut store = ComponentStore::new();
        let projectile_slots = (0..config.pools.projectiles)
            .map(|_| spawn::projectile_slot(&mut store))
            .collect();
        let indicator_slots = (0..config.pools.indicators)
            .map(|_| spawn::indicator_slot(&mut store))
            .collect();

        Self {
            store,
            events: Events::new(),
            grid: SpatialGrid::new(consts::GRID_CELL_SIZE, consts::WORLD_HALF_EXTENT),
            config,
            rng: Pcg32::seed_from_u64(seed),
            projectile_pool: EntityPool::new("projectiles", projectile_slots),
            indicator_pool: EntityPool::new("indicators", indicator_slots),
            tick: 0,
        }
    }
}

/// Register the core systems on a scheduler in their canonical order.
/// Callers insert AI/command systems between timers and movement.
pub fn register_core_systems(scheduler: &mut Scheduler) {
    scheduler.add_system(Box::new(systems::timers::Timers));
    scheduler.add_system(Box::new(systems::movement::Movement));
    scheduler.add_system(Box::new(systems::volumes::Volumes));
    scheduler.add_system(Box::new(systems::collision::Collision::new()));
    scheduler.add_system(Box::new(systems::damage::HitResolution));
    scheduler.add_system(Box::new(systems::damage::Detonations));
    scheduler.add_system(Box::new(systems::damage::DamageApplication));
    scheduler.add_system(Box::new(systems::loot::Loot));
    scheduler.add_system(Box::new(systems::cleanup::Cleanup));
}
