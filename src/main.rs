//! Headless demo: seeds a small scenario and runs the simulation for a
//! few seconds of game time, logging what the pipeline produced.

use glam::Vec3;
use log::info;

use voidrift::components::{Faction, Health, Role};
use voidrift::config::SimConfig;
use voidrift::consts::{MAX_SUBSTEPS, SIM_DT};
use voidrift::sim::{register_core_systems, Scheduler, System, World};
use voidrift::spawn;

/// Runs after cleanup, while the tick's events are still in their
/// mailboxes, and narrates destructions and fines.
struct TickReport;

impl System for TickReport {
    fn name(&self) -> &'static str {
        "tick_report"
    }

    fn run(&mut self, world: &mut World, _dt: f32) {
        for d in world.events.destroyed() {
            info!("tick {}: {} ({:?}) destroyed", world.tick, d.entity, d.role);
            for (attacker, amount) in &d.rewards {
                info!("  credit {attacker} for {amount:.1} damage dealt");
            }
        }
        for fine in world.events.fines() {
            info!(
                "tick {}: fine for {} (impact {:.1} m/s)",
                world.tick, fine.offender, fine.impact_speed
            );
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut world = World::new(SimConfig::builtin(), 0xC0FFEE);
    let mut scheduler = Scheduler::new(SIM_DT, MAX_SUBSTEPS);
    register_core_systems(&mut scheduler);
    scheduler.add_system(Box::new(TickReport));

    spawn::station(&mut world.store, Vec3::ZERO);
    for i in 0..6 {
        let angle = i as f32 * std::f32::consts::TAU / 6.0;
        let pos = Vec3::new(angle.cos(), 0.2 * i as f32, angle.sin()) * 400.0;
        spawn::asteroid(&mut world.store, pos, 4.0 + i as f32);
    }
    spawn::collectible(&mut world.store, Vec3::new(120.0, 0.0, 0.0));

    let player = spawn::ship(&mut world.store, Vec3::new(0.0, 0.0, 300.0), Faction(1));
    spawn::make_player(&mut world.store, player);
    let raider = spawn::ship(&mut world.store, Vec3::new(0.0, 0.0, 240.0), Faction(2));

    info!(
        "scenario seeded: {} entities, player {player}, raider {raider}",
        world.store.entity_count()
    );

    // Ten seconds of game time: a pulse volley at the raider for the
    // first two seconds, then a torpedo.
    let total_ticks: u64 = 600;
    let mut fired = 0usize;
    while world.tick < total_ticks {
        if world.tick < 120
            && world.tick % 12 == 0
            && spawn::fire_projectile(&mut world, player, -Vec3::Z, "pulse").is_some()
        {
            fired += 1;
        }
        if world.tick == 150 {
            let _ = spawn::missile(
                &mut world.store,
                &world.config.clone(),
                player,
                -Vec3::Z,
                "torpedo",
            );
        }

        scheduler.advance(&mut world, SIM_DT);
    }

    let alive = world
        .store
        .entities()
        .filter(|&id| {
            world.store.get::<Health>(id).is_some_and(Health::is_alive)
                && world.store.get::<Role>(id).is_some_and(|r| !r.is_pooled())
        })
        .count();
    info!("done after {} ticks: {fired} shots fired, {alive} entities alive", world.tick);

    match world.store.get::<Health>(raider) {
        Some(h) if h.is_alive() => info!(
            "raider survived with hull {:.0}/{:.0}, shield {:.0}/{:.0}",
            h.hull, h.hull_max, h.shield, h.shield_max
        ),
        _ => info!("raider did not survive"),
    }
}
