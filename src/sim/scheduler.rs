//! Fixed-timestep scheduler
//!
//! Accumulates wall-clock time and advances the simulation in fixed
//! steps, running every registered system in registration order, then
//! clearing the event queues. The substep bound caps catch-up work so a
//! slow frame cannot snowball into an ever-growing backlog.

use log::{debug, trace};

use super::World;
use crate::consts;

/// A simulation system. Must be idempotent per call and must not assume
/// any wall-clock duration beyond the fixed `dt` it is handed.
pub trait System {
    fn name(&self) -> &'static str;
    fn run(&mut self, world: &mut World, dt: f32);
}

/// Drives systems at a fixed rate decoupled from the caller's frame rate.
pub struct Scheduler {
    step: f32,
    max_substeps: u32,
    time_scale: f32,
    accumulator: f32,
    systems: Vec<Box<dyn System>>,
}

impl Scheduler {
    pub fn new(step: f32, max_substeps: u32) -> Self {
        Self {
            step,
            max_substeps,
            time_scale: 1.0,
            accumulator: 0.0,
            systems: Vec::new(),
        }
    }

    /// Append a system. Registration order is execution order, fixed for
    /// the scheduler's lifetime.
    pub fn add_system(&mut self, system: Box<dyn System>) {
        debug!("registered system #{}: {}", self.systems.len(), system.name());
        self.systems.push(system);
    }

    /// Speed the simulation up or down. The catch-up bound scales with
    /// the factor so faster time does not starve the simulation.
    pub fn set_time_scale(&mut self, scale: f32) {
        self.time_scale = scale.max(0.0);
    }

    pub fn time_scale(&self) -> f32 {
        self.time_scale
    }

    /// Discard accumulated time (e.g. after unpausing).
    pub fn reset_accumulator(&mut self) {
        self.accumulator = 0.0;
    }

    /// Accumulate `elapsed` wall seconds and run as many fixed steps as
    /// fit, bounded. Returns the number of ticks executed.
    pub fn advance(&mut self, world: &mut World, elapsed: f32) -> u32 {
        let elapsed = elapsed.min(consts::MAX_FRAME_TIME) * self.time_scale;
        self.accumulator += elapsed;

        let bound = self.substep_bound();
        let mut substeps = 0;
        while self.accumulator >= self.step && substeps < bound {
            self.run_tick(world);
            self.accumulator -= self.step;
            substeps += 1;
        }
        if substeps == bound && self.accumulator >= self.step {
            // Falling behind; drop the backlog rather than spiral.
            debug!(
                "substep bound {} hit, dropping {:.3}s of backlog",
                bound, self.accumulator
            );
            self.accumulator = 0.0;
        }
        substeps
    }

    /// Run exactly one fixed step regardless of accumulated time.
    pub fn run_tick(&mut self, world: &mut World) {
        for system in &mut self.systems {
            trace!("tick {} system {}", world.tick, system.name());
            system.run(world, self.step);
        }
        world.events.clear_all();
        world.tick += 1;
    }

    fn substep_bound(&self) -> u32 {
        if self.time_scale > 1.0 {
            self.max_substeps * self.time_scale.ceil() as u32
        } else {
            self.max_substeps
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimConfig;
    use std::cell::Cell;
    use std::rc::Rc;

    struct Counter {
        runs: Rc<Cell<u32>>,
    }

    impl System for Counter {
        fn name(&self) -> &'static str {
            "counter"
        }
        fn run(&mut self, _world: &mut World, _dt: f32) {
            self.runs.set(self.runs.get() + 1);
        }
    }

    fn world() -> World {
        World::new(SimConfig::builtin(), 7)
    }

    #[test]
    fn test_accumulator_runs_whole_steps_only() {
        let runs = Rc::new(Cell::new(0));
        let mut scheduler = Scheduler::new(0.01, 8);
        scheduler.add_system(Box::new(Counter { runs: runs.clone() }));
        let mut world = world();

        scheduler.advance(&mut world, 0.005);
        assert_eq!(runs.get(), 0);

        scheduler.advance(&mut world, 0.006); // 0.011 accumulated
        assert_eq!(runs.get(), 1);
        assert_eq!(world.tick, 1);
    }

    #[test]
    fn test_substep_bound_prevents_spiral() {
        let runs = Rc::new(Cell::new(0));
        let mut scheduler = Scheduler::new(0.01, 4);
        scheduler.add_system(Box::new(Counter { runs: runs.clone() }));
        let mut world = world();

        // A full second of backlog must clamp to 4 substeps.
        let ticks = scheduler.advance(&mut world, 1.0);
        assert_eq!(ticks, 4);
        assert_eq!(runs.get(), 4);
    }

    #[test]
    fn test_time_scale_scales_bound() {
        let mut scheduler = Scheduler::new(0.01, 4);
        scheduler.set_time_scale(2.0);
        let mut world = world();
        let ticks = scheduler.advance(&mut world, 0.1);
        // 0.2s scaled backlog, bound 8: all 8 run (with backlog dropped).
        assert_eq!(ticks, 8);
    }

    #[test]
    fn test_events_cleared_each_tick() {
        let mut scheduler = Scheduler::new(0.01, 8);

        struct Publisher;
        impl System for Publisher {
            fn name(&self) -> &'static str {
                "publisher"
            }
            fn run(&mut self, world: &mut World, _dt: f32) {
                world.events.publish_fine(crate::events::FineEvent {
                    offender: world.store.entities().next().unwrap(),
                    impact_speed: 1.0,
                });
            }
        }
        struct Observer {
            seen: Rc<Cell<usize>>,
        }
        impl System for Observer {
            fn name(&self) -> &'static str {
                "observer"
            }
            fn run(&mut self, world: &mut World, _dt: f32) {
                self.seen.set(world.events.fines().len());
            }
        }

        let seen = Rc::new(Cell::new(0));
        scheduler.add_system(Box::new(Publisher));
        scheduler.add_system(Box::new(Observer { seen: seen.clone() }));
        let mut world = world();

        scheduler.run_tick(&mut world);
        // Later system saw this tick's event...
        assert_eq!(seen.get(), 1);
        // ...but nothing survives the tick boundary.
        assert!(world.events.fines().is_empty());

        scheduler.run_tick(&mut world);
        assert_eq!(seen.get(), 1, "only the current tick's publish is visible");
    }
}
