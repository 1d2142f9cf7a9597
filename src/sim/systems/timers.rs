//! Countdown decrements
//!
//! All time-bounded behavior is an explicit tick counter: weapon
//! cooldowns, missile arming delays, shield regen delays, and lifetimes.
//! Expired lifetimes force-destroy the entity silently (no explosion
//! effects - the shot simply fizzles).

use crate::components::{Health, Lifetime, Missile, WeaponState};
use crate::sim::{System, World};

pub struct Timers;

impl System for Timers {
    fn name(&self) -> &'static str {
        "timers"
    }

    fn run(&mut self, world: &mut World, _dt: f32) {
        let store = &mut world.store;

        for id in store.ids_with::<WeaponState>() {
            if let Some(ws) = store.get_mut::<WeaponState>(id) {
                ws.cooldown_ticks = ws.cooldown_ticks.saturating_sub(1);
            }
        }

        for id in store.ids_with::<Missile>() {
            if let Some(m) = store.get_mut::<Missile>(id) {
                m.arming_ticks = m.arming_ticks.saturating_sub(1);
            }
        }

        for id in store.ids_with::<Health>() {
            if let Some(h) = store.get_mut::<Health>(id) {
                h.regen_delay_ticks = h.regen_delay_ticks.saturating_sub(1);
            }
        }

        for id in store.ids_with::<Lifetime>() {
            let expired = match store.get_mut::<Lifetime>(id) {
                Some(lt) => {
                    lt.remaining_ticks = lt.remaining_ticks.saturating_sub(1);
                    lt.remaining_ticks == 0
                }
                None => false,
            };
            if expired {
                // Only entities still alive transition; the guard makes a
                // second expiry in the same run a no-op.
                if let Some(h) = store.get_mut::<Health>(id) {
                    h.mark_destroyed();
                }
                store.remove::<Lifetime>(id);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::LifecycleState;
    use crate::config::SimConfig;
    use crate::spawn;
    use glam::Vec3;

    #[test]
    fn test_lifetime_expiry_destroys() {
        let mut world = World::new(SimConfig::builtin(), 1);
        let id = spawn::debris(&mut world.store, Vec3::ZERO, Vec3::ZERO);
        world
            .store
            .get_mut::<Lifetime>(id)
            .unwrap()
            .remaining_ticks = 2;

        let mut timers = Timers;
        timers.run(&mut world, 1.0 / 60.0);
        assert!(world.store.get::<Health>(id).unwrap().is_alive());

        timers.run(&mut world, 1.0 / 60.0);
        assert_eq!(
            world.store.get::<Health>(id).unwrap().state,
            LifecycleState::Destroyed
        );
        assert!(world.store.get::<Lifetime>(id).is_none());
    }

    #[test]
    fn test_cooldown_and_arming_count_down() {
        let mut world = World::new(SimConfig::builtin(), 1);
        let shooter = spawn::ship(&mut world.store, Vec3::ZERO, crate::components::Faction(1));
        let missile = spawn::missile(
            &mut world.store,
            &SimConfig::builtin(),
            shooter,
            Vec3::X,
            "torpedo",
        )
        .unwrap();
        world
            .store
            .get_mut::<WeaponState>(shooter)
            .unwrap()
            .cooldown_ticks = 2;

        let mut timers = Timers;
        timers.run(&mut world, 1.0 / 60.0);
        assert_eq!(
            world
                .store
                .get::<WeaponState>(shooter)
                .unwrap()
                .cooldown_ticks,
            1
        );
        assert_eq!(world.store.get::<Missile>(missile).unwrap().arming_ticks, 29);
    }
}
