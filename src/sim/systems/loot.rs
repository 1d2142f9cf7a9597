//! Destruction bookkeeping: each entity that reached `Destroyed` this
//! tick is visited exactly once, its damage ledger is settled into a
//! destroyed event, and the lifecycle advances to `DropsHandled`.

use log::info;

use crate::components::{Health, LifecycleState, Role};
use crate::events::DestroyedEvent;
use crate::sim::{System, World};

pub struct Loot;

impl System for Loot {
    fn name(&self) -> &'static str {
        "loot"
    }

    fn run(&mut self, world: &mut World, _dt: f32) {
        // Settle pickups first so collected items enter the destruction
        // pass below in the same tick. What the collector gains is the
        // consumer's business; here the collectible just leaves the world.
        let pickups = world.events.pickups().to_vec();
        for pickup in pickups {
            let collected = world
                .store
                .get_mut::<Health>(pickup.collectible)
                .is_some_and(Health::mark_destroyed);
            if collected {
                info!("{} collected {}", pickup.collector, pickup.collectible);
            }
        }

        let pending: Vec<_> = world
            .store
            .ids_with::<Health>()
            .into_iter()
            .filter(|&id| {
                world
                    .store
                    .get::<Health>(id)
                    .is_some_and(|h| h.state == LifecycleState::Destroyed)
            })
            .collect();

        for id in pending {
            let role = world.store.get::<Role>(id).copied().unwrap_or(Role::Debris);

            // Credit only attackers that still exist; a destroyer that died
            // first forfeits its share.
            let rewards: Vec<_> = world
                .store
                .get::<Health>(id)
                .map(|h| {
                    h.ledger
                        .iter()
                        .filter(|(attacker, _)| world.store.has_entity(**attacker))
                        .map(|(attacker, amount)| (*attacker, *amount))
                        .collect()
                })
                .unwrap_or_default();

            let advanced = world
                .store
                .get_mut::<Health>(id)
                .is_some_and(|h| h.advance(LifecycleState::Destroyed, LifecycleState::DropsHandled));
            if !advanced {
                continue;
            }
            world.events.publish_destroyed(DestroyedEvent {
                entity: id,
                role,
                rewards,
            });
        }
    }
}
