//! Escort spawner system.
//!
//! The spawner is enabled only while the boss shield is up and not
//! breaking; the gate is refreshed every tick from the boss phase.

use hecs::{Entity, World};
use rand::Rng;

use skyfall_boss_ai::escort::{EscortSpawner, SpawnOutcome};
use skyfall_core::components::{Boss, EnemyMissile, Projectile};
use skyfall_core::config::EscortTuning;
use skyfall_core::events::EncounterEvent;
use skyfall_core::outbox::Outbox;
use skyfall_core::types::Bounds;

use crate::systems::escorts;
use crate::world_setup;

#[allow(clippy::too_many_arguments)]
pub fn run<R: Rng + ?Sized>(
    world: &mut World,
    boss: Option<Entity>,
    spawner: &mut EscortSpawner,
    tuning: &EscortTuning,
    bounds: &Bounds,
    now: f64,
    rng: &mut R,
    out: &mut Outbox,
) {
    let Some(boss_entity) = boss else {
        spawner.enabled = false;
        return;
    };

    let active = escorts::active_count(world);
    let revenge_load = live_revenge_missiles(world);

    let outcome = {
        let Ok(boss) = world.get::<&Boss>(boss_entity) else {
            spawner.enabled = false;
            return;
        };
        spawner.enabled = boss.phase.shield_up();
        spawner.tick(active, revenge_load, &boss, bounds, tuning, now, rng)
    };

    match outcome {
        SpawnOutcome::Spawned(escort) => {
            let x = escort.position.x;
            world_setup::spawn_escort(world, *escort);
            log::debug!("escort spawned at x={:.0}", x);
            out.emit(EncounterEvent::EscortSpawned { x });
        }
        SpawnOutcome::AtCapacity => {
            log::debug!("escort cap reached, retrying");
        }
        SpawnOutcome::Blocked => {
            log::debug!("no clear escort lane, slot skipped");
        }
        SpawnOutcome::Disabled | SpawnOutcome::NotDue => {}
    }
}

/// Revenge missiles currently in flight.
pub fn live_revenge_missiles(world: &World) -> usize {
    world
        .query::<(&Projectile, &EnemyMissile)>()
        .iter()
        .filter(|(_, (missile, _))| missile.kind.is_revenge())
        .count()
}
