//! Escort system: drives each active escort.

use hecs::World;
use rand::Rng;

use skyfall_boss_ai::escort;
use skyfall_core::components::{Escort, PlayerSnapshot};
use skyfall_core::outbox::Outbox;
use skyfall_core::types::Bounds;

pub fn run<R: Rng + ?Sized>(
    world: &mut World,
    player: &PlayerSnapshot,
    bounds: &Bounds,
    now: f64,
    rng: &mut R,
    out: &mut Outbox,
) {
    for (_entity, escort) in world.query_mut::<&mut Escort>() {
        escort::update(escort, player, bounds, now, rng, out);
    }
}

/// Number of escorts still in play.
pub fn active_count(world: &World) -> usize {
    world
        .query::<&Escort>()
        .iter()
        .filter(|(_, escort)| escort.active)
        .count()
}
