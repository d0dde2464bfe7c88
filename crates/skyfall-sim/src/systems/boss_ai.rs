//! Boss AI system: runs the boss update for the boss entity.

use hecs::{Entity, World};
use rand::Rng;

use skyfall_boss_ai::movement::MovementBranch;
use skyfall_boss_ai::TickContext;
use skyfall_core::components::{Boss, PlayerSnapshot};
use skyfall_core::outbox::Outbox;

/// Returns the movement branch taken, or `None` if there is no boss.
pub fn run<R: Rng + ?Sized>(
    world: &mut World,
    boss: Option<Entity>,
    player: &PlayerSnapshot,
    ctx: &TickContext<'_>,
    rng: &mut R,
    out: &mut Outbox,
) -> Option<MovementBranch> {
    let entity = boss?;
    let mut boss = world.get::<&mut Boss>(entity).ok()?;
    Some(skyfall_boss_ai::update(&mut boss, player, ctx, rng, out))
}
