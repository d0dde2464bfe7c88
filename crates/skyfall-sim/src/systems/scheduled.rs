//! Promotion of scheduled projectiles into the live sets.

use hecs::World;

use skyfall_core::components::ScheduledProjectile;

use crate::world_setup;

/// Move every scheduled projectile whose fire time has come into the world.
/// Runs before the collision sweep so a promoted shot can hit the same tick.
pub fn promote(world: &mut World, scheduled: &mut Vec<ScheduledProjectile>, now: f64) -> usize {
    let mut promoted = 0;
    scheduled.retain(|entry| {
        if entry.fire_at <= now {
            world_setup::spawn_enemy_projectile(world, entry.projectile);
            promoted += 1;
            false
        } else {
            true
        }
    });
    promoted
}
