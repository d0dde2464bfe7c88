//! Cleanup system: removes projectiles that left the field and escorts that
//! are no longer in play.

use hecs::{Entity, World};

use skyfall_core::components::{EnemyBullet, EnemyMissile, Escort, PlayerBullet, Projectile};
use skyfall_core::types::Bounds;

/// Uses a pre-allocated buffer to avoid per-tick allocation.
pub fn run(world: &mut World, bounds: &Bounds, despawn_buffer: &mut Vec<Entity>) {
    despawn_buffer.clear();

    let gone = |p: &Projectile| p.is_off_field(bounds) || !p.is_well_formed();

    for (entity, (projectile, _)) in world.query_mut::<(&Projectile, &EnemyBullet)>() {
        if gone(projectile) {
            despawn_buffer.push(entity);
        }
    }
    for (entity, (projectile, _)) in world.query_mut::<(&Projectile, &EnemyMissile)>() {
        if gone(projectile) {
            despawn_buffer.push(entity);
        }
    }
    for (entity, (projectile, _)) in world.query_mut::<(&Projectile, &PlayerBullet)>() {
        if gone(projectile) {
            despawn_buffer.push(entity);
        }
    }

    // Escorts that were defeated or flew off the bottom edge.
    for (entity, escort) in world.query_mut::<&Escort>() {
        if !escort.active {
            despawn_buffer.push(entity);
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}
