//! Entity spawn factories for the encounter world.
//!
//! Every projectile lives in exactly one set, tagged by a marker component:
//! enemy bullets, enemy missiles, or player bullets.

use hecs::{Entity, World};
use rand::Rng;

use skyfall_boss_ai::sampling;
use skyfall_core::components::*;
use skyfall_core::config::BossTuning;
use skyfall_core::constants::*;
use skyfall_core::enums::ProjectileClass;
use skyfall_core::types::{Bounds, Position, Velocity};

/// Spawn the boss above the top edge, ready for its entrance.
pub fn spawn_boss<R: Rng + ?Sized>(
    world: &mut World,
    bounds: &Bounds,
    tuning: &BossTuning,
    now: f64,
    rng: &mut R,
) -> Entity {
    let first_burst = sampling::count(rng, &tuning.burst_count);
    world.spawn((Boss::spawn(bounds, tuning, now, first_burst),))
}

pub fn spawn_escort(world: &mut World, escort: Escort) -> Entity {
    world.spawn((escort,))
}

/// Add an enemy projectile to the set matching its class.
pub fn spawn_enemy_projectile(world: &mut World, projectile: Projectile) -> Entity {
    match projectile.class() {
        ProjectileClass::Bullet => world.spawn((projectile, EnemyBullet)),
        ProjectileClass::Missile => world.spawn((projectile, EnemyMissile)),
    }
}

/// Player bullet travelling straight up from the muzzle.
pub fn spawn_player_bullet(world: &mut World, x: f64, y: f64, damage: i32) -> Entity {
    let angle = -std::f64::consts::FRAC_PI_2;
    let bullet = Projectile {
        position: Position::new(x, y),
        velocity: Velocity::from_angle(angle, PLAYER_BULLET_SPEED),
        width: PLAYER_BULLET_WIDTH,
        height: PLAYER_BULLET_HEIGHT,
        damage,
        color: PLAYER_BULLET_COLOR,
        angle,
        kind: ProjectileKind::Straight,
    };
    world.spawn((bullet, PlayerBullet))
}

/// Despawn everything except player bullets. Used when the encounter ends.
pub fn clear_hostiles(world: &mut World, despawn_buffer: &mut Vec<Entity>) {
    despawn_buffer.clear();
    despawn_buffer.extend(world.query_mut::<&Boss>().into_iter().map(|(e, _)| e));
    despawn_buffer.extend(world.query_mut::<&Escort>().into_iter().map(|(e, _)| e));
    despawn_buffer.extend(
        world
            .query_mut::<(&Projectile, &EnemyBullet)>()
            .into_iter()
            .map(|(e, _)| e),
    );
    despawn_buffer.extend(
        world
            .query_mut::<(&Projectile, &EnemyMissile)>()
            .into_iter()
            .map(|(e, _)| e),
    );
    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}
