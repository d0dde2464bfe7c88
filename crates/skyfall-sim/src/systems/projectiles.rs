//! Enemy projectile kinematics.

use hecs::World;
use rand::Rng;

use skyfall_boss_ai::{effects, kinematics};
use skyfall_core::components::{EnemyBullet, EnemyMissile, Projectile, ProjectileKind};
use skyfall_core::outbox::Outbox;
use skyfall_core::types::Position;

/// Advance every enemy projectile one tick toward `target` (the player).
/// Homing missiles leave a smoke trail.
pub fn run<R: Rng + ?Sized>(world: &mut World, target: Position, rng: &mut R, out: &mut Outbox) {
    for (_entity, (projectile, _bullet)) in world.query_mut::<(&mut Projectile, &EnemyBullet)>() {
        kinematics::advance(projectile, target);
    }

    let mut trails = Vec::new();
    for (_entity, (projectile, _missile)) in world.query_mut::<(&mut Projectile, &EnemyMissile)>() {
        kinematics::advance(projectile, target);
        if matches!(
            projectile.kind,
            ProjectileKind::BossMissile(_) | ProjectileKind::RevengeMissile(_)
        ) {
            let tail = Position::new(
                projectile.position.x - projectile.angle.cos() * projectile.height / 2.0,
                projectile.position.y - projectile.angle.sin() * projectile.height / 2.0,
            );
            trails.push(effects::missile_trail(rng, tail));
        }
    }
    out.enqueue_particles(trails);
}
