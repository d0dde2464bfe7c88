//! Player bullet integration.

use hecs::World;

use skyfall_core::components::{PlayerBullet, Projectile};

pub fn run(world: &mut World) {
    for (_entity, (bullet, _tag)) in world.query_mut::<(&mut Projectile, &PlayerBullet)>() {
        bullet.position = bullet.position.offset(&bullet.velocity);
    }
}
