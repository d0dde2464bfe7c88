//! Projectile factory.
//!
//! Builds fully parameterized projectiles from a spawn position, a target or
//! angle, and the variant's constants. Factories never touch the world; the
//! caller hands the results to an outbox.

use std::f64::consts::FRAC_PI_2;

use rand::Rng;

use skyfall_core::components::{
    Boss, Homing, Projectile, ProjectileKind, Pursuit, ScheduledProjectile,
};
use skyfall_core::constants::*;
use skyfall_core::enums::Turret;
use skyfall_core::types::{Color, Position, Velocity};

use crate::sampling::jitter;

/// Blue of the final-phase missile.
const FINAL_MISSILE_COLOR: Color = Color::rgb(60, 120, 255);

/// One barrage volley: bullets to fire now, and doubled copies to fire later.
#[derive(Debug, Default)]
pub struct BarrageVolley {
    pub immediate: Vec<Projectile>,
    pub scheduled: Vec<ScheduledProjectile>,
}

fn straight(origin: Position, angle: f64, speed: f64, kind: ProjectileKind) -> Projectile {
    Projectile {
        position: origin,
        velocity: Velocity::from_angle(angle, speed),
        width: BULLET_WIDTH,
        height: BULLET_HEIGHT,
        damage: BULLET_DAMAGE,
        color: BULLET_COLOR,
        angle,
        kind,
    }
}

/// A pair of decaying-homing missiles, one from each turret along its aim.
pub fn boss_missile_pair(boss: &Boss) -> [Projectile; 2] {
    [Turret::Left, Turret::Right].map(|turret| {
        let angle = boss.turrets.angle(turret);
        Projectile {
            position: boss.turret_origin(turret),
            velocity: Velocity::from_angle(angle, MISSILE_SPEED),
            width: MISSILE_WIDTH,
            height: MISSILE_HEIGHT,
            damage: MISSILE_DAMAGE,
            color: MISSILE_COLOR,
            angle,
            kind: ProjectileKind::BossMissile(Homing {
                strength: MISSILE_HOMING_INITIAL,
                decay: MISSILE_HOMING_DECAY,
                floor: MISSILE_HOMING_MIN,
                speed: MISSILE_SPEED,
            }),
        }
    })
}

/// Slow non-homing rocket from one turret, fired while the shield is up.
pub fn shield_rocket(boss: &Boss, turret: Turret) -> Projectile {
    let angle = boss.turrets.angle(turret);
    Projectile {
        position: boss.turret_origin(turret),
        velocity: Velocity::from_angle(angle, SHIELD_ROCKET_SPEED),
        width: SHIELD_ROCKET_WIDTH,
        height: SHIELD_ROCKET_HEIGHT,
        damage: MISSILE_DAMAGE,
        color: SHIELD_ROCKET_COLOR,
        angle,
        kind: ProjectileKind::ShieldRocket,
    }
}

/// Fixed-angle missile fired after a final-phase barrage series.
pub fn final_phase_missile(boss: &Boss, turret: Turret) -> Projectile {
    let angle = boss.turrets.angle(turret);
    Projectile {
        position: boss.turret_origin(turret),
        velocity: Velocity::from_angle(angle, MISSILE_SPEED),
        width: MISSILE_WIDTH,
        height: MISSILE_HEIGHT,
        damage: MISSILE_DAMAGE,
        color: FINAL_MISSILE_COLOR,
        angle,
        kind: ProjectileKind::BasicMissile,
    }
}

/// Accelerating homing missile launched where an escort died.
pub fn revenge_missile(from: Position, target: Position) -> Projectile {
    let angle = from.angle_to(&target);
    Projectile {
        position: from,
        velocity: Velocity::from_angle(angle, REVENGE_MISSILE_INITIAL_SPEED),
        width: REVENGE_MISSILE_WIDTH,
        height: REVENGE_MISSILE_HEIGHT,
        damage: REVENGE_MISSILE_DAMAGE,
        color: REVENGE_MISSILE_COLOR,
        angle,
        kind: ProjectileKind::RevengeMissile(Pursuit {
            speed: REVENGE_MISSILE_INITIAL_SPEED,
            acceleration: REVENGE_MISSILE_ACCELERATION,
            max_speed: REVENGE_MISSILE_MAX_SPEED,
            homing_factor: REVENGE_MISSILE_HOMING_FACTOR,
        }),
    }
}

/// Velocity of an escort shot from `muzzle` toward `target`.
pub fn escort_aim(muzzle: Position, target: Position) -> Velocity {
    Velocity::from_angle(muzzle.angle_to(&target), BULLET_SPEED)
}

/// One shot of an escort burst.
pub fn escort_shot(muzzle: Position, aim: Velocity) -> Projectile {
    straight(muzzle, aim.heading(), aim.speed(), ProjectileKind::Turret)
}

/// Fan of 6-9 bullets across a half circle below the boss.
///
/// The fan axis points straight down unless the player is more than one
/// hull-width off to the side, in which case it leans toward the player by
/// up to 30%. When `doubled` is set every bullet also gets a copy scheduled
/// [`BARRAGE_DOUBLE_DELAY_MS`] later.
pub fn barrage_volley<R: Rng + ?Sized>(
    boss: &Boss,
    target: Position,
    now: f64,
    doubled: bool,
    rng: &mut R,
) -> BarrageVolley {
    let origin = boss.nose();
    let count = rng.gen_range(BARRAGE_BULLETS_MIN..=BARRAGE_BULLETS_MAX);

    let dx = target.x - boss.position.x;
    let mut axis = FRAC_PI_2;
    if dx.abs() > boss.width {
        let toward_player = boss.position.angle_to(&target);
        let side_factor = (dx.abs() / (boss.width * 2.0)).min(BARRAGE_SIDE_FACTOR_MAX);
        axis += (toward_player - FRAC_PI_2) * side_factor;
    }
    axis += jitter(rng, BARRAGE_AXIS_JITTER);

    let start = axis - BARRAGE_SPREAD / 2.0;
    let step = BARRAGE_SPREAD / (count - 1) as f64;

    let mut volley = BarrageVolley::default();
    for i in 0..count {
        let angle = start + step * i as f64 + jitter(rng, BARRAGE_BULLET_JITTER);
        let bullet = straight(origin, angle, BULLET_SPEED, ProjectileKind::Straight);
        volley.immediate.push(bullet);
        if doubled {
            volley.scheduled.push(ScheduledProjectile {
                projectile: bullet,
                fire_at: now + BARRAGE_DOUBLE_DELAY_MS,
            });
        }
    }
    volley
}
