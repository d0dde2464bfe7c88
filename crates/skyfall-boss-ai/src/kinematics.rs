//! Per-variant projectile motion.

use std::f64::consts::{PI, TAU};

use glam::DVec2;

use skyfall_core::components::{Projectile, ProjectileKind};
use skyfall_core::types::{Position, Velocity};

/// Wrap an angle into [-PI, PI).
pub fn normalize_angle(angle: f64) -> f64 {
    (angle + PI).rem_euclid(TAU) - PI
}

/// Advance a projectile by one tick toward `target`.
///
/// Straight variants keep their velocity. Boss missiles turn by a fraction
/// of the heading error that decays toward a floor, at constant speed.
/// Revenge missiles blend their direction toward the target by a constant
/// factor and accelerate up to their speed cap.
pub fn advance(projectile: &mut Projectile, target: Position) {
    match &mut projectile.kind {
        ProjectileKind::Straight
        | ProjectileKind::Turret
        | ProjectileKind::ShieldRocket
        | ProjectileKind::BasicMissile => {}
        ProjectileKind::BossMissile(homing) => {
            homing.strength = (homing.strength - homing.decay).max(homing.floor);
            let desired = projectile.position.angle_to(&target);
            let error = normalize_angle(desired - projectile.angle);
            projectile.angle += error * homing.strength;
            projectile.velocity = Velocity::from_angle(projectile.angle, homing.speed);
        }
        ProjectileKind::RevengeMissile(pursuit) => {
            let current = projectile
                .velocity
                .as_dvec2()
                .try_normalize()
                .unwrap_or(DVec2::Y);
            let desired = (target.as_dvec2() - projectile.position.as_dvec2())
                .try_normalize()
                .unwrap_or(current);
            let heading = (current + (desired - current) * pursuit.homing_factor)
                .try_normalize()
                .unwrap_or(current);

            pursuit.speed = (pursuit.speed + pursuit.acceleration).min(pursuit.max_speed);
            projectile.velocity = Velocity::from(heading * pursuit.speed);
            projectile.angle = projectile.velocity.heading();
        }
    }

    projectile.position = projectile.position.offset(&projectile.velocity);
}
