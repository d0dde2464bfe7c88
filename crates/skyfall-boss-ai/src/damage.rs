//! Damage rules for the boss and hit tests against its weapons.

use skyfall_core::components::Boss;
use skyfall_core::constants::*;
use skyfall_core::timer::Timer;
use skyfall_core::types::Position;

/// Where a player bullet meets the boss, if anywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BulletContact {
    /// No contact, or the boss is invincible and the bullet passes through.
    Miss,
    /// Absorbed by the raised shield.
    Shield,
    /// Struck the vulnerable hull.
    Hull,
}

/// Outcome of damage applied to the hull.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BossHit {
    Damaged,
    Defeated,
}

/// Classify a bullet against the boss.
///
/// While shielded the test is a circle of the shield radius; the hull behind
/// it cannot be hit. Otherwise the hull is a rectangle, ignored entirely
/// during the entrance or the temporary grace window.
pub fn bullet_contact(boss: &Boss, at: &Position, width: f64, height: f64) -> BulletContact {
    if boss.phase.shield_up() {
        let reach = boss.shield_radius() + width / 2.0;
        if at.range_sq_to(&boss.position) < reach * reach {
            return BulletContact::Shield;
        }
        return BulletContact::Miss;
    }
    if boss.is_invincible() {
        return BulletContact::Miss;
    }
    if boss.hull_contains(at, width, height) {
        BulletContact::Hull
    } else {
        BulletContact::Miss
    }
}

/// Apply hull damage.
///
/// In the final phase a hidden true health is initialized to twice the
/// visible hit points on the first hit, then loses twice the damage per
/// hit. Death in the final phase is decided by that true health alone.
pub fn apply_damage(boss: &mut Boss, damage: i32, now: f64) -> BossHit {
    boss.hit_flash = Some(Timer::armed(now, HIT_FLASH_MS));

    if boss.phase.is_final() {
        let actual = match boss.actual_health {
            Some(health) if health != 0 => health,
            _ => boss.hit_points * 2,
        };
        boss.hit_points -= damage;
        let actual = actual - damage * 2;
        boss.actual_health = Some(actual);
        if actual <= 0 {
            return BossHit::Defeated;
        }
        return BossHit::Damaged;
    }

    boss.hit_points -= damage;
    if boss.hit_points <= 0 {
        BossHit::Defeated
    } else {
        BossHit::Damaged
    }
}

/// Rectangular test of a player box against the firing laser beam.
///
/// The beam is a narrow vertical strip from the boss nose down to the
/// bottom of the screen. Always false unless the laser is firing.
pub fn laser_contact(boss: &Boss, at: &Position, width: f64, height: f64) -> bool {
    if !boss.attacks.laser.is_firing() {
        return false;
    }
    let beam_x = boss.position.x;
    let beam_top = boss.nose().y;
    let overlaps_x = (at.x - beam_x).abs() < (width + LASER_WIDTH) / 2.0;
    let below_nose = at.y + height / 2.0 > beam_top;
    overlaps_x && below_nose
}
