//! Shield subsystem: raising, pulsing, cracking and breaking the bubble.
//!
//! The break sequence here only covers the boss itself. Clearing escorts and
//! live missiles is done by the encounter, which owns those entities.

use std::f64::consts::TAU;

use rand::Rng;

use skyfall_core::components::{Boss, CrackSegment, LaserState, ShieldState};
use skyfall_core::config::BossTuning;
use skyfall_core::constants::*;
use skyfall_core::enums::{BossPhase, Turret};
use skyfall_core::events::EncounterEvent;
use skyfall_core::outbox::Outbox;
use skyfall_core::timer::Timer;
use skyfall_core::types::Position;

use crate::sampling::{between, duration, jitter};

/// Result of a revenge missile striking the shield.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShieldHit {
    pub remaining: i32,
    /// True only on the hit that took the shield to zero.
    pub broken: bool,
}

/// Raise the shield once the boss has settled at the center.
pub fn raise<R: Rng + ?Sized>(boss: &mut Boss, tuning: &BossTuning, now: f64, rng: &mut R) {
    boss.phase = BossPhase::Shielded;
    boss.temporary_invincible = false;
    boss.shield.alpha = SHIELD_BASE_ALPHA;
    boss.shield.pulse = 0.0;
    boss.shield.crack_level = 0;
    boss.shield.cracks.clear();
    boss.attacks.laser = LaserState::Idle;
    boss.attacks.shield_rocket = Some(Timer::armed(
        now,
        duration(rng, &tuning.shield_rocket_interval_ms),
    ));
    boss.attacks.shield_rocket_turret = Turret::Left;
}

/// Advance the shield shimmer.
pub fn pulse(shield: &mut ShieldState) {
    shield.alpha = SHIELD_BASE_ALPHA + shield.pulse.sin() * SHIELD_PULSE_AMPLITUDE;
    shield.pulse += SHIELD_PULSE_STEP;
}

/// Register one hit on a raised shield. Cracks are regenerated on every hit.
pub fn apply_hit<R: Rng + ?Sized>(boss: &mut Boss, rng: &mut R) -> ShieldHit {
    if !boss.phase.shield_up() || boss.shield.health <= 0 {
        return ShieldHit {
            remaining: boss.shield.health.max(0),
            broken: false,
        };
    }

    boss.shield.health -= 1;
    if boss.shield.health == 1 {
        boss.shield.crack_level = 1;
    }
    let width = boss.width;
    generate_cracks(&mut boss.shield, width, rng);
    log::debug!("shield hit, {} remaining", boss.shield.health);

    ShieldHit {
        remaining: boss.shield.health,
        broken: boss.shield.health <= 0,
    }
}

/// Start the break animation. The boss is vulnerable from this moment.
pub fn begin_break(boss: &mut Boss, tuning: &BossTuning, now: f64, out: &mut Outbox) {
    log::info!("boss shield breaking");
    boss.temporary_invincible = false;
    boss.phase = BossPhase::ShieldBreaking;
    boss.shield.break_timer = Some(Timer::armed(now, tuning.shield_break_ms));
    boss.attacks.shield_rocket = None;
    out.emit(EncounterEvent::ShieldBroken);
}

/// Rebuild the crack pattern for the current crack level.
///
/// Cracks start near the rim at random angles and grow inward in short
/// segments, occasionally forking. Higher levels mean more cracks and more
/// forks.
pub fn generate_cracks<R: Rng + ?Sized>(shield: &mut ShieldState, boss_width: f64, rng: &mut R) {
    shield.cracks.clear();
    let radius = boss_width * SHIELD_VISUAL_RADIUS_FACTOR;
    let level = shield.crack_level;
    let primaries = CRACK_BASE_COUNT + CRACK_COUNT_PER_LEVEL * level;
    let branch_chance = CRACK_BRANCH_CHANCE_BASE + level as f64 * CRACK_BRANCH_CHANCE_PER_LEVEL;

    for _ in 0..primaries {
        let angle = rng.gen::<f64>() * TAU;
        let start_radius = radius * between(rng, 0.9, 1.0);
        let start = Position::new(angle.cos() * start_radius, angle.sin() * start_radius);
        grow(&mut shield.cracks, rng, start, angle, -start_radius, 0, branch_chance);
    }
}

/// Lengths are negative: the crack runs against its outward angle.
fn grow<R: Rng + ?Sized>(
    cracks: &mut Vec<CrackSegment>,
    rng: &mut R,
    from: Position,
    angle: f64,
    length: f64,
    depth: u32,
    branch_chance: f64,
) {
    if length >= -1.0 || depth > CRACK_MAX_DEPTH {
        return;
    }

    let segment = length.max(-8.0 - rng.gen::<f64>() * 12.0);
    let to = Position::new(
        from.x + angle.cos() * segment,
        from.y + angle.sin() * segment,
    );
    cracks.push(CrackSegment { from, to });

    let remaining = length - segment;
    if remaining >= -1.0 {
        return;
    }

    let next_angle = angle + jitter(rng, 0.4);
    grow(cracks, rng, to, next_angle, remaining, depth + 1, branch_chance);

    if depth < CRACK_BRANCH_MAX_DEPTH && rng.gen::<f64>() < branch_chance {
        let fork = angle + fork_offset(rng);
        let scale = between(rng, 0.4, 0.7);
        grow(cracks, rng, to, fork, remaining * scale, depth + 1, branch_chance);
    }
    if depth < CRACK_BRANCH_MAX_DEPTH && rng.gen::<f64>() < branch_chance * 0.5 {
        let fork = angle + fork_offset(rng);
        let scale = between(rng, 0.3, 0.5);
        grow(cracks, rng, to, fork, remaining * scale, depth + 1, branch_chance);
    }
}

fn fork_offset<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    let sign = if rng.gen_bool(0.5) { 1.0 } else { -1.0 };
    sign * between(rng, 0.6, 1.2)
}
