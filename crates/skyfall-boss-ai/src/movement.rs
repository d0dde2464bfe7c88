//! Boss movement model.
//!
//! Exactly one branch runs per tick, selected by phase: the entrance
//! descent, the ease toward the center before the shield goes up, holding
//! station while shielded, or the sinusoidal weave.

use rand::Rng;

use skyfall_core::components::{Boss, WaveMotion};
use skyfall_core::config::BossTuning;
use skyfall_core::constants::*;
use skyfall_core::enums::BossPhase;
use skyfall_core::events::EncounterEvent;
use skyfall_core::outbox::Outbox;
use skyfall_core::types::Bounds;

use crate::sampling::between;
use crate::shield;

/// The movement branch taken this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MovementBranch {
    Entrance,
    Approach,
    Holding,
    Weave,
}

/// Move the boss for one tick.
pub fn run<R: Rng + ?Sized>(
    boss: &mut Boss,
    bounds: &Bounds,
    tuning: &BossTuning,
    now: f64,
    rng: &mut R,
    out: &mut Outbox,
) -> MovementBranch {
    let branch = match boss.phase {
        BossPhase::Entrance => {
            descend(boss, now);
            MovementBranch::Entrance
        }
        BossPhase::ApproachingShield => {
            approach_center(boss, bounds, tuning, now, rng, out);
            MovementBranch::Approach
        }
        BossPhase::Shielded => MovementBranch::Holding,
        BossPhase::Roaming | BossPhase::ShieldBreaking | BossPhase::PostShield => {
            weave(boss, bounds, now, rng);
            MovementBranch::Weave
        }
    };

    if boss.phase.shield_visible() {
        shield::pulse(&mut boss.shield);
    }

    branch
}

/// Largest weave amplitude that keeps the hull on screen.
pub fn safe_amplitude(amplitude: f64, bounds: &Bounds, boss_width: f64) -> f64 {
    let limit = (bounds.width / 2.0 - boss_width / 2.0 - WAVE_EDGE_MARGIN).max(0.0);
    amplitude.clamp(0.0, limit)
}

fn descend(boss: &mut Boss, now: f64) {
    if boss.position.y < boss.target_y {
        boss.position.y += boss.entrance_speed;
        boss.displayed_health_pct = boss.health_bar.progress(now);
    }

    if boss.position.y >= boss.target_y {
        log::info!("boss entrance complete");
        boss.phase = BossPhase::Roaming;
        boss.displayed_health_pct = 1.0;
    }
}

fn approach_center<R: Rng + ?Sized>(
    boss: &mut Boss,
    bounds: &Bounds,
    tuning: &BossTuning,
    now: f64,
    rng: &mut R,
    out: &mut Outbox,
) {
    let motion = &mut boss.motion;
    motion.amplitude += (motion.target_amplitude - motion.amplitude) * APPROACH_AMPLITUDE_EASE;

    let dy = boss.target_y - boss.position.y;
    if dy.abs() > APPROACH_Y_SNAP {
        let step = (dy.abs() / APPROACH_Y_STEP_DIVISOR).clamp(APPROACH_Y_STEP_MIN, APPROACH_Y_STEP_MAX);
        boss.position.y += step * dy.signum();
    } else {
        boss.position.y = boss.target_y;
    }

    let center_x = bounds.center_x();
    boss.position.x = center_x
        + motion.offset.sin() * safe_amplitude(motion.amplitude, bounds, boss.width);

    let centered = (boss.position.x - center_x).abs() < CENTER_TOLERANCE
        && motion.amplitude.abs() < CENTER_TOLERANCE
        && (boss.position.y - boss.target_y).abs() < CENTER_TOLERANCE;
    if centered {
        boss.position.x = center_x;
        boss.position.y = boss.target_y;
        boss.motion.amplitude = 0.0;
        shield::raise(boss, tuning, now, rng);
        log::info!("boss centered, shield raised");
        out.emit(EncounterEvent::ShieldRaised);
    }
}

fn weave<R: Rng + ?Sized>(boss: &mut Boss, bounds: &Bounds, now: f64, rng: &mut R) {
    let motion = &mut boss.motion;

    if boss.phase.is_final() {
        retarget_on_crossing(motion, rng);
    } else {
        if motion.speed_retarget.is_due(now) {
            let min = BASE_WAVE_SPEED * 0.5;
            let max = BASE_WAVE_SPEED * 1.5;
            motion.target_speed = min + (max - min) * between(rng, 0.5, 1.5);
            motion.speed_retarget.rearm(now, WAVE_SPEED_RETARGET_MS);
        }
        if motion.amplitude_retarget.is_due(now) {
            motion.target_amplitude = between(rng, MIN_WAVE_AMPLITUDE, MAX_WAVE_AMPLITUDE);
            motion.amplitude_retarget.rearm(now, WAVE_AMPLITUDE_RETARGET_MS);
        }
    }

    motion.speed += (motion.target_speed - motion.speed) * WAVE_EASE;
    motion.amplitude += (motion.target_amplitude - motion.amplitude) * WAVE_EASE;
    motion.offset += motion.speed;

    boss.position.x = bounds.center_x()
        + motion.offset.sin() * safe_amplitude(motion.amplitude, bounds, boss.width);
}

/// Post-shield: pick a new amplitude each time the weave crosses center.
fn retarget_on_crossing<R: Rng + ?Sized>(motion: &mut WaveMotion, rng: &mut R) {
    let s = motion.offset.sin();
    if s == 0.0 {
        return;
    }
    let positive = s > 0.0;
    match motion.last_positive {
        Some(previous) if previous != positive => {
            motion.target_amplitude = between(rng, MIN_WAVE_AMPLITUDE, MAX_WAVE_AMPLITUDE);
        }
        _ => {}
    }
    motion.last_positive = Some(positive);
}
