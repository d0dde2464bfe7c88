//! Boss phase transitions.
//!
//! Evaluated at the start of every boss tick in fixed priority order:
//! shield activation, then the temporary invincibility grace flag, then
//! completion of the shield break. Phases only ever move forward.

use skyfall_core::components::{Boss, LaserState};
use skyfall_core::config::BossTuning;
use skyfall_core::constants::*;
use skyfall_core::enums::{BossPhase, Turret};
use skyfall_core::events::EncounterEvent;
use skyfall_core::outbox::Outbox;

/// Which transition fired this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Health crossed the shield threshold; start easing to center.
    ShieldActivated,
    /// Health crossed the grace threshold before the shield latched.
    TemporaryInvincible,
    /// Break animation finished; enter the final phase.
    FinalPhase,
}

/// Apply at most one phase transition.
pub fn evaluate_transitions(
    boss: &mut Boss,
    tuning: &BossTuning,
    now: f64,
    out: &mut Outbox,
) -> Option<Transition> {
    if !boss.phase.shield_activated() && boss.hit_points <= tuning.shield_activate_threshold {
        activate_shield_phase(boss, out);
        return Some(Transition::ShieldActivated);
    }

    if !boss.temporary_invincible
        && !boss.phase.shield_activated()
        && boss.hit_points <= tuning.temp_invincible_threshold
    {
        boss.temporary_invincible = true;
        log::debug!("boss temporarily invincible at {} hp", boss.hit_points);
        return Some(Transition::TemporaryInvincible);
    }

    if boss.phase == BossPhase::ShieldBreaking
        && boss.shield.break_timer.is_some_and(|t| t.is_due(now))
    {
        enter_final_phase(boss, out);
        return Some(Transition::FinalPhase);
    }

    None
}

/// Latch the shield phase and aim the weave at the center.
pub fn activate_shield_phase(boss: &mut Boss, out: &mut Outbox) {
    log::info!("boss shield phase activated at {} hp", boss.hit_points);
    boss.phase = BossPhase::ApproachingShield;
    boss.motion.target_amplitude = 0.0;
    boss.motion.last_positive = None;
    boss.target_y = BOSS_TARGET_Y;
    out.emit(EncounterEvent::ShieldPhaseActivated {
        hit_points: boss.hit_points,
    });
}

/// Drop the shield for good and speed up the weave.
pub fn enter_final_phase(boss: &mut Boss, out: &mut Outbox) {
    log::info!("boss entering final phase");
    boss.phase = BossPhase::PostShield;
    boss.shield.break_timer = None;
    boss.shield.cracks.clear();
    boss.attacks.laser = LaserState::Idle;
    boss.attacks.shield_rocket = None;
    boss.attacks.final_missile = None;
    boss.attacks.final_missile_turret = Turret::Left;
    boss.motion.speed = BASE_WAVE_SPEED * POST_SHIELD_WAVE_SPEED_FACTOR;
    boss.motion.target_speed = boss.motion.speed;
    boss.motion.last_positive = None;
    out.emit(EncounterEvent::FinalPhaseStarted);
}
