//! The per-tick boss entry point.

use rand::Rng;

use skyfall_core::components::{Boss, PlayerSnapshot};
use skyfall_core::config::BossTuning;
use skyfall_core::constants::BOSS_ENGINE_PARTICLE_INTERVAL_MS;
use skyfall_core::enums::BossPhase;
use skyfall_core::outbox::Outbox;
use skyfall_core::types::Bounds;

use crate::movement::MovementBranch;
use crate::{attacks, effects, fsm, movement};

/// Read-only inputs shared by every boss tick.
#[derive(Debug, Clone, Copy)]
pub struct TickContext<'a> {
    pub now: f64,
    pub bounds: Bounds,
    pub tuning: &'a BossTuning,
}

/// Advance the boss by one tick.
///
/// Order is fixed: phase transitions, movement, turret aim, then attacks.
/// A transition taken this tick therefore already governs which movement
/// branch and which attack routine run. Returns the movement branch taken.
pub fn update<R: Rng + ?Sized>(
    boss: &mut Boss,
    player: &PlayerSnapshot,
    ctx: &TickContext<'_>,
    rng: &mut R,
    out: &mut Outbox,
) -> MovementBranch {
    if boss.hit_flash.is_some_and(|t| t.is_due(ctx.now)) {
        boss.hit_flash = None;
    }

    fsm::evaluate_transitions(boss, ctx.tuning, ctx.now, out);

    let branch = movement::run(boss, &ctx.bounds, ctx.tuning, ctx.now, rng, out);

    attacks::aim_turrets(boss, player);

    match boss.phase {
        BossPhase::Roaming | BossPhase::PostShield => {
            attacks::run(boss, player, ctx.tuning, ctx.now, rng, out);
        }
        BossPhase::Shielded => {
            attacks::run_shield_attacks(boss, ctx.tuning, ctx.now, rng, out);
        }
        BossPhase::Entrance | BossPhase::ApproachingShield | BossPhase::ShieldBreaking => {}
    }

    if boss.engine_exhaust.is_due(ctx.now) {
        out.enqueue_particles(effects::boss_exhaust(rng, boss));
        boss.engine_exhaust.rearm(ctx.now, BOSS_ENGINE_PARTICLE_INTERVAL_MS);
    }

    branch
}
