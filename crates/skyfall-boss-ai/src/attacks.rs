//! Boss attack scheduling.
//!
//! Turret aim is refreshed every tick. Regular attacks (laser, missile
//! pairs, barrage series, final-phase missile) only run while roaming or in
//! the final phase; shield rockets only run while the shield is up.

use rand::Rng;

use skyfall_core::components::{BarrageState, Boss, LaserState, PlayerSnapshot};
use skyfall_core::config::BossTuning;
use skyfall_core::constants::*;
use skyfall_core::enums::Turret;
use skyfall_core::events::EncounterEvent;
use skyfall_core::outbox::Outbox;
use skyfall_core::timer::Timer;

use crate::factory;
use crate::sampling::{between, count, duration};

/// Point both turrets at the player.
pub fn aim_turrets(boss: &mut Boss, player: &PlayerSnapshot) {
    boss.turrets.left = boss
        .turret_origin(Turret::Left)
        .angle_to(&player.position);
    boss.turrets.right = boss
        .turret_origin(Turret::Right)
        .angle_to(&player.position);
}

/// Run the regular attack cadences for one tick.
pub fn run<R: Rng + ?Sized>(
    boss: &mut Boss,
    player: &PlayerSnapshot,
    tuning: &BossTuning,
    now: f64,
    rng: &mut R,
    out: &mut Outbox,
) {
    if !boss.phase.is_final() {
        update_laser(boss, player, tuning, now, rng, out);
    }

    if boss.attacks.missile.is_due(now) {
        out.enqueue_missiles(factory::boss_missile_pair(boss));
        boss.attacks.missile = Timer::armed(now, tuning.missile_interval_ms);
    }

    update_barrage(boss, player, tuning, now, rng, out);

    if boss.phase.is_final() {
        if let Some(delay) = boss.attacks.final_missile {
            if delay.is_due(now) {
                let turret = boss.attacks.final_missile_turret;
                out.enqueue_missile(factory::final_phase_missile(boss, turret));
                boss.attacks.final_missile_turret = turret.other();
                boss.attacks.final_missile = None;
            }
        }
    }
}

/// Alternate shield rockets between turrets while shielded.
pub fn run_shield_attacks<R: Rng + ?Sized>(
    boss: &mut Boss,
    tuning: &BossTuning,
    now: f64,
    rng: &mut R,
    out: &mut Outbox,
) {
    let Some(timer) = boss.attacks.shield_rocket else {
        return;
    };
    if !timer.is_due(now) {
        return;
    }

    let turret = boss.attacks.shield_rocket_turret;
    out.enqueue_missile(factory::shield_rocket(boss, turret));
    boss.attacks.shield_rocket_turret = turret.other();
    boss.attacks.shield_rocket = Some(Timer::armed(
        now,
        duration(rng, &tuning.shield_rocket_interval_ms),
    ));
}

/// Idle -> Charging -> Firing -> Cooldown -> Idle.
///
/// The laser only arms when the player is moving faster than the boss
/// weave; otherwise a short cooldown is taken instead. Hit testing against
/// the beam is done by the encounter while the state is `Firing`.
fn update_laser<R: Rng + ?Sized>(
    boss: &mut Boss,
    player: &PlayerSnapshot,
    tuning: &BossTuning,
    now: f64,
    rng: &mut R,
    out: &mut Outbox,
) {
    let next = match boss.attacks.laser {
        LaserState::Idle => {
            if boss.hit_points > tuning.laser_health_threshold {
                return;
            }
            if boss.motion.speed.abs() < player.input_speed {
                log::debug!("boss laser charging");
                out.emit(EncounterEvent::LaserCharging);
                LaserState::Charging(Timer::armed(now, LASER_WARNING_MS))
            } else {
                LaserState::Cooldown(Timer::armed(
                    now,
                    between(rng, LASER_EVADED_COOLDOWN_MIN_MS, LASER_EVADED_COOLDOWN_MAX_MS),
                ))
            }
        }
        LaserState::Charging(timer) if timer.is_due(now) => {
            log::debug!("boss laser firing");
            out.emit(EncounterEvent::LaserFiring);
            LaserState::Firing(Timer::armed(now, LASER_FIRING_MS))
        }
        LaserState::Firing(timer) if timer.is_due(now) => {
            LaserState::Cooldown(Timer::armed(now, duration(rng, &tuning.laser_cooldown_ms)))
        }
        LaserState::Cooldown(timer) if timer.is_due(now) => LaserState::Idle,
        current => current,
    };
    boss.attacks.laser = next;
}

/// Barrage series: rest, then fire a fixed number of volleys spaced by the
/// burst interval. In the final phase the rest is short and the end of each
/// series arms the delayed final-phase missile.
fn update_barrage<R: Rng + ?Sized>(
    boss: &mut Boss,
    player: &PlayerSnapshot,
    tuning: &BossTuning,
    now: f64,
    rng: &mut R,
    out: &mut Outbox,
) {
    let is_final = boss.phase.is_final();

    if let BarrageState::Resting {
        cooldown,
        next_burst,
    } = boss.attacks.barrage
    {
        let rested = if is_final {
            cooldown.elapsed(now) >= FINAL_PHASE_BURST_COOLDOWN_MS
        } else {
            cooldown.is_due(now)
        };
        if !rested {
            return;
        }
        boss.attacks.barrage = BarrageState::Bursting {
            fired: 0,
            burst: next_burst,
            doubled: rng.gen_bool(BARRAGE_EXTRA_ROUND_CHANCE),
            next_shot: Timer::armed(now, burst_spacing(is_final)),
        };
    }

    let BarrageState::Bursting {
        fired,
        burst,
        doubled,
        next_shot,
    } = boss.attacks.barrage
    else {
        return;
    };

    let mut fired = fired;
    let mut next_shot = next_shot;
    if next_shot.is_due(now) && fired < burst {
        let volley = factory::barrage_volley(boss, player.position, now, doubled, rng);
        out.enqueue_bullets(volley.immediate);
        if !volley.scheduled.is_empty() {
            out.enqueue_scheduled(volley.scheduled);
        }
        next_shot = Timer::armed(now, burst_spacing(is_final));
        fired += 1;
    }

    if fired >= burst {
        let range = if is_final {
            &tuning.final_burst_count
        } else {
            &tuning.burst_count
        };
        boss.attacks.barrage = BarrageState::Resting {
            cooldown: Timer::armed(now, duration(rng, &tuning.barrage_interval_ms)),
            next_burst: count(rng, range),
        };
        if is_final {
            boss.attacks.final_missile = Some(Timer::armed(now, tuning.final_missile_delay_ms));
        }
    } else {
        boss.attacks.barrage = BarrageState::Bursting {
            fired,
            burst,
            doubled,
            next_shot,
        };
    }
}

fn burst_spacing(is_final: bool) -> f64 {
    if is_final {
        FINAL_PHASE_BURST_COOLDOWN_MS
    } else {
        BURST_INTERVAL_MS
    }
}
