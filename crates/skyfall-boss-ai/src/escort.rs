//! Escort fighters: spawning, per-escort behavior, and defeat.

use rand::Rng;

use skyfall_core::components::{Boss, Escort, EscortAttack, PlayerSnapshot};
use skyfall_core::config::EscortTuning;
use skyfall_core::constants::*;
use skyfall_core::enums::KillCause;
use skyfall_core::events::EncounterEvent;
use skyfall_core::outbox::Outbox;
use skyfall_core::timer::Timer;
use skyfall_core::types::{Bounds, Position};

use crate::effects;
use crate::factory;
use crate::sampling::{between, duration};

/// Spawn cadence for escorts. Only ticks while `enabled`.
#[derive(Debug, Clone, Default)]
pub struct EscortSpawner {
    /// Toggled by the encounter from the boss shield state.
    pub enabled: bool,
    /// Unset means the next eligible tick spawns immediately.
    pub next_spawn: Option<Timer>,
}

/// What the spawner did this tick.
#[derive(Debug, Clone)]
pub enum SpawnOutcome {
    Disabled,
    NotDue,
    /// Cap reached; retry shortly.
    AtCapacity,
    /// No clear lane found; the slot is skipped but the next one is scheduled.
    Blocked,
    Spawned(Box<Escort>),
}

impl EscortSpawner {
    /// Run one spawner tick.
    #[allow(clippy::too_many_arguments)]
    pub fn tick<R: Rng + ?Sized>(
        &mut self,
        active_escorts: usize,
        live_revenge_missiles: usize,
        boss: &Boss,
        bounds: &Bounds,
        tuning: &EscortTuning,
        now: f64,
        rng: &mut R,
    ) -> SpawnOutcome {
        if !self.enabled {
            return SpawnOutcome::Disabled;
        }
        if self.next_spawn.is_some_and(|t| !t.is_due(now)) {
            return SpawnOutcome::NotDue;
        }

        if active_escorts >= tuning.limit {
            self.next_spawn = Some(Timer::armed(now, ESCORT_CAP_RETRY_MS));
            return SpawnOutcome::AtCapacity;
        }

        let outcome = match pick_spawn_x(bounds, boss, rng) {
            Some(x) => SpawnOutcome::Spawned(Box::new(spawn(x, tuning, now, rng))),
            None => SpawnOutcome::Blocked,
        };

        let mut interval = duration(rng, &tuning.spawn_interval_ms);
        if live_revenge_missiles >= tuning.revenge_load_threshold {
            interval *= 2.0;
        }
        self.next_spawn = Some(Timer::armed(now, interval));
        outcome
    }
}

/// A fresh escort just above the top edge.
pub fn spawn<R: Rng + ?Sized>(x: f64, tuning: &EscortTuning, now: f64, rng: &mut R) -> Escort {
    Escort {
        position: Position::new(x, -ESCORT_HEIGHT),
        width: ESCORT_WIDTH,
        height: ESCORT_HEIGHT,
        hit_points: tuning.health,
        max_hit_points: tuning.health,
        speed: tuning.speed,
        active: true,
        attack: EscortAttack::Cooldown(Timer::armed(
            now,
            between(rng, ESCORT_FIRST_ATTACK_MIN_MS, ESCORT_FIRST_ATTACK_MAX_MS),
        )),
        hit_flash: None,
        exhaust: Timer::ready(),
        sparks: Timer::ready(),
    }
}

/// Random x that keeps the escort clear of the shield, or `None` after
/// the attempt budget is spent.
pub fn pick_spawn_x<R: Rng + ?Sized>(bounds: &Bounds, boss: &Boss, rng: &mut R) -> Option<f64> {
    let keep_out = boss.shield_radius() + ESCORT_WIDTH;
    let min_x = ESCORT_WIDTH / 2.0;
    let max_x = bounds.width - ESCORT_WIDTH / 2.0;
    (0..ESCORT_SPAWN_ATTEMPTS)
        .map(|_| between(rng, min_x, max_x))
        .find(|x| (x - boss.position.x).abs() >= keep_out)
}

/// Advance one escort by a tick: drift down, emit exhaust, run the attack
/// cycle, and deactivate once below the bottom edge.
pub fn update<R: Rng + ?Sized>(
    escort: &mut Escort,
    player: &PlayerSnapshot,
    bounds: &Bounds,
    now: f64,
    rng: &mut R,
    out: &mut Outbox,
) {
    if !escort.active {
        return;
    }

    escort.position.y += escort.speed;
    if escort.hit_flash.is_some_and(|t| t.is_due(now)) {
        escort.hit_flash = None;
    }

    if escort.exhaust.is_due(now) {
        out.enqueue_particles(effects::escort_exhaust(rng, escort));
        escort.exhaust.rearm(now, ESCORT_ENGINE_PARTICLE_INTERVAL_MS);
    }
    if escort.hit_points <= ESCORT_SPARK_HEALTH && escort.sparks.is_due(now) {
        out.enqueue_particles(effects::escort_sparks(rng, escort));
        escort.sparks.rearm(now, ESCORT_SPARK_INTERVAL_MS);
    }

    escort.attack = match escort.attack {
        EscortAttack::Cooldown(timer) if timer.is_due(now) => {
            EscortAttack::Warning(Timer::armed(now, ESCORT_WARNING_MS))
        }
        EscortAttack::Warning(timer) if timer.is_due(now) => EscortAttack::Firing {
            shots_left: ESCORT_BURST_SHOTS,
            next_shot: Timer::ready(),
            aim: factory::escort_aim(escort.muzzle(), player.position),
        },
        EscortAttack::Firing {
            shots_left,
            next_shot,
            aim,
        } if next_shot.is_due(now) => {
            out.enqueue_bullets([factory::escort_shot(escort.muzzle(), aim)]);
            let shots_left = shots_left.saturating_sub(1);
            if shots_left == 0 {
                EscortAttack::Cooldown(Timer::armed(
                    now,
                    between(rng, ESCORT_COOLDOWN_MIN_MS, ESCORT_COOLDOWN_MAX_MS),
                ))
            } else {
                EscortAttack::Firing {
                    shots_left,
                    next_shot: Timer::armed(now, ESCORT_BURST_SPACING_MS),
                    aim,
                }
            }
        }
        current => current,
    };

    if escort.position.y > bounds.height + escort.height {
        escort.active = false;
    }
}

/// Damage from a player bullet. Returns true when the hit was lethal.
pub fn apply_bullet(escort: &mut Escort, damage: i32, now: f64) -> bool {
    if !escort.active {
        return false;
    }
    escort.hit_points -= damage;
    escort.hit_flash = Some(Timer::armed(now, HIT_FLASH_MS));
    escort.hit_points <= 0
}

/// Destroy an escort. A no-op returning false if it is already inactive.
///
/// Every defeat explodes the escort and launches one revenge missile at
/// the player, whatever the cause.
pub fn defeat<R: Rng + ?Sized>(
    escort: &mut Escort,
    cause: KillCause,
    player: &PlayerSnapshot,
    rng: &mut R,
    out: &mut Outbox,
) -> bool {
    if !escort.active {
        return false;
    }
    escort.active = false;

    out.enqueue_particles(effects::escort_explosion(rng, escort.position));
    out.enqueue_missile(factory::revenge_missile(escort.position, player.position));
    out.emit(EncounterEvent::EscortDefeated { cause });
    log::debug!("escort defeated ({:?})", cause);
    true
}
