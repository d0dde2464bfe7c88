//! Collision sweep.
//!
//! Run once per tick after every mover has stepped. Hits are collected from
//! read-only snapshots of the projectile sets first, then applied, then the
//! spent projectiles are despawned.

use hecs::{Entity, World};
use rand::Rng;

use skyfall_boss_ai::damage::{self, BossHit, BulletContact};
use skyfall_boss_ai::{effects, escort, shield};
use skyfall_core::components::*;
use skyfall_core::config::BossTuning;
use skyfall_core::constants::*;
use skyfall_core::enums::KillCause;
use skyfall_core::events::EncounterEvent;
use skyfall_core::outbox::Outbox;
use skyfall_core::timer::Timer;
use skyfall_core::types::{Color, Position};

use crate::encounter::{self, ScoreState};

const SCORE_TEXT_COLOR: Color = Color::rgb(255, 215, 0);
const ANNOUNCE_COLOR: Color = Color::rgb(0, 220, 255);

/// Entity, position and width of every live revenge missile.
fn revenge_missiles(world: &World) -> Vec<(Entity, Position, f64)> {
    world
        .query::<(&Projectile, &EnemyMissile)>()
        .iter()
        .filter(|(_, (missile, _))| missile.kind.is_revenge())
        .map(|(entity, (missile, _))| (entity, missile.position, missile.width))
        .collect()
}

fn player_bullets(world: &World) -> Vec<(Entity, Projectile)> {
    world
        .query::<(&Projectile, &PlayerBullet)>()
        .iter()
        .map(|(entity, (bullet, _))| (entity, *bullet))
        .collect()
}

fn despawn_all(world: &mut World, entities: &[Entity]) {
    for &entity in entities {
        let _ = world.despawn(entity);
    }
}

/// Bookkeeping for a defeated escort. Score and XP only for player kills.
fn record_escort_defeat(cause: KillCause, at: Position, score: &mut ScoreState, out: &mut Outbox) {
    score.escorts_destroyed += 1;
    if cause.awards_score() {
        score.award(SCORE_ESCORT, XP_ESCORT);
        out.push_text(effects::floating_text(
            format!("+{}", SCORE_ESCORT),
            at,
            SCORE_TEXT_COLOR,
            18.0,
        ));
    }
}

/// Revenge missiles that fly into an escort destroy it.
pub fn check_escort_missile_collisions<R: Rng + ?Sized>(
    world: &mut World,
    player: &PlayerSnapshot,
    score: &mut ScoreState,
    rng: &mut R,
    out: &mut Outbox,
) -> usize {
    let missiles = revenge_missiles(world);
    if missiles.is_empty() {
        return 0;
    }

    let mut spent: Vec<Entity> = Vec::new();
    let mut defeated = 0;
    for (_entity, escort) in world.query_mut::<&mut Escort>() {
        if !escort.active {
            continue;
        }
        let reach = escort.collision_radius();
        let hit = missiles.iter().find(|(missile, at, width)| {
            !spent.contains(missile) && escort.position.range_to(at) < reach + width / 2.0
        });
        if let Some(&(missile, _, _)) = hit {
            spent.push(missile);
            let at = escort.position;
            if escort::defeat(escort, KillCause::MissileCollision, player, rng, out) {
                record_escort_defeat(KillCause::MissileCollision, at, score, out);
                defeated += 1;
            }
        }
    }

    despawn_all(world, &spent);
    defeated
}

/// Player bullets against the boss. Returns true when a hit was lethal.
pub fn player_bullets_vs_boss<R: Rng + ?Sized>(
    world: &mut World,
    boss: Option<Entity>,
    now: f64,
    rng: &mut R,
    out: &mut Outbox,
) -> bool {
    let Some(boss_entity) = boss else {
        return false;
    };
    let bullets = player_bullets(world);
    if bullets.is_empty() {
        return false;
    }

    let mut spent = Vec::new();
    let mut defeated = false;
    {
        let Ok(mut boss) = world.get::<&mut Boss>(boss_entity) else {
            return false;
        };
        for (entity, bullet) in &bullets {
            match damage::bullet_contact(&boss, &bullet.position, bullet.width, bullet.height) {
                BulletContact::Miss => {}
                BulletContact::Shield => {
                    spent.push(*entity);
                    out.enqueue_particles(effects::shield_impact(rng, bullet.position));
                }
                BulletContact::Hull => {
                    spent.push(*entity);
                    out.enqueue_particles(effects::small_explosion(rng, bullet.position));
                    if damage::apply_damage(&mut boss, bullet.damage, now) == BossHit::Defeated {
                        defeated = true;
                        break;
                    }
                }
            }
        }
    }

    despawn_all(world, &spent);
    defeated
}

/// Player bullets against escorts.
pub fn player_bullets_vs_escorts<R: Rng + ?Sized>(
    world: &mut World,
    player: &PlayerSnapshot,
    now: f64,
    score: &mut ScoreState,
    rng: &mut R,
    out: &mut Outbox,
) {
    let bullets = player_bullets(world);
    if bullets.is_empty() {
        return;
    }

    let mut spent: Vec<Entity> = Vec::new();
    for (_entity, escort) in world.query_mut::<&mut Escort>() {
        for (bullet_entity, bullet) in &bullets {
            if !escort.active {
                break;
            }
            if spent.contains(bullet_entity) {
                continue;
            }
            let reach = escort.collision_radius() + bullet.width / 2.0;
            if escort.position.range_to(&bullet.position) >= reach {
                continue;
            }
            spent.push(*bullet_entity);
            if escort::apply_bullet(escort, bullet.damage, now) {
                let at = escort.position;
                if escort::defeat(escort, KillCause::PlayerBullet, player, rng, out) {
                    record_escort_defeat(KillCause::PlayerBullet, at, score, out);
                }
            }
        }
    }

    despawn_all(world, &spent);
}

/// Enemy bullets and missiles against the player ship.
///
/// While invulnerable everything passes through. A shield power-up absorbs
/// every hit. Otherwise the first hit deals damage and opens the
/// invulnerability window, so later hits this tick pass through.
pub fn enemy_projectiles_vs_player<R: Rng + ?Sized>(
    world: &mut World,
    player: &mut PlayerStatus,
    now: f64,
    rng: &mut R,
    out: &mut Outbox,
) {
    if player.is_invulnerable(now) {
        return;
    }

    let mut hits: Vec<(Entity, Position, i32)> = Vec::new();
    for (entity, (bullet, _)) in world.query::<(&Projectile, &EnemyBullet)>().iter() {
        let reach = player.width / 3.0 + bullet.width / 2.0;
        if bullet.position.range_to(&player.position) < reach {
            hits.push((entity, bullet.position, bullet.damage));
        }
    }
    for (entity, (missile, _)) in world.query::<(&Projectile, &EnemyMissile)>().iter() {
        let reach = player.width / 2.0 + missile.width / 2.0;
        if missile.position.range_to(&player.position) < reach {
            hits.push((entity, missile.position, missile.damage));
        }
    }

    let mut spent = Vec::new();
    for (entity, at, damage) in hits {
        if player.shield_powerup {
            spent.push(entity);
            out.enqueue_particles(effects::shield_impact(rng, at));
            continue;
        }
        if player.is_invulnerable(now) {
            break;
        }
        spent.push(entity);
        out.enqueue_particles(effects::small_explosion(rng, at));
        encounter::hit_player(player, damage, now, out);
    }

    despawn_all(world, &spent);
}

/// Escorts ramming the player ship.
///
/// With a shield power-up the escort takes the damage instead. Otherwise an
/// unprotected player is hit and the escort is destroyed.
pub fn escorts_vs_player<R: Rng + ?Sized>(
    world: &mut World,
    player: &mut PlayerStatus,
    now: f64,
    score: &mut ScoreState,
    rng: &mut R,
    out: &mut Outbox,
) {
    let snapshot = player.snapshot();
    for (_entity, escort) in world.query_mut::<&mut Escort>() {
        if !escort.active {
            continue;
        }
        let reach = escort.collision_radius() + player.width / 2.0;
        if escort.position.range_to(&player.position) >= reach {
            continue;
        }

        let at = escort.position;
        if player.shield_powerup {
            escort.hit_points -= ESCORT_RAM_DAMAGE;
            escort.hit_flash = Some(Timer::armed(now, HIT_FLASH_MS));
            out.enqueue_particles(effects::shield_impact(rng, at));
            if escort.hit_points <= 0 && escort::defeat(escort, KillCause::Rammed, &snapshot, rng, out) {
                record_escort_defeat(KillCause::Rammed, at, score, out);
            }
        } else if !player.is_invulnerable(now) {
            encounter::hit_player(player, 1, now, out);
            if escort::defeat(escort, KillCause::Rammed, &snapshot, rng, out) {
                record_escort_defeat(KillCause::Rammed, at, score, out);
            }
        }
    }
}

/// The firing laser against the player. Never hits during the windup.
pub fn check_laser_collision(
    world: &World,
    boss: Option<Entity>,
    player: &mut PlayerStatus,
    now: f64,
    out: &mut Outbox,
) -> bool {
    let Some(boss_entity) = boss else {
        return false;
    };
    let Ok(boss) = world.get::<&Boss>(boss_entity) else {
        return false;
    };
    if player.is_invulnerable(now) || player.shield_powerup {
        return false;
    }
    if !damage::laser_contact(&boss, &player.position, player.width, player.height) {
        return false;
    }
    encounter::hit_player(player, LASER_DAMAGE, now, out);
    true
}

/// Revenge missiles against the raised shield. Returns true if the shield
/// broke this tick.
///
/// Each touching missile is removed and takes one point of shield health.
/// The hit that empties the shield starts the break sequence: every escort
/// is destroyed without reward and every live enemy missile explodes.
#[allow(clippy::too_many_arguments)]
pub fn check_shield_collision<R: Rng + ?Sized>(
    world: &mut World,
    boss: Option<Entity>,
    tuning: &BossTuning,
    player: &PlayerSnapshot,
    now: f64,
    score: &mut ScoreState,
    rng: &mut R,
    out: &mut Outbox,
) -> bool {
    let Some(boss_entity) = boss else {
        return false;
    };
    let missiles = revenge_missiles(world);
    if missiles.is_empty() {
        return false;
    }

    let mut spent = Vec::new();
    let mut broken_at = None;
    {
        let Ok(mut boss) = world.get::<&mut Boss>(boss_entity) else {
            return false;
        };
        if !boss.phase.shield_up() {
            return false;
        }
        for (entity, at, width) in &missiles {
            let reach = boss.shield_radius() + width / 2.0;
            if at.range_sq_to(&boss.position) >= reach * reach {
                continue;
            }
            spent.push(*entity);
            let hit = shield::apply_hit(&mut boss, rng);
            out.enqueue_particles(effects::shield_impact(rng, *at));
            out.emit(EncounterEvent::ShieldHit {
                remaining: hit.remaining,
            });
            if hit.broken {
                shield::begin_break(&mut boss, tuning, now, out);
                broken_at = Some(boss.position);
                break;
            }
        }
    }

    despawn_all(world, &spent);

    match broken_at {
        Some(at) => {
            collapse_shield(world, at, player, score, rng, out);
            true
        }
        None => false,
    }
}

fn collapse_shield<R: Rng + ?Sized>(
    world: &mut World,
    at: Position,
    player: &PlayerSnapshot,
    score: &mut ScoreState,
    rng: &mut R,
    out: &mut Outbox,
) {
    out.enqueue_particles(effects::shield_break(rng, at));
    out.push_text(effects::floating_text("SHIELD DOWN", at, ANNOUNCE_COLOR, 32.0));

    // Revenge missiles launched by the collateral defeats are dropped with
    // the rest of the missile set below.
    let mut collateral = Outbox::new();
    for (_entity, escort) in world.query_mut::<&mut Escort>() {
        let position = escort.position;
        if escort::defeat(escort, KillCause::ShieldCollapse, player, rng, &mut collateral) {
            record_escort_defeat(KillCause::ShieldCollapse, position, score, out);
        }
    }
    out.enqueue_particles(collateral.particles);
    out.events.append(&mut collateral.events);

    let live: Vec<(Entity, Position)> = world
        .query::<(&Projectile, &EnemyMissile)>()
        .iter()
        .map(|(entity, (missile, _))| (entity, missile.position))
        .collect();
    for (entity, position) in live {
        out.enqueue_particles(effects::small_explosion(rng, position));
        let _ = world.despawn(entity);
    }
    for missile in std::mem::take(&mut out.missiles) {
        out.enqueue_particles(effects::small_explosion(rng, missile.position));
    }
    log::info!("shield collapse cleared escorts and missiles");
}
