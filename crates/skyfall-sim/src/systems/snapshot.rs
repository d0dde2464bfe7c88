//! Snapshot system: queries the ECS world and builds a complete
//! `EncounterSnapshot`.
//!
//! This system is read-only; it never modifies the world.

use hecs::World;

use skyfall_core::components::*;
use skyfall_core::enums::*;
use skyfall_core::events::EncounterEvent;
use skyfall_core::state::*;
use skyfall_core::types::SimTime;

use crate::encounter::ScoreState;

/// Build a complete snapshot from the current world state.
pub fn build_snapshot(
    world: &World,
    time: &SimTime,
    outcome: EncounterOutcome,
    player: &PlayerStatus,
    score: &ScoreState,
    pending_scheduled: usize,
    events: Vec<EncounterEvent>,
) -> EncounterSnapshot {
    EncounterSnapshot {
        time: *time,
        outcome,
        boss: build_boss(world),
        escorts: build_escorts(world),
        bullets: build_projectiles::<EnemyBullet>(world),
        missiles: build_projectiles::<EnemyMissile>(world),
        pending_scheduled,
        player: PlayerView {
            position: player.position,
            health: player.health,
            invulnerable: player.is_invulnerable(time.now_ms()),
            shield_powerup: player.shield_powerup,
        },
        score: score.view(),
        events,
    }
}

fn build_boss(world: &World) -> Option<BossView> {
    world
        .query::<&Boss>()
        .iter()
        .next()
        .map(|(_, boss)| BossView {
            position: boss.position,
            phase: boss.phase,
            hit_points: boss.hit_points,
            max_hit_points: boss.max_hit_points,
            displayed_health: boss.displayed_health(),
            shield_health: boss.shield.health,
            crack_level: boss.shield.crack_level,
            crack_count: boss.shield.cracks.len(),
            laser: boss.attacks.laser.status(),
            left_turret_angle: boss.turrets.left,
            right_turret_angle: boss.turrets.right,
            temporary_invincible: boss.temporary_invincible,
        })
}

fn build_escorts(world: &World) -> Vec<EscortView> {
    world
        .query::<&Escort>()
        .iter()
        .filter(|(_, escort)| escort.active)
        .map(|(_, escort)| EscortView {
            position: escort.position,
            hit_points: escort.hit_points,
            warning: matches!(escort.attack, EscortAttack::Warning(_)),
        })
        .collect()
}

fn build_projectiles<T: hecs::Component>(world: &World) -> Vec<ProjectileView> {
    world
        .query::<(&Projectile, &T)>()
        .iter()
        .map(|(_, (projectile, _))| ProjectileView {
            position: projectile.position,
            angle: projectile.angle,
            class: projectile.class(),
        })
        .collect()
}
