//! Encounter snapshot sent to the frontend each tick.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::EncounterEvent;
use crate::types::{Position, SimTime};

/// Complete read-only view of the encounter after one tick.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncounterSnapshot {
    pub time: SimTime,
    pub outcome: EncounterOutcome,
    pub boss: Option<BossView>,
    pub escorts: Vec<EscortView>,
    pub bullets: Vec<ProjectileView>,
    pub missiles: Vec<ProjectileView>,
    pub pending_scheduled: usize,
    pub player: PlayerView,
    pub score: ScoreView,
    pub events: Vec<EncounterEvent>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BossView {
    pub position: Position,
    pub phase: BossPhase,
    pub hit_points: i32,
    pub max_hit_points: i32,
    /// Value shown on the health bar (fills during the entrance).
    pub displayed_health: f64,
    pub shield_health: i32,
    pub crack_level: u32,
    pub crack_count: usize,
    pub laser: LaserStatus,
    pub left_turret_angle: f64,
    pub right_turret_angle: f64,
    pub temporary_invincible: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EscortView {
    pub position: Position,
    pub hit_points: i32,
    pub warning: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectileView {
    pub position: Position,
    pub angle: f64,
    pub class: ProjectileClass,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerView {
    pub position: Position,
    pub health: i32,
    pub invulnerable: bool,
    pub shield_powerup: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScoreView {
    pub score: u32,
    pub experience: u32,
    pub escorts_destroyed: u32,
}
