//! Events emitted by the encounter for audio and UI feedback.

use serde::{Deserialize, Serialize};

use crate::enums::*;

/// Discrete things that happened during a tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum EncounterEvent {
    BossSpawned,
    /// Shield threshold crossed; the boss heads for the center.
    ShieldPhaseActivated { hit_points: i32 },
    /// Boss reached the center and raised its shield.
    ShieldRaised,
    ShieldHit { remaining: i32 },
    ShieldBroken,
    FinalPhaseStarted,
    LaserCharging,
    LaserFiring,
    EscortSpawned { x: f64 },
    EscortDefeated { cause: KillCause },
    BossDefeated,
    PlayerHit { damage: i32, remaining: i32 },
}
