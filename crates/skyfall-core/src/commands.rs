//! Commands sent from the frontend to the encounter.
//!
//! Commands are queued and processed at the next tick boundary.

use serde::{Deserialize, Serialize};

/// All possible frontend actions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum EncounterCommand {
    // --- Player ---
    /// Latest player ship position and horizontal input speed.
    UpdatePlayer { x: f64, y: f64, input_speed: f64 },
    /// Player fired a bullet from the given muzzle position.
    FirePlayerBullet { x: f64, y: f64, damage: i32 },
    /// Toggle the player's shield power-up.
    SetShieldPowerup { active: bool },

    // --- Encounter control ---
    /// Bring in the boss and start the encounter.
    SpawnBoss,
    Pause,
    Resume,

    // --- Developer (ignored unless developer mode is enabled) ---
    DevSetBossHealth { hit_points: i32 },
    /// Drop the boss to the shield threshold.
    DevForceShieldPhase,
    /// Skip straight to the post-shield phase.
    DevForceFinalPhase,
}
