//! Enumeration types used throughout the encounter.

use serde::{Deserialize, Serialize};

/// Boss life-cycle phase. Transitions only move forward:
/// Entrance -> Roaming -> ApproachingShield -> Shielded -> ShieldBreaking -> PostShield.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum BossPhase {
    /// Descending from above the screen; invincible.
    #[default]
    Entrance,
    /// Weaving and attacking.
    Roaming,
    /// Shield threshold crossed; easing to the center of the screen.
    ApproachingShield,
    /// Shield raised; escorts spawn and shield rockets fire.
    Shielded,
    /// Shield health reached zero; break animation running.
    ShieldBreaking,
    /// Final phase after the shield has broken.
    PostShield,
}

impl BossPhase {
    /// True once the shield threshold has been crossed (one-way latch).
    pub fn shield_activated(self) -> bool {
        self >= BossPhase::ApproachingShield
    }

    /// True while the shield bubble is drawn.
    pub fn shield_visible(self) -> bool {
        matches!(self, BossPhase::Shielded | BossPhase::ShieldBreaking)
    }

    /// True when the shield absorbs hits.
    pub fn shield_up(self) -> bool {
        self == BossPhase::Shielded
    }

    /// True for the final, post-shield phase.
    pub fn is_final(self) -> bool {
        self == BossPhase::PostShield
    }
}

/// Which boss turret fires next.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Turret {
    #[default]
    Left,
    Right,
}

impl Turret {
    /// The opposite turret.
    pub fn other(self) -> Self {
        match self {
            Turret::Left => Turret::Right,
            Turret::Right => Turret::Left,
        }
    }

    /// Horizontal sign of the turret relative to the hull center.
    pub fn side(self) -> f64 {
        match self {
            Turret::Left => -1.0,
            Turret::Right => 1.0,
        }
    }
}

/// Why an escort was destroyed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KillCause {
    /// Direct hit from a player bullet. The only cause that awards score.
    PlayerBullet,
    /// Struck by a live enemy missile.
    MissileCollision,
    /// Collateral of the boss shield breaking.
    ShieldCollapse,
    /// Collided with the player ship.
    Rammed,
}

impl KillCause {
    pub fn awards_score(self) -> bool {
        self == KillCause::PlayerBullet
    }
}

/// Which live set a projectile belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProjectileClass {
    Bullet,
    Missile,
}

/// Overall encounter state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EncounterOutcome {
    /// No boss spawned yet.
    #[default]
    Waiting,
    InProgress,
    Paused,
    BossDefeated,
    PlayerDefeated,
}

impl EncounterOutcome {
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            EncounterOutcome::BossDefeated | EncounterOutcome::PlayerDefeated
        )
    }
}

/// Particle rendering primitive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParticleShape {
    #[default]
    Circle,
    Spark,
}

/// Laser state as seen by the frontend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LaserStatus {
    #[default]
    Idle,
    Cooldown,
    Charging,
    Firing,
}
