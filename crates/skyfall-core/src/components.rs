//! ECS components and the plain-data entity records they wrap.
//!
//! The boss AI crate mutates these records directly; the simulation crate
//! stores them in a hecs world keyed by stable entity ids.

use serde::{Deserialize, Serialize};

use crate::config::BossTuning;
use crate::constants::*;
use crate::enums::*;
use crate::timer::Timer;
use crate::types::{Bounds, Color, Position, Velocity};

// --- Boss ---

/// The boss warship and all of its per-encounter state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Boss {
    pub position: Position,
    pub width: f64,
    pub height: f64,
    pub hit_points: i32,
    pub max_hit_points: i32,
    /// True health in the final phase. Unset until the first final-phase hit.
    pub actual_health: Option<i32>,
    pub phase: BossPhase,
    /// Transient pre-shield grace flag, independent of phase.
    pub temporary_invincible: bool,
    pub target_y: f64,
    /// Vertical speed during the entrance.
    pub entrance_speed: f64,
    /// Health bar fill animation started at spawn.
    pub health_bar: Timer,
    /// Displayed fraction of the health bar during the entrance.
    pub displayed_health_pct: f64,
    pub motion: WaveMotion,
    pub turrets: TurretAim,
    pub attacks: AttackState,
    pub shield: ShieldState,
    pub hit_flash: Option<Timer>,
    pub engine_exhaust: Timer,
}

impl Boss {
    /// A fresh boss above the top edge, horizontally centered.
    pub fn spawn(bounds: &Bounds, tuning: &BossTuning, now: f64, first_burst: u32) -> Self {
        Self {
            position: Position::new(bounds.center_x(), BOSS_SPAWN_Y),
            width: BOSS_WIDTH,
            height: BOSS_HEIGHT,
            hit_points: tuning.max_health,
            max_hit_points: tuning.max_health,
            actual_health: None,
            phase: BossPhase::Entrance,
            temporary_invincible: false,
            target_y: BOSS_TARGET_Y,
            entrance_speed: BOSS_ENTRANCE_SPEED,
            health_bar: Timer::armed(now, BOSS_HEALTH_BAR_FILL_MS),
            displayed_health_pct: 0.0,
            motion: WaveMotion::new(now),
            turrets: TurretAim::default(),
            attacks: AttackState::new(first_burst),
            shield: ShieldState::new(tuning.shield_health),
            hit_flash: None,
            engine_exhaust: Timer::ready(),
        }
    }

    /// Health shown on the health bar.
    pub fn displayed_health(&self) -> f64 {
        if self.phase == BossPhase::Entrance {
            self.displayed_health_pct * self.max_hit_points as f64
        } else {
            self.hit_points.max(0) as f64
        }
    }

    /// True while bullets pass through without effect.
    pub fn is_invincible(&self) -> bool {
        self.phase == BossPhase::Entrance || self.temporary_invincible
    }

    /// Shield collision radius.
    pub fn shield_radius(&self) -> f64 {
        self.width * SHIELD_COLLISION_RADIUS_FACTOR
    }

    /// Muzzle position of a turret.
    pub fn turret_origin(&self, turret: Turret) -> Position {
        Position::new(
            self.position.x + turret.side() * self.width * TURRET_X_FRACTION,
            self.position.y + self.height * TURRET_Y_FRACTION,
        )
    }

    /// Origin of the laser beam and barrage volleys.
    pub fn nose(&self) -> Position {
        Position::new(
            self.position.x,
            self.position.y + self.height / BARRAGE_ORIGIN_Y_DIVISOR,
        )
    }

    /// Axis-aligned overlap with a rectangle centered at `pos`.
    pub fn hull_contains(&self, pos: &Position, width: f64, height: f64) -> bool {
        (pos.x - self.position.x).abs() < (self.width + width) / 2.0
            && (pos.y - self.position.y).abs() < (self.height + height) / 2.0
    }
}

/// Sinusoidal weave parameters. All speeds are radians per tick.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaveMotion {
    pub offset: f64,
    pub speed: f64,
    pub target_speed: f64,
    pub amplitude: f64,
    pub target_amplitude: f64,
    pub speed_retarget: Timer,
    pub amplitude_retarget: Timer,
    /// Sign of `sin(offset)` last tick, for post-shield re-targeting.
    pub last_positive: Option<bool>,
}

impl WaveMotion {
    pub fn new(now: f64) -> Self {
        Self {
            offset: 0.0,
            speed: BASE_WAVE_SPEED,
            target_speed: BASE_WAVE_SPEED,
            amplitude: BASE_WAVE_AMPLITUDE,
            target_amplitude: BASE_WAVE_AMPLITUDE,
            speed_retarget: Timer::armed(now, WAVE_SPEED_RETARGET_MS),
            amplitude_retarget: Timer::armed(now, WAVE_AMPLITUDE_RETARGET_MS),
            last_positive: None,
        }
    }
}

/// Current aim of both turrets (radians).
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct TurretAim {
    pub left: f64,
    pub right: f64,
}

impl TurretAim {
    pub fn angle(&self, turret: Turret) -> f64 {
        match turret {
            Turret::Left => self.left,
            Turret::Right => self.right,
        }
    }
}

/// Laser sub-state machine: Idle -> Charging -> Firing -> Cooldown -> Idle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub enum LaserState {
    #[default]
    Idle,
    Cooldown(Timer),
    Charging(Timer),
    Firing(Timer),
}

impl LaserState {
    pub fn status(&self) -> LaserStatus {
        match self {
            LaserState::Idle => LaserStatus::Idle,
            LaserState::Cooldown(_) => LaserStatus::Cooldown,
            LaserState::Charging(_) => LaserStatus::Charging,
            LaserState::Firing(_) => LaserStatus::Firing,
        }
    }

    pub fn is_firing(&self) -> bool {
        matches!(self, LaserState::Firing(_))
    }
}

/// Barrage sub-state: resting between series, or mid-series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum BarrageState {
    Resting {
        cooldown: Timer,
        /// Volleys in the next series.
        next_burst: u32,
    },
    Bursting {
        fired: u32,
        burst: u32,
        /// Per-series coin flip: every volley in this series is doubled.
        doubled: bool,
        next_shot: Timer,
    },
}

/// All attack cadences of the boss.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttackState {
    pub missile: Timer,
    pub laser: LaserState,
    pub barrage: BarrageState,
    /// Armed when a final-phase barrage series ends.
    pub final_missile: Option<Timer>,
    pub final_missile_turret: Turret,
    /// Armed while the shield is up.
    pub shield_rocket: Option<Timer>,
    pub shield_rocket_turret: Turret,
}

impl AttackState {
    pub fn new(first_burst: u32) -> Self {
        Self {
            missile: Timer::ready(),
            laser: LaserState::Idle,
            barrage: BarrageState::Resting {
                cooldown: Timer::ready(),
                next_burst: first_burst,
            },
            final_missile: None,
            final_missile_turret: Turret::Left,
            shield_rocket: None,
            shield_rocket_turret: Turret::Left,
        }
    }
}

/// A crack line in the shield, relative to the boss center.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CrackSegment {
    pub from: Position,
    pub to: Position,
}

/// Shield bubble state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShieldState {
    pub health: i32,
    pub max_health: i32,
    /// 0 = light cracks, 1 = heavy cracks.
    pub crack_level: u32,
    pub cracks: Vec<CrackSegment>,
    pub alpha: f64,
    pub pulse: f64,
    /// Running while the break animation plays.
    pub break_timer: Option<Timer>,
}

impl ShieldState {
    pub fn new(health: i32) -> Self {
        Self {
            health,
            max_health: health,
            crack_level: 0,
            cracks: Vec::new(),
            alpha: SHIELD_BASE_ALPHA,
            pulse: 0.0,
            break_timer: None,
        }
    }
}

// --- Escorts ---

/// Escort attack cycle: Cooldown -> Warning -> Firing -> Cooldown.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum EscortAttack {
    Cooldown(Timer),
    Warning(Timer),
    Firing {
        shots_left: u32,
        next_shot: Timer,
        /// Shot velocity fixed at burst start.
        aim: Velocity,
    },
}

/// Escort fighter spawned while the boss shield is up.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Escort {
    pub position: Position,
    pub width: f64,
    pub height: f64,
    pub hit_points: i32,
    pub max_hit_points: i32,
    pub speed: f64,
    /// Cleared exactly once on defeat or when leaving the field.
    pub active: bool,
    pub attack: EscortAttack,
    pub hit_flash: Option<Timer>,
    pub exhaust: Timer,
    pub sparks: Timer,
}

impl Escort {
    /// Tip of the escort's nose, where bursts originate.
    pub fn muzzle(&self) -> Position {
        Position::new(self.position.x, self.position.y + self.height * 0.5)
    }

    pub fn collision_radius(&self) -> f64 {
        self.width / 2.0
    }
}

// --- Projectiles ---

/// Decaying homing parameters for boss missiles.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Homing {
    pub strength: f64,
    pub decay: f64,
    pub floor: f64,
    pub speed: f64,
}

/// Accelerating pursuit parameters for revenge missiles.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pursuit {
    pub speed: f64,
    pub acceleration: f64,
    pub max_speed: f64,
    pub homing_factor: f64,
}

/// Closed set of enemy projectile behaviors.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ProjectileKind {
    /// Constant-velocity barrage bullet.
    Straight,
    /// Constant-velocity aimed shot from an escort gun.
    Turret,
    /// Homing with decaying turn strength; constant speed.
    BossMissile(Homing),
    /// Homing with constant factor; accelerates to a cap.
    RevengeMissile(Pursuit),
    /// Fixed-angle, slow rocket fired while shielded.
    ShieldRocket,
    /// Fixed-angle missile fired in the final phase.
    BasicMissile,
}

impl ProjectileKind {
    pub fn class(&self) -> ProjectileClass {
        match self {
            ProjectileKind::Straight | ProjectileKind::Turret => ProjectileClass::Bullet,
            _ => ProjectileClass::Missile,
        }
    }

    pub fn is_revenge(&self) -> bool {
        matches!(self, ProjectileKind::RevengeMissile(_))
    }
}

/// An enemy or player projectile.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    pub position: Position,
    pub velocity: Velocity,
    pub width: f64,
    pub height: f64,
    pub damage: i32,
    pub color: Color,
    /// Facing in radians, used for drawing and homing.
    pub angle: f64,
    pub kind: ProjectileKind,
}

impl Projectile {
    pub fn class(&self) -> ProjectileClass {
        self.kind.class()
    }

    /// Finite kinematics and a positive footprint.
    pub fn is_well_formed(&self) -> bool {
        self.position.x.is_finite()
            && self.position.y.is_finite()
            && self.velocity.x.is_finite()
            && self.velocity.y.is_finite()
            && self.width > 0.0
            && self.height > 0.0
    }

    /// Outside the playfield by more than the projectile's own extent.
    pub fn is_off_field(&self, bounds: &Bounds) -> bool {
        let margin = self.width.max(self.height);
        self.position.x < -margin
            || self.position.x > bounds.width + margin
            || self.position.y < -margin
            || self.position.y > bounds.height + margin
    }
}

/// A projectile waiting to join the live bullet set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScheduledProjectile {
    pub projectile: Projectile,
    pub fire_at: f64,
}

// --- Effects ---

/// A purely visual particle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub position: Position,
    pub velocity: Velocity,
    pub size: f64,
    pub color: Color,
    /// Remaining life in [0, 1]; doubles as alpha.
    pub life: f64,
    /// Life lost per tick.
    pub fade: f64,
    pub shape: ParticleShape,
}

/// A rising, fading text label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FloatingText {
    pub text: String,
    pub position: Position,
    pub color: Color,
    pub size: f64,
    pub life: f64,
}

// --- Player ---

/// Read-only player sample handed to the boss each tick.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    pub position: Position,
    /// Recent horizontal input speed (pixels per tick).
    pub input_speed: f64,
}

/// Player ship state the encounter needs for hit resolution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerStatus {
    pub position: Position,
    pub input_speed: f64,
    pub width: f64,
    pub height: f64,
    pub health: i32,
    pub invulnerable: Option<Timer>,
    pub shield_powerup: bool,
}

impl PlayerStatus {
    pub fn new(bounds: &Bounds) -> Self {
        Self {
            position: Position::new(bounds.center_x(), bounds.height - 80.0),
            input_speed: 0.0,
            width: PLAYER_WIDTH,
            height: PLAYER_HEIGHT,
            health: PLAYER_INITIAL_HEALTH,
            invulnerable: None,
            shield_powerup: false,
        }
    }

    pub fn snapshot(&self) -> PlayerSnapshot {
        PlayerSnapshot {
            position: self.position,
            input_speed: self.input_speed,
        }
    }

    pub fn is_invulnerable(&self, now: f64) -> bool {
        self.invulnerable.is_some_and(|t| !t.is_due(now))
    }
}

// --- Marker components ---

/// Tag: enemy projectile in the bullet set.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnemyBullet;

/// Tag: enemy projectile in the missile set.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnemyMissile;

/// Tag: projectile fired by the player.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlayerBullet;
