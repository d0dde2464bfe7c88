//! Simulation constants and tuning parameters.
//!
//! Distances are pixels, speeds are pixels per tick, durations are
//! milliseconds. Values marked as defaults can be overridden through
//! [`crate::config::EncounterConfig`].

use crate::types::Color;

/// Simulation tick rate (Hz).
pub const TICK_RATE: u32 = 60;

/// Milliseconds per tick.
pub const DT_MS: f64 = 1000.0 / TICK_RATE as f64;

// --- Boss body ---

pub const BOSS_WIDTH: f64 = 280.0;
pub const BOSS_HEIGHT: f64 = 300.0;

/// Spawn height (above the top edge).
pub const BOSS_SPAWN_Y: f64 = -120.0;

/// Resting y coordinate after entrance.
pub const BOSS_TARGET_Y: f64 = 60.0;

/// Default maximum hit points.
pub const BOSS_MAX_HEALTH: i32 = 200;

pub const BOSS_ENTRANCE_SPEED: f64 = 0.9;
pub const BOSS_SPEED: f64 = 0.25;

/// Time for the health bar to fill during the entrance.
pub const BOSS_HEALTH_BAR_FILL_MS: f64 = 3000.0;

pub const BOSS_ENGINE_PARTICLE_INTERVAL_MS: f64 = 30.0;

/// Duration of the white hit flash.
pub const HIT_FLASH_MS: f64 = 100.0;

// --- Weave ---

pub const BASE_WAVE_SPEED: f64 = 0.005;
pub const WAVE_SPEED_RETARGET_MS: f64 = 3000.0;
pub const BASE_WAVE_AMPLITUDE: f64 = 250.0;
pub const WAVE_AMPLITUDE_RETARGET_MS: f64 = 5000.0;
pub const MIN_WAVE_AMPLITUDE: f64 = 200.0;
pub const MAX_WAVE_AMPLITUDE: f64 = 450.0;

/// Per-tick easing factor toward speed/amplitude targets.
pub const WAVE_EASE: f64 = 0.02;

/// Horizontal clearance kept between the hull and the playfield edge.
pub const WAVE_EDGE_MARGIN: f64 = 10.0;

/// Wave speed multiplier once the shield has broken.
pub const POST_SHIELD_WAVE_SPEED_FACTOR: f64 = 1.5;

// --- Approach to center ---

pub const APPROACH_AMPLITUDE_EASE: f64 = 0.03;
pub const APPROACH_Y_STEP_DIVISOR: f64 = 20.0;
pub const APPROACH_Y_STEP_MIN: f64 = 0.5;
pub const APPROACH_Y_STEP_MAX: f64 = 2.0;
pub const APPROACH_Y_SNAP: f64 = 2.0;

/// Tolerance on x, amplitude and y for "arrived at center".
pub const CENTER_TOLERANCE: f64 = 8.0;

// --- Turrets ---

/// Turret x offset as a fraction of boss width.
pub const TURRET_X_FRACTION: f64 = 1.0 / 3.0;
/// Turret y offset as a fraction of boss height.
pub const TURRET_Y_FRACTION: f64 = 0.1;

// --- Homing boss missiles ---

pub const MISSILE_INTERVAL_MS: f64 = 4000.0;
pub const MISSILE_WIDTH: f64 = 10.0;
pub const MISSILE_HEIGHT: f64 = 30.0;
pub const MISSILE_SPEED: f64 = 4.0;
pub const MISSILE_DAMAGE: i32 = 1;
pub const MISSILE_HEALTH: i32 = 3;
pub const MISSILE_HOMING_INITIAL: f64 = 0.008;
pub const MISSILE_HOMING_DECAY: f64 = 0.00002;
pub const MISSILE_HOMING_MIN: f64 = 0.001;
pub const MISSILE_COLOR: Color = Color::rgb(255, 140, 0);

// --- Barrage ---

pub const BARRAGE_INTERVAL_MIN_MS: f64 = 6000.0;
pub const BARRAGE_INTERVAL_MAX_MS: f64 = 8000.0;
pub const BARRAGE_EXTRA_ROUND_CHANCE: f64 = 0.3;
/// Delay of the doubled copy of each barrage bullet.
pub const BARRAGE_DOUBLE_DELAY_MS: f64 = 100.0;
pub const BURST_COUNT_MIN: u32 = 5;
pub const BURST_COUNT_MAX: u32 = 7;
pub const BURST_INTERVAL_MS: f64 = 350.0;
pub const FINAL_PHASE_BURST_COUNT_MIN: u32 = 5;
pub const FINAL_PHASE_BURST_COUNT_MAX: u32 = 7;
pub const FINAL_PHASE_BURST_COOLDOWN_MS: f64 = 350.0;
pub const BARRAGE_BULLETS_MIN: u32 = 6;
pub const BARRAGE_BULLETS_MAX: u32 = 9;
pub const BARRAGE_SPREAD: f64 = std::f64::consts::PI;
/// Maximum blend of the volley axis toward the player.
pub const BARRAGE_SIDE_FACTOR_MAX: f64 = 0.3;
pub const BARRAGE_AXIS_JITTER: f64 = 0.4;
pub const BARRAGE_BULLET_JITTER: f64 = 0.1;
pub const BARRAGE_ORIGIN_Y_DIVISOR: f64 = 2.2;

// --- Straight bullets ---

pub const BULLET_WIDTH: f64 = 6.0;
pub const BULLET_HEIGHT: f64 = 12.0;
pub const BULLET_SPEED: f64 = 6.0;
pub const BULLET_DAMAGE: i32 = 1;
pub const BULLET_COLOR: Color = Color::rgb(255, 0, 0);

// --- Laser ---

pub const LASER_HEALTH_THRESHOLD: i32 = 100;
pub const LASER_WARNING_MS: f64 = 1000.0;
pub const LASER_FIRING_MS: f64 = 2000.0;
pub const LASER_COOLDOWN_MIN_MS: f64 = 4000.0;
pub const LASER_COOLDOWN_MAX_MS: f64 = 7000.0;
/// Short cooldown when the player outpaces the boss weave.
pub const LASER_EVADED_COOLDOWN_MIN_MS: f64 = 2000.0;
pub const LASER_EVADED_COOLDOWN_MAX_MS: f64 = 4000.0;
pub const LASER_WIDTH: f64 = 6.0;
pub const LASER_DAMAGE: i32 = 1;

// --- Shield ---

pub const SHIELD_HEALTH_THRESHOLD: i32 = 40;
pub const TEMP_INVINCIBLE_THRESHOLD: i32 = 21;
pub const SHIELD_HEALTH: i32 = 2;
pub const SHIELD_ROCKET_INTERVAL_MIN_MS: f64 = 5000.0;
pub const SHIELD_ROCKET_INTERVAL_MAX_MS: f64 = 10000.0;
pub const SHIELD_BREAK_MS: f64 = 1500.0;
pub const FINAL_PHASE_MISSILE_DELAY_MS: f64 = 1000.0;

/// Visual radius as a fraction of boss width (crack generation).
pub const SHIELD_VISUAL_RADIUS_FACTOR: f64 = 0.75;
/// Collision radius as a fraction of boss width.
pub const SHIELD_COLLISION_RADIUS_FACTOR: f64 = 0.9;

pub const SHIELD_BASE_ALPHA: f64 = 0.3;
pub const SHIELD_PULSE_AMPLITUDE: f64 = 0.2;
pub const SHIELD_PULSE_STEP: f64 = 0.05;

pub const SHIELD_ROCKET_WIDTH: f64 = 7.0;
pub const SHIELD_ROCKET_HEIGHT: f64 = 21.0;
pub const SHIELD_ROCKET_SPEED: f64 = 1.5;
pub const SHIELD_ROCKET_COLOR: Color = Color::rgb(0, 255, 255);

// --- Cracks ---

pub const CRACK_BASE_COUNT: u32 = 3;
pub const CRACK_COUNT_PER_LEVEL: u32 = 2;
pub const CRACK_MAX_DEPTH: u32 = 5;
pub const CRACK_BRANCH_MAX_DEPTH: u32 = 4;
pub const CRACK_BRANCH_CHANCE_BASE: f64 = 0.2;
pub const CRACK_BRANCH_CHANCE_PER_LEVEL: f64 = 0.2;

// --- Escorts ---

pub const ESCORT_WIDTH: f64 = 75.0;
pub const ESCORT_HEIGHT: f64 = 75.0;
pub const ESCORT_HEALTH: i32 = 25;
pub const ESCORT_SPEED: f64 = 0.5;
pub const ESCORT_LIMIT: usize = 3;
pub const ESCORT_SPAWN_INTERVAL_MIN_MS: f64 = 6000.0;
pub const ESCORT_SPAWN_INTERVAL_MAX_MS: f64 = 8000.0;
/// Retry delay when the escort cap is reached.
pub const ESCORT_CAP_RETRY_MS: f64 = 1000.0;
pub const ESCORT_SPAWN_ATTEMPTS: u32 = 10;
/// Live revenge missiles at which the spawn interval doubles.
pub const ESCORT_REVENGE_LOAD_THRESHOLD: usize = 3;
pub const ESCORT_FIRST_ATTACK_MIN_MS: f64 = 4000.0;
pub const ESCORT_FIRST_ATTACK_MAX_MS: f64 = 6000.0;
pub const ESCORT_WARNING_MS: f64 = 600.0;
pub const ESCORT_BURST_SHOTS: u32 = 6;
pub const ESCORT_BURST_SPACING_MS: f64 = 300.0;
pub const ESCORT_COOLDOWN_MIN_MS: f64 = 4000.0;
pub const ESCORT_COOLDOWN_MAX_MS: f64 = 6000.0;
pub const ESCORT_ENGINE_PARTICLE_INTERVAL_MS: f64 = 50.0;
pub const ESCORT_SPARK_INTERVAL_MS: f64 = 150.0;
/// Hit points at or below which an escort trails sparks.
pub const ESCORT_SPARK_HEALTH: i32 = 10;
/// Damage an escort takes from ramming a player protected by a shield power-up.
pub const ESCORT_RAM_DAMAGE: i32 = 5;

// --- Revenge missile ---

pub const REVENGE_MISSILE_WIDTH: f64 = 12.0;
pub const REVENGE_MISSILE_HEIGHT: f64 = 30.0;
pub const REVENGE_MISSILE_INITIAL_SPEED: f64 = 1.2;
pub const REVENGE_MISSILE_ACCELERATION: f64 = 0.022;
pub const REVENGE_MISSILE_MAX_SPEED: f64 = 5.0;
pub const REVENGE_MISSILE_HOMING_FACTOR: f64 = 0.03;
pub const REVENGE_MISSILE_DAMAGE: i32 = 1;
pub const REVENGE_MISSILE_COLOR: Color = Color::rgb(160, 160, 160);

// --- Player ---

pub const PLAYER_WIDTH: f64 = 50.0;
pub const PLAYER_HEIGHT: f64 = 50.0;
pub const PLAYER_INITIAL_HEALTH: i32 = 3;
pub const PLAYER_INVULNERABLE_MS: f64 = 1500.0;
pub const PLAYER_BULLET_WIDTH: f64 = 4.0;
pub const PLAYER_BULLET_HEIGHT: f64 = 12.0;
pub const PLAYER_BULLET_SPEED: f64 = 10.0;
pub const PLAYER_BULLET_COLOR: Color = Color::rgb(255, 255, 0);

// --- Rewards ---

pub const XP_BOSS: u32 = 5000;
pub const XP_ESCORT: u32 = 25;
pub const SCORE_BOSS: u32 = 1000;
pub const SCORE_ESCORT: u32 = 50;

// --- Floating text ---

pub const FLOATING_TEXT_LIFE: f64 = 1.0;
pub const FLOATING_TEXT_FADE: f64 = 0.015;
pub const FLOATING_TEXT_RISE: f64 = 0.6;
