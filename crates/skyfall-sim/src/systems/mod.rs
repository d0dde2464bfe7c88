//! ECS systems that operate on the encounter world each tick.
//!
//! Systems are plain functions over `&mut World` (or `&World` for read-only)
//! plus whatever engine state they need. Anything they produce for the
//! engine to apply later goes into an `Outbox`.

pub mod boss_ai;
pub mod cleanup;
pub mod collision;
pub mod effects;
pub mod escort_spawner;
pub mod escorts;
pub mod player_bullets;
pub mod projectiles;
pub mod scheduled;
pub mod snapshot;
