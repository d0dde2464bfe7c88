//! Encounter engine for SKYFALL.
//!
//! Owns the hecs ECS world holding the boss, escorts and every live
//! projectile, runs systems at a fixed tick rate, and produces
//! `EncounterSnapshot`s for the frontend.

pub mod encounter;
pub mod engine;
pub mod render;
pub mod systems;
pub mod world_setup;

pub use engine::EncounterEngine;
pub use skyfall_core as core;
