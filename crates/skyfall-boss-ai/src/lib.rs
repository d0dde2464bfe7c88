//! Boss AI for SKYFALL.
//!
//! Pure functions over plain data: the boss phase machine, its movement and
//! attack scheduling, the shield subsystem, escort behavior, and the
//! projectile factory. No ECS dependency; everything a tick produces goes
//! into an [`Outbox`](skyfall_core::outbox::Outbox).

pub mod attacks;
pub mod damage;
pub mod effects;
pub mod escort;
pub mod factory;
pub mod fsm;
pub mod kinematics;
pub mod movement;
pub mod sampling;
pub mod shield;
pub mod update;

pub use skyfall_core as core;
pub use update::{update, TickContext};

#[cfg(test)]
mod tests;
