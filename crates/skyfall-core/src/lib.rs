//! Core types and definitions for the SKYFALL boss encounter.
//!
//! This crate defines the vocabulary shared across all other crates:
//! components, commands, state snapshots, events, timers, configuration,
//! and constants. It has no dependency on a renderer or runtime framework.

pub mod commands;
pub mod components;
pub mod config;
pub mod constants;
pub mod enums;
pub mod events;
pub mod outbox;
pub mod state;
pub mod timer;
pub mod types;
