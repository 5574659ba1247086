//! Simulation engine for the battle tank game.
//!
//! Owns the hecs ECS world, runs the fixed per-tick pipeline, loads
//! levels from the generator or the map catalog, and produces
//! `GameStateSnapshot`s for the presentation layer.

pub mod config;
pub mod engine;
pub mod systems;
pub mod world_setup;

pub use battletank_core as core;
pub use config::{ConfigError, SimConfig};
pub use engine::BattleEngine;
