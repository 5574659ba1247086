//! Level construction for the battle tank simulation.
//!
//! Procedural terrain generation with difficulty progression, textual
//! map layouts, the built-in map catalog, and map-driven population.
//! Everything here is pure: given a field, a level number, optional
//! layout and a random source, it returns a `LevelPlan` that the engine
//! spawns into its world.

pub mod cluster;
pub mod difficulty;
pub mod generator;
pub mod layout;
pub mod maps;
pub mod plan;
pub mod population;

pub use battletank_core as core;

pub use generator::generate_level;
pub use layout::{MapError, MapLayout};
pub use maps::MapCatalog;
pub use plan::{EnemySpawn, LevelPlan, LevelSource};
pub use population::populate;

#[cfg(test)]
mod tests;
