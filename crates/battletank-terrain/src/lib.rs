//! Terrain queries for the battle tank simulation.
//!
//! Cell occupancy and straight-line shot checks shared by the AI,
//! the engine, and the level generator.

pub use battletank_core as core;

pub mod grid;
pub mod los;

// Re-export key types for convenience.
pub use grid::OccupancyGrid;
pub use los::{direction_towards, has_clear_shot, is_visible};
