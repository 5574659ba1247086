//! Commands fed into the engine by the input layer.
//!
//! `Move` and `Fire` are gameplay actions resolved inside the tick
//! pipeline; everything else is a state transition applied before it.

use serde::{Deserialize, Serialize};

use crate::enums::Direction;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Command {
    // --- Gameplay ---
    /// Turn and drive the player tank.
    Move { direction: Direction },
    /// Fire the player's cannon.
    Fire,

    // --- State transitions ---
    Pause,
    Resume,
    /// Return to the main menu.
    OpenMenu,
    OpenSettings,
    /// Reset score and lives and start from level 1.
    NewGame,
    /// Advance after a completed level.
    NextLevel,
    /// Switch to a built-in map, resetting score and lives.
    LoadMap { index: usize },
}
