//! Events emitted by the simulation for audio and UI feedback.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::Point;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    ProjectileFired { position: Point, by_player: bool },
    ObstacleDestroyed { position: Point, kind: ObstacleKind },
    TankDestroyed { position: Point, was_player: bool },
    PlayerHit { remaining_health: i32 },
    BonusSpawned { position: Point, kind: BonusKind },
    BonusCollected { kind: BonusKind, by_player: bool },
    PlayerRespawned { position: Point, lives: u32 },
    LevelComplete { level: u32 },
    GameOver { score: u64 },
}
