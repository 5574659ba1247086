//! The output of level construction.

use serde::{Deserialize, Serialize};

use battletank_core::enums::*;
use battletank_core::types::{Field, Point};

/// Where a level's contents came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LevelSource {
    Generated,
    Map { name: String },
}

/// One enemy to spawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnemySpawn {
    pub position: Point,
    pub behavior: AiBehavior,
    pub tier: DifficultyTier,
    pub tank_type: TankType,
}

/// Everything needed to populate a world for one level.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelPlan {
    pub field: Field,
    pub level: u32,
    pub source: LevelSource,
    /// Obstacle cells in row-major order.
    pub obstacles: Vec<(Point, ObstacleKind)>,
    pub enemies: Vec<EnemySpawn>,
    pub player_start: Point,
    pub player_facing: Direction,
}

impl LevelPlan {
    pub fn obstacle_count(&self, kind: ObstacleKind) -> usize {
        self.obstacles.iter().filter(|(_, k)| *k == kind).count()
    }

    pub fn obstacle_at(&self, p: Point) -> Option<ObstacleKind> {
        self.obstacles
            .iter()
            .find(|(q, _)| *q == p)
            .map(|(_, k)| *k)
    }
}
