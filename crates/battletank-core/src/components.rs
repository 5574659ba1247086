//! ECS components for hecs entities.
//!
//! Components here are plain data. Behavior that belongs to an entity
//! itself lives on `Body` (entity.rs) and `CombatState` (combat.rs);
//! everything that looks at more than one entity lives in the sim systems.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::Point;

/// Marks the player's tank. Exactly one per world.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Player;

/// Carried-over player progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub score: u64,
    pub lives: u32,
}

/// Decision state of an AI tank.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyBrain {
    pub behavior: AiBehavior,
    pub tier: DifficultyTier,
    pub tank_type: TankType,
    /// Cell where the player was last seen; `None` means unknown.
    pub last_known_player: Option<Point>,
    /// Ticks until the next decision.
    pub move_cooldown: u32,
}

impl EnemyBrain {
    pub fn new(behavior: AiBehavior, tier: DifficultyTier, tank_type: TankType) -> Self {
        Self {
            behavior,
            tier,
            tank_type,
            last_known_player: None,
            move_cooldown: 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Obstacle {
    pub kind: ObstacleKind,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Projectile {
    pub damage: i32,
    /// Tick on which it was fired; owner hits on that tick are ignored.
    pub spawned_tick: u64,
    /// Remaining ticks of travel.
    pub range_left: u32,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Bonus {
    pub kind: BonusKind,
    pub active: bool,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Explosion {
    pub lifetime: u32,
}

/// Monotonic creation number, used for deterministic iteration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Serial(pub u64);
