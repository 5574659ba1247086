//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::types::Point;

/// Cardinal facing / movement direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    #[default]
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// The two directions at 90 degrees to this one.
    pub fn perpendiculars(self) -> [Direction; 2] {
        match self {
            Direction::Up | Direction::Down => [Direction::Left, Direction::Right],
            Direction::Left | Direction::Right => [Direction::Up, Direction::Down],
        }
    }

    /// One-cell offset. Up is negative y.
    pub fn delta(self) -> Point {
        match self {
            Direction::Up => Point::new(0, -1),
            Direction::Down => Point::new(0, 1),
            Direction::Left => Point::new(-1, 0),
            Direction::Right => Point::new(1, 0),
        }
    }

    pub fn is_vertical(self) -> bool {
        matches!(self, Direction::Up | Direction::Down)
    }

    /// Player tank glyph for this facing.
    pub fn tank_glyph(self) -> char {
        match self {
            Direction::Up => '^',
            Direction::Down => 'v',
            Direction::Left => '<',
            Direction::Right => '>',
        }
    }

    /// Parse a directional player marker from a layout.
    pub fn from_tank_glyph(c: char) -> Option<Direction> {
        match c {
            '^' => Some(Direction::Up),
            'v' => Some(Direction::Down),
            '<' => Some(Direction::Left),
            '>' => Some(Direction::Right),
            _ => None,
        }
    }
}

/// Top-level game state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameState {
    #[default]
    Menu,
    Playing,
    Paused,
    GameOver,
    Settings,
    LevelComplete,
}

/// Terrain obstacle type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObstacleKind {
    /// Destructible, blocks tanks and projectiles.
    Brick,
    /// Indestructible, blocks tanks and projectiles.
    Steel,
    /// Blocks tanks, projectiles fly over it.
    Water,
    /// Passable cover.
    Forest,
}

impl ObstacleKind {
    pub const ALL: [ObstacleKind; 4] = [
        ObstacleKind::Brick,
        ObstacleKind::Steel,
        ObstacleKind::Water,
        ObstacleKind::Forest,
    ];

    pub fn blocks_tanks(self) -> bool {
        !matches!(self, ObstacleKind::Forest)
    }

    pub fn blocks_projectiles(self) -> bool {
        matches!(self, ObstacleKind::Brick | ObstacleKind::Steel)
    }

    pub fn is_destructible(self) -> bool {
        matches!(self, ObstacleKind::Brick)
    }

    pub fn initial_health(self) -> i32 {
        match self {
            ObstacleKind::Brick => BRICK_HEALTH,
            _ => 1,
        }
    }

    /// Layout / display symbol.
    pub fn symbol(self) -> char {
        match self {
            ObstacleKind::Brick => '#',
            ObstacleKind::Steel => 'X',
            ObstacleKind::Water => '~',
            ObstacleKind::Forest => '*',
        }
    }

    pub fn from_symbol(c: char) -> Option<ObstacleKind> {
        match c {
            '#' => Some(ObstacleKind::Brick),
            'X' => Some(ObstacleKind::Steel),
            '~' => Some(ObstacleKind::Water),
            '*' => Some(ObstacleKind::Forest),
            _ => None,
        }
    }
}

/// Pickup bonus type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BonusKind {
    Shield,
    DoubleFire,
    SpeedBoost,
    LifeUp,
}

impl BonusKind {
    pub const ALL: [BonusKind; 4] = [
        BonusKind::Shield,
        BonusKind::DoubleFire,
        BonusKind::SpeedBoost,
        BonusKind::LifeUp,
    ];

    pub fn symbol(self) -> char {
        match self {
            BonusKind::Shield => 'S',
            BonusKind::DoubleFire => 'F',
            BonusKind::SpeedBoost => 'B',
            BonusKind::LifeUp => 'L',
        }
    }
}

/// Enemy behavior variant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AiBehavior {
    #[default]
    Random,
    Aggressive,
    Defensive,
}

/// Enemy chassis. Fixes base speed, shell damage, armor and reload at spawn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TankType {
    #[default]
    Basic,
    Fast,
    Damage,
    Armored,
}

/// Construction-time parameters of a tank.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TankStats {
    pub speed: i32,
    pub damage: i32,
    pub health: i32,
    pub reload_time: u32,
}

impl TankType {
    pub fn stats(self) -> TankStats {
        match self {
            TankType::Basic => TankStats {
                speed: 1,
                damage: 1,
                health: 1,
                reload_time: ENEMY_RELOAD_TICKS,
            },
            TankType::Fast => TankStats {
                speed: 2,
                damage: 1,
                health: 1,
                reload_time: ENEMY_RELOAD_TICKS,
            },
            TankType::Damage => TankStats {
                speed: 1,
                damage: 2,
                health: 1,
                reload_time: ENEMY_RELOAD_TICKS,
            },
            TankType::Armored => TankStats {
                speed: 1,
                damage: 1,
                health: 3,
                reload_time: ENEMY_RELOAD_TICKS + 1,
            },
        }
    }
}

/// Coarse difficulty class derived from the level number.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DifficultyTier {
    #[default]
    Rookie,
    Regular,
    Elite,
}

impl DifficultyTier {
    /// Levels 1-3 are tier 1, 4-6 tier 2, everything later tier 3.
    pub fn from_level(level: u32) -> DifficultyTier {
        match level {
            0..=3 => DifficultyTier::Rookie,
            4..=6 => DifficultyTier::Regular,
            _ => DifficultyTier::Elite,
        }
    }

    /// Numeric tier, 1 through 3.
    pub fn number(self) -> u32 {
        match self {
            DifficultyTier::Rookie => 1,
            DifficultyTier::Regular => 2,
            DifficultyTier::Elite => 3,
        }
    }
}

/// Explicit discriminant for everything that can occupy a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Player,
    Enemy(TankType),
    Obstacle(ObstacleKind),
    Projectile,
    Bonus(BonusKind),
    Explosion,
}
