//! Level-driven difficulty progression for generated terrain.

use battletank_core::enums::ObstacleKind;
use battletank_core::types::Field;

/// Level at which steel clusters start appearing.
pub const STEEL_CLUSTER_LEVEL: u32 = 3;
/// Level at which the brick wall in front of the player start appears.
pub const DEFENSIVE_WALL_LEVEL: u32 = 2;
/// Level at which enemy fortress rings appear.
pub const FORTRESS_LEVEL: u32 = 4;
/// Level at which fortress rings get a steel core.
pub const FORTRESS_CORE_LEVEL: u32 = 6;
/// Level at which loose bricks are scattered right around the player.
pub const PLAYER_COVER_LEVEL: u32 = 5;
/// Above this level path nodes are jittered.
pub const STRAIGHT_PATH_MAX_LEVEL: u32 = 3;

/// Radius and cell count of one organic cluster.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClusterShape {
    pub radius: i32,
    pub size: usize,
}

/// Counts and shape for one obstacle type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObstacleBudget {
    /// Total cells of this type the level should end with.
    pub target: usize,
    /// Number of organic clusters to grow.
    pub clusters: usize,
    pub shape: ClusterShape,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DifficultyParams {
    pub level: u32,
    pub brick: ObstacleBudget,
    pub steel: ObstacleBudget,
    pub water: ObstacleBudget,
    pub forest: ObstacleBudget,
    pub defensive_wall: bool,
    pub fortresses: bool,
    pub fortress_cores: bool,
    pub player_cover: bool,
    pub winding_paths: bool,
}

impl DifficultyParams {
    /// Parameters for `level` on `field`. Targets are capped at a share of
    /// the placeable area so small fields stay playable.
    pub fn for_level(level: u32, field: Field) -> Self {
        let level = level.max(1);
        let l = level as usize;
        let area = ((field.width - 4).max(0) * (field.height - 4).max(0)) as usize;
        let cap = |percent: usize| area * percent / 100;

        Self {
            level,
            brick: ObstacleBudget {
                target: (20 + 4 * l).min(cap(15)),
                clusters: 2 + l / 2,
                shape: ClusterShape {
                    radius: 4 + (level / 2) as i32,
                    size: 8 + l,
                },
            },
            steel: ObstacleBudget {
                target: (2 + 2 * l).min(cap(6)),
                clusters: if level >= STEEL_CLUSTER_LEVEL { 1 + l / 3 } else { 0 },
                shape: ClusterShape {
                    radius: 3,
                    size: 5 + l / 2,
                },
            },
            water: ObstacleBudget {
                target: (6 + 2 * l).min(cap(7)),
                clusters: 1 + l / 4,
                shape: ClusterShape {
                    radius: 4,
                    size: 8 + l,
                },
            },
            forest: ObstacleBudget {
                target: (10 + 2 * l).min(cap(8)),
                clusters: 2,
                shape: ClusterShape {
                    radius: 5,
                    size: 10 + l,
                },
            },
            defensive_wall: level >= DEFENSIVE_WALL_LEVEL,
            fortresses: level >= FORTRESS_LEVEL,
            fortress_cores: level >= FORTRESS_CORE_LEVEL,
            player_cover: level >= PLAYER_COVER_LEVEL,
            winding_paths: level > STRAIGHT_PATH_MAX_LEVEL,
        }
    }

    pub fn budget(&self, kind: ObstacleKind) -> &ObstacleBudget {
        match kind {
            ObstacleKind::Brick => &self.brick,
            ObstacleKind::Steel => &self.steel,
            ObstacleKind::Water => &self.water,
            ObstacleKind::Forest => &self.forest,
        }
    }
}
