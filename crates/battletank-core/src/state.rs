//! Game state snapshot: the complete visible state handed to the
//! presentation layer after each tick.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::GameEvent;
use crate::types::{Field, Point};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameStateSnapshot {
    pub tick: u64,
    pub state: GameState,
    pub level: u32,
    pub field: Field,
    pub player: Option<PlayerView>,
    pub enemies: Vec<TankView>,
    pub obstacles: Vec<ObstacleView>,
    pub projectiles: Vec<ProjectileView>,
    pub bonuses: Vec<BonusView>,
    pub explosions: Vec<ExplosionView>,
    pub enemy_count: usize,
    pub damage_flash: bool,
    pub events: Vec<GameEvent>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerView {
    pub tank: TankView,
    pub score: u64,
    pub lives: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TankView {
    pub position: Point,
    pub facing: Direction,
    pub health: i32,
    pub glyph: char,
    /// `None` for the player.
    pub tank_type: Option<TankType>,
    pub behavior: Option<AiBehavior>,
    pub effects: EffectsView,
}

/// Remaining ticks of each timed effect.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct EffectsView {
    pub shield: u32,
    pub double_fire: u32,
    pub speed_boost: u32,
    pub slow: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObstacleView {
    pub position: Point,
    pub kind: ObstacleKind,
    pub health: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectileView {
    pub position: Point,
    pub direction: Direction,
    pub glyph: char,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BonusView {
    pub position: Point,
    pub kind: BonusKind,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExplosionView {
    pub position: Point,
    pub lifetime: u32,
}

impl GameStateSnapshot {
    /// Positions of every entity in the snapshot.
    pub fn positions(&self) -> impl Iterator<Item = Point> + '_ {
        self.player
            .iter()
            .map(|p| p.tank.position)
            .chain(self.enemies.iter().map(|t| t.position))
            .chain(self.obstacles.iter().map(|o| o.position))
            .chain(self.projectiles.iter().map(|p| p.position))
            .chain(self.bonuses.iter().map(|b| b.position))
            .chain(self.explosions.iter().map(|e| e.position))
    }
}
