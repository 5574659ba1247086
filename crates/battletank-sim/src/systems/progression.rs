//! Progression system: player death, respawn, game over and level
//! completion.

use hecs::{Entity, World};
use tracing::{debug, info};

use battletank_core::combat::CombatState;
use battletank_core::components::{EnemyBrain, PlayerStats};
use battletank_core::constants::PLAYER_HEALTH;
use battletank_core::entity::Body;
use battletank_core::enums::{Direction, GameState};
use battletank_core::events::GameEvent;
use battletank_core::types::{Field, GridPoint, Point};

use crate::world_setup::occupancy;

/// Evaluate end-of-tick transitions. Returns the new game state, if any.
///
/// `home` is the cell the player respawns on when it is free.
pub fn run(
    world: &mut World,
    player: Entity,
    field: Field,
    home: Point,
    level: u32,
    events: &mut Vec<GameEvent>,
) -> Option<GameState> {
    let player_dead = world.get::<&Body>(player).is_ok_and(|b| b.destroyed);
    if player_dead {
        let (lives, score) = match world.get::<&mut PlayerStats>(player) {
            Ok(mut stats) => {
                stats.lives = stats.lives.saturating_sub(1);
                (stats.lives, stats.score)
            }
            Err(_) => (0, 0),
        };
        if lives == 0 {
            info!(score, level, "game over");
            events.push(GameEvent::GameOver { score });
            return Some(GameState::GameOver);
        }
        let spot = respawn_cell(world, field, home);
        if let Ok((body, combat)) = world.query_one_mut::<(&mut Body, &mut CombatState)>(player) {
            body.place(spot, Direction::Up);
            body.health = PLAYER_HEALTH;
            body.destroyed = false;
            combat.clear_effects();
            combat.reload_timer = 0;
        }
        debug!(?spot, lives, "player respawned");
        events.push(GameEvent::PlayerRespawned {
            position: spot,
            lives,
        });
    }

    if enemies_left(world) == 0 {
        info!(level, "level complete");
        events.push(GameEvent::LevelComplete { level });
        return Some(GameState::LevelComplete);
    }
    None
}

pub fn enemies_left(world: &World) -> usize {
    world
        .query::<(&EnemyBrain, &Body)>()
        .iter()
        .filter(|(_, (_, body))| !body.destroyed)
        .count()
}

/// `home` when a tank could stand there, otherwise the nearest free
/// interior cell (ties broken row-major).
pub fn respawn_cell(world: &World, field: Field, home: Point) -> Point {
    let grid = occupancy(world, field, true);
    if grid.is_passable(home) {
        return home;
    }
    field
        .cells()
        .filter(|&p| field.is_interior(p) && grid.is_passable(p))
        .min_by_key(|&p| (p.manhattan(home), p.y, p.x))
        .unwrap_or(home)
}
