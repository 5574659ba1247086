//! Enemy AI system: runs every enemy's state machine in creation order.
//!
//! Decisions read the player position from before this tick's player
//! action. Each enemy sees the moves of the enemies that decided before
//! it through a shared occupancy grid; collision resolution still has
//! the final say.

use hecs::{Entity, World};
use rand_chacha::ChaCha8Rng;
use tracing::trace;

use battletank_ai::fsm::{decide_move, decide_shot, EnemyContext, ShotContext};
use battletank_core::combat::CombatState;
use battletank_core::components::{EnemyBrain, Serial};
use battletank_core::constants::AI_DECISION_COOLDOWN;
use battletank_core::entity::Body;
use battletank_core::enums::Direction;
use battletank_core::events::GameEvent;
use battletank_core::types::{Field, GridPoint, Point};

use crate::systems::in_creation_order;
use crate::world_setup::{occupancy, spawn_projectile, ProjectileSpawn};

/// Tick-wide inputs shared by every enemy decision.
pub struct AiTick {
    pub field: Field,
    pub current_tick: u64,
    pub player_position: Point,
    pub projectile_range: u32,
}

pub fn run(
    world: &mut World,
    tick: &AiTick,
    rng: &mut ChaCha8Rng,
    serial_counter: &mut u64,
    events: &mut Vec<GameEvent>,
) {
    let mut grid = occupancy(world, tick.field, true);

    let enemies: Vec<Entity> = in_creation_order(
        world
            .query::<(&EnemyBrain, &Body, &Serial)>()
            .iter()
            .filter(|(_, (_, body, _))| !body.destroyed)
            .map(|(entity, (_, _, serial))| (*serial, entity))
            .collect(),
    );

    // Shots are spawned after every enemy has moved.
    let mut shots: Vec<ProjectileSpawn> = Vec::new();

    for entity in enemies {
        let Ok((brain, body, combat)) =
            world.query_one_mut::<(&mut EnemyBrain, &mut Body, &mut CombatState)>(entity)
        else {
            continue;
        };
        if let Some(direction) = combat.take_follow_up() {
            shots.push(shell(body, combat, direction, entity, tick));
        }
        if brain.move_cooldown > 0 {
            continue;
        }

        let from = body.position;
        let decision = decide_move(
            &EnemyContext {
                behavior: brain.behavior,
                position: from,
                facing: body.facing,
                player: tick.player_position,
                grid: &grid,
            },
            rng,
        );
        if let Some(direction) = decision.step {
            body.step(direction, combat.effective_speed(body.speed));
        }
        body.rotate(decision.facing);
        // Blocked moves are undone here, before the shot is decided.
        let lands = body
            .pending_move
            .is_some_and(|m| m.path().all(|p| grid.is_passable(p)));
        if lands {
            grid.move_tank(from, body.position);
        } else {
            body.revert_move();
        }
        brain.last_known_player = decision.last_known_player;
        brain.move_cooldown = AI_DECISION_COOLDOWN;

        let shot = decide_shot(
            &ShotContext {
                behavior: brain.behavior,
                tier: brain.tier,
                position: body.position,
                target: brain.last_known_player,
                can_fire: combat.can_fire(),
                grid: &grid,
            },
            rng,
        );
        if let Some(direction) = shot {
            body.rotate(direction);
            if combat.fire() {
                trace!(?entity, ?direction, "enemy fires");
                shots.push(shell(body, combat, direction, entity, tick));
                combat.queue_follow_up(direction);
            }
        }
    }

    for shot in shots {
        events.push(GameEvent::ProjectileFired {
            position: shot.position,
            by_player: false,
        });
        spawn_projectile(world, serial_counter, shot);
    }
}

fn shell(
    body: &Body,
    combat: &CombatState,
    direction: Direction,
    owner: Entity,
    tick: &AiTick,
) -> ProjectileSpawn {
    ProjectileSpawn {
        position: body.position.step(direction, 1),
        direction,
        damage: combat.damage,
        owner: Some(owner),
        tick: tick.current_tick,
        range: tick.projectile_range,
    }
}
