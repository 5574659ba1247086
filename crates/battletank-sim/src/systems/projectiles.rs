//! Projectile system: resolves every live projectile against the field.
//!
//! Each projectile checks, in order: leaving the field, terrain that
//! stops shots, then tanks. The first thing it meets consumes it. A
//! projectile that meets nothing expires once its range is used up.

use std::collections::HashMap;

use hecs::{Entity, World};

use battletank_core::combat::CombatState;
use battletank_core::components::{Obstacle, PlayerStats, Projectile, Serial};
use battletank_core::constants::{DAMAGE_FLASH_TICKS, SCORE_ENEMY_KILL};
use battletank_core::entity::Body;
use battletank_core::events::GameEvent;
use battletank_core::types::{Field, Point};

use crate::systems::{in_creation_order, is_live_at, live_tanks};
use crate::world_setup::{spawn_explosion, FiredBy};

pub struct HitTick {
    pub field: Field,
    pub current_tick: u64,
    pub player: Entity,
}

/// Accumulated side effects of one resolution pass.
#[derive(Default)]
struct Outcome {
    blasts: Vec<Point>,
    score: u64,
    player_hit: bool,
}

pub fn run(
    world: &mut World,
    tick: &HitTick,
    serial_counter: &mut u64,
    events: &mut Vec<GameEvent>,
    damage_flash: &mut u32,
) {
    let projectiles: Vec<Entity> = in_creation_order(
        world
            .query::<(&Projectile, &Body, &Serial)>()
            .iter()
            .filter(|(_, (_, body, _))| !body.destroyed)
            .map(|(entity, (_, _, serial))| (*serial, entity))
            .collect(),
    );
    let walls = shot_blocking_terrain(world);
    let tanks = live_tanks(world);
    let mut outcome = Outcome::default();

    for projectile in projectiles {
        let Ok((shot, body)) = world.query_one_mut::<(&Projectile, &Body)>(projectile) else {
            continue;
        };
        let (position, damage, fired_now, range_left) = (
            body.position,
            shot.damage,
            shot.spawned_tick == tick.current_tick,
            shot.range_left,
        );
        let owner = world.get::<&FiredBy>(projectile).ok().map(|f| f.0);

        let spent = if !tick.field.contains(position) {
            true
        } else if let Some(&wall) = walls.get(&position).filter(|&&w| is_live(world, w)) {
            hit_obstacle(world, wall, damage, events, &mut outcome);
            true
        } else if let Some(&target) = tanks.iter().find(|&&t| {
            // A tank cannot hit itself on the tick it fires.
            let own_fresh_shot = fired_now && owner == Some(t);
            !own_fresh_shot && is_live_at(world, t, position)
        }) {
            hit_tank(world, tick, target, owner, damage, events, &mut outcome);
            true
        } else {
            range_left == 0
        };

        if spent {
            if let Ok(mut body) = world.get::<&mut Body>(projectile) {
                body.destroyed = true;
            }
        }
    }

    if outcome.player_hit {
        *damage_flash = DAMAGE_FLASH_TICKS;
    }
    if outcome.score > 0 {
        if let Ok(mut stats) = world.get::<&mut PlayerStats>(tick.player) {
            stats.score += outcome.score;
        }
    }
    for position in outcome.blasts {
        spawn_explosion(world, serial_counter, position);
    }
}

/// Live projectile-stopping obstacles by cell, first created wins.
fn shot_blocking_terrain(world: &World) -> HashMap<Point, Entity> {
    let walls = in_creation_order(
        world
            .query::<(&Obstacle, &Body, &Serial)>()
            .iter()
            .filter(|(_, (obstacle, body, _))| obstacle.kind.blocks_projectiles() && !body.destroyed)
            .map(|(entity, (_, body, serial))| (*serial, (body.position, entity)))
            .collect(),
    );
    let mut by_cell = HashMap::new();
    for (position, entity) in walls {
        by_cell.entry(position).or_insert(entity);
    }
    by_cell
}

fn is_live(world: &World, entity: Entity) -> bool {
    world.get::<&Body>(entity).is_ok_and(|b| !b.destroyed)
}

fn hit_obstacle(
    world: &mut World,
    wall: Entity,
    damage: i32,
    events: &mut Vec<GameEvent>,
    outcome: &mut Outcome,
) {
    let Ok((obstacle, body)) = world.query_one_mut::<(&Obstacle, &mut Body)>(wall) else {
        return;
    };
    body.take_damage(damage);
    if body.destroyed {
        events.push(GameEvent::ObstacleDestroyed {
            position: body.position,
            kind: obstacle.kind,
        });
        outcome.blasts.push(body.position);
    }
}

fn hit_tank(
    world: &mut World,
    tick: &HitTick,
    target: Entity,
    owner: Option<Entity>,
    damage: i32,
    events: &mut Vec<GameEvent>,
    outcome: &mut Outcome,
) {
    let Ok((body, combat)) = world.query_one_mut::<(&mut Body, &CombatState)>(target) else {
        return;
    };
    let dealt = combat.absorb(damage);
    body.take_damage(dealt);

    let was_player = target == tick.player;
    if was_player && dealt > 0 {
        outcome.player_hit = true;
        events.push(GameEvent::PlayerHit {
            remaining_health: body.health.max(0),
        });
    }
    if body.destroyed {
        events.push(GameEvent::TankDestroyed {
            position: body.position,
            was_player,
        });
        outcome.blasts.push(body.position);
        if !was_player && owner == Some(tick.player) {
            outcome.score += SCORE_ENEMY_KILL;
        }
    }
}
