//! Entity spawn factories for setting up the simulation world.
//!
//! Every entity gets a `Serial` from the engine's counter so systems can
//! visit entities in creation order, plus an `EntityKind` tag naming what
//! it is.

use hecs::{Entity, EntityBuilder, World};

use battletank_core::combat::CombatState;
use battletank_core::components::*;
use battletank_core::constants::*;
use battletank_core::entity::Body;
use battletank_core::enums::*;
use battletank_core::types::{Field, Point};
use battletank_procgen::{EnemySpawn, LevelPlan};
use battletank_terrain::OccupancyGrid;

/// Tank that fired a projectile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FiredBy(pub Entity);

/// Parameters for a new projectile.
#[derive(Debug, Clone, Copy)]
pub struct ProjectileSpawn {
    pub position: Point,
    pub direction: Direction,
    pub damage: i32,
    pub owner: Option<Entity>,
    pub tick: u64,
    pub range: u32,
}

fn next_serial(counter: &mut u64) -> Serial {
    let serial = Serial(*counter);
    *counter += 1;
    serial
}

/// Spawn the player's tank with full health and the given lives.
pub fn spawn_player(
    world: &mut World,
    counter: &mut u64,
    position: Point,
    facing: Direction,
    lives: u32,
) -> Entity {
    world.spawn((
        Player,
        EntityKind::Player,
        Body::new(position, facing, PLAYER_SPEED, PLAYER_HEALTH),
        CombatState::new(PLAYER_DAMAGE, PLAYER_RELOAD_TICKS),
        PlayerStats { score: 0, lives },
        next_serial(counter),
    ))
}

/// Spawn an AI tank. Stats come from its tank type.
pub fn spawn_enemy(world: &mut World, counter: &mut u64, spawn: &EnemySpawn) -> Entity {
    let stats = spawn.tank_type.stats();
    world.spawn((
        EnemyBrain::new(spawn.behavior, spawn.tier, spawn.tank_type),
        EntityKind::Enemy(spawn.tank_type),
        Body::new(spawn.position, Direction::Down, stats.speed, stats.health),
        CombatState::new(stats.damage, stats.reload_time),
        next_serial(counter),
    ))
}

/// Spawn a terrain cell. Only brick can be destroyed.
pub fn spawn_obstacle(
    world: &mut World,
    counter: &mut u64,
    position: Point,
    kind: ObstacleKind,
) -> Entity {
    let body = if kind.is_destructible() {
        Body::new(position, Direction::Up, 0, kind.initial_health())
    } else {
        Body::indestructible(position)
    };
    world.spawn((
        Obstacle { kind },
        EntityKind::Obstacle(kind),
        body,
        next_serial(counter),
    ))
}

pub fn spawn_projectile(world: &mut World, counter: &mut u64, shot: ProjectileSpawn) -> Entity {
    let mut builder = EntityBuilder::new();
    builder
        .add(Projectile {
            damage: shot.damage,
            spawned_tick: shot.tick,
            range_left: shot.range,
        })
        .add(EntityKind::Projectile)
        .add(Body {
            facing: shot.direction,
            ..Body::indestructible(shot.position)
        })
        .add(next_serial(counter));
    if let Some(owner) = shot.owner {
        builder.add(FiredBy(owner));
    }
    world.spawn(builder.build())
}

pub fn spawn_bonus(world: &mut World, counter: &mut u64, position: Point, kind: BonusKind) -> Entity {
    world.spawn((
        Bonus { kind, active: true },
        EntityKind::Bonus(kind),
        Body::indestructible(position),
        next_serial(counter),
    ))
}

pub fn spawn_explosion(world: &mut World, counter: &mut u64, position: Point) -> Entity {
    world.spawn((
        Explosion {
            lifetime: EXPLOSION_LIFETIME,
        },
        EntityKind::Explosion,
        Body::indestructible(position),
        next_serial(counter),
    ))
}

/// Replace the level contents with `plan`.
///
/// Everything except the player is despawned. The player keeps score,
/// lives, health and effects and is moved to the plan's start cell.
pub fn apply_plan(world: &mut World, counter: &mut u64, player: Entity, plan: &LevelPlan) {
    let stale: Vec<Entity> = world
        .iter()
        .map(|e| e.entity())
        .filter(|&e| e != player)
        .collect();
    for entity in stale {
        let _ = world.despawn(entity);
    }

    for &(position, kind) in &plan.obstacles {
        spawn_obstacle(world, counter, position, kind);
    }
    for spawn in &plan.enemies {
        spawn_enemy(world, counter, spawn);
    }

    if let Ok(mut body) = world.get::<&mut Body>(player) {
        body.place(plan.player_start, plan.player_facing);
    }
}

/// Occupancy of live obstacles, plus live tanks when `with_tanks` is set.
pub fn occupancy(world: &World, field: Field, with_tanks: bool) -> OccupancyGrid {
    let mut grid = OccupancyGrid::new(field);
    for (_entity, (obstacle, body)) in world.query::<(&Obstacle, &Body)>().iter() {
        if !body.destroyed {
            grid.set_obstacle(body.position, Some(obstacle.kind));
        }
    }
    if with_tanks {
        for (_entity, (kind, body)) in world.query::<(&EntityKind, &Body)>().iter() {
            if kind.is_tank() && !body.destroyed {
                grid.set_tank(body.position, true);
            }
        }
    }
    grid
}
