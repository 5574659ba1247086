//! Snapshot system: queries the ECS world and builds a complete GameStateSnapshot.
//!
//! This system is read-only; it never modifies the world. Every list is
//! in creation order so identical worlds serialize identically.

use hecs::{Entity, World};

use battletank_core::combat::CombatState;
use battletank_core::components::*;
use battletank_core::entity::Body;
use battletank_core::enums::*;
use battletank_core::events::GameEvent;
use battletank_core::state::*;
use battletank_core::types::Field;

use crate::systems::in_creation_order;

/// Engine-level values that are not stored in the world.
pub struct SnapshotHeader {
    pub tick: u64,
    pub state: GameState,
    pub level: u32,
    pub field: Field,
    pub damage_flash: bool,
}

/// Build a complete GameStateSnapshot from the current world state.
pub fn build_snapshot(
    world: &World,
    player: Entity,
    header: SnapshotHeader,
    events: Vec<GameEvent>,
) -> GameStateSnapshot {
    let enemies = build_enemies(world);
    GameStateSnapshot {
        tick: header.tick,
        state: header.state,
        level: header.level,
        field: header.field,
        player: build_player(world, player),
        enemy_count: enemies.len(),
        enemies,
        obstacles: build_obstacles(world),
        projectiles: build_projectiles(world),
        bonuses: build_bonuses(world),
        explosions: build_explosions(world),
        damage_flash: header.damage_flash,
        events,
    }
}

fn effects(combat: &CombatState) -> EffectsView {
    EffectsView {
        shield: combat.shield_ticks,
        double_fire: combat.double_fire_ticks,
        speed_boost: combat.speed_boost_ticks,
        slow: combat.slow_ticks,
    }
}

fn build_player(world: &World, player: Entity) -> Option<PlayerView> {
    let mut query = world
        .query_one::<(&Body, &CombatState, &PlayerStats)>(player)
        .ok()?;
    let (body, combat, stats) = query.get()?;
    Some(PlayerView {
        tank: TankView {
            position: body.position,
            facing: body.facing,
            health: body.health,
            glyph: EntityKind::Player.glyph(body.facing),
            tank_type: None,
            behavior: None,
            effects: effects(combat),
        },
        score: stats.score,
        lives: stats.lives,
    })
}

fn build_enemies(world: &World) -> Vec<TankView> {
    in_creation_order(
        world
            .query::<(&EnemyBrain, &EntityKind, &Body, &CombatState, &Serial)>()
            .iter()
            .filter(|(_, (_, _, body, _, _))| !body.destroyed)
            .map(|(_, (brain, kind, body, combat, serial))| {
                let view = TankView {
                    position: body.position,
                    facing: body.facing,
                    health: body.health,
                    glyph: kind.glyph(body.facing),
                    tank_type: Some(brain.tank_type),
                    behavior: Some(brain.behavior),
                    effects: effects(combat),
                };
                (*serial, view)
            })
            .collect(),
    )
}

fn build_obstacles(world: &World) -> Vec<ObstacleView> {
    in_creation_order(
        world
            .query::<(&Obstacle, &Body, &Serial)>()
            .iter()
            .filter(|(_, (_, body, _))| !body.destroyed)
            .map(|(_, (obstacle, body, serial))| {
                let view = ObstacleView {
                    position: body.position,
                    kind: obstacle.kind,
                    health: body.health,
                };
                (*serial, view)
            })
            .collect(),
    )
}

fn build_projectiles(world: &World) -> Vec<ProjectileView> {
    in_creation_order(
        world
            .query::<(&Projectile, &Body, &Serial)>()
            .iter()
            .filter(|(_, (_, body, _))| !body.destroyed)
            .map(|(_, (_, body, serial))| {
                let view = ProjectileView {
                    position: body.position,
                    direction: body.facing,
                    glyph: EntityKind::Projectile.glyph(body.facing),
                };
                (*serial, view)
            })
            .collect(),
    )
}

fn build_bonuses(world: &World) -> Vec<BonusView> {
    in_creation_order(
        world
            .query::<(&Bonus, &Body, &Serial)>()
            .iter()
            .filter(|(_, (bonus, _, _))| bonus.active)
            .map(|(_, (bonus, body, serial))| {
                let view = BonusView {
                    position: body.position,
                    kind: bonus.kind,
                };
                (*serial, view)
            })
            .collect(),
    )
}

fn build_explosions(world: &World) -> Vec<ExplosionView> {
    in_creation_order(
        world
            .query::<(&Explosion, &Body, &Serial)>()
            .iter()
            .filter(|(_, (_, body, _))| !body.destroyed)
            .map(|(_, (explosion, body, serial))| {
                let view = ExplosionView {
                    position: body.position,
                    lifetime: explosion.lifetime,
                };
                (*serial, view)
            })
            .collect(),
    )
}
