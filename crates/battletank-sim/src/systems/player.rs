//! Player system: applies the single action queued for this tick.

use hecs::{Entity, World};

use battletank_core::combat::CombatState;
use battletank_core::entity::Body;
use battletank_core::enums::Direction;
use battletank_core::events::GameEvent;
use battletank_core::types::GridPoint;

use crate::world_setup::{spawn_projectile, ProjectileSpawn};

/// One gameplay action per tick; a later input in the same tick wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerAction {
    Move(Direction),
    Fire,
}

pub fn run(
    world: &mut World,
    player: Entity,
    action: Option<PlayerAction>,
    current_tick: u64,
    projectile_range: u32,
    serial_counter: &mut u64,
    events: &mut Vec<GameEvent>,
) {
    let Ok((body, combat)) = world.query_one_mut::<(&mut Body, &mut CombatState)>(player) else {
        return;
    };
    if body.destroyed {
        return;
    }

    let mut shots = Vec::with_capacity(2);
    // The second shell of last tick's volley leaves from the current muzzle.
    if let Some(direction) = combat.take_follow_up() {
        shots.push(shell(body, combat, direction, player, current_tick, projectile_range));
    }

    match action {
        Some(PlayerAction::Move(direction)) => {
            // Speed can drop to zero under slow; the tank still turns.
            body.step(direction, combat.effective_speed(body.speed));
        }
        Some(PlayerAction::Fire) if combat.fire() => {
            let direction = body.facing;
            shots.push(shell(body, combat, direction, player, current_tick, projectile_range));
            combat.queue_follow_up(direction);
        }
        Some(PlayerAction::Fire) | None => {}
    }

    for shot in shots {
        spawn_projectile(world, serial_counter, shot);
        events.push(GameEvent::ProjectileFired {
            position: shot.position,
            by_player: true,
        });
    }
}

fn shell(
    body: &Body,
    combat: &CombatState,
    direction: Direction,
    owner: Entity,
    tick: u64,
    range: u32,
) -> ProjectileSpawn {
    ProjectileSpawn {
        position: body.position.step(direction, 1),
        direction,
        damage: combat.damage,
        owner: Some(owner),
        tick,
        range,
    }
}
