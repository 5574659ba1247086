//! ECS systems that operate on the simulation world each tick.
//!
//! Systems are plain functions over `&mut World` and run in a fixed order
//! from `BattleEngine::run_systems`. They keep no state of their own.
//! Wherever the order of visits can change the outcome, systems walk
//! entities by `Serial`.

use hecs::{Entity, World};

use battletank_core::components::Serial;
use battletank_core::entity::Body;
use battletank_core::enums::EntityKind;
use battletank_core::types::Point;

pub mod bonus_spawner;
pub mod cleanup;
pub mod collision;
pub mod enemy_ai;
pub mod pickups;
pub mod player;
pub mod progression;
pub mod projectiles;
pub mod snapshot;
pub mod timers;

/// Sort `(Serial, T)` pairs into creation order and drop the serials.
pub(crate) fn in_creation_order<T>(mut items: Vec<(Serial, T)>) -> Vec<T> {
    items.sort_by_key(|(serial, _)| *serial);
    items.into_iter().map(|(_, item)| item).collect()
}

/// Live tanks in creation order.
pub(crate) fn live_tanks(world: &World) -> Vec<Entity> {
    let tanks = world
        .query::<(&EntityKind, &Body, &Serial)>()
        .iter()
        .filter(|(_, (kind, body, _))| kind.is_tank() && !body.destroyed)
        .map(|(entity, (_, _, serial))| (*serial, entity))
        .collect();
    in_creation_order(tanks)
}

/// The entity is alive and standing on `position`.
pub(crate) fn is_live_at(world: &World, entity: Entity, position: Point) -> bool {
    world
        .get::<&Body>(entity)
        .is_ok_and(|b| !b.destroyed && b.position == position)
}
