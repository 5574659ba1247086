//! Cleanup system: removes destroyed entities and spent bonuses.

use hecs::{Entity, World};

use battletank_core::components::{Bonus, Player};
use battletank_core::entity::Body;

/// Settle this tick's moves, then despawn whatever is finished.
/// The player entity is never despawned; its death is handled by the
/// progression system. Uses a pre-allocated buffer to avoid per-tick
/// allocation.
pub fn run(world: &mut World, despawn_buffer: &mut Vec<Entity>) {
    despawn_buffer.clear();

    for (_entity, body) in world.query_mut::<&mut Body>() {
        body.settle();
    }

    for (entity, (body, player)) in world.query_mut::<(&Body, Option<&Player>)>() {
        if body.destroyed && player.is_none() {
            despawn_buffer.push(entity);
        }
    }

    for (entity, bonus) in world.query_mut::<&Bonus>() {
        if !bonus.active {
            despawn_buffer.push(entity);
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}
