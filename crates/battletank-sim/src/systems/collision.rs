//! Collision resolution for this tick's tank moves.
//!
//! Moves were applied optimistically by the AI and player systems. Any
//! move that turns out to be illegal is undone as a whole; the tank keeps
//! its new facing.

use std::collections::{HashMap, HashSet};

use hecs::World;
use tracing::trace;

use battletank_core::entity::Body;
use battletank_core::enums::EntityKind;
use battletank_core::types::{Field, Point};

use crate::world_setup::occupancy;

/// Revert tanks whose path left the field or entered blocking terrain.
pub fn resolve_terrain(world: &mut World, field: Field) {
    let grid = occupancy(world, field, false);
    for (entity, (kind, body)) in world.query_mut::<(&EntityKind, &mut Body)>() {
        if !kind.is_tank() || body.destroyed {
            continue;
        }
        let Some(pending) = body.pending_move else {
            continue;
        };
        // Out-of-field cells read as steel.
        if pending.path().any(|p| grid.blocks_tank(p)) {
            trace!(?entity, from = ?pending.from, "move blocked by terrain");
            body.revert_move();
        }
    }
}

/// Revert moved tanks that share a cell with another tank or swapped
/// cells with one, repeating until the field is stable.
pub fn resolve_tanks(world: &mut World) {
    loop {
        let mut per_cell: HashMap<Point, usize> = HashMap::new();
        let mut moves: HashSet<(Point, Point)> = HashSet::new();
        for (_entity, (kind, body)) in world.query::<(&EntityKind, &Body)>().iter() {
            if !kind.is_tank() || body.destroyed {
                continue;
            }
            *per_cell.entry(body.position).or_default() += 1;
            if let Some(pending) = body.pending_move {
                moves.insert((pending.from, body.position));
            }
        }

        let mut reverted = false;
        for (_entity, (kind, body)) in world.query_mut::<(&EntityKind, &mut Body)>() {
            if !kind.is_tank() || body.destroyed {
                continue;
            }
            let Some(pending) = body.pending_move else {
                continue;
            };
            let shared = per_cell.get(&body.position).copied().unwrap_or(0) > 1;
            let swapped = moves.contains(&(body.position, pending.from));
            if shared || swapped {
                reverted |= body.revert_move();
            }
        }
        if !reverted {
            break;
        }
    }
}
