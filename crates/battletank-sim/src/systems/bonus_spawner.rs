//! Bonus spawner: occasionally drops a random bonus on a free cell.

use std::collections::HashSet;

use hecs::World;
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use battletank_core::constants::BONUS_SPAWN_ATTEMPTS;
use battletank_core::entity::Body;
use battletank_core::enums::BonusKind;
use battletank_core::events::GameEvent;
use battletank_core::types::{Field, Point};

use crate::world_setup::spawn_bonus;

/// Roll `chance_percent` and, on success, try a bounded number of random
/// interior cells for one that holds no entity at all.
pub fn run(
    world: &mut World,
    field: Field,
    chance_percent: u32,
    rng: &mut ChaCha8Rng,
    serial_counter: &mut u64,
    events: &mut Vec<GameEvent>,
) {
    if chance_percent == 0 || rng.gen_range(0..100) >= chance_percent {
        return;
    }
    if field.width < 3 || field.height < 3 {
        return;
    }

    let taken: HashSet<Point> = world
        .query::<&Body>()
        .iter()
        .map(|(_, body)| body.position)
        .collect();

    for _ in 0..BONUS_SPAWN_ATTEMPTS {
        let cell = Point::new(
            rng.gen_range(1..field.width - 1),
            rng.gen_range(1..field.height - 1),
        );
        if taken.contains(&cell) {
            continue;
        }
        let kind = BonusKind::ALL[rng.gen_range(0..BonusKind::ALL.len())];
        spawn_bonus(world, serial_counter, cell, kind);
        debug!(?cell, ?kind, "bonus spawned");
        events.push(GameEvent::BonusSpawned {
            position: cell,
            kind,
        });
        return;
    }
}
