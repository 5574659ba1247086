//! Pickup system: tanks standing on a bonus collect it.

use hecs::{Entity, World};

use battletank_core::combat::CombatState;
use battletank_core::components::{Bonus, PlayerStats, Serial};
use battletank_core::constants::SCORE_BONUS_PICKUP;
use battletank_core::entity::Body;
use battletank_core::enums::BonusKind;
use battletank_core::events::GameEvent;

use crate::systems::{in_creation_order, is_live_at, live_tanks};

pub fn run(world: &mut World, player: Entity, events: &mut Vec<GameEvent>) {
    let bonuses = in_creation_order(
        world
            .query::<(&Bonus, &Body, &Serial)>()
            .iter()
            .filter(|(_, (bonus, body, _))| bonus.active && !body.destroyed)
            .map(|(entity, (bonus, body, serial))| (*serial, (entity, bonus.kind, body.position)))
            .collect(),
    );
    let tanks = live_tanks(world);

    for (bonus, kind, position) in bonuses {
        let taker = tanks.iter().copied().find(|&tank| {
            // Only the player can take an extra life.
            (kind != BonusKind::LifeUp || tank == player) && is_live_at(world, tank, position)
        });
        let Some(taker) = taker else {
            continue;
        };
        let by_player = taker == player;

        if let Ok((body, combat)) = world.query_one_mut::<(&mut Body, &mut CombatState)>(taker) {
            if !combat.apply_bonus(kind) {
                body.health += 1;
            }
        }
        if by_player {
            if let Ok(mut stats) = world.get::<&mut PlayerStats>(player) {
                stats.score += SCORE_BONUS_PICKUP;
            }
        }
        if let Ok(mut state) = world.get::<&mut Bonus>(bonus) {
            state.active = false;
        }
        events.push(GameEvent::BonusCollected { kind, by_player });
    }
}
