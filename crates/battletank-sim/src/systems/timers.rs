//! Timer system: per-tick countdowns and projectile travel.

use hecs::World;

use battletank_core::combat::CombatState;
use battletank_core::components::{EnemyBrain, Explosion, Projectile};
use battletank_core::entity::Body;
use battletank_core::types::GridPoint;

/// Count down reload, bonus, AI and explosion timers, and fly every
/// projectile fired on an earlier tick one cell forward.
pub fn run(world: &mut World, current_tick: u64, damage_flash: &mut u32) {
    for (_entity, combat) in world.query_mut::<&mut CombatState>() {
        combat.reload();
        combat.update_bonus();
    }

    for (_entity, brain) in world.query_mut::<&mut EnemyBrain>() {
        brain.move_cooldown = brain.move_cooldown.saturating_sub(1);
    }

    for (_entity, (projectile, body)) in world.query_mut::<(&mut Projectile, &mut Body)>() {
        if body.destroyed || projectile.spawned_tick >= current_tick {
            continue;
        }
        body.position = body.position.step(body.facing, 1);
        projectile.range_left = projectile.range_left.saturating_sub(1);
    }

    for (_entity, (explosion, body)) in world.query_mut::<(&mut Explosion, &mut Body)>() {
        explosion.lifetime = explosion.lifetime.saturating_sub(1);
        if explosion.lifetime == 0 {
            body.destroyed = true;
        }
    }

    *damage_flash = damage_flash.saturating_sub(1);
}
