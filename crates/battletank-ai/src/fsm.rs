//! Enemy behavior finite state machine.
//!
//! Pure functions that turn an enemy's situation into a movement
//! decision and, afterwards, an optional shot. No ECS dependency:
//! operates on plain data plus a read-only occupancy grid.

use rand::Rng;

use battletank_core::enums::{AiBehavior, DifficultyTier, Direction, ObstacleKind};
use battletank_core::types::{GridPoint, Point};
use battletank_terrain::{direction_towards, has_clear_shot, is_visible, OccupancyGrid};

use crate::profiles::*;

/// Input to the movement decision for a single enemy.
pub struct EnemyContext<'a> {
    pub behavior: AiBehavior,
    pub position: Point,
    pub facing: Direction,
    /// Player cell at the start of the tick.
    pub player: Point,
    pub grid: &'a OccupancyGrid,
}

/// Output from the movement decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveDecision {
    /// What the enemy now believes about the player's position.
    pub last_known_player: Option<Point>,
    /// Direction to drive this tick.
    pub step: Option<Direction>,
    /// Facing once the move is done.
    pub facing: Direction,
}

/// Input to the shot decision, taken after the enemy has moved.
pub struct ShotContext<'a> {
    pub behavior: AiBehavior,
    pub tier: DifficultyTier,
    pub position: Point,
    pub target: Option<Point>,
    pub can_fire: bool,
    pub grid: &'a OccupancyGrid,
}

/// Refresh the enemy's memory: the player is known only while in line.
pub fn observe(position: Point, player: Point) -> Option<Point> {
    is_visible(position, player).then_some(player)
}

/// Decide this tick's movement.
pub fn decide_move<R: Rng + ?Sized>(ctx: &EnemyContext, rng: &mut R) -> MoveDecision {
    let last_known = observe(ctx.position, ctx.player);
    let decision = match last_known {
        None => random_move(ctx.facing, rng),
        Some(target) => match ctx.behavior {
            AiBehavior::Random => random_move(ctx.facing, rng),
            AiBehavior::Aggressive => aggressive_move(ctx, target, rng),
            AiBehavior::Defensive => defensive_move(ctx, target, rng),
        },
    };
    MoveDecision {
        last_known_player: last_known,
        ..decision
    }
}

/// Decide whether to shoot and in which direction.
pub fn decide_shot<R: Rng + ?Sized>(ctx: &ShotContext, rng: &mut R) -> Option<Direction> {
    if !ctx.can_fire {
        return None;
    }
    let target = ctx.target?;
    if !has_clear_shot(ctx.grid, ctx.position, target) {
        return None;
    }
    if !roll(rng, fire_chance(ctx.behavior, ctx.tier)) {
        return None;
    }
    let exact = direction_towards(ctx.position, target)?;
    Some(aim(exact, ctx.tier, rng))
}

/// Apply tier-dependent aim error to an exact firing direction.
pub fn aim<R: Rng + ?Sized>(exact: Direction, tier: DifficultyTier, rng: &mut R) -> Direction {
    let profile = aim_profile(tier);
    if roll(rng, profile.wild_shot_percent) {
        return random_direction(rng);
    }
    if roll(rng, profile.deviation_percent) {
        return exact.perpendiculars()[rng.gen_range(0..2)];
    }
    exact
}

fn roll<R: Rng + ?Sized>(rng: &mut R, percent: u32) -> bool {
    percent > 0 && rng.gen_range(0..100) < percent
}

fn random_direction<R: Rng + ?Sized>(rng: &mut R) -> Direction {
    Direction::ALL[rng.gen_range(0..Direction::ALL.len())]
}

fn hold(facing: Direction) -> MoveDecision {
    MoveDecision {
        last_known_player: None,
        step: None,
        facing,
    }
}

fn drive(direction: Direction, facing: Direction) -> MoveDecision {
    MoveDecision {
        last_known_player: None,
        step: Some(direction),
        facing,
    }
}

fn random_move<R: Rng + ?Sized>(facing: Direction, rng: &mut R) -> MoveDecision {
    if roll(rng, RANDOM_FORWARD_PERCENT) {
        drive(facing, facing)
    } else {
        hold(random_direction(rng))
    }
}

fn retreat(towards: Direction) -> MoveDecision {
    drive(towards.opposite(), towards)
}

fn charge<R: Rng + ?Sized>(
    ctx: &EnemyContext,
    towards: Direction,
    profile: &BehaviorProfile,
    rng: &mut R,
) -> MoveDecision {
    if roll(rng, profile.charge_percent) {
        drive(towards, towards)
    } else {
        random_move(ctx.facing, rng)
    }
}

fn aggressive_move<R: Rng + ?Sized>(ctx: &EnemyContext, target: Point, rng: &mut R) -> MoveDecision {
    let profile = behavior_profile(AiBehavior::Aggressive);
    let Some(towards) = direction_towards(ctx.position, target) else {
        return hold(ctx.facing);
    };
    let distance = ctx.position.manhattan(target);

    if distance <= profile.retreat_within {
        retreat(towards)
    } else if distance <= profile.engage_within {
        if has_clear_shot(ctx.grid, ctx.position, target) {
            hold(towards)
        } else {
            drive(towards, towards)
        }
    } else {
        charge(ctx, towards, &profile, rng)
    }
}

fn defensive_move<R: Rng + ?Sized>(ctx: &EnemyContext, target: Point, rng: &mut R) -> MoveDecision {
    let profile = behavior_profile(AiBehavior::Defensive);
    let Some(towards) = direction_towards(ctx.position, target) else {
        return hold(ctx.facing);
    };
    let distance = ctx.position.manhattan(target);

    if distance <= profile.retreat_within {
        retreat(towards)
    } else if distance <= profile.engage_within {
        if has_clear_shot(ctx.grid, ctx.position, target) {
            hold(towards)
        } else if roll(rng, SEEK_COVER_PERCENT) {
            seek_cover(ctx, towards, rng)
        } else {
            random_move(ctx.facing, rng)
        }
    } else if distance > profile.charge_beyond {
        charge(ctx, towards, &profile, rng)
    } else if roll(rng, profile.approach_percent) {
        drive(towards, towards)
    } else {
        hold(towards)
    }
}

/// Sidestep across the line of fire, preferring a passable forest cell.
fn seek_cover<R: Rng + ?Sized>(ctx: &EnemyContext, towards: Direction, rng: &mut R) -> MoveDecision {
    let sides = towards.perpendiculars();
    let forest = sides.into_iter().find(|&side| {
        let cell = ctx.position.step(side, 1);
        ctx.grid.is_passable(cell)
            && ctx.grid.obstacle_at(cell) == Some(ObstacleKind::Forest)
    });
    let side = forest.unwrap_or_else(|| sides[rng.gen_range(0..2)]);
    drive(side, side)
}
