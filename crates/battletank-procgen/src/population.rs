//! Map-driven population: turn a layout and a level number into a plan.

use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, warn};

use battletank_core::constants::{ENEMIES_PER_LEVEL, MAX_ENEMIES};
use battletank_core::enums::*;
use battletank_core::types::{Field, GridPoint, Point};

use crate::layout::{MapError, MapLayout, EMPTY, ENEMY_MARKER};
use crate::plan::{EnemySpawn, LevelPlan, LevelSource};

/// Candidates closer than this (Manhattan) are never used.
pub const MIN_SPAWN_DISTANCE: i32 = 4;

/// First-pass candidates must be farther than this from the player.
pub const PREFERRED_SPAWN_DISTANCE: i32 = 5;

/// Enemies for a layout with `markers` enemy markers on `level`.
pub fn enemy_count(markers: usize, level: u32) -> usize {
    let extra = ENEMIES_PER_LEVEL * level.saturating_sub(1) as usize;
    (markers + extra).min(MAX_ENEMIES)
}

/// Behavior weights (random, defensive, aggressive) in percent.
fn behavior_weights(tier: DifficultyTier) -> [(AiBehavior, u32); 3] {
    let (random, defensive, aggressive) = match tier {
        DifficultyTier::Rookie => (60, 30, 10),
        DifficultyTier::Regular => (30, 40, 30),
        DifficultyTier::Elite => (10, 30, 60),
    };
    [
        (AiBehavior::Random, random),
        (AiBehavior::Defensive, defensive),
        (AiBehavior::Aggressive, aggressive),
    ]
}

/// Tank type weights in percent. Only basic tanks before level 2; armored
/// tanks join after level 4.
fn tank_type_weights(level: u32) -> [(TankType, u32); 4] {
    let (basic, fast, damage, armored) = match level {
        0..=1 => (100, 0, 0, 0),
        2..=4 => (60, 25, 15, 0),
        _ => (35, 25, 20, 20),
    };
    [
        (TankType::Basic, basic),
        (TankType::Fast, fast),
        (TankType::Damage, damage),
        (TankType::Armored, armored),
    ]
}

fn pick_weighted<T: Copy, R: Rng + ?Sized>(table: &[(T, u32)], rng: &mut R) -> T {
    let total: u32 = table.iter().map(|(_, w)| w).sum();
    let mut roll = rng.gen_range(0..total.max(1));
    for &(item, weight) in table {
        if roll < weight {
            return item;
        }
        roll -= weight;
    }
    table[0].0
}

pub fn roll_behavior<R: Rng + ?Sized>(tier: DifficultyTier, rng: &mut R) -> AiBehavior {
    pick_weighted(&behavior_weights(tier), rng)
}

pub fn roll_tank_type<R: Rng + ?Sized>(level: u32, rng: &mut R) -> TankType {
    pick_weighted(&tank_type_weights(level), rng)
}

/// Give each spawn cell a rolled behavior and type.
pub fn roll_enemies<R: Rng + ?Sized>(cells: &[Point], level: u32, rng: &mut R) -> Vec<EnemySpawn> {
    let tier = DifficultyTier::from_level(level);
    cells
        .iter()
        .map(|&position| EnemySpawn {
            position,
            behavior: roll_behavior(tier, rng),
            tier,
            tank_type: roll_tank_type(level, rng),
        })
        .collect()
}

fn is_spawnable_symbol(c: char) -> bool {
    c == EMPTY || c == ENEMY_MARKER || ObstacleKind::from_symbol(c) == Some(ObstacleKind::Forest)
}

/// Choose enemy cells: markers first, then shuffled candidates away from
/// the player, then the nearer candidates the first pass skipped.
fn choose_enemy_cells<R: Rng + ?Sized>(
    layout: &MapLayout,
    field: Field,
    player: Point,
    count: usize,
    rng: &mut R,
) -> Vec<Point> {
    let mut chosen: Vec<Point> = layout.enemy_markers().into_iter().take(count).collect();
    let mut taken: HashSet<Point> = chosen.iter().copied().collect();

    let mut candidates: Vec<Point> = layout
        .symbols()
        .filter(|&(p, c)| {
            field.is_interior(p)
                && p.x != player.x
                && p.y != player.y
                && p.manhattan(player) >= MIN_SPAWN_DISTANCE
                && is_spawnable_symbol(c)
        })
        .map(|(p, _)| p)
        .collect();
    candidates.shuffle(rng);

    let mut skipped = Vec::new();
    for p in candidates {
        if chosen.len() >= count {
            break;
        }
        if taken.contains(&p) {
            continue;
        }
        if p.manhattan(player) <= PREFERRED_SPAWN_DISTANCE {
            skipped.push(p);
            continue;
        }
        taken.insert(p);
        chosen.push(p);
    }

    for p in skipped {
        if chosen.len() >= count {
            break;
        }
        if taken.insert(p) {
            chosen.push(p);
        }
    }
    chosen
}

/// Populate a level from `layout`.
///
/// The layout must match `field`. The player keeps whatever score, lives
/// and health it carries; only its start cell and facing come from here.
pub fn populate<R: Rng + ?Sized>(
    layout: &MapLayout,
    level: u32,
    field: Field,
    rng: &mut R,
) -> Result<LevelPlan, MapError> {
    layout.check_fits(field)?;
    let level = level.max(1);

    let (player_start, player_facing) = layout
        .player_marker()
        .unwrap_or((field.default_player_start(), Direction::Up));

    let markers = layout.enemy_markers().len();
    let requested = enemy_count(markers, level);
    let cells = choose_enemy_cells(layout, field, player_start, requested, rng);
    if cells.len() < requested {
        warn!(
            map = layout.name(),
            requested,
            placed = cells.len(),
            "not enough spawn cells, spawning fewer enemies"
        );
    }
    let enemies = roll_enemies(&cells, level, rng);

    let occupied: HashSet<Point> = cells.iter().copied().chain([player_start]).collect();
    let obstacles = layout
        .symbols()
        .filter(|(p, _)| !occupied.contains(p))
        .filter_map(|(p, c)| ObstacleKind::from_symbol(c).map(|k| (p, k)))
        .collect();

    debug!(map = layout.name(), level, enemies = enemies.len(), "populated map");

    Ok(LevelPlan {
        field,
        level,
        source: LevelSource::Map {
            name: layout.name().to_string(),
        },
        obstacles,
        enemies,
        player_start,
        player_facing,
    })
}
