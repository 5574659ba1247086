//! Procedural level generator.
//!
//! Steel boundary first, then organic clusters per obstacle type, then the
//! strategic structures the level unlocks. Path nodes are carved open
//! afterwards and reserved, and whatever quota is still missing is filled
//! by rejection sampling outside the reserved cells.

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

use battletank_core::constants::MAX_ENEMIES;
use battletank_core::enums::{Direction, ObstacleKind};
use battletank_core::types::{Field, GridPoint, Point};
use battletank_terrain::OccupancyGrid;

use crate::cluster::{grow_cluster, organic_wall, PlacementRules};
use crate::difficulty::DifficultyParams;
use crate::plan::{LevelPlan, LevelSource};
use crate::population::roll_enemies;

/// Base number of enemies on a generated level, plus one per level.
pub const GENERATED_BASE_ENEMIES: usize = 3;

/// Random cells tried per missing obstacle during quota fill.
pub const FILL_ATTEMPTS_PER_CELL: usize = 40;

/// Chance for each loose brick placed around the player on late levels.
pub const PLAYER_COVER_CHANCE: f64 = 0.6;

/// Quota fill order.
const FILL_ORDER: [ObstacleKind; 4] = [
    ObstacleKind::Brick,
    ObstacleKind::Steel,
    ObstacleKind::Water,
    ObstacleKind::Forest,
];

/// Generate a complete level plan for `level` on `field`.
pub fn generate_level<R: Rng + ?Sized>(field: Field, level: u32, rng: &mut R) -> LevelPlan {
    let params = DifficultyParams::for_level(level, field);
    let player_start = field.default_player_start();
    let mut grid = OccupancyGrid::new(field);
    let mut rules = PlacementRules::new(player_start);

    build_boundary(&mut grid);
    grow_clusters(&mut grid, &rules, &params, rng);
    build_structures(&mut grid, &rules, &params, rng);
    clear_paths(&mut grid, &mut rules, &params, rng);
    if params.player_cover {
        place_player_cover(&mut grid, &rules, rng);
    }
    fill_quotas(&mut grid, &rules, &params, rng);

    let enemy_cells = choose_generated_enemy_cells(&grid, &rules, params.level, rng);
    let enemies = roll_enemies(&enemy_cells, params.level, rng);

    debug!(
        level = params.level,
        bricks = interior_count(&grid, ObstacleKind::Brick),
        steel = interior_count(&grid, ObstacleKind::Steel),
        water = interior_count(&grid, ObstacleKind::Water),
        forest = interior_count(&grid, ObstacleKind::Forest),
        enemies = enemies.len(),
        "generated level"
    );

    LevelPlan {
        field,
        level: params.level,
        source: LevelSource::Generated,
        obstacles: grid.obstacles().collect(),
        enemies,
        player_start,
        player_facing: Direction::Up,
    }
}

/// Steel ring around the whole field.
pub fn build_boundary(grid: &mut OccupancyGrid) {
    let field = grid.field();
    for p in field.cells() {
        if !field.is_interior(p) {
            grid.set_obstacle(p, Some(ObstacleKind::Steel));
        }
    }
}

fn random_center<R: Rng + ?Sized>(field: Field, rng: &mut R) -> Point {
    let x = rng.gen_range(2..(field.width - 2).max(3));
    let y = rng.gen_range(2..(field.height - 2).max(3));
    Point::new(x, y)
}

/// Interior cells of `kind`. The boundary ring does not count toward quotas.
pub fn interior_count(grid: &OccupancyGrid, kind: ObstacleKind) -> usize {
    let field = grid.field();
    grid.obstacles()
        .filter(|&(p, k)| k == kind && field.is_interior(p))
        .count()
}

/// Cells of `kind` still missing from its target.
fn remaining(grid: &OccupancyGrid, params: &DifficultyParams, kind: ObstacleKind) -> usize {
    params.budget(kind).target.saturating_sub(interior_count(grid, kind))
}

fn grow_clusters<R: Rng + ?Sized>(
    grid: &mut OccupancyGrid,
    rules: &PlacementRules,
    params: &DifficultyParams,
    rng: &mut R,
) {
    let field = grid.field();
    for kind in [
        ObstacleKind::Brick,
        ObstacleKind::Steel,
        ObstacleKind::Forest,
        ObstacleKind::Water,
    ] {
        let budget = params.budget(kind);
        for _ in 0..budget.clusters {
            let size = budget.shape.size.min(remaining(grid, params, kind));
            if size == 0 {
                break;
            }
            let center = random_center(field, rng);
            grow_cluster(grid, rules, center, budget.shape.radius, size, kind, rng);
        }
    }
}

fn build_structures<R: Rng + ?Sized>(
    grid: &mut OccupancyGrid,
    rules: &PlacementRules,
    params: &DifficultyParams,
    rng: &mut R,
) {
    let field = grid.field();
    let brick = ObstacleKind::Brick;

    if params.defensive_wall {
        let start = rules.player_start;
        let budget = remaining(grid, params, brick);
        organic_wall(
            grid,
            rules,
            Point::new(start.x - 4, start.y - 2),
            Point::new(start.x + 4, start.y - 2),
            1,
            brick,
            budget,
            rng,
        );
    }

    if params.fortresses {
        let centers = [
            Point::new(field.width / 4, field.height / 4),
            Point::new(3 * field.width / 4, field.height / 4),
            Point::new(field.width / 2, field.height / 3),
        ];
        for c in centers {
            let corners = [
                (Point::new(c.x - 3, c.y - 3), Point::new(c.x + 3, c.y - 3)),
                (Point::new(c.x - 3, c.y + 3), Point::new(c.x + 3, c.y + 3)),
                (Point::new(c.x - 3, c.y - 3), Point::new(c.x - 3, c.y + 3)),
                (Point::new(c.x + 3, c.y - 3), Point::new(c.x + 3, c.y + 3)),
            ];
            for (from, to) in corners {
                let budget = remaining(grid, params, brick);
                organic_wall(grid, rules, from, to, 1, brick, budget, rng);
            }
            if params.fortress_cores {
                grow_cluster(grid, rules, c, 2, 4, ObstacleKind::Steel, rng);
            }
        }
    }
}

/// Carve the 3x3 neighborhood of every path node free of non-steel
/// obstacles and reserve those cells.
fn clear_paths<R: Rng + ?Sized>(
    grid: &mut OccupancyGrid,
    rules: &mut PlacementRules,
    params: &DifficultyParams,
    rng: &mut R,
) {
    let field = grid.field();
    let (x_step, y_step) = if params.winding_paths {
        (4 + (params.level / 2) as usize, 3)
    } else {
        (6, 2)
    };

    let mut nodes = Vec::new();
    for x in (3..field.width - 3).step_by(x_step) {
        for y in (3..field.height - 3).step_by(y_step) {
            let node = if params.winding_paths {
                Point::new(x + rng.gen_range(-1..=1), y + rng.gen_range(-1..=1))
            } else {
                Point::new(x, y)
            };
            nodes.push(node);
        }
    }

    for node in nodes {
        for dy in -1..=1 {
            for dx in -1..=1 {
                let p = node + Point::new(dx, dy);
                if !field.is_interior(p) {
                    continue;
                }
                if grid.obstacle_at(p) != Some(ObstacleKind::Steel) {
                    grid.set_obstacle(p, None);
                }
                rules.reserved.insert(p);
            }
        }
    }
}

/// Loose bricks flanking the player start.
fn place_player_cover<R: Rng + ?Sized>(grid: &mut OccupancyGrid, rules: &PlacementRules, rng: &mut R) {
    let p = rules.player_start;
    let cover = [
        Point::new(p.x - 2, p.y - 1),
        Point::new(p.x + 2, p.y - 1),
        Point::new(p.x - 1, p.y - 2),
        Point::new(p.x + 1, p.y - 2),
    ];
    for cell in cover {
        let allowed = grid.field().within_margin(cell, 1)
            && cell != p
            && !rules.reserved.contains(&cell)
            && grid.is_empty(cell);
        if allowed && rng.gen::<f64>() < PLAYER_COVER_CHANCE {
            grid.set_obstacle(cell, Some(ObstacleKind::Brick));
        }
    }
}

/// Top each obstacle type up to its target by rejection sampling.
fn fill_quotas<R: Rng + ?Sized>(
    grid: &mut OccupancyGrid,
    rules: &PlacementRules,
    params: &DifficultyParams,
    rng: &mut R,
) {
    let field = grid.field();
    for kind in FILL_ORDER {
        let missing = remaining(grid, params, kind);
        let mut attempts = missing * FILL_ATTEMPTS_PER_CELL;
        let mut placed = 0;
        while placed < missing && attempts > 0 {
            attempts -= 1;
            let p = random_center(field, rng);
            if rules.allows(grid, p) {
                grid.set_obstacle(p, Some(kind));
                placed += 1;
            }
        }
    }
}

/// Free upper-half cells for the generated enemy contingent.
fn choose_generated_enemy_cells<R: Rng + ?Sized>(
    grid: &OccupancyGrid,
    rules: &PlacementRules,
    level: u32,
    rng: &mut R,
) -> Vec<Point> {
    let field = grid.field();
    let count = (GENERATED_BASE_ENEMIES + level as usize).min(MAX_ENEMIES);
    let mut cells: Vec<Point> = field
        .cells()
        .filter(|&p| {
            field.is_interior(p)
                && p.y < field.height / 2
                && grid.is_empty(p)
                && p.chebyshev(rules.player_start) >= rules.player_clearance
        })
        .collect();
    cells.shuffle(rng);
    cells.truncate(count);
    cells
}
