//! Organic obstacle shapes: randomized neighbor growth and ragged walls.

use std::collections::HashSet;

use rand::Rng;

use battletank_core::enums::ObstacleKind;
use battletank_core::types::{GridPoint, Point};
use battletank_terrain::OccupancyGrid;

/// Growth neighborhood: four orthogonal steps plus diagonals.
const NEIGHBORS: [Point; 8] = [
    Point::new(1, 0),
    Point::new(-1, 0),
    Point::new(0, 1),
    Point::new(0, -1),
    Point::new(1, 1),
    Point::new(1, -1),
    Point::new(-1, 1),
    Point::new(-1, -1),
];

/// Placement chance at the cluster center, before distance falloff.
pub const BASE_GROWTH_CHANCE: f64 = 0.7;

/// Per-cell chance of a wall segment being laid.
pub const WALL_CELL_CHANCE: f64 = 0.8;

/// Cluster growth gives up after this many picks per requested cell.
pub const ITERATIONS_PER_CELL: usize = 5;

/// Where generated obstacles may go.
#[derive(Debug, Clone)]
pub struct PlacementRules {
    /// Minimum distance from every field edge.
    pub border_margin: i32,
    pub player_start: Point,
    /// Cells with Chebyshev distance below this from the player start stay clear.
    pub player_clearance: i32,
    /// Cells kept open for traversal.
    pub reserved: HashSet<Point>,
}

impl PlacementRules {
    pub fn new(player_start: Point) -> Self {
        Self {
            border_margin: 2,
            player_start,
            player_clearance: 2,
            reserved: HashSet::new(),
        }
    }

    pub fn allows(&self, grid: &OccupancyGrid, p: Point) -> bool {
        grid.field().within_margin(p, self.border_margin)
            && p.chebyshev(self.player_start) >= self.player_clearance
            && !self.reserved.contains(&p)
            && grid.is_empty(p)
    }
}

/// Grow one cluster of `kind` around `center`.
///
/// Starts at the center (if it is placeable) and repeatedly picks a random
/// active cell, trying each of its 8 neighbors within `radius` with a chance
/// of 0.7 x (1 - distance / radius). An active cell that adds nothing is
/// retired. Stops at `size` cells, when no active cells remain, or after
/// `5 x size` picks. Returns the number of cells placed.
pub fn grow_cluster<R: Rng + ?Sized>(
    grid: &mut OccupancyGrid,
    rules: &PlacementRules,
    center: Point,
    radius: i32,
    size: usize,
    kind: ObstacleKind,
    rng: &mut R,
) -> usize {
    if size == 0 || radius <= 0 || !rules.allows(grid, center) {
        return 0;
    }
    grid.set_obstacle(center, Some(kind));
    let mut placed = 1;
    let mut active = vec![center];
    let max_iterations = size * ITERATIONS_PER_CELL;
    let mut iterations = 0;

    while !active.is_empty() && placed < size && iterations < max_iterations {
        iterations += 1;
        let index = rng.gen_range(0..active.len());
        let base = active[index];
        let mut grew = false;

        for offset in NEIGHBORS {
            let p = base + offset;
            let distance = (p - center).as_dvec2().length();
            if distance > radius as f64 || !rules.allows(grid, p) {
                continue;
            }
            let chance = BASE_GROWTH_CHANCE * (1.0 - distance / radius as f64);
            if rng.gen::<f64>() < chance {
                grid.set_obstacle(p, Some(kind));
                active.push(p);
                placed += 1;
                grew = true;
                if placed >= size {
                    break;
                }
            }
        }

        if !grew {
            active.remove(index);
        }
    }
    placed
}

/// Lay a ragged straight wall from `start` to `end`, `half_thickness` cells
/// either side of the line, each cell with an 80% chance. The dominant axis
/// of `end - start` picks the orientation. Places at most `budget` cells and
/// returns how many were placed.
#[allow(clippy::too_many_arguments)]
pub fn organic_wall<R: Rng + ?Sized>(
    grid: &mut OccupancyGrid,
    rules: &PlacementRules,
    start: Point,
    end: Point,
    half_thickness: i32,
    kind: ObstacleKind,
    budget: usize,
    rng: &mut R,
) -> usize {
    let horizontal = (end.y - start.y).abs() < (end.x - start.x).abs();
    let (low, high, line) = if horizontal {
        (start.x.min(end.x), start.x.max(end.x), start.y)
    } else {
        (start.y.min(end.y), start.y.max(end.y), start.x)
    };

    let mut placed = 0;
    for a in low..=high {
        for offset in -half_thickness..=half_thickness {
            if placed >= budget {
                return placed;
            }
            let p = if horizontal {
                Point::new(a, line + offset)
            } else {
                Point::new(line + offset, a)
            };
            if rules.allows(grid, p) && rng.gen::<f64>() < WALL_CELL_CHANCE {
                grid.set_obstacle(p, Some(kind));
                placed += 1;
            }
        }
    }
    placed
}
