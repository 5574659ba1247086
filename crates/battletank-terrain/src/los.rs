//! Straight-line visibility and shot clearance.
//!
//! Tanks only see and shoot along rows and columns. Visibility ignores
//! terrain entirely; a clear shot additionally requires every cell
//! strictly between the two endpoints to let a projectile through.

use battletank_core::enums::Direction;
use battletank_core::types::{GridPoint, Point};

use crate::grid::OccupancyGrid;

/// Same row or same column.
pub fn is_visible(from: Point, to: Point) -> bool {
    from.is_aligned(to)
}

/// Direction that closes the gap from `from` to `to` fastest.
///
/// Picks the axis with the larger offset, preferring the vertical axis on
/// ties. Returns `None` when the points coincide.
pub fn direction_towards(from: Point, to: Point) -> Option<Direction> {
    let d = to - from;
    if d == Point::ZERO {
        return None;
    }
    let dir = if d.y.abs() >= d.x.abs() {
        if d.y < 0 {
            Direction::Up
        } else {
            Direction::Down
        }
    } else if d.x < 0 {
        Direction::Left
    } else {
        Direction::Right
    };
    Some(dir)
}

/// Aligned, and nothing that stops a projectile lies between the two cells.
pub fn has_clear_shot(grid: &OccupancyGrid, from: Point, to: Point) -> bool {
    if from == to || !from.is_aligned(to) {
        return false;
    }
    let Some(dir) = direction_towards(from, to) else {
        return false;
    };
    let steps = from.manhattan(to);
    (1..steps).all(|i| !grid.blocks_shot(from.step(dir, i)))
}
