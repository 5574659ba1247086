//! Fundamental grid types.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_FIELD_HEIGHT, DEFAULT_FIELD_WIDTH};
use crate::enums::Direction;

/// Integer cell coordinate on the field. x grows to the right, y grows down.
pub type Point = glam::IVec2;

/// Grid arithmetic on cell coordinates.
pub trait GridPoint {
    /// Manhattan (taxicab) distance in cells.
    fn manhattan(self, other: Point) -> i32;
    /// Chebyshev (king-move) distance in cells.
    fn chebyshev(self, other: Point) -> i32;
    /// The cell `distance` steps away in `direction`.
    fn step(self, direction: Direction, distance: i32) -> Point;
    /// True if both cells share a row or a column.
    fn is_aligned(self, other: Point) -> bool;
}

impl GridPoint for Point {
    fn manhattan(self, other: Point) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }

    fn chebyshev(self, other: Point) -> i32 {
        (self.x - other.x).abs().max((self.y - other.y).abs())
    }

    fn step(self, direction: Direction, distance: i32) -> Point {
        self + direction.delta() * distance
    }

    fn is_aligned(self, other: Point) -> bool {
        self.x == other.x || self.y == other.y
    }
}

/// Playing field dimensions in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub width: i32,
    pub height: i32,
}

impl Default for Field {
    fn default() -> Self {
        Self {
            width: DEFAULT_FIELD_WIDTH,
            height: DEFAULT_FIELD_HEIGHT,
        }
    }
}

impl Field {
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// True if the cell lies within [0, width) x [0, height).
    pub fn contains(&self, p: Point) -> bool {
        p.x >= 0 && p.y >= 0 && p.x < self.width && p.y < self.height
    }

    /// True if the cell is inside the field and not on the outer wall ring.
    pub fn is_interior(&self, p: Point) -> bool {
        p.x >= 1 && p.y >= 1 && p.x < self.width - 1 && p.y < self.height - 1
    }

    /// True if the cell keeps at least `margin` cells from every edge.
    pub fn within_margin(&self, p: Point, margin: i32) -> bool {
        p.x >= margin && p.y >= margin && p.x < self.width - margin && p.y < self.height - margin
    }

    /// Where the player spawns when a layout does not place it.
    pub fn default_player_start(&self) -> Point {
        Point::new(self.width / 2, self.height - 3)
    }

    /// Number of cells not on the outer wall ring.
    pub fn interior_area(&self) -> usize {
        ((self.width - 2).max(0) * (self.height - 2).max(0)) as usize
    }

    /// Row-major index of an in-bounds cell.
    pub fn index(&self, p: Point) -> Option<usize> {
        self.contains(p).then(|| (p.y * self.width + p.x) as usize)
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = Point> {
        let (width, height) = (self.width, self.height);
        (0..height).flat_map(move |y| (0..width).map(move |x| Point::new(x, y)))
    }
}
