//! OccupancyGrid: per-cell obstacle and tank occupancy.

use battletank_core::enums::ObstacleKind;
use battletank_core::types::{Field, Point};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Cell {
    obstacle: Option<ObstacleKind>,
    tank: bool,
}

/// Dense row-major occupancy map over a field.
///
/// Anything outside the field reads as steel.
#[derive(Debug, Clone)]
pub struct OccupancyGrid {
    field: Field,
    cells: Vec<Cell>,
}

impl OccupancyGrid {
    pub fn new(field: Field) -> Self {
        let len = (field.width.max(0) * field.height.max(0)) as usize;
        Self {
            field,
            cells: vec![Cell::default(); len],
        }
    }

    pub fn field(&self) -> Field {
        self.field
    }

    fn cell(&self, p: Point) -> Option<&Cell> {
        let i = self.field.index(p)?;
        self.cells.get(i)
    }

    fn cell_mut(&mut self, p: Point) -> Option<&mut Cell> {
        let i = self.field.index(p)?;
        self.cells.get_mut(i)
    }

    /// Obstacle at a cell. Out of bounds reads as `Steel`.
    pub fn obstacle_at(&self, p: Point) -> Option<ObstacleKind> {
        match self.cell(p) {
            Some(cell) => cell.obstacle,
            None => Some(ObstacleKind::Steel),
        }
    }

    /// Set or clear the obstacle at an in-bounds cell. Returns false when
    /// the cell is out of bounds.
    pub fn set_obstacle(&mut self, p: Point, kind: Option<ObstacleKind>) -> bool {
        match self.cell_mut(p) {
            Some(cell) => {
                cell.obstacle = kind;
                true
            }
            None => false,
        }
    }

    pub fn has_tank(&self, p: Point) -> bool {
        self.cell(p).is_some_and(|c| c.tank)
    }

    pub fn set_tank(&mut self, p: Point, present: bool) {
        if let Some(cell) = self.cell_mut(p) {
            cell.tank = present;
        }
    }

    /// Move a tank marker between cells.
    pub fn move_tank(&mut self, from: Point, to: Point) {
        self.set_tank(from, false);
        self.set_tank(to, true);
    }

    /// True if a tank may not stand on the cell because of terrain.
    pub fn blocks_tank(&self, p: Point) -> bool {
        self.obstacle_at(p).is_some_and(|k| k.blocks_tanks())
    }

    /// True if a projectile stops at the cell (terrain or a tank).
    pub fn blocks_shot(&self, p: Point) -> bool {
        self.obstacle_at(p).is_some_and(|k| k.blocks_projectiles()) || self.has_tank(p)
    }

    /// In bounds with no obstacle and no tank.
    pub fn is_empty(&self, p: Point) -> bool {
        self.cell(p).is_some_and(|c| c.obstacle.is_none() && !c.tank)
    }

    /// A tank could drive onto the cell right now.
    pub fn is_passable(&self, p: Point) -> bool {
        self.field.contains(p) && !self.blocks_tank(p) && !self.has_tank(p)
    }

    /// Every in-bounds cell holding an obstacle, row-major.
    pub fn obstacles(&self) -> impl Iterator<Item = (Point, ObstacleKind)> + '_ {
        self.field
            .cells()
            .filter_map(move |p| self.cell(p).and_then(|c| c.obstacle).map(|k| (p, k)))
    }

    /// Number of in-bounds cells holding `kind`.
    pub fn count(&self, kind: ObstacleKind) -> usize {
        self.cells
            .iter()
            .filter(|c| c.obstacle == Some(kind))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_bounds_reads_as_steel() {
        let grid = OccupancyGrid::new(Field::new(5, 5));
        assert_eq!(grid.obstacle_at(Point::new(-1, 2)), Some(ObstacleKind::Steel));
        assert_eq!(grid.obstacle_at(Point::new(5, 0)), Some(ObstacleKind::Steel));
        assert!(grid.blocks_tank(Point::new(2, 5)));
        assert!(grid.blocks_shot(Point::new(2, 5)));
        assert!(!grid.is_empty(Point::new(9, 9)));
    }

    #[test]
    fn test_water_and_forest_policies() {
        let mut grid = OccupancyGrid::new(Field::new(5, 5));
        grid.set_obstacle(Point::new(1, 1), Some(ObstacleKind::Water));
        grid.set_obstacle(Point::new(2, 2), Some(ObstacleKind::Forest));
        assert!(grid.blocks_tank(Point::new(1, 1)));
        assert!(!grid.blocks_shot(Point::new(1, 1)));
        assert!(grid.is_passable(Point::new(2, 2)));
        assert!(!grid.is_empty(Point::new(2, 2)));
    }

    #[test]
    fn test_tank_markers() {
        let mut grid = OccupancyGrid::new(Field::new(5, 5));
        grid.set_tank(Point::new(1, 1), true);
        assert!(grid.blocks_shot(Point::new(1, 1)));
        assert!(!grid.is_passable(Point::new(1, 1)));
        grid.move_tank(Point::new(1, 1), Point::new(1, 2));
        assert!(grid.is_empty(Point::new(1, 1)));
        assert!(grid.has_tank(Point::new(1, 2)));
    }

    #[test]
    fn test_obstacle_listing_and_count() {
        let mut grid = OccupancyGrid::new(Field::new(4, 3));
        assert!(grid.set_obstacle(Point::new(3, 2), Some(ObstacleKind::Brick)));
        assert!(grid.set_obstacle(Point::new(0, 0), Some(ObstacleKind::Brick)));
        assert!(!grid.set_obstacle(Point::new(4, 0), Some(ObstacleKind::Brick)));
        let listed: Vec<_> = grid.obstacles().collect();
        assert_eq!(
            listed,
            vec![
                (Point::new(0, 0), ObstacleKind::Brick),
                (Point::new(3, 2), ObstacleKind::Brick)
            ]
        );
        assert_eq!(grid.count(ObstacleKind::Brick), 2);
    }
}
