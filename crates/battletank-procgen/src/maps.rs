//! Built-in map catalog.

use battletank_core::constants::{DEFAULT_FIELD_HEIGHT, DEFAULT_FIELD_WIDTH};
use battletank_core::enums::ObstacleKind;
use tracing::warn;

use crate::layout::{MapError, MapLayout, ENEMY_MARKER, EMPTY};

/// Catalog entry.
#[derive(Debug, Clone)]
pub struct MapInfo {
    pub name: &'static str,
    pub description: &'static str,
    pub layout: MapLayout,
}

/// Ordered list of playable maps.
#[derive(Debug, Clone, Default)]
pub struct MapCatalog {
    maps: Vec<MapInfo>,
}

impl MapCatalog {
    /// The three stock 40x20 arenas.
    pub fn builtin() -> Self {
        let maps = [classic(), fortress(), battlefield()]
            .into_iter()
            .filter_map(|map| match map {
                Ok(map) => Some(map),
                Err(err) => {
                    warn!(%err, "skipping malformed stock map");
                    None
                }
            })
            .collect();
        Self { maps }
    }

    pub fn len(&self) -> usize {
        self.maps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.maps.is_empty()
    }

    pub fn get(&self, index: usize) -> Result<&MapInfo, MapError> {
        self.maps.get(index).ok_or(MapError::UnknownMap {
            index,
            available: self.maps.len(),
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = &MapInfo> {
        self.maps.iter()
    }

    /// Add a user-supplied layout at the end.
    pub fn push(&mut self, name: &'static str, description: &'static str, layout: MapLayout) {
        self.maps.push(MapInfo {
            name,
            description,
            layout,
        });
    }
}

/// Mutable character canvas used to draw the stock maps.
struct Canvas {
    rows: Vec<Vec<char>>,
}

impl Canvas {
    fn walled() -> Self {
        let (w, h) = (DEFAULT_FIELD_WIDTH as usize, DEFAULT_FIELD_HEIGHT as usize);
        let mut rows = vec![vec![EMPTY; w]; h];
        let steel = ObstacleKind::Steel.symbol();
        for x in 0..w {
            rows[0][x] = steel;
            rows[h - 1][x] = steel;
        }
        for row in rows.iter_mut() {
            row[0] = steel;
            row[w - 1] = steel;
        }
        Self { rows }
    }

    /// Fill the half-open rectangle [x0, x1) x [y0, y1).
    fn fill(&mut self, x0: usize, x1: usize, y0: usize, y1: usize, symbol: char) -> &mut Self {
        for row in &mut self.rows[y0..y1] {
            for cell in &mut row[x0..x1] {
                *cell = symbol;
            }
        }
        self
    }

    fn put(&mut self, x: usize, y: usize, symbol: char) -> &mut Self {
        self.rows[y][x] = symbol;
        self
    }

    fn finish(&self, name: &str) -> Result<MapLayout, MapError> {
        let rows: Vec<String> = self.rows.iter().map(|r| r.iter().collect()).collect();
        MapLayout::from_rows(name, &rows)
    }
}

fn classic() -> Result<MapInfo, MapError> {
    let brick = ObstacleKind::Brick.symbol();
    let layout = Canvas::walled()
        .fill(5, 15, 5, 6, brick)
        .fill(5, 15, 15, 16, brick)
        .fill(25, 35, 8, 10, ObstacleKind::Water.symbol())
        .fill(10, 20, 12, 14, ObstacleKind::Forest.symbol())
        .put(10, 3, ENEMY_MARKER)
        .put(30, 3, ENEMY_MARKER)
        .finish("classic")?;
    Ok(MapInfo {
        name: "classic",
        description: "Balanced arena with open ground and some cover",
        layout,
    })
}

fn fortress() -> Result<MapInfo, MapError> {
    let brick = ObstacleKind::Brick.symbol();
    let layout = Canvas::walled()
        .fill(5, 20, 5, 6, brick)
        .fill(5, 20, 12, 13, brick)
        .fill(5, 6, 5, 13, brick)
        .fill(19, 20, 5, 13, brick)
        .put(10, 8, ENEMY_MARKER)
        .put(15, 8, ENEMY_MARKER)
        .fill(25, 35, 8, 10, ObstacleKind::Water.symbol())
        .fill(2, 5, 15, 18, ObstacleKind::Forest.symbol())
        .finish("fortress")?;
    Ok(MapInfo {
        name: "fortress",
        description: "Enemies dug in behind a brick keep",
        layout,
    })
}

fn battlefield() -> Result<MapInfo, MapError> {
    let brick = ObstacleKind::Brick.symbol();
    let layout = Canvas::walled()
        .fill(5, 10, 5, 8, brick)
        .fill(30, 35, 5, 8, brick)
        .fill(15, 25, 10, 12, ObstacleKind::Water.symbol())
        .put(8, 3, ENEMY_MARKER)
        .put(32, 3, ENEMY_MARKER)
        .put(8, 16, ENEMY_MARKER)
        .put(32, 16, ENEMY_MARKER)
        .finish("battlefield")?;
    Ok(MapInfo {
        name: "battlefield",
        description: "Wide field with bunkers and a river",
        layout,
    })
}
