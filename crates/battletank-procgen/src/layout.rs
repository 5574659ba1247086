//! Textual map layouts.
//!
//! One character per cell: `#` brick, `X` steel, `~` water, `*` forest,
//! `E` enemy, `^ v < >` player with facing, space for empty ground.

use thiserror::Error;

use battletank_core::enums::{Direction, ObstacleKind};
use battletank_core::types::{Field, Point};

pub const ENEMY_MARKER: char = 'E';
pub const EMPTY: char = ' ';

/// Problems with a layout or a request for one.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MapError {
    #[error("layout has no rows")]
    Empty,
    #[error("row {row} is {found} cells wide, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("unknown symbol {symbol:?} at ({x}, {y})")]
    UnknownSymbol { symbol: char, x: usize, y: usize },
    #[error("layout is {found_width}x{found_height}, field is {width}x{height}")]
    DimensionMismatch {
        width: i32,
        height: i32,
        found_width: i32,
        found_height: i32,
    },
    #[error("no map at index {index} ({available} available)")]
    UnknownMap { index: usize, available: usize },
}

fn is_known_symbol(c: char) -> bool {
    c == EMPTY
        || c == ENEMY_MARKER
        || ObstacleKind::from_symbol(c).is_some()
        || Direction::from_tank_glyph(c).is_some()
}

/// A parsed rectangular layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapLayout {
    name: String,
    width: i32,
    height: i32,
    cells: Vec<char>,
}

impl MapLayout {
    /// Parse newline-separated rows. A single trailing newline is allowed.
    pub fn parse(name: impl Into<String>, text: &str) -> Result<Self, MapError> {
        let rows: Vec<&str> = text.strip_suffix('\n').unwrap_or(text).split('\n').collect();
        Self::from_rows(name, &rows)
    }

    pub fn from_rows<S: AsRef<str>>(name: impl Into<String>, rows: &[S]) -> Result<Self, MapError> {
        let first = rows.first().ok_or(MapError::Empty)?;
        let width = first.as_ref().trim_end_matches('\r').chars().count();
        if width == 0 {
            return Err(MapError::Empty);
        }

        let mut cells = Vec::with_capacity(width * rows.len());
        for (y, row) in rows.iter().enumerate() {
            let row = row.as_ref().trim_end_matches('\r');
            let found = row.chars().count();
            if found != width {
                return Err(MapError::RaggedRow {
                    row: y,
                    expected: width,
                    found,
                });
            }
            for (x, symbol) in row.chars().enumerate() {
                if !is_known_symbol(symbol) {
                    return Err(MapError::UnknownSymbol { symbol, x, y });
                }
                cells.push(symbol);
            }
        }

        Ok(Self {
            name: name.into(),
            width: width as i32,
            height: rows.len() as i32,
            cells,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn field(&self) -> Field {
        Field::new(self.width, self.height)
    }

    /// Reject the layout unless it matches `field` exactly.
    pub fn check_fits(&self, field: Field) -> Result<(), MapError> {
        if self.field() == field {
            Ok(())
        } else {
            Err(MapError::DimensionMismatch {
                width: field.width,
                height: field.height,
                found_width: self.width,
                found_height: self.height,
            })
        }
    }

    pub fn symbol_at(&self, p: Point) -> Option<char> {
        self.field().index(p).map(|i| self.cells[i])
    }

    /// Every cell with its symbol, row-major.
    pub fn symbols(&self) -> impl Iterator<Item = (Point, char)> + '_ {
        self.field().cells().zip(self.cells.iter().copied())
    }

    /// Enemy marker cells, row-major.
    pub fn enemy_markers(&self) -> Vec<Point> {
        self.symbols()
            .filter(|&(_, c)| c == ENEMY_MARKER)
            .map(|(p, _)| p)
            .collect()
    }

    /// First directional player marker, if any.
    pub fn player_marker(&self) -> Option<(Point, Direction)> {
        self.symbols()
            .find_map(|(p, c)| Direction::from_tank_glyph(c).map(|d| (p, d)))
    }
}
