//! Shared entity state: the `Body` every occupant of the field carries,
//! plus glyph and footprint lookup keyed on `EntityKind`.
//!
//! `Body::step` never validates the destination. The engine checks the
//! recorded `PendingMove` during collision resolution and reverts it
//! atomically when the path is blocked.

use serde::{Deserialize, Serialize};

use crate::enums::{Direction, EntityKind};
use crate::types::{GridPoint, Point};

/// A move made this tick that collision resolution may still undo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingMove {
    pub from: Point,
    pub direction: Direction,
    pub distance: i32,
}

impl PendingMove {
    /// Cells entered by the move, in order, ending at the destination.
    pub fn path(&self) -> impl Iterator<Item = Point> {
        let PendingMove {
            from,
            direction,
            distance,
        } = *self;
        (1..=distance).map(move |i| from.step(direction, i))
    }
}

/// Width x height in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Footprint {
    pub width: i32,
    pub height: i32,
}

/// Position, orientation and durability of a field occupant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Body {
    pub position: Point,
    pub facing: Direction,
    /// Base speed in cells per move, before bonus modifiers.
    pub speed: i32,
    pub health: i32,
    pub destructible: bool,
    pub destroyed: bool,
    #[serde(default)]
    pub pending_move: Option<PendingMove>,
}

impl Body {
    pub fn new(position: Point, facing: Direction, speed: i32, health: i32) -> Self {
        Self {
            position,
            facing,
            speed,
            health,
            destructible: true,
            destroyed: false,
            pending_move: None,
        }
    }

    /// A static body that damage can never destroy.
    pub fn indestructible(position: Point) -> Self {
        Self {
            destructible: false,
            ..Self::new(position, Direction::Up, 0, 1)
        }
    }

    /// Apply `amount` damage. Returns the health actually removed.
    pub fn take_damage(&mut self, amount: i32) -> i32 {
        if !self.destructible || self.destroyed || amount <= 0 {
            return 0;
        }
        let lost = amount.min(self.health.max(0));
        self.health -= amount;
        if self.health <= 0 {
            self.destroyed = true;
        }
        lost
    }

    /// Face `direction` and shift `distance` cells along it.
    pub fn step(&mut self, direction: Direction, distance: i32) {
        self.facing = direction;
        if distance <= 0 {
            return;
        }
        self.pending_move = Some(PendingMove {
            from: self.position,
            direction,
            distance,
        });
        self.position = self.position.step(direction, distance);
    }

    pub fn rotate(&mut self, direction: Direction) {
        self.facing = direction;
    }

    /// Undo this tick's move, keeping the new facing. Returns true if
    /// there was a move to undo.
    pub fn revert_move(&mut self) -> bool {
        match self.pending_move.take() {
            Some(m) => {
                self.position = m.from;
                true
            }
            None => false,
        }
    }

    /// Accept this tick's move as final.
    pub fn settle(&mut self) {
        self.pending_move = None;
    }

    /// Put the body somewhere new outright (spawn, respawn).
    pub fn place(&mut self, position: Point, facing: Direction) {
        self.position = position;
        self.facing = facing;
        self.pending_move = None;
    }
}

impl EntityKind {
    /// Display glyph. Only tanks and projectiles depend on facing.
    pub fn glyph(self, facing: Direction) -> char {
        match self {
            EntityKind::Player => facing.tank_glyph(),
            EntityKind::Enemy(_) => 'E',
            EntityKind::Obstacle(kind) => kind.symbol(),
            EntityKind::Projectile => {
                if facing.is_vertical() {
                    '|'
                } else {
                    '-'
                }
            }
            EntityKind::Bonus(kind) => kind.symbol(),
            EntityKind::Explosion => 'O',
        }
    }

    /// Every kind occupies a single cell.
    pub fn footprint(self) -> Footprint {
        Footprint {
            width: 1,
            height: 1,
        }
    }

    pub fn is_tank(self) -> bool {
        matches!(self, EntityKind::Player | EntityKind::Enemy(_))
    }
}
