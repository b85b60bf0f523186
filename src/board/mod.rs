pub mod micro;
pub mod macroboard;
pub mod composite;

pub use micro::{Microboard, Outcome, LINES};
pub use macroboard::{MacroBoard, MacroStatus};
pub use composite::CompositeBoard;

use std::fmt;
use serde::{Deserialize, Serialize};
use crate::error::{Error, Result};

/// One of the two players. Ids on the wire are 1 and 2.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    One,
    Two,
}

impl Player {
    pub fn from_id(id: i64) -> Result<Self> {
        match id {
            1 => Ok(Player::One),
            2 => Ok(Player::Two),
            other => Err(Error::UnknownPlayer(other)),
        }
    }

    pub fn id(self) -> u8 { match self { Player::One => 1, Player::Two => 2 } }

    /// Opponent id is always `3 - id`.
    pub fn opponent(self) -> Self { match self { Player::One => Player::Two, Player::Two => Player::One } }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}", self.id()) }
}

/// Content of one grid cell.
///
/// `Closed` never comes from the raw cell feed. It only appears when a
/// macroboard is projected onto a 3x3 grid for ranking, standing for a slot
/// that is decided without belonging to either player.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Cell {
    #[default]
    Empty,
    Taken(Player),
    Closed,
}

impl Cell {
    /// Decodes a raw cell mark: 0 = empty, 1/2 = player.
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(Cell::Empty),
            1 => Some(Cell::Taken(Player::One)),
            2 => Some(Cell::Taken(Player::Two)),
            _ => None,
        }
    }

    pub fn code(self) -> u8 {
        match self {
            Cell::Empty => 0,
            Cell::Taken(p) => p.id(),
            Cell::Closed => 9,
        }
    }

    pub fn is_empty(self) -> bool { self == Cell::Empty }
}

/// A pair of coordinates. Used both for cells (local or global) and for
/// macroboard slots; equality is by value only.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Move {
    pub x: usize,
    pub y: usize,
}

impl Move {
    pub const fn new(x: usize, y: usize) -> Self { Self { x, y } }

    /// Maps a microboard-local move into 9x9 coordinates.
    pub fn to_global(micro: Move, local: Move) -> Move {
        Move::new(micro.x * 3 + local.x, micro.y * 3 + local.y)
    }

    /// Inverse of [`Move::to_global`]: returns `(microboard, local)`.
    pub fn split_global(self) -> (Move, Move) {
        (Move::new(self.x / 3, self.y / 3), Move::new(self.x % 3, self.y % 3))
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "({},{})", self.x, self.y) }
}
