//! Three Men's Morris rules engine.
//!
//! Two players share a 3x3 grid. Each starts with a hand of pieces
//! (three by default) and places them one at a time. Once both hands are
//! empty, players slide one of their own pieces to an adjacent empty cell.
//! The first player to hold a full row, column or main diagonal wins.
//!
//! # Coordinates
//!
//! ```text
//!          x
//!       0  1  2
//!    0  0  1  2
//! y  1  3  4  5
//!    2  6  7  8
//! ```
//!
//! Cells are addressed as `(x, y)` with `x` the column and `y` the row.
//! The cell index is `y * 3 + x`, so snapshots are row-major.
//!
//! # Layers
//!
//! - [`Grid`] owns occupancy and spatial legality (bounds, adjacency,
//!   empty/occupied cells). It knows nothing about turns.
//! - [`Match`] wraps a grid and adds turn order, reserves, ownership and
//!   the place/move/finished phase machine.
//!
//! ```
//! use morris_core::{Action, Match, Player};
//!
//! let mut game = Match::new();
//! game.place(1, 1).unwrap();
//! assert_eq!(game.current_player(), Player::Black);
//! assert_eq!(game.current_action(), Action::Placing);
//! ```

mod config;
mod error;
mod game;
mod grid;

#[cfg(feature = "wasm")]
pub mod wasm;

use serde::{Deserialize, Serialize};

pub use config::{MatchConfig, DEFAULT_STARTING_RESERVE};
pub use error::{Error, MoveRejection, ParseTurnError, Result, StateRejection};
pub use game::{Action, Match, Turn};
pub use grid::Grid;

/// Width and height of the grid.
pub const GRID_SIZE: usize = 3;

/// Number of cells on the grid.
pub const CELL_COUNT: usize = GRID_SIZE * GRID_SIZE;

/// Player identifier. White moves first.
#[derive(
    Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize, derive_more::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum Player {
    #[display("white")]
    White,
    #[display("black")]
    Black,
}

impl Player {
    /// Both players in turn order.
    pub const ALL: [Player; 2] = [Player::White, Player::Black];

    /// Get the opponent player.
    #[inline]
    pub fn opponent(self) -> Player {
        match self {
            Player::White => Player::Black,
            Player::Black => Player::White,
        }
    }

    /// Index into per-player tables (White = 0, Black = 1).
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Player::White => 0,
            Player::Black => 1,
        }
    }

    /// Single-character board marker.
    #[inline]
    pub fn symbol(self) -> char {
        match self {
            Player::White => 'w',
            Player::Black => 'b',
        }
    }
}

/// Contents of one grid cell.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Cell {
    #[default]
    Empty,
    Piece(Player),
}

impl Cell {
    /// Owner of the piece in this cell, if any.
    #[inline]
    pub fn owner(self) -> Option<Player> {
        match self {
            Cell::Empty => None,
            Cell::Piece(player) => Some(player),
        }
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }

    /// `w`, `b` or `-`.
    #[inline]
    pub fn symbol(self) -> char {
        self.owner().map_or('-', Player::symbol)
    }
}

impl From<Player> for Cell {
    fn from(player: Player) -> Cell {
        Cell::Piece(player)
    }
}

/// A validated position on the grid (index 0-8).
///
/// Only constructible through bounds-checked constructors, so every `Pos`
/// addresses a real cell.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "(i32, i32)", into = "(i32, i32)")]
pub struct Pos(pub(crate) u8);

impl Pos {
    /// Validate a raw `(x, y)` coordinate.
    pub fn new(x: i32, y: i32) -> Result<Pos> {
        let size = GRID_SIZE as i32;
        if !(0..size).contains(&x) || !(0..size).contains(&y) {
            return Err(Error::InvalidMove {
                reason: MoveRejection::OutOfBounds { x, y },
            });
        }
        Ok(Pos((y * size + x) as u8))
    }

    /// Position from a row-major cell index.
    #[inline]
    pub fn from_index(index: usize) -> Option<Pos> {
        (index < CELL_COUNT).then_some(Pos(index as u8))
    }

    /// Row-major cell index (0-8).
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Column (0-2).
    #[inline]
    pub fn x(self) -> i32 {
        i32::from(self.0) % GRID_SIZE as i32
    }

    /// Row (0-2).
    #[inline]
    pub fn y(self) -> i32 {
        i32::from(self.0) / GRID_SIZE as i32
    }

    /// Chebyshev distance: `max(|dx|, |dy|)`.
    #[inline]
    pub fn distance(self, other: Pos) -> i32 {
        (self.x() - other.x()).abs().max((self.y() - other.y()).abs())
    }

    /// The (up to 8) cells at distance 1, in row-major order.
    pub fn neighbors(self) -> impl Iterator<Item = Pos> {
        Pos::all().filter(move |&other| self.distance(other) == 1)
    }

    /// Iterate over all 9 positions in row-major order.
    pub fn all() -> impl Iterator<Item = Pos> {
        (0..CELL_COUNT as u8).map(Pos)
    }
}

impl TryFrom<(i32, i32)> for Pos {
    type Error = Error;

    fn try_from((x, y): (i32, i32)) -> Result<Pos> {
        Pos::new(x, y)
    }
}

impl From<Pos> for (i32, i32) {
    fn from(pos: Pos) -> (i32, i32) {
        (pos.x(), pos.y())
    }
}

impl std::fmt::Display for Pos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{}", self.x(), self.y())
    }
}
