//! The 3x3 playing surface.
//!
//! The grid enforces bounds, occupancy and one-step adjacency. It has no
//! notion of turns or whose piece may move; that lives in [`Match`].
//!
//! [`Match`]: crate::Match

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Cell, MoveRejection, Player, Pos, Result, CELL_COUNT, GRID_SIZE};

/// Fixed 9-cell board, row-major.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
pub struct Grid {
    cells: [Cell; CELL_COUNT],
}

impl Grid {
    /// Create an empty grid.
    pub fn new() -> Grid {
        Grid::default()
    }

    /// Get the cell at a validated position.
    #[inline]
    pub fn cell(&self, pos: Pos) -> Cell {
        self.cells[pos.index()]
    }

    #[inline]
    pub fn is_empty(&self, pos: Pos) -> bool {
        self.cell(pos).is_empty()
    }

    /// Get the occupant at `(x, y)`.
    pub fn at(&self, x: i32, y: i32) -> Result<Cell> {
        Ok(self.cell(Pos::new(x, y)?))
    }

    /// Put `owner`'s piece on an empty cell.
    pub fn add_piece(&mut self, x: i32, y: i32, owner: Player) -> Result<()> {
        let pos = Pos::new(x, y)?;
        if !self.is_empty(pos) {
            return Err(MoveRejection::Occupied.into());
        }
        self.cells[pos.index()] = Cell::Piece(owner);
        Ok(())
    }

    /// Slide a piece one step (orthogonal or diagonal) onto an empty cell.
    ///
    /// Checks run in order: bounds, distance, source occupied, target empty.
    pub fn move_piece(&mut self, from: (i32, i32), to: (i32, i32)) -> Result<()> {
        let from = Pos::try_from(from)?;
        let to = Pos::try_from(to)?;

        if from.distance(to) != 1 {
            return Err(MoveRejection::NotAdjacent.into());
        }
        let piece = self.cell(from);
        if piece.is_empty() {
            return Err(MoveRejection::EmptySource.into());
        }
        if !self.is_empty(to) {
            return Err(MoveRejection::Occupied.into());
        }

        self.cells[from.index()] = Cell::Empty;
        self.cells[to.index()] = piece;
        Ok(())
    }

    /// Copy of the board as rows (`snapshot()[y][x]`).
    pub fn snapshot(&self) -> [[Cell; GRID_SIZE]; GRID_SIZE] {
        let mut rows = [[Cell::Empty; GRID_SIZE]; GRID_SIZE];
        for pos in Pos::all() {
            rows[pos.y() as usize][pos.x() as usize] = self.cell(pos);
        }
        rows
    }

    /// Positions holding `player`'s pieces, row-major.
    pub fn pieces(&self, player: Player) -> impl Iterator<Item = Pos> + '_ {
        Pos::all().filter(move |&pos| self.cell(pos).owner() == Some(player))
    }

    /// Number of `player`'s pieces on the grid.
    pub fn count(&self, player: Player) -> usize {
        self.pieces(player).count()
    }

    /// Positions with no piece, row-major.
    pub fn empty_cells(&self) -> impl Iterator<Item = Pos> + '_ {
        Pos::all().filter(move |&pos| self.is_empty(pos))
    }
}

/// One row per line, `w`/`b`/`-`, trailing newline.
impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.snapshot() {
            for cell in row {
                write!(f, "{}", cell.symbol())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
