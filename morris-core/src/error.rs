//! Error types for rejected operations.
//!
//! Every rejection is recoverable: the operation had no effect and the
//! caller may try again with different input.

use derive_more::{Display, Error};

use crate::{Action, Player};

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Why the grid refused a placement or movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum MoveRejection {
    #[display("({x}, {y}) is off the grid")]
    OutOfBounds { x: i32, y: i32 },
    #[display("target cell is occupied")]
    Occupied,
    #[display("there is no piece to move")]
    EmptySource,
    /// Also covers moving a piece onto its own cell.
    #[display("pieces move exactly one step")]
    NotAdjacent,
}

/// Why the match refused an action that may be spatially legal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum StateRejection {
    #[display("expected {expected}, but the match is {actual}")]
    WrongPhase { expected: Action, actual: Action },
    /// `owner` is whoever sits on the source cell (`None` if empty).
    #[display("the piece does not belong to {player}")]
    NotOwner { player: Player, owner: Option<Player> },
}

/// Rejected operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum Error {
    /// Spatial or occupancy violation at the grid level.
    #[display("invalid move: {reason}")]
    InvalidMove {
        #[error(not(source))]
        reason: MoveRejection,
    },
    /// Turn, phase or ownership violation at the match level.
    #[display("invalid state: {reason}")]
    InvalidState {
        #[error(not(source))]
        reason: StateRejection,
    },
    #[display("invalid config: starting reserve {starting_reserve} is outside 1..=4")]
    InvalidConfig {
        #[error(not(source))]
        starting_reserve: u8,
    },
}

/// Text that is not `x,y` or `x,y>x,y` on the grid.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("cannot read a turn from {input:?}")]
pub struct ParseTurnError {
    #[error(not(source))]
    pub input: String,
}

impl Error {
    pub fn is_invalid_move(&self) -> bool {
        matches!(self, Error::InvalidMove { .. })
    }

    pub fn is_invalid_state(&self) -> bool {
        matches!(self, Error::InvalidState { .. })
    }
}

impl From<MoveRejection> for Error {
    fn from(reason: MoveRejection) -> Error {
        Error::InvalidMove { reason }
    }
}

impl From<StateRejection> for Error {
    fn from(reason: StateRejection) -> Error {
        Error::InvalidState { reason }
    }
}
