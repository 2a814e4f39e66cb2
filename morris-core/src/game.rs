//! Turn order, reserves, phases and win detection on top of [`Grid`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::{
    Cell, Error, Grid, MatchConfig, ParseTurnError, Player, Pos, Result, StateRejection,
    GRID_SIZE,
};

/// What the player to move is expected to do.
#[derive(
    Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize, derive_more::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    /// Put a piece from the hand onto an empty cell.
    #[display("placing")]
    Placing,
    /// Slide an own piece one step onto an empty cell.
    #[display("moving")]
    Moving,
    /// Someone holds a winning line. Nothing more is accepted.
    #[display("finished")]
    Finished,
}

/// One concrete action.
///
/// Notation: `x,y` places at `(x, y)`, `x,y>x,y` moves between two cells.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Turn {
    Place { to: Pos },
    Move { from: Pos, to: Pos },
}

impl Turn {
    /// Get the destination position of the turn.
    #[inline]
    pub fn to(&self) -> Pos {
        match self {
            Turn::Place { to } => *to,
            Turn::Move { to, .. } => *to,
        }
    }
}

impl fmt::Display for Turn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Turn::Place { to } => write!(f, "{to}"),
            Turn::Move { from, to } => write!(f, "{from}>{to}"),
        }
    }
}

impl FromStr for Turn {
    type Err = ParseTurnError;

    fn from_str(s: &str) -> std::result::Result<Turn, ParseTurnError> {
        let parse_pos = |text: &str| -> Option<Pos> {
            let (x, y) = text.split_once(',')?;
            Pos::new(x.trim().parse().ok()?, y.trim().parse().ok()?).ok()
        };
        let err = || ParseTurnError { input: s.to_string() };

        match s.split_once('>') {
            Some((from, to)) => Ok(Turn::Move {
                from: parse_pos(from).ok_or_else(err)?,
                to: parse_pos(to).ok_or_else(err)?,
            }),
            None => Ok(Turn::Place {
                to: parse_pos(s).ok_or_else(err)?,
            }),
        }
    }
}

/// The 8 winning lines in scan order: 3 rows, 3 columns, 2 diagonals.
const WIN_LINES: [[Pos; 3]; 8] = [
    [Pos(0), Pos(1), Pos(2)], // Row 0
    [Pos(3), Pos(4), Pos(5)], // Row 1
    [Pos(6), Pos(7), Pos(8)], // Row 2
    [Pos(0), Pos(3), Pos(6)], // Col 0
    [Pos(1), Pos(4), Pos(7)], // Col 1
    [Pos(2), Pos(5), Pos(8)], // Col 2
    [Pos(0), Pos(4), Pos(8)], // Main diagonal
    [Pos(2), Pos(4), Pos(6)], // Anti-diagonal
];

/// A game in progress (or finished).
///
/// Owns its grid. Phase and winner are derived from the grid, reserves
/// and turn counter on every query.
#[derive(Clone, PartialEq, Eq, Debug, Serialize)]
pub struct Match {
    grid: Grid,
    /// Pieces left in hand, indexed by [`Player::index`].
    reserves: [u8; 2],
    turns_taken: u32,
    config: MatchConfig,
}

impl Match {
    /// Fresh match with the default three pieces per hand.
    pub fn new() -> Match {
        Match::from_valid_config(MatchConfig::default())
    }

    /// Fresh match with a custom hand size.
    pub fn with_config(config: MatchConfig) -> Result<Match> {
        config.validate()?;
        Ok(Match::from_valid_config(config))
    }

    fn from_valid_config(config: MatchConfig) -> Match {
        Match {
            grid: Grid::new(),
            reserves: [config.starting_reserve; 2],
            turns_taken: 0,
            config,
        }
    }

    pub fn config(&self) -> MatchConfig {
        self.config
    }

    /// Read-only view of the grid.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Number of accepted actions so far.
    pub fn turns_taken(&self) -> u32 {
        self.turns_taken
    }

    /// Player to move: White on even turns, Black on odd turns.
    pub fn current_player(&self) -> Player {
        Player::ALL[self.turns_taken as usize % Player::ALL.len()]
    }

    /// Pieces `player` still holds in hand.
    pub fn reserve_count(&self, player: Player) -> u8 {
        self.reserves[player.index()]
    }

    /// Phase for the player to move. A win ends the match at any point,
    /// including during placement.
    pub fn current_action(&self) -> Action {
        if self.winner().is_some() {
            Action::Finished
        } else if self.reserve_count(self.current_player()) > 0 {
            Action::Placing
        } else {
            Action::Moving
        }
    }

    /// Place a piece from the current player's hand at `(x, y)`.
    #[instrument(skip(self), fields(player = %self.current_player()))]
    pub fn place(&mut self, x: i32, y: i32) -> Result<()> {
        self.expect_action(Action::Placing)?;

        let player = self.current_player();
        self.grid
            .add_piece(x, y, player)
            .inspect_err(|err| debug!(%err, "placement rejected"))?;
        self.reserves[player.index()] -= 1;

        debug!(remaining = self.reserve_count(player), "piece placed");
        self.finish_turn();
        Ok(())
    }

    /// Slide one of the current player's pieces one step.
    ///
    /// Ownership is checked before the grid sees the move, so touching an
    /// opponent's piece is a state error even when the step itself is legal.
    #[instrument(skip(self), fields(player = %self.current_player()))]
    pub fn move_piece(&mut self, from: (i32, i32), to: (i32, i32)) -> Result<()> {
        self.expect_action(Action::Moving)?;

        let player = self.current_player();
        let owner = self.grid.cell(Pos::try_from(from)?).owner();
        if owner != Some(player) {
            let err = Error::from(StateRejection::NotOwner { player, owner });
            debug!(%err, "move rejected");
            return Err(err);
        }
        self.grid
            .move_piece(from, to)
            .inspect_err(|err| debug!(%err, "move rejected"))?;

        debug!("piece moved");
        self.finish_turn();
        Ok(())
    }

    /// Apply a [`Turn`] through [`place`](Match::place) or
    /// [`move_piece`](Match::move_piece).
    pub fn apply(&mut self, turn: Turn) -> Result<()> {
        match turn {
            Turn::Place { to } => self.place(to.x(), to.y()),
            Turn::Move { from, to } => self.move_piece(from.into(), to.into()),
        }
    }

    /// Occupant of `(x, y)`.
    pub fn piece_at(&self, x: i32, y: i32) -> Result<Cell> {
        self.grid.at(x, y)
    }

    /// Row-major copy of the board (`board()[y][x]`).
    pub fn board(&self) -> [[Cell; GRID_SIZE]; GRID_SIZE] {
        self.grid.snapshot()
    }

    /// First complete line in scan order and its owner.
    pub fn winning_line(&self) -> Option<(Player, [Pos; 3])> {
        WIN_LINES.iter().find_map(|&line| {
            let [a, b, c] = line.map(|pos| self.grid.cell(pos));
            match a.owner() {
                Some(player) if a == b && b == c => Some((player, line)),
                _ => None,
            }
        })
    }

    /// Owner of the first complete line, if any.
    pub fn winner(&self) -> Option<Player> {
        self.winning_line().map(|(player, _)| player)
    }

    /// Every turn the current player could make right now, row-major.
    pub fn legal_turns(&self) -> Vec<Turn> {
        let grid = &self.grid;
        match self.current_action() {
            Action::Finished => Vec::new(),
            Action::Placing => grid.empty_cells().map(|to| Turn::Place { to }).collect(),
            Action::Moving => grid
                .pieces(self.current_player())
                .flat_map(|from| {
                    from.neighbors()
                        .filter(move |&to| grid.is_empty(to))
                        .map(move |to| Turn::Move { from, to })
                })
                .collect(),
        }
    }

    /// Not finished, yet the player to move has nothing legal to do.
    pub fn is_stalemated(&self) -> bool {
        self.current_action() != Action::Finished && self.legal_turns().is_empty()
    }

    fn expect_action(&self, expected: Action) -> Result<()> {
        let actual = self.current_action();
        if actual == expected {
            return Ok(());
        }
        let err = Error::from(StateRejection::WrongPhase { expected, actual });
        debug!(%err, "action rejected");
        Err(err)
    }

    fn finish_turn(&mut self) {
        self.turns_taken += 1;
        if let Some((winner, line)) = self.winning_line() {
            info!(%winner, ?line, turns = self.turns_taken, "winning line completed");
        }
    }
}

impl Default for Match {
    fn default() -> Self {
        Match::new()
    }
}
