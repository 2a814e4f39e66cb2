//! Match configuration.

use serde::{Deserialize, Serialize};

use crate::{Error, Result, CELL_COUNT};

/// Pieces each player starts with in the reference rules.
pub const DEFAULT_STARTING_RESERVE: u8 = 3;

/// Construction parameters for a [`Match`](crate::Match).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Pieces in each player's hand at the start.
    pub starting_reserve: u8,
}

impl MatchConfig {
    /// Largest hand that still leaves an empty cell once every piece is down.
    pub const MAX_STARTING_RESERVE: u8 = ((CELL_COUNT - 1) / 2) as u8;

    pub fn new(starting_reserve: u8) -> MatchConfig {
        MatchConfig { starting_reserve }
    }

    /// Each player needs at least one piece, and both hands together must
    /// leave a free cell or the moving phase could never take a turn.
    pub fn validate(&self) -> Result<()> {
        if (1..=Self::MAX_STARTING_RESERVE).contains(&self.starting_reserve) {
            Ok(())
        } else {
            Err(Error::InvalidConfig {
                starting_reserve: self.starting_reserve,
            })
        }
    }
}

impl Default for MatchConfig {
    fn default() -> Self {
        MatchConfig {
            starting_reserve: DEFAULT_STARTING_RESERVE,
        }
    }
}
