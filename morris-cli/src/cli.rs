//! Command-line interface for morris.

use clap::Parser;
use morris_core::{MatchConfig, DEFAULT_STARTING_RESERVE};

/// Three Men's Morris for two players at one terminal
#[derive(Parser, Debug)]
#[command(name = "morris")]
#[command(about = "Play Three Men's Morris in the terminal", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Pieces each player places before pieces start moving (1-4)
    #[arg(short, long, default_value_t = DEFAULT_STARTING_RESERVE)]
    pub reserve: u8,

    /// Keep previous boards on screen instead of clearing between turns
    #[arg(long)]
    pub no_clear: bool,
}

impl Cli {
    pub fn match_config(&self) -> MatchConfig {
        MatchConfig::new(self.reserve)
    }
}
