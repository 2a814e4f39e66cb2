//! Terminal front end for Three Men's Morris.
//!
//! Reads coordinates as `x,y` from stdin and redraws the board after every
//! turn. Logging goes to stderr, filtered by `RUST_LOG` (default `warn`).

mod cli;
mod session;

use std::io;

use anyhow::Context;
use clap::Parser;
use morris_core::Match;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;
use crate::session::Session;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let mut game = Match::with_config(cli.match_config()).context("Invalid --reserve")?;

    let outcome = Session::new(&mut game, io::stdin().lock(), io::stdout().lock())
        .clear_screen(!cli.no_clear)
        .run()?;

    info!(?outcome, turns = game.turns_taken(), "Session ended");
    Ok(())
}
