//! Prompt/render loop.
//!
//! The loop owns all retry behaviour: unreadable input and rejected turns
//! print a message and ask again. The match itself is never retried.

use std::io::{BufRead, Write};

use morris_core::{Action, Match, Player, Pos};
use tracing::{debug, info};

const CLEAR: &str = "\x1b[H\x1b[2J";

const HEADER: &str = "    0   1   2\n  .-----------.";
const DIVIDER: &str = "  |---+---+---|";
const FOOTER: &str = "  `---+---+---`";

/// How a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Winner(Player),
    /// The player to move had no legal turn.
    Stalemate(Player),
    /// Input closed before the game ended.
    EndOfInput,
}

pub struct Session<'a, R, W> {
    game: &'a mut Match,
    input: R,
    output: W,
    clear: bool,
}

impl<'a, R: BufRead, W: Write> Session<'a, R, W> {
    pub fn new(game: &'a mut Match, input: R, output: W) -> Self {
        Session {
            game,
            input,
            output,
            clear: false,
        }
    }

    /// Emit the ANSI clear-screen sequence before each board.
    pub fn clear_screen(mut self, clear: bool) -> Self {
        self.clear = clear;
        self
    }

    pub fn run(&mut self) -> anyhow::Result<Outcome> {
        loop {
            self.render()?;

            if let Some(winner) = self.game.winner() {
                writeln!(self.output, "WINNER: {winner}")?;
                info!(%winner, turns = self.game.turns_taken(), "Game over");
                return Ok(Outcome::Winner(winner));
            }
            if self.game.is_stalemated() {
                let player = self.game.current_player();
                writeln!(self.output, "{player} cannot move. Stalemate.")?;
                info!(%player, "Stalemate");
                return Ok(Outcome::Stalemate(player));
            }

            writeln!(self.output, "{}:", self.game.current_player())?;
            let proceed = match self.game.current_action() {
                Action::Placing => self.handle_place()?,
                Action::Moving => self.handle_move()?,
                Action::Finished => true,
            };
            if !proceed {
                writeln!(self.output)?;
                return Ok(Outcome::EndOfInput);
            }
        }
    }

    /// Returns false when input is exhausted.
    fn handle_place(&mut self) -> anyhow::Result<bool> {
        let Some((x, y)) = self.read_coords("place at")? else {
            return Ok(false);
        };
        let result = self.game.place(x, y);
        self.report(result)?;
        Ok(true)
    }

    /// Returns false when input is exhausted.
    fn handle_move(&mut self) -> anyhow::Result<bool> {
        let Some(from) = self.read_coords("move piece from:")? else {
            return Ok(false);
        };
        let prompt = format!("move piece from {},{} to:", from.0, from.1);
        let Some(to) = self.read_coords(&prompt)? else {
            return Ok(false);
        };
        let result = self.game.move_piece(from, to);
        self.report(result)?;
        Ok(true)
    }

    fn report(&mut self, result: morris_core::Result<()>) -> anyhow::Result<()> {
        if let Err(err) = result {
            debug!(%err, "Turn rejected");
            writeln!(self.output, "Move not allowed: {err}")?;
        }
        Ok(())
    }

    /// Prompt until a line parses as `x,y`. `None` at end of input.
    fn read_coords(&mut self, prompt: &str) -> anyhow::Result<Option<(i32, i32)>> {
        loop {
            writeln!(self.output, "{prompt}")?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Ok(None);
            }
            match parse_coords(&line) {
                Some(coords) => return Ok(Some(coords)),
                None => writeln!(self.output, "Expected coordinates as x,y")?,
            }
        }
    }

    fn render(&mut self) -> anyhow::Result<()> {
        if self.clear {
            write!(self.output, "{CLEAR}")?;
        }
        write!(self.output, "{}", render_board(self.game))?;
        writeln!(
            self.output,
            "in hand: white {}, black {}\n",
            self.game.reserve_count(Player::White),
            self.game.reserve_count(Player::Black)
        )?;
        Ok(())
    }
}

/// `x,y` with optional whitespace. Values are not range-checked here;
/// the match reports off-grid coordinates itself.
pub fn parse_coords(line: &str) -> Option<(i32, i32)> {
    let (x, y) = line.trim().split_once(',')?;
    Some((x.trim().parse().ok()?, y.trim().parse().ok()?))
}

/// Boxed grid with column and row headers.
pub fn render_board(game: &Match) -> String {
    let mut out = String::new();
    out.push_str(HEADER);
    out.push('\n');
    for (y, row) in game.board().iter().enumerate() {
        if y > 0 {
            out.push_str(DIVIDER);
            out.push('\n');
        }
        out.push_str(&format!("{y} |"));
        for cell in row {
            let mark = match cell.owner() {
                Some(player) => player.symbol(),
                None => ' ',
            };
            out.push_str(&format!(" {mark} |"));
        }
        out.push('\n');
    }
    out.push_str(FOOTER);
    out.push('\n');

    if let Some((_, line)) = game.winning_line() {
        let cells: Vec<String> = line.iter().map(Pos::to_string).collect();
        out.push_str(&format!("line: {}\n", cells.join(" ")));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use morris_core::MatchConfig;
    use std::io::Cursor;

    fn play(game: &mut Match, input: &str) -> (Outcome, String) {
        let mut output = Vec::new();
        let outcome = Session::new(game, Cursor::new(input.to_string()), &mut output)
            .run()
            .unwrap();
        (outcome, String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_parse_coords() {
        assert_eq!(parse_coords("1,2\n"), Some((1, 2)));
        assert_eq!(parse_coords("  0 , 2 "), Some((0, 2)));
        assert_eq!(parse_coords("-1,5"), Some((-1, 5)));
        assert_eq!(parse_coords("1"), None);
        assert_eq!(parse_coords("a,b"), None);
        assert_eq!(parse_coords(""), None);
    }

    #[test]
    fn test_render_empty_board() {
        let game = Match::new();
        let expected = "    0   1   2\n\
                        \x20 .-----------.\n\
                        0 |   |   |   |\n\
                        \x20 |---+---+---|\n\
                        1 |   |   |   |\n\
                        \x20 |---+---+---|\n\
                        2 |   |   |   |\n\
                        \x20 `---+---+---`\n";
        assert_eq!(render_board(&game), expected);
    }

    #[test]
    fn test_render_pieces() {
        let mut game = Match::new();
        game.place(1, 0).unwrap();
        game.place(2, 2).unwrap();

        let board = render_board(&game);
        assert!(board.contains("0 |   | w |   |"), "{board}");
        assert!(board.contains("2 |   |   | b |"), "{board}");
    }

    #[test]
    fn test_play_to_win() {
        let mut game = Match::new();
        let (outcome, output) = play(&mut game, "0,0\n0,1\n1,0\n1,1\n0,2\n2,1\n");

        assert_eq!(outcome, Outcome::Winner(Player::Black));
        assert!(output.contains("WINNER: black"));
        assert!(output.contains("line: 0,1 1,1 2,1"));
        assert!(!output.contains(CLEAR), "Screen is only cleared on request");
    }

    #[test]
    fn test_rejections_reprompt() {
        let mut game = Match::new();
        let (outcome, output) = play(&mut game, "nonsense\n1,1\n1,1\n5,5\n");

        assert_eq!(outcome, Outcome::EndOfInput);
        assert!(output.contains("Expected coordinates as x,y"));
        assert!(output.contains("Move not allowed: invalid move: target cell is occupied"));
        assert!(output.contains("Move not allowed: invalid move: (5, 5) is off the grid"));
        assert_eq!(game.turns_taken(), 1, "Only the first 1,1 is accepted");
    }

    #[test]
    fn test_moving_phase() {
        let mut game = Match::new();
        let input = "1,0\n2,0\n0,1\n2,1\n0,2\n1,2\n\
                     2,0\n1,1\n\
                     1,0\n0,0\n";
        let (outcome, output) = play(&mut game, input);

        assert_eq!(outcome, Outcome::Winner(Player::White));
        assert!(output.contains("move piece from 1,0 to:"));
        assert!(output.contains("Move not allowed: invalid state: the piece does not belong to white"));
    }

    #[test]
    fn test_stalemate() {
        let mut game = Match::with_config(MatchConfig::new(4)).unwrap();
        let input = "2,0\n1,0\n2,1\n0,1\n0,2\n1,1\n1,2\n2,2\n";
        let (outcome, output) = play(&mut game, input);

        assert_eq!(outcome, Outcome::Stalemate(Player::White));
        assert!(output.contains("white cannot move. Stalemate."));
    }

    #[test]
    fn test_clear_screen() {
        let mut game = Match::new();
        let mut output = Vec::new();
        Session::new(&mut game, Cursor::new(String::new()), &mut output)
            .clear_screen(true)
            .run()
            .unwrap();
        assert!(String::from_utf8(output).unwrap().starts_with(CLEAR));
    }
}
