//! End-to-end scenario tests
//!
//! Replays the scenarios in `tests/data/scenarios.json` against a fresh
//! match and checks, for each one:
//! - every step is accepted or rejected with the expected error kind
//! - rejected steps leave the match untouched
//! - final board, player to move, phase, reserves, winner and turn count

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use morris_core::{Error, Match, MatchConfig, Player};
use serde::Deserialize;

/// JSON structure of the scenario file
#[derive(Debug, Deserialize)]
struct TestData {
    version: String,
    scenarios: Vec<Scenario>,
}

#[derive(Debug, Deserialize)]
struct Scenario {
    description: String,
    #[serde(default)]
    config: MatchConfig,
    steps: Vec<Step>,
    expect: Expect,
}

/// Exactly one of `place` / `move` is set. Raw coordinates so that
/// off-grid input can be expressed.
#[derive(Debug, Deserialize)]
struct Step {
    #[serde(default)]
    place: Option<[i32; 2]>,
    #[serde(default, rename = "move")]
    slide: Option<[[i32; 2]; 2]>,
    #[serde(default)]
    error: Option<ErrorKind>,
}

#[derive(Debug, Deserialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "snake_case")]
enum ErrorKind {
    InvalidMove,
    InvalidState,
}

#[derive(Debug, Deserialize)]
struct Expect {
    board: Vec<String>,
    current_player: String,
    action: String,
    reserves: [u8; 2],
    winner: Option<String>,
    turns_taken: u32,
}

fn error_kind(err: &Error) -> Option<ErrorKind> {
    if err.is_invalid_move() {
        Some(ErrorKind::InvalidMove)
    } else if err.is_invalid_state() {
        Some(ErrorKind::InvalidState)
    } else {
        None
    }
}

fn run_step(game: &mut Match, step: &Step) -> Result<(), Error> {
    match (step.place, step.slide) {
        (Some([x, y]), None) => game.place(x, y),
        (None, Some([[fx, fy], [tx, ty]])) => game.move_piece((fx, fy), (tx, ty)),
        _ => panic!("Step must have exactly one of place/move: {:?}", step),
    }
}

/// Load scenarios from JSON file
fn load_scenarios(path: &Path) -> TestData {
    let file = File::open(path).expect("Failed to open scenarios file");
    let reader = BufReader::new(file);
    serde_json::from_reader(reader).expect("Failed to parse JSON")
}

fn check_scenario(scenario: &Scenario) {
    let name = &scenario.description;
    let mut game = Match::with_config(scenario.config).expect("Scenario config must be valid");

    for (i, step) in scenario.steps.iter().enumerate() {
        let before = game.clone();
        let result = run_step(&mut game, step);

        match (step.error, result) {
            (None, Ok(())) => {}
            (None, Err(err)) => panic!("[{}] step {} rejected: {}", name, i, err),
            (Some(kind), Ok(())) => panic!("[{}] step {} accepted, expected {:?}", name, i, kind),
            (Some(kind), Err(err)) => {
                assert_eq!(error_kind(&err), Some(kind), "[{}] step {}: {}", name, i, err);
                assert_eq!(game, before, "[{}] step {} changed state on rejection", name, i);
            }
        }
    }

    let expect = &scenario.expect;
    let board: Vec<String> = game.grid().to_string().lines().map(str::to_string).collect();
    assert_eq!(board, expect.board, "[{}] board", name);
    assert_eq!(game.current_player().to_string(), expect.current_player, "[{}] player", name);
    assert_eq!(game.current_action().to_string(), expect.action, "[{}] action", name);
    assert_eq!(
        [game.reserve_count(Player::White), game.reserve_count(Player::Black)],
        expect.reserves,
        "[{}] reserves",
        name
    );
    assert_eq!(
        game.winner().map(|p| p.to_string()),
        expect.winner,
        "[{}] winner",
        name
    );
    assert_eq!(game.turns_taken(), expect.turns_taken, "[{}] turns", name);
}

#[test]
fn test_scenarios() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/data/scenarios.json");
    let data = load_scenarios(&path);

    println!("Scenario file version: {}", data.version);
    println!("Scenarios: {}", data.scenarios.len());
    assert!(!data.scenarios.is_empty());

    for scenario in &data.scenarios {
        check_scenario(scenario);
    }
}

#[test]
fn test_board_snapshot_matches_piece_at() {
    let mut game = Match::new();
    for (x, y) in [(1, 1), (0, 0), (2, 2)] {
        game.place(x, y).unwrap();
    }

    let board = game.board();
    for y in 0..3 {
        for x in 0..3 {
            assert_eq!(board[y as usize][x as usize], game.piece_at(x, y).unwrap());
        }
    }
}

#[test]
fn test_out_of_bounds_everywhere() {
    let mut game = Match::new();
    let outside = [(-1, 0), (0, -1), (3, 0), (0, 3), (-1, -1), (3, 3), (100, 1)];

    for (x, y) in outside {
        assert!(game.place(x, y).unwrap_err().is_invalid_move(), "place ({x}, {y})");
        assert!(game.piece_at(x, y).unwrap_err().is_invalid_move(), "piece_at ({x}, {y})");
    }
    assert_eq!(game, Match::new());

    // Reach the moving phase, then try off-grid moves in both directions
    for (x, y) in [(1, 0), (2, 0), (0, 1), (2, 1), (0, 2), (1, 2)] {
        game.place(x, y).unwrap();
    }
    let before = game.clone();
    for (x, y) in outside {
        assert!(game.move_piece((x, y), (1, 1)).unwrap_err().is_invalid_move());
        assert!(game.move_piece((1, 0), (x, y)).unwrap_err().is_invalid_move());
    }
    assert_eq!(game, before);
}
