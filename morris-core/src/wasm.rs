//! WASM bindings for morris-core
//!
//! Provides a JavaScript-friendly API for the game logic.

use wasm_bindgen::prelude::*;

use crate::{Match, MatchConfig, Player};

fn player_from_u8(player: u8) -> Result<Player, JsError> {
    match player {
        1 => Ok(Player::White),
        2 => Ok(Player::Black),
        _ => Err(JsError::new("player must be 1 (white) or 2 (black)")),
    }
}

fn player_to_u8(player: Option<Player>) -> u8 {
    match player {
        None => 0,
        Some(Player::White) => 1,
        Some(Player::Black) => 2,
    }
}

/// WASM-friendly wrapper around Match
#[wasm_bindgen]
pub struct WasmMatch {
    inner: Match,
}

#[wasm_bindgen]
impl WasmMatch {
    /// Create a new match, optionally with a custom hand size
    #[wasm_bindgen(constructor)]
    pub fn new(reserve: Option<u8>) -> Result<WasmMatch, JsError> {
        let config = reserve.map_or_else(MatchConfig::default, MatchConfig::new);
        let inner = Match::with_config(config).map_err(|e| JsError::new(&e.to_string()))?;
        Ok(WasmMatch { inner })
    }

    /// Current player (1 = white, 2 = black)
    #[wasm_bindgen(js_name = currentPlayer)]
    pub fn current_player(&self) -> u8 {
        player_to_u8(Some(self.inner.current_player()))
    }

    /// "placing", "moving" or "finished"
    #[wasm_bindgen(js_name = currentAction)]
    pub fn current_action(&self) -> String {
        self.inner.current_action().to_string()
    }

    /// Pieces left in hand for a player (1 or 2)
    #[wasm_bindgen(js_name = reserveCount)]
    pub fn reserve_count(&self, player: u8) -> Result<u8, JsError> {
        Ok(self.inner.reserve_count(player_from_u8(player)?))
    }

    /// Returns 0 (none), 1 (white) or 2 (black)
    pub fn winner(&self) -> u8 {
        player_to_u8(self.inner.winner())
    }

    /// Winning line as [x, y, x, y, x, y], empty if no winner
    #[wasm_bindgen(js_name = winningLine)]
    pub fn winning_line(&self) -> Vec<i32> {
        self.inner
            .winning_line()
            .map(|(_, line)| line.iter().flat_map(|pos| [pos.x(), pos.y()]).collect())
            .unwrap_or_default()
    }

    /// Board as rows of "empty" | {"piece": "white"|"black"}
    pub fn board(&self) -> Result<JsValue, JsError> {
        serde_wasm_bindgen::to_value(&self.inner.board()).map_err(|e| JsError::new(&e.to_string()))
    }

    /// Legal turns as JSON, e.g. { kind: "move", from: [0, 0], to: [1, 1] }
    #[wasm_bindgen(js_name = legalTurns)]
    pub fn legal_turns(&self) -> Result<JsValue, JsError> {
        serde_wasm_bindgen::to_value(&self.inner.legal_turns())
            .map_err(|e| JsError::new(&e.to_string()))
    }

    /// Place a piece for the current player. Throws if rejected.
    pub fn place(&mut self, x: i32, y: i32) -> Result<(), JsError> {
        self.inner.place(x, y).map_err(|e| JsError::new(&e.to_string()))
    }

    /// Move a piece for the current player. Throws if rejected.
    #[wasm_bindgen(js_name = movePiece)]
    pub fn move_piece(
        &mut self,
        from_x: i32,
        from_y: i32,
        to_x: i32,
        to_y: i32,
    ) -> Result<(), JsError> {
        self.inner
            .move_piece((from_x, from_y), (to_x, to_y))
            .map_err(|e| JsError::new(&e.to_string()))
    }

    /// True when the player to move has no legal turn
    #[wasm_bindgen(js_name = isStalemated)]
    pub fn is_stalemated(&self) -> bool {
        self.inner.is_stalemated()
    }

    /// Clone the match
    #[wasm_bindgen(js_name = clone)]
    pub fn clone_match(&self) -> WasmMatch {
        WasmMatch { inner: self.inner.clone() }
    }
}

impl Default for WasmMatch {
    fn default() -> Self {
        WasmMatch { inner: Match::new() }
    }
}
