//! JavaScript bindings. Values cross the boundary as plain objects.

use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::checkers::Checkers;
use crate::error::EngineError;
use crate::game::{GameSession, SessionConfig};
use crate::reversi::Reversi;
use crate::types::Position;

impl From<EngineError> for JsValue {
    fn from(err: EngineError) -> Self {
        JsError::new(&err.to_string()).into()
    }
}

fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(JsValue::from)
}

fn read_config(config: JsValue) -> Result<SessionConfig, JsValue> {
    if config.is_undefined() || config.is_null() {
        return Ok(SessionConfig::default());
    }
    serde_wasm_bindgen::from_value(config).map_err(|err| EngineError::Config(err.to_string()).into())
}

fn checked_position(row: u8, col: u8) -> Result<Position, EngineError> {
    let pos = Position::new(row, col);
    if pos.is_valid() {
        Ok(pos)
    } else {
        Err(EngineError::OutOfRange { row, col })
    }
}

#[wasm_bindgen]
pub struct ReversiGame {
    session: GameSession<Reversi>,
}

#[wasm_bindgen]
impl ReversiGame {
    /// `config`: `{ wins?, seed?, quietPlyLimit? }`, or nothing for defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<ReversiGame, JsValue> {
        Ok(Self {
            session: GameSession::new(read_config(config)?),
        })
    }

    pub fn state(&self) -> Result<JsValue, JsValue> {
        to_js(&self.session.to_game_state())
    }

    #[wasm_bindgen(js_name = legalMoves)]
    pub fn legal_moves(&self) -> Result<JsValue, JsValue> {
        to_js(&self.session.legal_moves())
    }

    pub fn place(&mut self, row: u8, col: u8) -> Result<JsValue, JsValue> {
        let pos = checked_position(row, col)?;
        let mv = self
            .session
            .legal_moves()
            .into_iter()
            .find(|mv| mv.position == pos)
            .ok_or(EngineError::IllegalMove)?;
        self.session.play_user(&mv)?;
        self.state()
    }

    #[wasm_bindgen(js_name = aiMove)]
    pub fn ai_move(&mut self) -> Result<JsValue, JsValue> {
        let mv = self.session.play_ai()?;
        to_js(&mv)
    }

    pub fn pass(&mut self) -> Result<JsValue, JsValue> {
        self.session.pass()?;
        self.state()
    }

    #[wasm_bindgen(js_name = drainEvents)]
    pub fn drain_events(&mut self) -> Result<JsValue, JsValue> {
        to_js(&self.session.drain_events())
    }
}

#[wasm_bindgen]
pub struct CheckersGame {
    session: GameSession<Checkers>,
}

#[wasm_bindgen]
impl CheckersGame {
    /// `config`: `{ wins?, seed?, quietPlyLimit? }`, or nothing for defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<CheckersGame, JsValue> {
        Ok(Self {
            session: GameSession::new(read_config(config)?),
        })
    }

    pub fn state(&self) -> Result<JsValue, JsValue> {
        to_js(&self.session.to_game_state())
    }

    #[wasm_bindgen(js_name = legalMoves)]
    pub fn legal_moves(&self) -> Result<JsValue, JsValue> {
        to_js(&self.session.legal_moves())
    }

    /// Moves the piece on `(from_row, from_col)` to `(to_row, to_col)`.
    /// When several jump chains share both ends, the first generated one is played.
    #[wasm_bindgen(js_name = movePiece)]
    pub fn move_piece(&mut self, from_row: u8, from_col: u8, to_row: u8, to_col: u8) -> Result<JsValue, JsValue> {
        let from = checked_position(from_row, from_col)?;
        let to = checked_position(to_row, to_col)?;
        let mv = self
            .session
            .legal_moves()
            .into_iter()
            .find(|mv| mv.from == from && mv.to == to)
            .ok_or(EngineError::IllegalMove)?;
        self.session.play_user(&mv)?;
        self.state()
    }

    #[wasm_bindgen(js_name = aiMove)]
    pub fn ai_move(&mut self) -> Result<JsValue, JsValue> {
        let mv = self.session.play_ai()?;
        to_js(&mv)
    }

    #[wasm_bindgen(js_name = drainEvents)]
    pub fn drain_events(&mut self) -> Result<JsValue, JsValue> {
        to_js(&self.session.drain_events())
    }
}
