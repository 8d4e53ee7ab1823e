use wasm_bindgen::prelude::*;

pub mod ai;
pub mod checkers;
pub mod error;
pub mod game;
pub mod reversi;
pub mod types;
pub mod wasm;

pub use ai::difficulty::{DifficultyParams, depth_or_tier};
pub use ai::rules::{Evaluation, Rules, WhenStuck};
pub use ai::search::{Searcher, best_move};
pub use error::{EngineError, EngineResult};
pub use game::{GameSession, SessionConfig};
pub use types::{GameKind, Position};

#[wasm_bindgen]
pub fn wasm_ready() -> bool {
    true
}
