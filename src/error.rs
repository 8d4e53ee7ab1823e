//! Errors surfaced by the session and binding layers.
//!
//! Rule and search functions are total and never return these.

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    #[error("game is already over")]
    GameOver,

    #[error("it is not the player's turn")]
    NotUsersTurn,

    #[error("it is not AI's turn")]
    NotAisTurn,

    #[error("illegal move")]
    IllegalMove,

    /// A pass was requested while legal moves exist.
    #[error("cannot pass while legal moves exist")]
    MustMove,

    #[error("AI could not select a move")]
    NoMoveSelected,

    #[error("row/col out of range: ({row}, {col})")]
    OutOfRange { row: u8, col: u8 },

    #[error("invalid config: {0}")]
    Config(String),
}

pub type EngineResult<T> = Result<T, EngineError>;
