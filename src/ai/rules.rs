//! The capability every minigame provides to the search and session layers.

use std::fmt::Debug;

use crate::types::{GameKind, NUM_SQUARES, Position};

/// An assessment of a board from one side's perspective.
/// Higher values mean a more favorable board for that side.
pub type Evaluation = i32;

/// What happens when the side to move has no legal move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WhenStuck {
    /// The stuck side has lost (Checkers).
    Loses,
    /// The turn passes to the opponent (Reversi).
    Passes,
}

/// Defines the rules of a two-player, perfect-knowledge board game.
///
/// Boards are values: `apply` returns a fresh board and never touches its
/// input, so every search node owns an independent copy.
pub trait Rules: Sized + 'static {
    type Board: Clone + PartialEq + Debug + Send;
    type Move: Clone + PartialEq + Debug + Send;
    type Side: Copy + Eq + Debug + Send;

    const KIND: GameKind;
    /// The human side. Moves first.
    const USER: Self::Side;
    /// The engine's side, and the default maximizing side.
    const AI: Self::Side;
    const WHEN_STUCK: WhenStuck;
    /// Plies without progress after which the game is drawn.
    const QUIET_PLY_LIMIT: Option<u32> = None;

    fn initial() -> Self::Board;

    fn opponent(side: Self::Side) -> Self::Side;

    /// Every legal move for `side`, in a fixed generation order.
    fn legal_moves(board: &Self::Board, side: Self::Side) -> Vec<Self::Move>;

    /// Returns a new board with `mv` applied.
    fn apply(board: &Self::Board, mv: &Self::Move) -> Self::Board;

    /// Static score, positive when `perspective` is ahead.
    fn evaluate(board: &Self::Board, perspective: Self::Side) -> Evaluation;

    /// Opponent squares removed or converted by `mv`.
    fn affected_squares(mv: &Self::Move) -> &[Position];

    /// Reorders root moves before searching. Must be a stable reordering.
    fn order_root(_board: &Self::Board, _moves: &mut [Self::Move]) {}

    /// Whether `mv` resets the quiet-ply counter.
    fn is_progress(_mv: &Self::Move) -> bool {
        true
    }

    /// Pieces owned by `side`.
    fn count(board: &Self::Board, side: Self::Side) -> u8;

    /// Compact per-square codes, row-major.
    fn cells(board: &Self::Board) -> [u8; NUM_SQUARES];
}
