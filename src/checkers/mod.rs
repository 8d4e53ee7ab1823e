//! Checkers: diagonal steps, mandatory multi-jump captures, one-way promotion.

pub mod board;
pub mod eval;

use crate::ai::rules::{Evaluation, Rules, WhenStuck};
use crate::types::{GameKind, NUM_SQUARES, Position};
use board::{Board, CheckersMove, Color};

/// Plies without a capture before the game is drawn.
pub const QUIET_PLY_LIMIT: u32 = 40;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Checkers;

impl Rules for Checkers {
    type Board = Board;
    type Move = CheckersMove;
    type Side = Color;

    const KIND: GameKind = GameKind::Checkers;
    const USER: Color = Color::White;
    const AI: Color = Color::Black;
    const WHEN_STUCK: WhenStuck = WhenStuck::Loses;
    const QUIET_PLY_LIMIT: Option<u32> = Some(QUIET_PLY_LIMIT);

    fn initial() -> Board {
        Board::new()
    }

    fn opponent(side: Color) -> Color {
        side.opponent()
    }

    fn legal_moves(board: &Board, side: Color) -> Vec<CheckersMove> {
        board.legal_moves(side)
    }

    fn apply(board: &Board, mv: &CheckersMove) -> Board {
        board.with_move_applied(mv)
    }

    fn evaluate(board: &Board, perspective: Color) -> Evaluation {
        eval::evaluate(board, perspective)
    }

    fn affected_squares(mv: &CheckersMove) -> &[Position] {
        &mv.captures
    }

    fn is_progress(mv: &CheckersMove) -> bool {
        mv.is_capture()
    }

    fn count(board: &Board, side: Color) -> u8 {
        board.count(side)
    }

    fn cells(board: &Board) -> [u8; NUM_SQUARES] {
        board.to_array()
    }
}
