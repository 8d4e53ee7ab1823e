//! Reversi: placements that flip every bounded run along the 8 rays.

pub mod board;
pub mod eval;

use crate::ai::rules::{Evaluation, Rules, WhenStuck};
use crate::types::{GameKind, NUM_SQUARES, Position};
use board::{Board, Owner, ReversiMove};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Reversi;

impl Rules for Reversi {
    type Board = Board;
    type Move = ReversiMove;
    type Side = Owner;

    const KIND: GameKind = GameKind::Reversi;
    const USER: Owner = Owner::User;
    const AI: Owner = Owner::Waifu;
    const WHEN_STUCK: WhenStuck = WhenStuck::Passes;

    fn initial() -> Board {
        Board::new()
    }

    fn opponent(side: Owner) -> Owner {
        side.opponent()
    }

    fn legal_moves(board: &Board, side: Owner) -> Vec<ReversiMove> {
        board.legal_moves(side)
    }

    fn apply(board: &Board, mv: &ReversiMove) -> Board {
        board.with_move_applied(mv)
    }

    fn evaluate(board: &Board, perspective: Owner) -> Evaluation {
        eval::evaluate(board, perspective)
    }

    fn affected_squares(mv: &ReversiMove) -> &[Position] {
        &mv.flips
    }

    /// Highest positional weight first; equal weights keep generation order.
    fn order_root(_board: &Board, moves: &mut [ReversiMove]) {
        moves.sort_by_key(|mv| std::cmp::Reverse(eval::weight(mv.position)));
    }

    fn count(board: &Board, side: Owner) -> u8 {
        board.count(side)
    }

    fn cells(board: &Board) -> [u8; NUM_SQUARES] {
        board.to_array()
    }
}
