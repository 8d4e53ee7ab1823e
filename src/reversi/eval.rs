use crate::ai::rules::Evaluation;
use crate::reversi::board::{Board, Owner};
use crate::types::{BOARD_SIZE, Position};

/// Positional weights. Corners are prized; the squares that hand a corner to
/// the opponent are penalized.
#[rustfmt::skip]
pub const WEIGHTS: [[Evaluation; BOARD_SIZE]; BOARD_SIZE] = [
    [100, -20,  10,   5,   5,  10, -20, 100],
    [-20, -50,  -2,  -2,  -2,  -2, -50, -20],
    [ 10,  -2,   1,   1,   1,   1,  -2,  10],
    [  5,  -2,   1,   1,   1,   1,  -2,   5],
    [  5,  -2,   1,   1,   1,   1,  -2,   5],
    [ 10,  -2,   1,   1,   1,   1,  -2,  10],
    [-20, -50,  -2,  -2,  -2,  -2, -50, -20],
    [100, -20,  10,   5,   5,  10, -20, 100],
];

pub fn weight(pos: Position) -> Evaluation {
    if pos.is_valid() {
        WEIGHTS[pos.row as usize][pos.col as usize]
    } else {
        0
    }
}

/// Weighted stone balance from `perspective`.
pub fn evaluate(board: &Board, perspective: Owner) -> Evaluation {
    Position::all()
        .filter_map(|pos| board.at(pos).map(|owner| (pos, owner)))
        .map(|(pos, owner)| {
            if owner == perspective {
                weight(pos)
            } else {
                -weight(pos)
            }
        })
        .sum()
}
