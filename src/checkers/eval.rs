use crate::ai::rules::Evaluation;
use crate::checkers::board::{Board, Color};
use crate::types::Position;

pub const MAN_VALUE: Evaluation = 100;
pub const KING_VALUE: Evaluation = 500;

/// The hunt bonus switches on once the opponent is down to this many pieces.
const PRESSURE_THRESHOLD: u8 = 2;
/// Largest Manhattan distance on an 8x8 board.
const PRESSURE_REACH: i32 = 14;
const PRESSURE_WEIGHT: i32 = 5;

/// Material balance from `perspective`, plus an endgame bonus pulling
/// `perspective`'s pieces toward the opponent's last few pieces.
///
/// The bonus is a step at the threshold, not a ramp.
pub fn evaluate(board: &Board, perspective: Color) -> Evaluation {
    let material: Evaluation = Position::all()
        .filter_map(|pos| board.at(pos))
        .map(|piece| {
            let value = if piece.is_king { KING_VALUE } else { MAN_VALUE };
            if piece.color == perspective { value } else { -value }
        })
        .sum();

    let opponent = perspective.opponent();
    if board.count(opponent) > PRESSURE_THRESHOLD {
        return material;
    }

    let hunters: Vec<Position> = board.pieces(perspective).map(|(pos, _)| pos).collect();
    let pressure: Evaluation = board
        .pieces(opponent)
        .flat_map(|(prey, _)| {
            hunters
                .iter()
                .map(move |&hunter| (PRESSURE_REACH - hunter.manhattan(prey)) * PRESSURE_WEIGHT)
        })
        .sum();

    material + pressure
}
